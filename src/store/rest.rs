//! PostgREST-style remote table store
//!
//! Every operation is a single filtered request against one table, matching
//! the query surface the hosted backend exposes: `select=*` reads, `in.(..)`
//! and `eq.` filters, PATCH/DELETE mutations scoped by the same filters.

use reqwest::blocking::Client;
use serde_json::json;

use super::StockStore;
use crate::config::StoreConfig;
use crate::types::{
    DrinkType, Event, EventStatus, Floor, Fridge, FridgetrackError, LogEntry, NewLogEntry, Result,
};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FridgetrackError::Store(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    fn fetch_table<T: serde::de::DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let response = self
            .authorize(self.client.get(self.table_url(table)).query(&[("select", "*")]))
            .send()
            .map_err(|e| FridgetrackError::Store(format!("{table} fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| FridgetrackError::Store(format!("{table} fetch failed: {e}")))?;

        response
            .json()
            .map_err(|e| FridgetrackError::Store(format!("{table} parse error: {e}")))
    }

    fn in_filter(ids: &[String]) -> String {
        format!("in.({})", ids.join(","))
    }
}

impl StockStore for RestStore {
    fn fetch_events(&self) -> Result<Vec<Event>> {
        self.fetch_table("events")
    }

    fn fetch_floors(&self) -> Result<Vec<Floor>> {
        self.fetch_table("floors")
    }

    fn fetch_fridges(&self) -> Result<Vec<Fridge>> {
        self.fetch_table("fridges")
    }

    fn fetch_drink_types(&self) -> Result<Vec<DrinkType>> {
        self.fetch_table("drink_types")
    }

    fn fetch_log_entries(&self, event_ids: &[String]) -> Result<Vec<LogEntry>> {
        let response = self
            .authorize(
                self.client
                    .get(self.table_url("fridge_log_entries"))
                    .query(&[
                        ("select", "*"),
                        ("event_id", Self::in_filter(event_ids).as_str()),
                    ]),
            )
            .send()
            .map_err(|e| FridgetrackError::Store(format!("log fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| FridgetrackError::Store(format!("log fetch failed: {e}")))?;

        response
            .json()
            .map_err(|e| FridgetrackError::Store(format!("log parse error: {e}")))
    }

    fn insert_log_entry(&self, entry: NewLogEntry) -> Result<LogEntry> {
        let response = self
            .authorize(
                self.client
                    .post(self.table_url("fridge_log_entries"))
                    .header("Prefer", "return=representation")
                    .json(&vec![&entry]),
            )
            .send()
            .map_err(|e| FridgetrackError::Store(format!("log insert failed: {e}")))?
            .error_for_status()
            .map_err(|e| FridgetrackError::Store(format!("log insert failed: {e}")))?;

        let mut inserted: Vec<LogEntry> = response
            .json()
            .map_err(|e| FridgetrackError::Store(format!("log insert parse error: {e}")))?;
        inserted
            .pop()
            .ok_or_else(|| FridgetrackError::Store("log insert returned no row".into()))
    }

    fn update_log_amount(&self, entry_id: &str, user_id: &str, amount: u32) -> Result<()> {
        self.authorize(
            self.client
                .patch(self.table_url("fridge_log_entries"))
                .query(&[
                    ("id", format!("eq.{entry_id}")),
                    ("user_id", format!("eq.{user_id}")),
                ])
                .json(&json!({ "amount": amount })),
        )
        .send()
        .map_err(|e| FridgetrackError::Store(format!("log update failed: {e}")))?
        .error_for_status()
        .map_err(|e| FridgetrackError::Store(format!("log update failed: {e}")))?;
        Ok(())
    }

    fn delete_log_entry(&self, entry_id: &str, user_id: &str) -> Result<()> {
        self.authorize(
            self.client
                .delete(self.table_url("fridge_log_entries"))
                .query(&[
                    ("id", format!("eq.{entry_id}")),
                    ("user_id", format!("eq.{user_id}")),
                ]),
        )
        .send()
        .map_err(|e| FridgetrackError::Store(format!("log delete failed: {e}")))?
        .error_for_status()
        .map_err(|e| FridgetrackError::Store(format!("log delete failed: {e}")))?;
        Ok(())
    }

    fn update_event_status(&self, event_ids: &[String], status: EventStatus) -> Result<()> {
        self.authorize(
            self.client
                .patch(self.table_url("events"))
                .query(&[("id", Self::in_filter(event_ids))])
                .json(&json!({ "status": status })),
        )
        .send()
        .map_err(|e| FridgetrackError::Store(format!("event status update failed: {e}")))?
        .error_for_status()
        .map_err(|e| FridgetrackError::Store(format!("event status update failed: {e}")))?;
        Ok(())
    }
}

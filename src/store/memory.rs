//! In-memory store used by tests and local fixtures

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::StockStore;
use crate::types::{
    DrinkType, Event, EventStatus, Floor, Fridge, FridgetrackError, LogEntry, NewLogEntry, Result,
};

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    floors: Vec<Floor>,
    fridges: Vec<Fridge>,
    drinks: Vec<DrinkType>,
    logs: Vec<LogEntry>,
    next_id: u64,
    failing: bool,
}

/// `StockStore` over plain in-memory tables
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(
        events: Vec<Event>,
        floors: Vec<Floor>,
        fridges: Vec<Fridge>,
        drinks: Vec<DrinkType>,
    ) -> Self {
        Self {
            tables: Mutex::new(Tables {
                events,
                floors,
                fridges,
                drinks,
                logs: Vec::new(),
                next_id: 0,
                failing: false,
            }),
        }
    }

    /// Seed a pre-existing log row
    pub fn push_log(&self, entry: LogEntry) {
        self.guard().logs.push(entry);
    }

    /// When set, every operation fails with a store error (for testing the
    /// fetch-failure policy)
    pub fn set_failing(&self, failing: bool) {
        self.guard().failing = failing;
    }

    fn guard(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(tables: &Tables) -> Result<()> {
        if tables.failing {
            return Err(FridgetrackError::Store("simulated store failure".into()));
        }
        Ok(())
    }
}

impl StockStore for MemoryStore {
    fn fetch_events(&self) -> Result<Vec<Event>> {
        let tables = self.guard();
        Self::check(&tables)?;
        Ok(tables.events.clone())
    }

    fn fetch_floors(&self) -> Result<Vec<Floor>> {
        let tables = self.guard();
        Self::check(&tables)?;
        Ok(tables.floors.clone())
    }

    fn fetch_fridges(&self) -> Result<Vec<Fridge>> {
        let tables = self.guard();
        Self::check(&tables)?;
        Ok(tables.fridges.clone())
    }

    fn fetch_drink_types(&self) -> Result<Vec<DrinkType>> {
        let tables = self.guard();
        Self::check(&tables)?;
        Ok(tables.drinks.clone())
    }

    fn fetch_log_entries(&self, event_ids: &[String]) -> Result<Vec<LogEntry>> {
        let tables = self.guard();
        Self::check(&tables)?;
        Ok(tables
            .logs
            .iter()
            .filter(|log| event_ids.contains(&log.event_id))
            .cloned()
            .collect())
    }

    fn insert_log_entry(&self, entry: NewLogEntry) -> Result<LogEntry> {
        let mut tables = self.guard();
        Self::check(&tables)?;
        tables.next_id += 1;
        let stored = LogEntry {
            id: format!("log-{}", tables.next_id),
            event_id: entry.event_id,
            fridge_id: entry.fridge_id,
            drink_type_id: entry.drink_type_id,
            action_type: entry.action_type,
            amount: entry.amount,
            created_at: Utc::now(),
            user_id: entry.user_id,
        };
        tables.logs.push(stored.clone());
        Ok(stored)
    }

    fn update_log_amount(&self, entry_id: &str, user_id: &str, amount: u32) -> Result<()> {
        let mut tables = self.guard();
        Self::check(&tables)?;
        // Like the remote store, an unmatched filter is not an error
        if let Some(log) = tables
            .logs
            .iter_mut()
            .find(|log| log.id == entry_id && log.user_id == user_id)
        {
            log.amount = amount;
        }
        Ok(())
    }

    fn delete_log_entry(&self, entry_id: &str, user_id: &str) -> Result<()> {
        let mut tables = self.guard();
        Self::check(&tables)?;
        tables
            .logs
            .retain(|log| !(log.id == entry_id && log.user_id == user_id));
        Ok(())
    }

    fn update_event_status(&self, event_ids: &[String], status: EventStatus) -> Result<()> {
        let mut tables = self.guard();
        Self::check(&tables)?;
        for event in tables
            .events
            .iter_mut()
            .filter(|event| event_ids.contains(&event.id))
        {
            event.status = status;
        }
        Ok(())
    }
}

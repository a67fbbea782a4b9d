//! Refresh-cycle orchestration and the command surface consumed by the UI
//!
//! One refresh = one complete snapshot: fetch the scoped log batch, resolve,
//! aggregate, project. The derived rows are discarded and rebuilt wholesale;
//! there is no incremental path. Completed fetches are applied through a
//! ticket so a stale fetch finishing after a newer one cannot overwrite it.

use std::collections::BTreeMap;

use tracing::warn;

use crate::export::{csv, ReportDocument};
use crate::services::{Aggregator, FilterField, FilterState, LookupContext, Projector};
use crate::store::StockStore;
use crate::types::{AggregatedRow, LogEntry, ReportTotals};

/// Token tying a fetched batch to the refresh that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

pub struct ReportEngine<S> {
    store: S,
    lookups: LookupContext,
    rows: Vec<AggregatedRow>,
    filters: FilterState,
    issued_seq: u64,
    applied_seq: u64,
    status: String,
}

impl<S: StockStore> ReportEngine<S> {
    /// Build an engine, pulling the four lookup tables once. A lookup fetch
    /// failure leaves an empty context and a status message; never fatal.
    pub fn new(store: S) -> Self {
        let mut engine = Self {
            store,
            lookups: LookupContext::default(),
            rows: Vec::new(),
            filters: FilterState::default(),
            issued_seq: 0,
            applied_seq: 0,
            status: String::new(),
        };
        engine.reload_lookups();
        engine
    }

    /// Re-pull the lookup tables (after event close/reopen, or to pick up
    /// newly added fridges/drinks without restarting).
    pub fn reload_lookups(&mut self) {
        match LookupContext::fetch(&self.store) {
            Ok(ctx) => self.lookups = ctx,
            Err(e) => {
                warn!("lookup load failed: {e}");
                self.lookups = LookupContext::default();
                self.status = "Could not load lookup tables.".to_string();
            }
        }
    }

    pub fn lookups(&self) -> &LookupContext {
        &self.lookups
    }

    /// Start a refresh cycle; the returned ticket must accompany the batch.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued_seq += 1;
        RefreshTicket(self.issued_seq)
    }

    /// Apply a completed fetch. Returns false, changing nothing, when a
    /// batch with an equal or newer ticket has already been applied.
    pub fn apply_batch(&mut self, ticket: RefreshTicket, batch: Vec<LogEntry>) -> bool {
        if ticket.0 <= self.applied_seq {
            warn!(
                ticket = ticket.0,
                applied = self.applied_seq,
                "discarding stale refresh result"
            );
            return false;
        }
        self.applied_seq = ticket.0;
        self.filters.clear();
        self.rows = Aggregator::aggregate(&self.lookups, &batch);
        self.status.clear();
        true
    }

    /// Full synchronous refresh scoped to the selected events.
    ///
    /// A fetch failure surfaces as an empty report plus a human-readable
    /// status string; it is never propagated.
    pub fn refresh(&mut self, selected_event_ids: &[String]) {
        let ticket = self.begin_refresh();

        if selected_event_ids.is_empty() {
            self.apply_batch(ticket, Vec::new());
            self.status = "No events selected.".to_string();
            return;
        }

        match self.store.fetch_log_entries(selected_event_ids) {
            Ok(batch) => {
                self.apply_batch(ticket, batch);
            }
            Err(e) => {
                warn!("log batch fetch failed: {e}");
                self.apply_batch(ticket, Vec::new());
                self.status = "Could not load log entries.".to_string();
            }
        }
    }

    /// All rows from the last refresh
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Rows matching the active filters
    pub fn visible_rows(&self) -> Vec<AggregatedRow> {
        Projector::project(&self.rows, &self.filters)
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn totals(&self) -> ReportTotals {
        Projector::totals(&self.rows)
    }

    pub fn visible_totals(&self) -> ReportTotals {
        Projector::totals(&self.visible_rows())
    }

    // Breakdowns feed the chart renderers and are computed over the full
    // row set: clicking a chart element is what drives the filters.

    pub fn drink_breakdown(&self) -> BTreeMap<String, u64> {
        Projector::units_by_drink(&self.rows)
    }

    pub fn fridge_breakdown(&self) -> BTreeMap<String, u64> {
        Projector::units_by_fridge(&self.rows)
    }

    pub fn date_breakdown(&self) -> BTreeMap<String, u64> {
        Projector::units_by_date(&self.rows)
    }

    pub fn owner_breakdown(&self) -> BTreeMap<String, u64> {
        Projector::units_by_owner(&self.rows)
    }

    /// CSV over the currently visible subset
    pub fn export_csv(&self) -> String {
        csv::to_csv(&self.visible_rows())
    }

    /// Report document (for PDF rendering) over the currently visible subset
    pub fn export_report(&self) -> ReportDocument {
        ReportDocument::build(&self.visible_rows())
    }

    /// Short human-readable status from the last refresh; empty when fine
    pub fn status(&self) -> &str {
        &self.status
    }
}

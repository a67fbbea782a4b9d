//! Event close/reopen administration
//!
//! Closing flips the soft lock: runners can no longer edit or delete log
//! entries for the event, but its data keeps appearing in reports.

use crate::services::LookupContext;
use crate::store::StockStore;
use crate::types::{EventStatus, FridgetrackError, Result};

pub struct EventAdmin<S> {
    store: S,
}

impl<S: StockStore> EventAdmin<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Close every still-open event in the selection; already-closed events
    /// are left alone. Returns how many events were closed.
    pub fn close_events(&self, ctx: &LookupContext, event_ids: &[String]) -> Result<usize> {
        let open_ids: Vec<String> = event_ids
            .iter()
            .filter(|id| ctx.event(id).is_some_and(|e| !e.is_closed()))
            .cloned()
            .collect();

        if open_ids.is_empty() {
            return Ok(0);
        }

        self.store
            .update_event_status(&open_ids, EventStatus::Closed)?;
        Ok(open_ids.len())
    }

    /// Reopen one closed event
    pub fn reopen_event(&self, ctx: &LookupContext, event_id: &str) -> Result<()> {
        let event = ctx.event(event_id).ok_or_else(|| {
            FridgetrackError::Validation(format!("unknown event {event_id}"))
        })?;
        if !event.is_closed() {
            return Err(FridgetrackError::Validation(format!(
                "event {} is already open",
                event.id
            )));
        }
        self.store
            .update_event_status(&[event.id.clone()], EventStatus::Open)
    }
}

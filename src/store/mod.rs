//! External-store boundary
//!
//! The persistence layer is a remote table store reached over HTTP. The
//! aggregation core only sees this trait; tests run against `MemoryStore`.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::types::{DrinkType, Event, EventStatus, Floor, Fridge, LogEntry, NewLogEntry, Result};

/// Batch fetch and mutation operations against the remote tables
pub trait StockStore {
    /// Full current contents of the events table
    fn fetch_events(&self) -> Result<Vec<Event>>;

    fn fetch_floors(&self) -> Result<Vec<Floor>>;

    fn fetch_fridges(&self) -> Result<Vec<Fridge>>;

    fn fetch_drink_types(&self) -> Result<Vec<DrinkType>>;

    /// Log rows scoped to the given events (one batch per refresh)
    fn fetch_log_entries(&self, event_ids: &[String]) -> Result<Vec<LogEntry>>;

    /// Insert a runner submission; the store assigns id and created_at
    fn insert_log_entry(&self, entry: NewLogEntry) -> Result<LogEntry>;

    /// Amount-only update, scoped to the owning user
    fn update_log_amount(&self, entry_id: &str, user_id: &str, amount: u32) -> Result<()>;

    /// Delete, scoped to the owning user
    fn delete_log_entry(&self, entry_id: &str, user_id: &str) -> Result<()>;

    /// Batch status change backing event close/reopen
    fn update_event_status(&self, event_ids: &[String], status: EventStatus) -> Result<()>;
}

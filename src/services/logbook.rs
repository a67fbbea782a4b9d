//! Runner write path for log entries
//!
//! The closed-event soft lock and the ownership rule are enforced here, at
//! the mutation boundary. The aggregation core never checks them: closed
//! events stay in read-side analytics.

use crate::services::LookupContext;
use crate::store::StockStore;
use crate::types::{FridgetrackError, LogEntry, NewLogEntry, Result};

pub struct LogbookService<S> {
    store: S,
}

impl<S: StockStore> LogbookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and insert a runner submission. All three references must
    /// resolve and the parent event must still be open.
    pub fn submit(&self, ctx: &LookupContext, entry: NewLogEntry) -> Result<LogEntry> {
        let event = ctx.event(&entry.event_id).ok_or_else(|| {
            FridgetrackError::Validation(format!("unknown event {}", entry.event_id))
        })?;
        if ctx.fridge(&entry.fridge_id).is_none() {
            return Err(FridgetrackError::Validation(format!(
                "unknown fridge {}",
                entry.fridge_id
            )));
        }
        if ctx.drink(&entry.drink_type_id).is_none() {
            return Err(FridgetrackError::Validation(format!(
                "unknown drink type {}",
                entry.drink_type_id
            )));
        }
        if event.is_closed() {
            return Err(FridgetrackError::EventClosed(event.id.clone()));
        }
        self.store.insert_log_entry(entry)
    }

    /// Amount-only edit of an entry owned by `user_id`
    pub fn edit_amount(
        &self,
        ctx: &LookupContext,
        entry: &LogEntry,
        user_id: &str,
        new_amount: u32,
    ) -> Result<()> {
        self.check_mutable(ctx, entry, user_id)?;
        self.store.update_log_amount(&entry.id, user_id, new_amount)
    }

    pub fn delete(&self, ctx: &LookupContext, entry: &LogEntry, user_id: &str) -> Result<()> {
        self.check_mutable(ctx, entry, user_id)?;
        self.store.delete_log_entry(&entry.id, user_id)
    }

    fn check_mutable(&self, ctx: &LookupContext, entry: &LogEntry, user_id: &str) -> Result<()> {
        if entry.user_id != user_id {
            return Err(FridgetrackError::NotOwner(entry.id.clone()));
        }
        // Entries orphaned by a deleted event stay mutable for cleanup
        match ctx.event(&entry.event_id) {
            Some(event) if event.is_closed() => Err(FridgetrackError::EventClosed(event.id.clone())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{ActionType, DrinkType, Event, EventStatus, Floor, Fridge};

    fn make_ctx(status: EventStatus) -> LookupContext {
        LookupContext::new(
            vec![Event {
                id: "ev-1".into(),
                name: "Launch".into(),
                event_date: None,
                status,
                owned_by: None,
                owned_by_other: None,
            }],
            vec![Floor {
                id: "fl-1".into(),
                name: "Ground".into(),
            }],
            vec![Fridge {
                id: "fr-1".into(),
                name: "Lobby".into(),
                floor_id: "fl-1".into(),
            }],
            vec![DrinkType {
                id: "dr-1".into(),
                name: "Cola".into(),
                price_per_unit: Some(1.5),
                pfand_per_unit: None,
            }],
        )
    }

    fn make_submission() -> NewLogEntry {
        NewLogEntry {
            event_id: "ev-1".into(),
            fridge_id: "fr-1".into(),
            drink_type_id: "dr-1".into(),
            action_type: ActionType::Start,
            amount: 12,
            user_id: "user-1".into(),
        }
    }

    #[test]
    fn test_submit_inserts_and_returns_stored_entry() {
        let logbook = LogbookService::new(MemoryStore::new());
        let ctx = make_ctx(EventStatus::Open);

        let saved = logbook.submit(&ctx, make_submission()).unwrap();

        assert!(!saved.id.is_empty());
        assert_eq!(saved.amount, 12);
        assert_eq!(saved.user_id, "user-1");
    }

    #[test]
    fn test_submit_rejected_for_closed_event() {
        let logbook = LogbookService::new(MemoryStore::new());
        let ctx = make_ctx(EventStatus::Closed);

        let err = logbook.submit(&ctx, make_submission()).unwrap_err();

        assert!(matches!(err, FridgetrackError::EventClosed(_)));
    }

    #[test]
    fn test_submit_rejected_for_unknown_fridge() {
        let logbook = LogbookService::new(MemoryStore::new());
        let ctx = make_ctx(EventStatus::Open);
        let mut entry = make_submission();
        entry.fridge_id = "fr-gone".into();

        let err = logbook.submit(&ctx, entry).unwrap_err();

        assert!(matches!(err, FridgetrackError::Validation(_)));
    }

    #[test]
    fn test_edit_amount_requires_ownership() {
        let logbook = LogbookService::new(MemoryStore::new());
        let ctx = make_ctx(EventStatus::Open);
        let saved = logbook.submit(&ctx, make_submission()).unwrap();

        let err = logbook
            .edit_amount(&ctx, &saved, "someone-else", 20)
            .unwrap_err();

        assert!(matches!(err, FridgetrackError::NotOwner(_)));
    }

    #[test]
    fn test_edit_amount_updates_owned_entry() {
        let store = MemoryStore::new();
        let ctx = make_ctx(EventStatus::Open);
        let logbook = LogbookService::new(store);
        let saved = logbook.submit(&ctx, make_submission()).unwrap();

        logbook.edit_amount(&ctx, &saved, "user-1", 20).unwrap();

        let logs = logbook
            .store
            .fetch_log_entries(&["ev-1".to_string()])
            .unwrap();
        assert_eq!(logs[0].amount, 20);
    }

    #[test]
    fn test_delete_blocked_once_event_closes() {
        let logbook = LogbookService::new(MemoryStore::new());
        let open_ctx = make_ctx(EventStatus::Open);
        let saved = logbook.submit(&open_ctx, make_submission()).unwrap();

        let closed_ctx = make_ctx(EventStatus::Closed);
        let err = logbook.delete(&closed_ctx, &saved, "user-1").unwrap_err();

        assert!(matches!(err, FridgetrackError::EventClosed(_)));
    }

    #[test]
    fn test_delete_removes_owned_entry() {
        let logbook = LogbookService::new(MemoryStore::new());
        let ctx = make_ctx(EventStatus::Open);
        let saved = logbook.submit(&ctx, make_submission()).unwrap();

        logbook.delete(&ctx, &saved, "user-1").unwrap();

        let logs = logbook
            .store
            .fetch_log_entries(&["ev-1".to_string()])
            .unwrap();
        assert!(logs.is_empty());
    }
}

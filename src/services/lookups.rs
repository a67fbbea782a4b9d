//! Lookup resolution for raw log rows
//!
//! `LookupContext` is an immutable snapshot of the four lookup tables,
//! built once per refresh cycle and passed into the aggregator. A log row
//! whose references cannot all be resolved is excluded from aggregation;
//! referential integrity is owned by the external store, so a dangling
//! reference is a silent drop, not an error.

use std::collections::HashMap;

use tracing::debug;

use crate::store::StockStore;
use crate::types::{DrinkType, Event, Floor, Fridge, LogEntry, Result};

/// Immutable id-indexed snapshot of the lookup tables
#[derive(Debug, Default)]
pub struct LookupContext {
    events: HashMap<String, Event>,
    floors: HashMap<String, Floor>,
    fridges: HashMap<String, Fridge>,
    drinks: HashMap<String, DrinkType>,
}

/// A log row joined to its descriptive context
#[derive(Debug)]
pub struct ResolvedEntry<'a> {
    pub entry: &'a LogEntry,
    pub event: &'a Event,
    pub floor: &'a Floor,
    pub fridge: &'a Fridge,
    pub drink: &'a DrinkType,
}

impl LookupContext {
    pub fn new(
        events: Vec<Event>,
        floors: Vec<Floor>,
        fridges: Vec<Fridge>,
        drinks: Vec<DrinkType>,
    ) -> Self {
        Self {
            events: events.into_iter().map(|e| (e.id.clone(), e)).collect(),
            floors: floors.into_iter().map(|f| (f.id.clone(), f)).collect(),
            fridges: fridges.into_iter().map(|f| (f.id.clone(), f)).collect(),
            drinks: drinks.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Pull all four tables from the store in one go (once per page-load
    /// equivalent; log batches are fetched separately per refresh).
    pub fn fetch<S: StockStore>(store: &S) -> Result<Self> {
        Ok(Self::new(
            store.fetch_events()?,
            store.fetch_floors()?,
            store.fetch_fridges()?,
            store.fetch_drink_types()?,
        ))
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.get(id)
    }

    pub fn fridge(&self, id: &str) -> Option<&Fridge> {
        self.fridges.get(id)
    }

    pub fn drink(&self, id: &str) -> Option<&DrinkType> {
        self.drinks.get(id)
    }

    /// All known events, unordered
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Join a raw log row to its event, fridge, floor (via the fridge) and
    /// drink. Any dangling reference drops the row from aggregation.
    pub fn resolve<'a>(&'a self, entry: &'a LogEntry) -> Option<ResolvedEntry<'a>> {
        let event = self.events.get(&entry.event_id);
        let fridge = self.fridges.get(&entry.fridge_id);
        let drink = self.drinks.get(&entry.drink_type_id);
        let floor = fridge.and_then(|f| self.floors.get(&f.floor_id));

        match (event, floor, fridge, drink) {
            (Some(event), Some(floor), Some(fridge), Some(drink)) => Some(ResolvedEntry {
                entry,
                event,
                floor,
                fridge,
                drink,
            }),
            _ => {
                debug!(entry_id = %entry.id, "dropping log entry with dangling reference");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionType;
    use chrono::{TimeZone, Utc};

    fn make_ctx() -> LookupContext {
        LookupContext::new(
            vec![Event {
                id: "ev-1".into(),
                name: "Launch".into(),
                event_date: None,
                status: Default::default(),
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

    fn make_entry(event: &str, fridge: &str, drink: &str) -> LogEntry {
        LogEntry {
            id: "log-1".into(),
            event_id: event.into(),
            fridge_id: fridge.into(),
            drink_type_id: drink.into(),
            action_type: ActionType::Start,
            amount: 10,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            user_id: "user-1".into(),
        }
    }

    #[test]
    fn test_resolve_joins_all_four_lookups() {
        let ctx = make_ctx();
        let entry = make_entry("ev-1", "fr-1", "dr-1");

        let resolved = ctx.resolve(&entry).unwrap();

        assert_eq!(resolved.event.name, "Launch");
        assert_eq!(resolved.floor.name, "Ground");
        assert_eq!(resolved.fridge.name, "Lobby");
        assert_eq!(resolved.drink.name, "Cola");
    }

    #[test]
    fn test_resolve_dangling_fridge_drops_entry() {
        let ctx = make_ctx();
        let entry = make_entry("ev-1", "fr-gone", "dr-1");
        assert!(ctx.resolve(&entry).is_none());
    }

    #[test]
    fn test_resolve_dangling_floor_via_fridge_drops_entry() {
        let mut ctx = make_ctx();
        ctx.fridges.insert(
            "fr-2".into(),
            Fridge {
                id: "fr-2".into(),
                name: "Attic".into(),
                floor_id: "fl-gone".into(),
            },
        );
        let entry = make_entry("ev-1", "fr-2", "dr-1");
        assert!(ctx.resolve(&entry).is_none());
    }

    #[test]
    fn test_resolve_dangling_event_drops_entry() {
        let ctx = make_ctx();
        let entry = make_entry("ev-gone", "fr-1", "dr-1");
        assert!(ctx.resolve(&entry).is_none());
    }
}

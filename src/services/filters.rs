//! Filter state and projection over aggregated rows
//!
//! Filtering always runs over the derived rows from the last full refresh;
//! the start/restock/end reduction is never re-run on a filter change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AggregatedRow, ReportTotals};

/// Which row field an equality filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Drink,
    Fridge,
    Date,
    Owner,
}

/// Active equality constraints; unset fields impose no constraint.
///
/// `event_date` matches the row's date label (the parent event's date as
/// `YYYY-MM-DD`, or `"Unknown"`), so any breakdown label is a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub drink_name: Option<String>,
    pub fridge_name: Option<String>,
    pub event_date: Option<String>,
    pub owner_label: Option<String>,
}

impl FilterState {
    /// Replace the value for one field; setting the same field again simply
    /// overwrites the prior value.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            FilterField::Drink => self.drink_name = value,
            FilterField::Fridge => self.fridge_name = value,
            FilterField::Date => self.event_date = value,
            FilterField::Owner => self.owner_label = value,
        }
    }

    /// Reset every field to unset
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.drink_name.is_some()
            || self.fridge_name.is_some()
            || self.event_date.is_some()
            || self.owner_label.is_some()
    }

    /// Logical AND across all set filters
    pub fn matches(&self, row: &AggregatedRow) -> bool {
        if let Some(drink) = &self.drink_name {
            if row.drink_name != *drink {
                return false;
            }
        }
        if let Some(fridge) = &self.fridge_name {
            if row.fridge_name != *fridge {
                return false;
            }
        }
        if let Some(date) = &self.event_date {
            if row.date_label() != *date {
                return false;
            }
        }
        if let Some(owner) = &self.owner_label {
            if row.owner_label != *owner {
                return false;
            }
        }
        true
    }
}

/// Filter & totals projector over aggregated rows
pub struct Projector;

impl Projector {
    /// Subset of `rows` matching every set filter; the full list when no
    /// filter is set.
    pub fn project(rows: &[AggregatedRow], filters: &FilterState) -> Vec<AggregatedRow> {
        rows.iter().filter(|r| filters.matches(r)).cloned().collect()
    }

    /// Units and value summed over whatever row list is passed in, so it
    /// applies to the full set or a filtered subset interchangeably.
    pub fn totals(rows: &[AggregatedRow]) -> ReportTotals {
        let mut totals = ReportTotals::default();
        for row in rows {
            totals.total_units = totals.total_units.saturating_add(u64::from(row.units));
            totals.total_value += row.total_value;
        }
        totals
    }

    /// Total units per drink name
    pub fn units_by_drink(rows: &[AggregatedRow]) -> BTreeMap<String, u64> {
        Self::breakdown(rows, |r| r.drink_name.clone())
    }

    /// Total units per fridge name
    pub fn units_by_fridge(rows: &[AggregatedRow]) -> BTreeMap<String, u64> {
        Self::breakdown(rows, |r| r.fridge_name.clone())
    }

    /// Total units per event date label
    pub fn units_by_date(rows: &[AggregatedRow]) -> BTreeMap<String, u64> {
        Self::breakdown(rows, |r| r.date_label())
    }

    /// Total units per owner label
    pub fn units_by_owner(rows: &[AggregatedRow]) -> BTreeMap<String, u64> {
        Self::breakdown(rows, |r| r.owner_label.clone())
    }

    // Zero-unit rows contribute no label so chart legends stay clean
    fn breakdown(
        rows: &[AggregatedRow],
        key: impl Fn(&AggregatedRow) -> String,
    ) -> BTreeMap<String, u64> {
        let mut map = BTreeMap::new();
        for row in rows {
            if row.units == 0 {
                continue;
            }
            *map.entry(key(row)).or_insert(0u64) += u64::from(row.units);
        }
        map
    }
}

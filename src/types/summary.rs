//! Derived summary types, rebuilt wholesale on every refresh

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a group has been closed out with an End count.
///
/// Without an End entry the units column means "stock currently deployed",
/// not "units consumed"; callers branch on this flag instead of reading
/// the column blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockMode {
    Consumed,
    Stocked,
}

/// One summary row per (event, floor, fridge, drink) combination.
/// Exists only inside a refresh cycle; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedRow {
    pub event_id: String,
    pub floor_id: String,
    pub fridge_id: String,
    pub drink_type_id: String,

    pub event_name: String,
    /// The parent event's calendar date, never a log timestamp
    pub event_date: Option<NaiveDate>,
    pub owner_label: String,
    pub floor_name: String,
    pub fridge_name: String,
    pub drink_name: String,

    /// Amount of the chronologically earliest Start entry
    pub start_value: u32,
    /// Sum of all Restock amounts in the group
    pub restock_total: u32,
    /// Amount of the chronologically latest End entry, if any
    pub end_value: Option<u32>,

    pub mode: StockMode,
    /// Units consumed (`mode == Consumed`) or still deployed (`Stocked`)
    pub units: u32,
    /// 0.0 when the drink's price is unset
    pub price_per_unit: f64,
    pub pfand_per_unit: f64,
    pub total_value: f64,
    pub total_pfand: f64,
}

impl AggregatedRow {
    /// Date label shared by the date breakdown and the date filter, so a
    /// chart label always round-trips into a filter value.
    pub fn date_label(&self) -> String {
        match self.event_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "Unknown".to_string(),
        }
    }
}

/// Units and monetary value summed over a row list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportTotals {
    pub total_units: u64,
    pub total_value: f64,
}

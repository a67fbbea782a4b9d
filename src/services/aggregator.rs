//! Grouping and consumption calculation over resolved log batches

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::services::LookupContext;
use crate::types::{ActionType, AggregatedRow, DrinkType, Event, Floor, Fridge, LogEntry, StockMode};

/// Reduction state for one (event, fridge, drink) group
struct GroupAcc<'a> {
    event: &'a Event,
    floor: &'a Floor,
    fridge: &'a Fridge,
    drink: &'a DrinkType,
    first_start: Option<(DateTime<Utc>, u32)>,
    restock_total: u32,
    last_end: Option<(DateTime<Utc>, u32)>,
}

impl<'a> GroupAcc<'a> {
    fn push(&mut self, action: ActionType, at: DateTime<Utc>, amount: u32) {
        match action {
            ActionType::Start => match self.first_start {
                // Earliest Start wins; on a timestamp tie the first one seen stays
                Some((seen, _)) if seen <= at => {}
                _ => self.first_start = Some((at, amount)),
            },
            ActionType::Restock => {
                self.restock_total = self.restock_total.saturating_add(amount);
            }
            ActionType::End => match self.last_end {
                // Latest End wins; on a timestamp tie the first one seen stays
                Some((seen, _)) if seen >= at => {}
                _ => self.last_end = Some((at, amount)),
            },
        }
    }
}

/// Grouping & consumption calculator
pub struct Aggregator;

impl Aggregator {
    /// Reduce a raw log batch to one summary row per (event, fridge, drink)
    /// combination.
    ///
    /// Groups without a Start entry are excluded entirely: there is no
    /// baseline to compute against. Entries with dangling references are
    /// dropped row-by-row before grouping. Output order is fully
    /// deterministic for identical input batches.
    pub fn aggregate(ctx: &LookupContext, entries: &[LogEntry]) -> Vec<AggregatedRow> {
        if entries.is_empty() {
            return Vec::new();
        }

        let mut groups: HashMap<(&str, &str, &str), GroupAcc<'_>> = HashMap::new();

        for entry in entries {
            let Some(resolved) = ctx.resolve(entry) else {
                continue;
            };
            let key = (
                entry.event_id.as_str(),
                entry.fridge_id.as_str(),
                entry.drink_type_id.as_str(),
            );
            groups
                .entry(key)
                .or_insert_with(|| GroupAcc {
                    event: resolved.event,
                    floor: resolved.floor,
                    fridge: resolved.fridge,
                    drink: resolved.drink,
                    first_start: None,
                    restock_total: 0,
                    last_end: None,
                })
                .push(entry.action_type, entry.created_at, entry.amount);
        }

        let mut rows: Vec<AggregatedRow> = Vec::with_capacity(groups.len());

        for acc in groups.into_values() {
            let Some((_, start_value)) = acc.first_start else {
                // No baseline: Restock/End entries alone cannot be attributed
                continue;
            };
            let end_value = acc.last_end.map(|(_, amount)| amount);

            let (mode, units) = match end_value {
                Some(end) => {
                    let raw =
                        i64::from(start_value) + i64::from(acc.restock_total) - i64::from(end);
                    if raw < 0 {
                        warn!(
                            event = %acc.event.name,
                            fridge = %acc.fridge.name,
                            drink = %acc.drink.name,
                            raw,
                            "negative consumption clamped to zero (end higher than start + restock)"
                        );
                    }
                    (StockMode::Consumed, raw.max(0) as u32)
                }
                None => (
                    StockMode::Stocked,
                    start_value.saturating_add(acc.restock_total),
                ),
            };

            let price = acc.drink.price_per_unit.unwrap_or(0.0);
            let pfand = acc.drink.pfand_per_unit.unwrap_or(0.0);

            rows.push(AggregatedRow {
                event_id: acc.event.id.clone(),
                floor_id: acc.floor.id.clone(),
                fridge_id: acc.fridge.id.clone(),
                drink_type_id: acc.drink.id.clone(),
                event_name: acc.event.name.clone(),
                event_date: acc.event.event_date,
                owner_label: acc.event.owner_label(),
                floor_name: acc.floor.name.clone(),
                fridge_name: acc.fridge.name.clone(),
                drink_name: acc.drink.name.clone(),
                start_value,
                restock_total: acc.restock_total,
                end_value,
                mode,
                units,
                price_per_unit: price,
                pfand_per_unit: pfand,
                total_value: f64::from(units) * price,
                total_pfand: f64::from(units) * pfand,
            });
        }

        // Stable output order regardless of hash iteration
        rows.sort_by(|a, b| {
            let left = (
                &a.event_name,
                &a.floor_name,
                &a.fridge_name,
                &a.drink_name,
                &a.event_id,
                &a.fridge_id,
                &a.drink_type_id,
            );
            let right = (
                &b.event_name,
                &b.floor_name,
                &b.fridge_name,
                &b.drink_name,
                &b.event_id,
                &b.fridge_id,
                &b.drink_type_id,
            );
            left.cmp(&right)
        });
        rows
    }
}

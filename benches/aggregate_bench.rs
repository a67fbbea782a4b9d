//! Criterion benchmarks for the aggregation path

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use fridgetrack::services::{Aggregator, LookupContext};
use fridgetrack::types::{ActionType, DrinkType, Event, Floor, Fridge, LogEntry};

/// Build a synthetic venue plus a start/restock/end batch for every
/// (event, fridge, drink) combination
fn build_fixture(events: usize, fridges: usize, drinks: usize) -> (LookupContext, Vec<LogEntry>) {
    let event_rows: Vec<Event> = (0..events)
        .map(|i| Event {
            id: format!("ev-{i}"),
            name: format!("Event {i}"),
            event_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1 + (i % 28) as u32),
            status: Default::default(),
            owned_by: None,
            owned_by_other: None,
        })
        .collect();

    let floor_rows: Vec<Floor> = (0..3)
        .map(|i| Floor {
            id: format!("fl-{i}"),
            name: format!("Floor {i}"),
        })
        .collect();

    let fridge_rows: Vec<Fridge> = (0..fridges)
        .map(|i| Fridge {
            id: format!("fr-{i}"),
            name: format!("Fridge {i}"),
            floor_id: format!("fl-{}", i % 3),
        })
        .collect();

    let drink_rows: Vec<DrinkType> = (0..drinks)
        .map(|i| DrinkType {
            id: format!("dr-{i}"),
            name: format!("Drink {i}"),
            price_per_unit: Some(1.0 + (i % 5) as f64 * 0.5),
            pfand_per_unit: None,
        })
        .collect();

    let base = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    let mut entries = Vec::new();
    let mut seq = 0u64;

    for event in &event_rows {
        for fridge in &fridge_rows {
            for drink in &drink_rows {
                for (offset, (action, amount)) in [
                    (ActionType::Start, 24u32),
                    (ActionType::Restock, 12),
                    (ActionType::End, 9),
                ]
                .into_iter()
                .enumerate()
                {
                    seq += 1;
                    entries.push(LogEntry {
                        id: format!("log-{seq}"),
                        event_id: event.id.clone(),
                        fridge_id: fridge.id.clone(),
                        drink_type_id: drink.id.clone(),
                        action_type: action,
                        amount,
                        created_at: base + Duration::minutes(offset as i64),
                        user_id: "bench-user".into(),
                    });
                }
            }
        }
    }

    let ctx = LookupContext::new(event_rows, floor_rows, fridge_rows, drink_rows);
    (ctx, entries)
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for (events, fridges, drinks) in [(5, 10, 20), (20, 40, 50)] {
        let (ctx, entries) = build_fixture(events, fridges, drinks);
        group.throughput(Throughput::Elements(entries.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate", entries.len()),
            &entries,
            |b, entries| {
                b.iter(|| Aggregator::aggregate(black_box(&ctx), black_box(entries)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);

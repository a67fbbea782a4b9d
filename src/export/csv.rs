//! CSV serialization of the visible report

use crate::services::Projector;
use crate::types::AggregatedRow;

/// Column order fixed by the report consumers
const HEADER: &str = "event,floor,fridge,drink,units_consumed,price_per_unit,total_value";

/// Serialize rows plus a trailing TOTAL row
pub fn to_csv(rows: &[AggregatedRow]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for row in rows {
        let line = [
            escape(&row.event_name),
            escape(&row.floor_name),
            escape(&row.fridge_name),
            escape(&row.drink_name),
            row.units.to_string(),
            format!("{:.2}", row.price_per_unit),
            format!("{:.2}", row.total_value),
        ]
        .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    let totals = Projector::totals(rows);
    out.push_str(&format!(
        "TOTAL,,,,{},,{:.2}\n",
        totals.total_units, totals.total_value
    ));
    out
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

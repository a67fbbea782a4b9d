//! Report document handed to the PDF renderer
//!
//! The renderer itself is an external collaborator; this module builds the
//! tabular content and the summary line it consumes, and can render the
//! same content as plain text for the terminal.

use crate::services::Projector;
use crate::types::AggregatedRow;

/// Column headers, in render order
const COLUMNS: [&str; 8] = [
    "Event", "Floor", "Fridge", "Drink", "Units", "Price", "Value", "Owner",
];

/// Tabular report content plus the totals summary line
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub rows: Vec<[String; 8]>,
    pub total_units: u64,
    pub total_value: f64,
}

impl ReportDocument {
    pub fn build(rows: &[AggregatedRow]) -> Self {
        let body = rows
            .iter()
            .map(|r| {
                [
                    r.event_name.clone(),
                    r.floor_name.clone(),
                    r.fridge_name.clone(),
                    r.drink_name.clone(),
                    r.units.to_string(),
                    format!("{:.2}", r.price_per_unit),
                    format!("{:.2}", r.total_value),
                    r.owner_label.clone(),
                ]
            })
            .collect();

        let totals = Projector::totals(rows);
        Self {
            title: "Drinks Consumption Report".to_string(),
            rows: body,
            total_units: totals.total_units,
            total_value: totals.total_value,
        }
    }

    pub fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    /// Summary line printed under the table
    pub fn summary_line(&self) -> String {
        format!(
            "TOTAL UNITS: {}  TOTAL VALUE: €{:.2}",
            self.total_units, self.total_value
        )
    }

    /// Plain-text rendering with aligned columns
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push('\n');

        let header: Vec<String> = COLUMNS.iter().map(|c| (*c).to_string()).collect();
        out.push_str(&render_line(&header, &widths));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_line(row.as_slice(), &widths));
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.summary_line());
        out.push('\n');
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

//! Domain records mirrored from the remote table store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of stock count a runner logs for one (event, fridge, drink) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Baseline count at the start of tracking
    Start,
    /// Units added during the event
    Restock,
    /// Final count at close-out
    End,
}

/// Raw stock-count log row. Immutable once written, except through the
/// logbook write path while the parent event is still open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: String,
    pub event_id: String,
    pub fridge_id: String,
    pub drink_type_id: String,
    pub action_type: ActionType,
    /// Non-negative unit count, validated at the boundary
    pub amount: u32,
    pub created_at: DateTime<Utc>,
    /// Owning user, checked by the write path
    pub user_id: String,
}

/// Insert payload for a new log entry; the store assigns `id` and `created_at`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLogEntry {
    pub event_id: String,
    pub fridge_id: String,
    pub drink_type_id: String,
    pub action_type: ActionType,
    pub amount: u32,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EventStatus {
    #[default]
    Open,
    Closed,
}

/// Tracked event. `status` is a soft lock: Closed events reject log
/// mutations but always stay in read-side analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub owned_by_other: Option<String>,
}

impl Event {
    pub fn is_closed(&self) -> bool {
        self.status == EventStatus::Closed
    }

    /// Display label for the owning group.
    ///
    /// Blank or missing `owned_by` maps to "Unknown"; the literal "other"
    /// pulls the free-text detail from `owned_by_other`.
    pub fn owner_label(&self) -> String {
        let raw = self.owned_by.as_deref().unwrap_or("").trim();
        if raw.is_empty() {
            return "Unknown".to_string();
        }
        if raw.eq_ignore_ascii_case("other") {
            let detail = self
                .owned_by_other
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Unspecified");
            return format!("Other - {}", detail);
        }
        raw.to_string()
    }
}

/// Floor of the venue; fridges belong to exactly one floor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Floor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fridge {
    pub id: String,
    pub name: String,
    pub floor_id: String,
}

/// Drink catalogue row. `pfand_per_unit` is a deposit tracked in parallel
/// to the price; it never enters the consumption formula.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrinkType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub pfand_per_unit: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(owned_by: Option<&str>, owned_by_other: Option<&str>) -> Event {
        Event {
            id: "ev-1".into(),
            name: "Summer Party".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 21),
            status: EventStatus::Open,
            owned_by: owned_by.map(String::from),
            owned_by_other: owned_by_other.map(String::from),
        }
    }

    #[test]
    fn test_owner_label_missing_is_unknown() {
        assert_eq!(make_event(None, None).owner_label(), "Unknown");
        assert_eq!(make_event(Some("   "), None).owner_label(), "Unknown");
    }

    #[test]
    fn test_owner_label_other_uses_detail() {
        assert_eq!(
            make_event(Some("other"), Some("Catering GmbH")).owner_label(),
            "Other - Catering GmbH"
        );
        assert_eq!(
            make_event(Some("Other"), None).owner_label(),
            "Other - Unspecified"
        );
    }

    #[test]
    fn test_owner_label_passthrough_trimmed() {
        assert_eq!(make_event(Some(" Community "), None).owner_label(), "Community");
    }

    #[test]
    fn test_event_status_default_is_open() {
        // Rows from older store snapshots have no status column
        let json = r#"{"id":"ev-1","name":"Launch"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_closed());
    }

    #[test]
    fn test_action_type_matches_store_column_values() {
        // The store's action_type column holds lowercase strings
        assert_eq!(serde_json::to_string(&ActionType::Start).unwrap(), "\"start\"");
        assert_eq!(serde_json::to_string(&ActionType::Restock).unwrap(), "\"restock\"");
        assert_eq!(serde_json::to_string(&ActionType::End).unwrap(), "\"end\"");
    }
}

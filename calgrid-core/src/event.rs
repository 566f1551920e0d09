//! Calendar event types.
//!
//! `RawEvent` is what an event store hands back; `CalendarEvent` is the
//! read-only projection the screens work with.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::time::local_date;

/// A calendar event as shown in the month view and details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn local_start_date(&self, tz: &Tz) -> NaiveDate {
        local_date(tz, self.start_date)
    }

    pub fn local_end_date(&self, tz: &Tz) -> NaiveDate {
        local_date(tz, self.end_date)
    }

    /// Whether start and end fall on the same local day.
    pub fn spans_single_day(&self, tz: &Tz) -> bool {
        self.local_start_date(tz) == self.local_end_date(tz)
    }
}

/// An event record as returned by an event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub all_day: Option<bool>,
}

impl From<RawEvent> for CalendarEvent {
    fn from(raw: RawEvent) -> Self {
        CalendarEvent {
            id: raw.id,
            title: raw.title,
            start_date: raw.start_date,
            end_date: raw.end_date,
            description: non_empty(raw.notes),
            location: non_empty(raw.location),
            all_day: raw.all_day.unwrap_or(false),
        }
    }
}

/// A calendar inside an event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub title: String,
    /// Where the calendar comes from (account or store name).
    pub source: String,
    pub color: Option<String>,
    pub allows_modifications: bool,
}

/// A validated event ready to be written to a store.
///
/// Built by [`crate::draft::EventDraft::validate`]; the title is trimmed and
/// non-empty, `end_date > start_date`, and all-day events are already
/// normalized to local day boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub all_day: bool,
    pub notes: Option<String>,
    pub location: Option<String>,
    /// IANA name of the zone the event was entered in.
    pub time_zone: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw() -> RawEvent {
        RawEvent {
            id: "evt-1".to_string(),
            calendar_id: "personal".to_string(),
            title: "Dentist".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            notes: None,
            location: None,
            all_day: None,
        }
    }

    #[test]
    fn test_raw_event_defaults() {
        let event = CalendarEvent::from(raw());

        assert_eq!(event.description, None);
        assert_eq!(event.location, None);
        assert!(!event.all_day);
    }

    #[test]
    fn test_raw_event_maps_notes_to_description() {
        let mut record = raw();
        record.notes = Some("Bring the x-rays".to_string());
        record.location = Some(String::new());
        record.all_day = Some(true);

        let event = CalendarEvent::from(record);

        assert_eq!(event.description.as_deref(), Some("Bring the x-rays"));
        assert_eq!(event.location, None);
        assert!(event.all_day);
    }

    #[test]
    fn test_spans_single_day_uses_local_dates() {
        let tz: Tz = "Europe/Rome".parse().unwrap();
        let mut event = CalendarEvent::from(raw());
        assert!(event.spans_single_day(&tz));

        // 22:30 UTC on the 10th is already the 11th in Rome.
        event.end_date = Utc.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        assert!(!event.spans_single_day(&tz));
    }
}

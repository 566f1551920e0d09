//! The create-event form.
//!
//! `EventDraft` holds what the user has typed so far. Changing the start keeps
//! the end sensible, and `validate` turns the draft into a [`NewEvent`] or
//! reports what is wrong without touching any store.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::constants::{DEFAULT_EVENT_MINUTES, MAX_TITLE_CHARS};
use crate::event::NewEvent;
use crate::time::{end_of_day, local_date, start_of_day};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event title is required")]
    EmptyTitle,

    #[error("Event title is longer than {0} characters")]
    TitleTooLong(usize),

    #[error("End must be after start")]
    EndNotAfterStart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

impl EventDraft {
    /// Empty form for `selected`, one hour long.
    pub fn for_date(selected: DateTime<Utc>) -> Self {
        EventDraft {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            start: selected,
            end: selected + default_length(),
            all_day: false,
        }
    }

    pub fn reset(&mut self, selected: DateTime<Utc>) {
        *self = Self::for_date(selected);
    }

    /// Pick a new start date. The end moves to one hour later if it would
    /// no longer come after the start.
    pub fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = start;
        if self.end <= start {
            self.end = start + default_length();
        }
    }

    /// Pick a new start time. On a single-day draft the end follows one hour
    /// after it.
    pub fn set_start_time(&mut self, start: DateTime<Utc>, tz: &Tz) {
        let same_day = local_date(tz, self.start) == local_date(tz, self.end);
        self.start = start;
        if same_day {
            self.end = start + default_length();
        }
    }

    pub fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = end;
    }

    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
    }

    /// Check the draft and build the event to store.
    ///
    /// All-day events run from local midnight of the start day to local
    /// 23:59:59 of the end day.
    pub fn validate(&self, tz: &Tz) -> Result<NewEvent, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong(MAX_TITLE_CHARS));
        }
        if self.end <= self.start {
            return Err(ValidationError::EndNotAfterStart);
        }

        let (start_date, end_date) = if self.all_day {
            (
                start_of_day(tz, local_date(tz, self.start)),
                end_of_day(tz, local_date(tz, self.end)),
            )
        } else {
            (self.start, self.end)
        };

        Ok(NewEvent {
            title: title.to_string(),
            start_date,
            end_date,
            all_day: self.all_day,
            notes: trimmed(&self.description),
            location: trimmed(&self.location),
            time_zone: tz.name().to_string(),
        })
    }
}

fn default_length() -> Duration {
    Duration::minutes(DEFAULT_EVENT_MINUTES)
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rome() -> Tz {
        "Europe/Rome".parse().unwrap()
    }

    fn at(d: u32, h: u32, min: u32) -> DateTime<Utc> {
        rome()
            .with_ymd_and_hms(2024, 3, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn titled(title: &str) -> EventDraft {
        let mut draft = EventDraft::for_date(at(10, 9, 0));
        draft.title = title.to_string();
        draft
    }

    #[test]
    fn test_new_draft_lasts_one_hour() {
        let draft = EventDraft::for_date(at(10, 9, 0));
        assert_eq!(draft.end, at(10, 10, 0));
        assert!(!draft.all_day);
    }

    #[test]
    fn test_rejects_blank_title() {
        assert_eq!(titled("   ").validate(&rome()), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_rejects_long_title() {
        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            titled(&long).validate(&rome()),
            Err(ValidationError::TitleTooLong(MAX_TITLE_CHARS))
        );
    }

    #[test]
    fn test_rejects_end_not_after_start() {
        let mut draft = titled("Standup");
        draft.set_end(draft.start);
        assert_eq!(draft.validate(&rome()), Err(ValidationError::EndNotAfterStart));

        draft.set_end(draft.start - Duration::minutes(5));
        assert_eq!(draft.validate(&rome()), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn test_trims_fields() {
        let mut draft = titled("  Standup  ");
        draft.description = "  daily sync ".to_string();
        draft.location = "   ".to_string();

        let event = draft.validate(&rome()).unwrap();
        assert_eq!(event.title, "Standup");
        assert_eq!(event.notes.as_deref(), Some("daily sync"));
        assert_eq!(event.location, None);
        assert_eq!(event.time_zone, "Europe/Rome");
    }

    #[test]
    fn test_all_day_normalizes_to_day_bounds() {
        let mut draft = titled("Holiday");
        draft.set_all_day(true);
        draft.set_end(at(12, 15, 0));

        let event = draft.validate(&rome()).unwrap();
        assert_eq!(event.start_date, at(10, 0, 0));
        assert_eq!(event.end_date, at(12, 23, 59) + Duration::seconds(59));
        assert!(event.all_day);
    }

    #[test]
    fn test_set_start_pushes_end_forward() {
        let mut draft = titled("Lunch");
        draft.set_start(at(11, 12, 0));
        assert_eq!(draft.end, at(11, 13, 0));

        // An end that is still later stays put.
        draft.set_end(at(14, 9, 0));
        draft.set_start(at(12, 9, 0));
        assert_eq!(draft.end, at(14, 9, 0));
    }

    #[test]
    fn test_set_start_time_moves_end_on_same_day() {
        let mut draft = titled("Call");
        draft.set_start_time(at(10, 15, 30), &rome());
        assert_eq!(draft.end, at(10, 16, 30));

        draft.set_end(at(11, 9, 0));
        draft.set_start_time(at(10, 8, 0), &rome());
        assert_eq!(draft.end, at(11, 9, 0));
    }
}

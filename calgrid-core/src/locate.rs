//! Which events occur on a given day.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::event::CalendarEvent;
use crate::time::{end_of_day, local_date, start_of_day};

/// Events occurring on `date`, in input order.
///
/// An event occurs on a day when its span overlaps the local window
/// `00:00:00..=23:59:59`, or when its start falls on that local day (this
/// keeps zero-length and inverted spans visible on their start day).
/// Duplicates are passed through.
pub fn events_on_date<'a>(
    events: &'a [CalendarEvent],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    let day_start = start_of_day(tz, date);
    let day_end = end_of_day(tz, date);

    events
        .iter()
        .filter(|event| {
            (event.start_date <= day_end && event.end_date >= day_start)
                || local_date(tz, event.start_date) == date
        })
        .collect()
}

/// Number of events occurring on `date`.
pub fn count_events_on_date(events: &[CalendarEvent], date: NaiveDate, tz: &Tz) -> usize {
    events_on_date(events, date, tz).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn rome() -> Tz {
        "Europe/Rome".parse().unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        rome()
            .with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start_date: start,
            end_date: end,
            description: None,
            location: None,
            all_day: false,
        }
    }

    fn matching_days(events: &[CalendarEvent]) -> Vec<u32> {
        (1..=31)
            .filter(|d| !events_on_date(events, day(*d), &rome()).is_empty())
            .collect()
    }

    #[test]
    fn test_timed_event_only_on_its_day() {
        let events = vec![event("a", local(2024, 3, 10, 9, 0, 0), local(2024, 3, 10, 10, 0, 0))];
        assert_eq!(matching_days(&events), vec![10]);
    }

    #[test]
    fn test_all_day_event_only_on_its_day() {
        let mut all_day = event("a", local(2024, 3, 10, 0, 0, 0), local(2024, 3, 10, 23, 59, 59));
        all_day.all_day = true;
        assert_eq!(matching_days(&[all_day]), vec![10]);
    }

    #[test]
    fn test_multi_day_event_on_every_day() {
        let events = vec![event("a", local(2024, 3, 10, 9, 0, 0), local(2024, 3, 12, 18, 0, 0))];
        assert_eq!(matching_days(&events), vec![10, 11, 12]);
    }

    #[test]
    fn test_event_ending_at_midnight_touches_next_day() {
        // The inclusive overlap test counts an end instant equal to the next
        // day's start as occurring on that day.
        let events = vec![event("a", local(2024, 3, 10, 22, 0, 0), local(2024, 3, 11, 0, 0, 0))];
        assert_eq!(matching_days(&events), vec![10, 11]);
    }

    #[test]
    fn test_inverted_span_falls_back_to_start_day() {
        let events = vec![event("a", local(2024, 3, 10, 9, 0, 0), local(2024, 3, 9, 9, 0, 0))];
        assert_eq!(matching_days(&events), vec![10]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let a = event("a", local(2024, 3, 10, 12, 0, 0), local(2024, 3, 10, 13, 0, 0));
        let b = event("b", local(2024, 3, 10, 8, 0, 0), local(2024, 3, 10, 9, 0, 0));
        let events = vec![a.clone(), b, a];

        let ids: Vec<_> = events_on_date(&events, day(10), &rome())
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(ids, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let events = vec![
            event("a", local(2024, 3, 9, 9, 0, 0), local(2024, 3, 11, 9, 0, 0)),
            event("b", local(2024, 3, 10, 9, 0, 0), local(2024, 3, 10, 9, 0, 0)),
        ];
        let first = events_on_date(&events, day(10), &rome());
        let second = events_on_date(&events, day(10), &rome());
        assert_eq!(first, second);
        assert_eq!(count_events_on_date(&events, day(10), &rome()), 2);
    }

    #[test]
    fn test_day_window_follows_time_zone() {
        // 23:30 UTC on the 9th is 00:30 on the 10th in Rome.
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        let events = vec![event("a", start, start + chrono::Duration::minutes(15))];
        assert_eq!(matching_days(&events), vec![10]);
    }
}

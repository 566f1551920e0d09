//! Instant ranges used to query the event store.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::month::YearMonth;
use crate::time::start_of_day;

/// Half-open range of instants, `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange { from, to }
    }

    /// Local midnight of day 1 up to local midnight of day 1 of the next month.
    pub fn for_month(month: YearMonth, tz: &Tz) -> Option<Self> {
        let from = start_of_day(tz, month.first_day()?);
        let to = start_of_day(tz, month.next().first_day()?);
        Some(DateRange { from, to })
    }

    /// Whether an event spanning `start..end` touches this range.
    ///
    /// An event ending exactly at `from` still touches it, matching the
    /// inclusive day test in [`crate::locate`]. Zero-length events count
    /// when their start lies inside the range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return start >= self.from && start < self.to;
        }
        start < self.to && end >= self.from
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} .. {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_2024() -> DateRange {
        let tz: Tz = "Europe/Rome".parse().unwrap();
        DateRange::for_month(YearMonth::new(2024, 2).unwrap(), &tz).unwrap()
    }

    #[test]
    fn test_month_range_uses_local_midnights() {
        let range = march_2024();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap());
        // Rome switches to CEST on 2024-03-31, so April starts at 22:00 UTC.
        assert_eq!(range.to, Utc.with_ymd_and_hms(2024, 3, 31, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_overlap_includes_events_on_last_evening() {
        let range = march_2024();
        let start = Utc.with_ymd_and_hms(2024, 3, 31, 19, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        assert!(range.overlaps(start, end));
    }

    #[test]
    fn test_overlap_includes_event_ending_at_range_start() {
        let range = march_2024();
        let start = Utc.with_ymd_and_hms(2024, 2, 29, 21, 0, 0).unwrap();
        assert!(range.overlaps(start, range.from));
        assert!(!range.overlaps(start, range.from - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_overlap_excludes_event_starting_at_range_end() {
        let range = march_2024();
        assert!(!range.overlaps(range.to, range.to + chrono::Duration::hours(1)));
    }
}

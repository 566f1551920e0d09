//! Local wall-clock helpers for the fixed locale time zone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// fall into a DST gap move forward in 30 minute steps to the first wall
/// time that exists, so 02:30 on a spring-forward night becomes 03:00.
pub fn local_instant(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are at most a couple of hours; walk forward in 30 minute steps.
            let mut shifted = naive;
            for _ in 0..8 {
                shifted += Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&shifted).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            naive.and_utc()
        }
    }
}

/// Local midnight at the start of `date`.
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_instant(tz, date.and_time(NaiveTime::MIN))
}

/// Local 23:59:59 of `date`.
pub fn end_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    local_instant(tz, date.and_time(last_second))
}

/// Calendar date of an instant as seen in `tz`.
pub fn local_date(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Today's date in `tz`.
pub fn today(tz: &Tz) -> NaiveDate {
    local_date(tz, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_start_and_end_of_day_in_rome() {
        let tz: Tz = "Europe/Rome".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let start = start_of_day(&tz, date);
        let end = end_of_day(&tz, date);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 9, 23, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 10, 22, 59, 59).unwrap());
    }

    #[test]
    fn test_dst_gap_moves_forward() {
        let tz: Tz = "Europe/Rome".parse().unwrap();
        // 2024-03-31 02:30 does not exist in Rome.
        let naive = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();

        let instant = local_instant(&tz, naive).with_timezone(&tz);
        assert_eq!((instant.hour(), instant.minute()), (3, 0));

        let gap_start = naive.with_minute(0).unwrap();
        let instant = local_instant(&tz, gap_start).with_timezone(&tz);
        assert_eq!((instant.hour(), instant.minute()), (3, 0));
        assert_eq!(instant.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 3, 31, 1, 0, 0).unwrap());
    }
}

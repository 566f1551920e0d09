//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::event::RawEvent;
use crate::time::{end_of_day, local_instant, start_of_day};

/// Parse ICS content into a store record for `calendar_id`.
///
/// Floating times are read in `tz`. TZID times use their own zone, falling
/// back to `tz` when the zone is unknown. Date values make an all-day event
/// whose exclusive DTEND maps back to 23:59:59 of the last day.
pub fn parse_event(content: &str, calendar_id: &str, tz: &Tz) -> Option<RawEvent> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let id = vevent.find_prop("UID")?.val.to_string();
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "(No title)".to_string());

    let start = DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?;
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok());

    let (start_date, end_date, all_day) = match start {
        DatePerhapsTime::Date(first) => {
            let last = match end {
                Some(DatePerhapsTime::Date(exclusive)) => {
                    exclusive.pred_opt().filter(|d| *d >= first).unwrap_or(first)
                }
                _ => first,
            };
            (start_of_day(tz, first), end_of_day(tz, last), true)
        }
        DatePerhapsTime::DateTime(dt) => {
            let start_date = to_instant(dt, tz);
            let end_date = match end {
                Some(DatePerhapsTime::DateTime(dt)) => to_instant(dt, tz),
                Some(DatePerhapsTime::Date(d)) => date_end(d, tz),
                None => start_date,
            };
            (start_date, end_date, false)
        }
    };

    let notes = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    Some(RawEvent {
        id,
        calendar_id: calendar_id.to_string(),
        title,
        start_date,
        end_date,
        notes,
        location,
        all_day: Some(all_day),
    })
}

fn to_instant(dt: CalendarDateTime, tz: &Tz) -> DateTime<Utc> {
    match dt {
        CalendarDateTime::Utc(dt) => dt,
        CalendarDateTime::Floating(naive) => local_instant(tz, naive),
        CalendarDateTime::WithTimezone { date_time, tzid } => {
            let zone = tzid.parse::<Tz>().unwrap_or(*tz);
            local_instant(&zone, date_time)
        }
    }
}

fn date_end(exclusive: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    start_of_day(tz, exclusive)
}

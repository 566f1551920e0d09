//! ICS file generation.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{CalGridError, CalGridResult};
use crate::event::NewEvent;
use crate::time::local_date;

/// Generate .ics content for a new event stored under `uid`.
///
/// Timed events are written in UTC. All-day events are written as dates in
/// the event's own zone, with the exclusive DTEND RFC 5545 expects.
pub fn generate_ics(event: &NewEvent, uid: &str) -> CalGridResult<String> {
    let tz: Tz = event.time_zone.parse().map_err(|_| {
        CalGridError::IcsGenerate(format!("Unknown time zone '{}'", event.time_zone))
    })?;

    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&event.title);
    ics_event.add_property("DTSTAMP", utc_stamp(Utc::now()));

    if event.all_day {
        let first = local_date(&tz, event.start_date);
        let last = local_date(&tz, event.end_date);
        let exclusive_end = last.succ_opt().ok_or_else(|| {
            CalGridError::IcsGenerate(format!("No day after {} to end the event", last))
        })?;
        add_date_property(&mut ics_event, "DTSTART", first);
        add_date_property(&mut ics_event, "DTEND", exclusive_end);
    } else {
        ics_event.add_property("DTSTART", utc_stamp(event.start_date));
        ics_event.add_property("DTEND", utc_stamp(event.end_date));
    }

    if let Some(ref notes) = event.notes {
        ics_event.description(notes);
    }

    if let Some(ref location) = event.location {
        ics_event.location(location);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

fn utc_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with CALGRID
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CALGRID\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_new_event() -> NewEvent {
        NewEvent {
            title: "Team sync".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap(),
            all_day: false,
            notes: None,
            location: None,
            time_zone: "Europe/Rome".to_string(),
        }
    }

    #[test]
    fn test_timed_event_is_written_in_utc() {
        let ics = generate_ics(&make_new_event(), "abc@calgrid").unwrap();

        assert!(ics.contains("UID:abc@calgrid"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20250320T150000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250320T160000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:CALGRID"), "ICS:\n{}", ics);
        assert!(!ics.contains("CALSCALE"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_all_day_event_has_value_date_and_exclusive_end() {
        let tz: Tz = "Europe/Rome".parse().unwrap();
        let mut event = make_new_event();
        event.all_day = true;
        event.start_date = tz.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap().with_timezone(&Utc);
        event.end_date = tz.with_ymd_and_hms(2025, 3, 21, 23, 59, 59).unwrap().with_timezone(&Utc);

        let ics = generate_ics(&event, "abc@calgrid").unwrap();

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250320"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20250322"),
            "DTEND should be the day after the last day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_unknown_time_zone_is_an_error() {
        let mut event = make_new_event();
        event.time_zone = "Nowhere/Land".to_string();

        assert!(matches!(
            generate_ics(&event, "abc@calgrid"),
            Err(CalGridError::IcsGenerate(_))
        ));
    }
}

//! Locale-aware names and date/time text.
//!
//! Everything here is plain text. Colors are added in `render`.

use calgrid_core::config::Locale;
use calgrid_core::event::CalendarEvent;
use calgrid_core::grid::WeekStart;
use calgrid_core::month::YearMonth;
use calgrid_core::time::local_date;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

const WEEKDAYS_IT: [&str; 7] = ["lun", "mar", "mer", "gio", "ven", "sab", "dom"];
const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const WEEKDAYS_LONG_IT: [&str; 7] = [
    "lunedì",
    "martedì",
    "mercoledì",
    "giovedì",
    "venerdì",
    "sabato",
    "domenica",
];
const WEEKDAYS_LONG_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];
const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Fixed strings shown by the commands.
pub struct Labels {
    pub all_day: &'static str,
    pub events_for: &'static str,
    pub no_events: &'static str,
    pub add_first_event: &'static str,
    pub week: &'static str,
}

pub fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::It => Labels {
            all_day: "Tutto il giorno",
            events_for: "Eventi per",
            no_events: "Nessun evento per questa data",
            add_first_event: "Aggiungi il primo evento con `calgrid new`",
            week: "Sett",
        },
        Locale::En => Labels {
            all_day: "All day",
            events_for: "Events for",
            no_events: "No events for this date",
            add_first_event: "Add the first event with `calgrid new`",
            week: "Wk",
        },
    }
}

pub fn weekday_short(locale: Locale, weekday: Weekday) -> &'static str {
    let index = weekday.num_days_from_monday() as usize;
    match locale {
        Locale::It => WEEKDAYS_IT[index],
        Locale::En => WEEKDAYS_EN[index],
    }
}

fn weekday_long(locale: Locale, weekday: Weekday) -> &'static str {
    let index = weekday.num_days_from_monday() as usize;
    match locale {
        Locale::It => WEEKDAYS_LONG_IT[index],
        Locale::En => WEEKDAYS_LONG_EN[index],
    }
}

/// Month name for a 1-based month number.
pub fn month_name(locale: Locale, month: u32) -> &'static str {
    let index = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::It => MONTHS_IT[index],
        Locale::En => MONTHS_EN[index],
    }
}

/// Grid header: seven short weekday names starting at `week_start`.
pub fn weekday_header(locale: Locale, week_start: WeekStart) -> Vec<&'static str> {
    let mut day = week_start.weekday();
    let mut header = Vec::with_capacity(7);
    for _ in 0..7 {
        header.push(weekday_short(locale, day));
        day = day.succ();
    }
    header
}

/// "marzo 2024" / "March 2024"
pub fn month_title(locale: Locale, month: YearMonth) -> String {
    format!("{} {}", month_name(locale, month.month()), month.year())
}

/// "domenica 10 marzo 2024" / "Sunday, March 10, 2024"
pub fn long_date(locale: Locale, date: NaiveDate) -> String {
    let weekday = weekday_long(locale, date.weekday());
    let month = month_name(locale, date.month());
    match locale {
        Locale::It => format!("{} {} {} {}", weekday, date.day(), month, date.year()),
        Locale::En => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
    }
}

/// "domenica 10 marzo" / "Sunday, March 10"
pub fn day_heading(locale: Locale, date: NaiveDate) -> String {
    let weekday = weekday_long(locale, date.weekday());
    let month = month_name(locale, date.month());
    match locale {
        Locale::It => format!("{} {} {}", weekday, date.day(), month),
        Locale::En => format!("{}, {} {}", weekday, month, date.day()),
    }
}

/// 24-hour "HH:MM" in the calendar time zone.
pub fn time_of_day(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%H:%M").to_string()
}

/// Time column of the day list: "09:00 - 10:00" or the all-day label.
pub fn time_span(locale: Locale, event: &CalendarEvent, tz: &Tz) -> String {
    if event.all_day {
        labels(locale).all_day.to_string()
    } else {
        format!(
            "{} - {}",
            time_of_day(event.start_date, tz),
            time_of_day(event.end_date, tz)
        )
    }
}

/// Date and time lines of the details view.
///
/// Same-day and multi-day events differ, as do all-day and timed ones.
pub fn event_when(locale: Locale, event: &CalendarEvent, tz: &Tz) -> String {
    let start_day = local_date(tz, event.start_date);
    let end_day = local_date(tz, event.end_date);
    let all_day = labels(locale).all_day;

    match (event.all_day, start_day == end_day) {
        (true, true) => format!("{} - {}", long_date(locale, start_day), all_day),
        (true, false) => format!(
            "{} - {} ({})",
            long_date(locale, start_day),
            long_date(locale, end_day),
            all_day
        ),
        (false, true) => format!(
            "{}\n{} - {}",
            long_date(locale, start_day),
            time_of_day(event.start_date, tz),
            time_of_day(event.end_date, tz)
        ),
        (false, false) => format!(
            "{} {}\n{} {}",
            long_date(locale, start_day),
            time_of_day(event.start_date, tz),
            long_date(locale, end_day),
            time_of_day(event.end_date, tz)
        ),
    }
}

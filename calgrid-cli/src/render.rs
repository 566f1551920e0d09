//! Colored terminal rendering for calgrid types.

use calgrid_core::config::Locale;
use calgrid_core::constants::{DAYS_IN_WEEK, MAX_DAY_INDICATORS};
use calgrid_core::event::{Calendar, CalendarEvent};
use calgrid_core::notice::Notice;
use calgrid_core::screen::{CalendarScreen, DayView};
use calgrid_core::store::{EventStore, Permission};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use crate::format::{self, labels};

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 6;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Calendar {
    fn render(&self) -> String {
        let tag = if self.allows_modifications {
            "writable".green().to_string()
        } else {
            "read-only".yellow().to_string()
        };
        format!("📅 {} {} {}", self.title, format!("({})", self.id).dimmed(), tag)
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        if self.is_error() {
            format!("✗ {}", self.message).red().to_string()
        } else {
            format!("✓ {}", self.message).green().to_string()
        }
    }
}

impl Render for Permission {
    fn render(&self) -> String {
        match self {
            Permission::Granted => self.to_string().green().to_string(),
            Permission::Denied => self.to_string().red().to_string(),
            Permission::Undetermined => self.to_string().yellow().to_string(),
        }
    }
}

/// Event markers under a day number: one dot per event, at most three, then "+N".
pub fn day_indicator(count: usize) -> String {
    let dots = "•".repeat(count.min(MAX_DAY_INDICATORS));
    if count > MAX_DAY_INDICATORS {
        format!("{}+{}", dots, count - MAX_DAY_INDICATORS)
    } else {
        dots
    }
}

fn pad(text: &str) -> String {
    format!("{:^width$}", text, width = CELL_WIDTH)
}

/// The month grid: title, weekday header, then one number row and one
/// indicator row per week.
pub fn render_month<S: EventStore>(screen: &CalendarScreen<S>, locale: Locale) -> String {
    let grid = screen.month_grid();
    let views = screen.grid();
    let show_week_numbers = screen.preferences().show_week_numbers;
    let week_numbers = grid.iso_week_numbers();
    let gutter = if show_week_numbers { 5 } else { 0 };

    let mut lines = Vec::new();
    let title = format::month_title(locale, screen.visible_month());
    lines.push(format!(
        "{:gutter$}{}",
        "",
        format!("{:^width$}", title, width = CELL_WIDTH * DAYS_IN_WEEK).bold(),
        gutter = gutter
    ));

    let mut header = String::new();
    if show_week_numbers {
        header.push_str(&format!("{:<5}", labels(locale).week).dimmed().to_string());
    }
    for name in format::weekday_header(locale, grid.week_start()) {
        header.push_str(&pad(name).dimmed().to_string());
    }
    lines.push(header);

    for (row, week) in views.chunks(DAYS_IN_WEEK).enumerate() {
        let mut numbers = String::new();
        let mut markers = String::new();

        if show_week_numbers {
            let number = week_numbers.get(row).copied().unwrap_or_default();
            numbers.push_str(&format!("{:<5}", number).dimmed().to_string());
            markers.push_str(&" ".repeat(5));
        }

        for cell in week {
            match cell {
                DayView::Blank => {
                    numbers.push_str(&pad(""));
                    markers.push_str(&pad(""));
                }
                DayView::Day {
                    date,
                    is_today,
                    is_selected,
                    event_count,
                } => {
                    let day = pad(&date.day().to_string());
                    let day = if *is_selected {
                        day.reversed().to_string()
                    } else if *is_today {
                        day.cyan().bold().to_string()
                    } else {
                        day
                    };
                    numbers.push_str(&day);
                    markers.push_str(&pad(&day_indicator(*event_count)).magenta().to_string());
                }
            }
        }

        lines.push(numbers);
        lines.push(markers);
    }

    lines.join("\n")
}

/// Heading and event list for one day.
pub fn render_day(locale: Locale, date: NaiveDate, events: &[&CalendarEvent], tz: &Tz) -> String {
    let text = labels(locale);
    let mut lines = vec![
        format!("{} {}", text.events_for, format::day_heading(locale, date))
            .bold()
            .to_string(),
    ];

    if events.is_empty() {
        lines.push(format!("  {}", text.no_events).dimmed().to_string());
        lines.push(format!("  {}", text.add_first_event).dimmed().to_string());
        return lines.join("\n");
    }

    for event in events {
        let when = format::time_span(locale, event, tz);
        let when = if event.all_day {
            when.yellow().to_string()
        } else {
            when.dimmed().to_string()
        };
        lines.push(format!("  {} {}", event.title.bold(), when));
        if let Some(ref description) = event.description {
            lines.push(format!("    {}", description));
        }
        if let Some(ref location) = event.location {
            lines.push(format!("    📍 {}", location).dimmed().to_string());
        }
        lines.push(format!("    {}", event.id).dimmed().to_string());
    }

    lines.join("\n")
}

/// Full details of one event.
pub fn render_details(locale: Locale, event: &CalendarEvent, tz: &Tz) -> String {
    let mut lines = vec![event.title.bold().to_string()];
    lines.extend(format::event_when(locale, event, tz).lines().map(|l| format!("  {}", l)));
    if let Some(ref location) = event.location {
        lines.push(format!("  📍 {}", location));
    }
    if let Some(ref description) = event.description {
        lines.push(String::new());
        lines.extend(description.lines().map(|l| format!("  {}", l)));
    }
    lines.push(format!("  {}", event.id).dimmed().to_string());
    lines.join("\n")
}

pub fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| n.render())
        .collect::<Vec<_>>()
        .join("\n")
}

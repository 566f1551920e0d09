use anyhow::{Result, bail};
use calgrid_core::draft::EventDraft;
use calgrid_core::screen::CalendarScreen;
use calgrid_core::store::EventStore;
use calgrid_core::time::{end_of_day, local_date, local_instant, start_of_day};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use super::{App, ask_for_access, ensure_permission, finish};

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// A parsed start or end: a whole day, or a local date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum When {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl When {
    /// As a start: a whole day begins at local midnight.
    fn instant(&self, tz: &Tz) -> DateTime<Utc> {
        match self {
            When::Date(date) => start_of_day(tz, *date),
            When::DateTime(instant) => *instant,
        }
    }

    /// As an end: a whole day runs to its last second.
    fn end_instant(&self, tz: &Tz) -> DateTime<Utc> {
        match self {
            When::Date(date) => end_of_day(tz, *date),
            When::DateTime(instant) => *instant,
        }
    }
}

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse "YYYY-MM-DD", "YYYY-MM-DD HH:MM" or a bare "HH:MM" on `day`.
fn parse_when(input: &str, tz: &Tz, day: NaiveDate) -> Result<When> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(When::Date(date));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(When::DateTime(local_instant(tz, naive)));
        }
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return Ok(When::DateTime(local_instant(tz, day.and_time(time))));
    }

    bail!(
        "Could not parse date/time: \"{}\" (expected YYYY-MM-DD, YYYY-MM-DD HH:MM or HH:MM)",
        input
    )
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry(prompt: &str, default: String, tz: &Tz, day: NaiveDate) -> Result<When> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.clone())
            .interact_text()?;
        match parse_when(&input, tz, day) {
            Ok(when) => return Ok(when),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok((!value.trim().is_empty()).then_some(value))
}

fn editable(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Fill a draft from prompts, starting from the screen's default for the
/// selected day.
pub fn prompt_draft<S: EventStore>(screen: &CalendarScreen<S>) -> Result<EventDraft> {
    let tz = *screen.tz();
    let mut draft = screen.new_draft(Utc::now());

    draft.title = Input::new().with_prompt("  Title").interact_text()?;

    let all_day = Confirm::new()
        .with_prompt("  All day?")
        .default(false)
        .interact()?;
    draft.set_all_day(all_day);

    let start = prompt_with_retry(
        "  Starts",
        editable(draft.start, &tz),
        &tz,
        screen.selected_date(),
    )?;
    draft.set_start_time(start.instant(&tz), &tz);

    let end = prompt_with_retry(
        "  Ends",
        editable(draft.end, &tz),
        &tz,
        local_date(&tz, draft.start),
    )?;
    draft.set_end(end.end_instant(&tz));

    if let Some(location) = prompt_optional("  Where? (skip)")? {
        draft.location = location;
    }
    if let Some(description) = prompt_optional("  Notes (skip)")? {
        draft.description = description;
    }

    Ok(draft)
}

/// Draft for a non-interactive create. A date-only start makes an all-day
/// event and a date-only end covers that whole day.
fn draft_from_args(title: String, start: When, args: &NewArgs, tz: &Tz) -> Result<EventDraft> {
    let mut draft = EventDraft::for_date(start.instant(tz));
    draft.title = title;
    if args.all_day || matches!(start, When::Date(_)) {
        draft.set_all_day(true);
    }
    if let Some(ref end) = args.end {
        let end = parse_when(end, tz, local_date(tz, draft.start))?;
        draft.set_end(end.end_instant(tz));
    }
    draft.description = args.description.clone().unwrap_or_default();
    draft.location = args.location.clone().unwrap_or_default();
    Ok(draft)
}

pub async fn run(app: &App, args: NewArgs) -> Result<()> {
    let tz = app.tz;
    let today = calgrid_core::time::today(&tz);
    let mut screen = app.screen();

    let start = args
        .start
        .as_deref()
        .map(|s| parse_when(s, &tz, today))
        .transpose()?;

    if let Some(start) = start {
        screen.jump_to(local_date(&tz, start.instant(&tz))).await;
    }
    app.open(&mut screen).await;

    if !ensure_permission(&mut screen, ask_for_access).await? {
        bail!("Calendar access is required to add events. Grant it with `calgrid permission --request`.");
    }

    let draft = if args.title.is_none() && start.is_none() {
        prompt_draft(&screen)?
    } else {
        let title = match args.title.clone() {
            Some(title) => title,
            None => Input::new().with_prompt("  Title").interact_text()?,
        };

        let start = match start {
            Some(start) => start,
            None => prompt_with_retry(
                "  When?",
                editable(screen.new_draft(Utc::now()).start, &tz),
                &tz,
                screen.selected_date(),
            )?,
        };

        draft_from_args(title, start, &args, &tz)?
    };

    let result = screen.add_event(&draft).await;
    let id = finish(&mut screen, result)?;
    println!("{}", format!("  {}", id).dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rome() -> Tz {
        "Europe/Rome".parse().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn rome_at(h: u32, m: u32) -> DateTime<Utc> {
        rome()
            .with_ymd_and_hms(2024, 3, 10, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn parse_date_only_is_whole_day() {
        assert_eq!(
            parse_when("2024-03-20", &rome(), day()).unwrap(),
            When::Date(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
        );
    }

    #[test]
    fn parse_date_time_is_local() {
        let expected = When::DateTime(rome_at(15, 30));
        assert_eq!(parse_when("2024-03-10 15:30", &rome(), day()).unwrap(), expected);
        assert_eq!(parse_when("2024-03-10T15:30", &rome(), day()).unwrap(), expected);
    }

    #[test]
    fn parse_bare_time_uses_given_day() {
        assert_eq!(
            parse_when(" 09:15 ", &rome(), day()).unwrap(),
            When::DateTime(rome_at(9, 15))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_when("next friday", &rome(), day()).is_err());
        assert!(parse_when("2024-13-01", &rome(), day()).is_err());
    }

    #[test]
    fn whole_day_starts_at_local_midnight() {
        assert_eq!(When::Date(day()).instant(&rome()), rome_at(0, 0));
    }

    fn args(end: Option<&str>) -> NewArgs {
        NewArgs {
            title: None,
            start: None,
            end: end.map(str::to_string),
            all_day: false,
            description: None,
            location: Some(" Office ".to_string()),
        }
    }

    #[test]
    fn whole_day_end_covers_the_day() {
        assert_eq!(
            When::Date(day()).end_instant(&rome()),
            rome_at(23, 59) + chrono::Duration::seconds(59)
        );
        assert_eq!(When::DateTime(rome_at(9, 0)).end_instant(&rome()), rome_at(9, 0));
    }

    #[test]
    fn single_day_all_day_event_with_explicit_end() {
        let tz = rome();
        let start = parse_when("2024-03-10", &tz, day()).unwrap();
        let draft =
            draft_from_args("Holiday".to_string(), start, &args(Some("2024-03-10")), &tz).unwrap();

        let event = draft.validate(&tz).unwrap();
        assert!(event.all_day);
        assert_eq!(event.start_date, rome_at(0, 0));
        assert_eq!(event.end_date, rome_at(23, 59) + chrono::Duration::seconds(59));
        assert_eq!(event.location.as_deref(), Some("Office"));
    }

    #[test]
    fn timed_start_with_bare_end_time() {
        let tz = rome();
        let start = parse_when("2024-03-10 09:00", &tz, day()).unwrap();
        let draft =
            draft_from_args("Dentist".to_string(), start, &args(Some("10:30")), &tz).unwrap();

        let event = draft.validate(&tz).unwrap();
        assert!(!event.all_day);
        assert_eq!(event.start_date, rome_at(9, 0));
        assert_eq!(event.end_date, rome_at(10, 30));
    }

    #[test]
    fn date_only_start_without_end_is_one_day() {
        let tz = rome();
        let start = parse_when("2024-03-10", &tz, day()).unwrap();
        let draft = draft_from_args("Holiday".to_string(), start, &args(None), &tz).unwrap();

        let event = draft.validate(&tz).unwrap();
        assert_eq!(event.end_date, rome_at(23, 59) + chrono::Duration::seconds(59));
    }
}

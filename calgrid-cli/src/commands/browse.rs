use anyhow::Result;
use calgrid_core::config::Locale;
use calgrid_core::month::YearMonth;
use calgrid_core::navigation::Direction;
use calgrid_core::time::today;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use tracing::debug;

use super::{App, ask_for_access, ensure_permission, print_notices, print_screen};
use crate::render::render_details;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PrevMonth,
    NextMonth,
    Today,
    SelectDate,
    ShowEvent,
    AddEvent,
    Refresh,
    Quit,
}

const ACTIONS: [Action; 8] = [
    Action::PrevMonth,
    Action::NextMonth,
    Action::Today,
    Action::SelectDate,
    Action::ShowEvent,
    Action::AddEvent,
    Action::Refresh,
    Action::Quit,
];

fn action_label(locale: Locale, action: Action) -> &'static str {
    match (locale, action) {
        (Locale::It, Action::PrevMonth) => "← Mese precedente",
        (Locale::It, Action::NextMonth) => "→ Mese successivo",
        (Locale::It, Action::Today) => "Oggi",
        (Locale::It, Action::SelectDate) => "Seleziona giorno",
        (Locale::It, Action::ShowEvent) => "Dettagli evento",
        (Locale::It, Action::AddEvent) => "Aggiungi evento",
        (Locale::It, Action::Refresh) => "Aggiorna",
        (Locale::It, Action::Quit) => "Esci",
        (Locale::En, Action::PrevMonth) => "← Previous month",
        (Locale::En, Action::NextMonth) => "→ Next month",
        (Locale::En, Action::Today) => "Today",
        (Locale::En, Action::SelectDate) => "Select day",
        (Locale::En, Action::ShowEvent) => "Event details",
        (Locale::En, Action::AddEvent) => "Add event",
        (Locale::En, Action::Refresh) => "Refresh",
        (Locale::En, Action::Quit) => "Quit",
    }
}

/// A day of the visible month ("14") or any date ("2024-03-14").
fn parse_day(input: &str, month: YearMonth) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    let day: u32 = input.parse().ok()?;
    NaiveDate::from_ymd_opt(month.year(), month.month(), day)
}

pub async fn run(app: &App) -> Result<()> {
    let locale = app.locale();
    let mut screen = app.screen();
    app.open(&mut screen).await;

    let items: Vec<&str> = ACTIONS.iter().map(|a| action_label(locale, *a)).collect();
    let mut last = 1;

    loop {
        println!();
        print_screen(&mut screen, locale);
        println!();

        let selection = Select::new().items(&items).default(last).interact()?;
        last = selection;

        match ACTIONS[selection] {
            Action::PrevMonth => screen.navigate_month(Direction::Prev).await,
            Action::NextMonth => screen.navigate_month(Direction::Next).await,
            Action::Today => screen.go_to_today(today(&app.tz)).await,
            Action::SelectDate => {
                let input: String = Input::new().with_prompt("  Day").interact_text()?;
                match parse_day(&input, screen.visible_month()) {
                    Some(date) => screen.select_date(date).await,
                    None => eprintln!("  {}", format!("Not a day: \"{}\"", input).red()),
                }
            }
            Action::ShowEvent => {
                let events: Vec<_> = screen.selected_events().into_iter().cloned().collect();
                if events.is_empty() {
                    continue;
                }
                let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
                let picked = Select::new().items(&titles).default(0).interact()?;
                let event = &events[picked];

                println!();
                println!("{}", render_details(locale, event, &app.tz));
                println!();

                let delete = Confirm::new()
                    .with_prompt("  Delete this event?")
                    .default(false)
                    .interact()?;
                if delete && let Err(e) = screen.delete_event(&event.id).await {
                    debug!("Delete failed: {}", e);
                }
            }
            Action::AddEvent => {
                if !ensure_permission(&mut screen, ask_for_access).await? {
                    eprintln!(
                        "  {}",
                        "Calendar access is required to add events.".red()
                    );
                    continue;
                }
                let draft = super::new::prompt_draft(&screen)?;
                if let Err(e) = screen.add_event(&draft).await {
                    debug!("Create failed: {}", e);
                }
            }
            Action::Refresh => screen.refresh().await,
            Action::Quit => break,
        }
    }

    print_notices(&mut screen);
    Ok(())
}

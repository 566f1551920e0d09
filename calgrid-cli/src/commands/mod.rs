pub mod browse;
pub mod calendars;
pub mod config;
pub mod day;
pub mod delete;
pub mod month;
pub mod new;
pub mod permission;
pub mod show;

use anyhow::{Context, Result};
use calgrid_core::config::{GlobalConfig, Locale};
use calgrid_core::error::{CalGridError, CalGridResult};
use calgrid_core::event::CalendarEvent;
use calgrid_core::screen::CalendarScreen;
use calgrid_core::store::{DirStore, EventStore};
use calgrid_core::time::today;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dialoguer::Confirm;

use crate::render::{self, render_notices};
use crate::utils::tui::with_spinner;

/// Loaded configuration and the store it points at.
pub struct App {
    pub config: GlobalConfig,
    pub tz: Tz,
    pub store: DirStore,
}

impl App {
    pub fn load() -> Result<Self> {
        let config = GlobalConfig::load().context("Could not load the calgrid config")?;
        let tz = config.tz()?;
        let store = DirStore::new(config.data_path(), tz);
        Ok(App { config, tz, store })
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    /// A screen anchored on today. Nothing is loaded until [`App::open`].
    pub fn screen(&self) -> CalendarScreen<DirStore> {
        CalendarScreen::new(
            self.store.clone(),
            self.tz,
            self.config.preferences.clone(),
            today(&self.tz),
        )
        .with_default_calendar(self.config.default_calendar.clone())
    }

    /// Ask for access and load the visible month.
    pub async fn open(&self, screen: &mut CalendarScreen<DirStore>) {
        let message = format!("Loading {}", screen.visible_month());
        with_spinner(message, screen.open()).await;
    }
}

/// Look an event up by id in every calendar, whatever its date.
pub async fn find_event(store: &DirStore, id: &str) -> Result<CalendarEvent> {
    let calendar_ids: Vec<String> = store
        .list_calendars()
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    store
        .list_events(&calendar_ids, DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
        .await?
        .into_iter()
        .find(|e| e.id == id)
        .map(CalendarEvent::from)
        .ok_or_else(|| CalGridError::EventNotFound(id.to_string()).into())
}

/// Check access before a create form is shown. When access is missing,
/// `ask` decides whether to request it again.
pub async fn ensure_permission<S: EventStore>(
    screen: &mut CalendarScreen<S>,
    ask: impl FnOnce() -> Result<bool>,
) -> Result<bool> {
    if screen.permission().is_granted() {
        return Ok(true);
    }
    if !ask()? {
        return Ok(false);
    }
    Ok(screen.request_permission().await.is_granted())
}

pub fn ask_for_access() -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt("  Calendar access is required to add events. Request access?")
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Print and clear the screen's pending notices.
pub fn print_notices<S: EventStore>(screen: &mut CalendarScreen<S>) {
    let notices = screen.take_notices();
    if !notices.is_empty() {
        println!("{}", render_notices(&notices));
    }
}

/// Turn an action result into the command result. Success notices are
/// printed. On failure the error notice becomes the error message.
pub fn finish<S: EventStore, T>(
    screen: &mut CalendarScreen<S>,
    result: CalGridResult<T>,
) -> Result<T> {
    let notices = screen.take_notices();
    match result {
        Ok(value) => {
            if !notices.is_empty() {
                println!("{}", render_notices(&notices));
            }
            Ok(value)
        }
        Err(e) => {
            let message = notices
                .iter()
                .rev()
                .find(|n| n.is_error())
                .map(|n| n.message.clone());
            match message {
                Some(message) => Err(anyhow::anyhow!(message)),
                None => Err(e.into()),
            }
        }
    }
}

/// Month grid followed by the selected day's events.
pub fn print_screen<S: EventStore>(screen: &mut CalendarScreen<S>, locale: Locale) {
    println!("{}", render::render_month(screen, locale));
    println!();
    println!(
        "{}",
        render::render_day(
            locale,
            screen.selected_date(),
            &screen.selected_events(),
            screen.tz()
        )
    );
    print_notices(screen);
}

//! The calendar screen: month grid, selected-day list and event actions.
//!
//! `CalendarScreen` owns the navigation anchors, the events of the visible
//! month and the notice queue, and talks to an [`EventStore`]. Store calls
//! are awaited one at a time. Each fetch carries a token and only the
//! outcome of the most recently issued fetch is applied, so a slow fetch for
//! a month the user already left cannot overwrite newer data.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, error, info, warn};

use crate::config::Preferences;
use crate::date_range::DateRange;
use crate::draft::EventDraft;
use crate::error::{CalGridError, CalGridResult};
use crate::event::{Calendar, CalendarEvent};
use crate::grid::{GridCell, MonthGrid, build_month_grid_starting};
use crate::locate::{count_events_on_date, events_on_date};
use crate::month::YearMonth;
use crate::navigation::{Direction, Navigator};
use crate::notice::Notice;
use crate::store::{EventStore, Permission};
use crate::time::start_of_day;

/// Events loaded for one month. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBuffer {
    pub month: YearMonth,
    pub events: Vec<CalendarEvent>,
}

/// A fetch that has been issued but not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: u64,
    pub month: YearMonth,
    pub range: Option<DateRange>,
    pub permission: Permission,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub token: u64,
    pub month: YearMonth,
    pub result: CalGridResult<Vec<CalendarEvent>>,
}

/// One cell of the rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayView {
    Blank,
    Day {
        date: NaiveDate,
        is_today: bool,
        is_selected: bool,
        event_count: usize,
    },
}

pub struct CalendarScreen<S> {
    store: S,
    tz: Tz,
    preferences: Preferences,
    default_calendar: Option<String>,
    navigator: Navigator,
    today: NaiveDate,
    permission: Permission,
    buffer: MonthBuffer,
    latest_token: u64,
    notices: Vec<Notice>,
}

impl<S: EventStore> CalendarScreen<S> {
    pub fn new(store: S, tz: Tz, preferences: Preferences, today: NaiveDate) -> Self {
        let navigator = Navigator::new(today);
        CalendarScreen {
            store,
            tz,
            preferences,
            default_calendar: None,
            buffer: MonthBuffer {
                month: navigator.visible_month(),
                events: Vec::new(),
            },
            navigator,
            today,
            permission: Permission::Undetermined,
            latest_token: 0,
            notices: Vec::new(),
        }
    }

    /// Prefer this calendar for new events when it accepts writes.
    pub fn with_default_calendar(mut self, calendar_id: Option<String>) -> Self {
        self.default_calendar = calendar_id;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn visible_month(&self) -> YearMonth {
        self.navigator.visible_month()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.navigator.selected_date()
    }

    pub fn loaded_month(&self) -> YearMonth {
        self.buffer.month
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.buffer.events
    }

    // =========================================================================
    // Startup and fetching
    // =========================================================================

    /// Ask for store access, then load the visible month.
    pub async fn open(&mut self) {
        self.request_permission().await;
        self.refresh().await;
    }

    pub async fn request_permission(&mut self) -> Permission {
        match self.store.request_permission().await {
            Ok(permission) => {
                info!(%permission, "Calendar permission");
                self.permission = permission;
            }
            Err(e) => {
                error!("Error requesting calendar permission: {}", e);
                self.notify(Notice::error(format!("Could not request calendar access: {}", e)));
            }
        }
        self.permission
    }

    /// Issue a fetch for the visible month. Any earlier fetch becomes stale.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_token += 1;
        let month = self.visible_month();
        let request = FetchRequest {
            token: self.latest_token,
            month,
            range: month.window(&self.tz),
            permission: self.permission,
        };
        debug!(token = request.token, %month, "Fetch issued");
        request
    }

    /// Run a fetch against the store. Without permission the result is empty.
    pub async fn fetch(store: &S, request: &FetchRequest) -> FetchOutcome {
        let result = Self::load_events(store, request).await;
        FetchOutcome {
            token: request.token,
            month: request.month,
            result,
        }
    }

    async fn load_events(store: &S, request: &FetchRequest) -> CalGridResult<Vec<CalendarEvent>> {
        if !request.permission.is_granted() {
            return Ok(Vec::new());
        }
        let Some(range) = request.range else {
            return Ok(Vec::new());
        };

        let calendars = store.list_calendars().await?;
        if calendars.is_empty() {
            return Ok(Vec::new());
        }

        let calendar_ids: Vec<String> = calendars.into_iter().map(|c| c.id).collect();
        let events = store
            .list_events(&calendar_ids, range.from, range.to)
            .await?
            .into_iter()
            .map(CalendarEvent::from)
            .collect();

        Ok(events)
    }

    /// Apply a fetch outcome. Returns false when the outcome was stale and
    /// has been discarded.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.token != self.latest_token {
            debug!(
                token = outcome.token,
                latest = self.latest_token,
                "Discarding stale fetch"
            );
            return false;
        }

        match outcome.result {
            Ok(events) => {
                info!(month = %outcome.month, count = events.len(), "Loaded events");
                self.buffer = MonthBuffer {
                    month: outcome.month,
                    events,
                };
            }
            Err(e) => {
                error!(month = %outcome.month, "Error loading events: {}", e);
                self.buffer = MonthBuffer {
                    month: outcome.month,
                    events: Vec::new(),
                };
                self.notify(Notice::error(format!("Could not load events: {}", e)));
            }
        }
        true
    }

    /// Fetch and apply the visible month.
    pub async fn refresh(&mut self) {
        let request = self.begin_fetch();
        let outcome = Self::fetch(&self.store, &request).await;
        self.apply_fetch(outcome);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub async fn navigate_month(&mut self, direction: Direction) {
        self.navigator.navigate_month(direction);
        self.refresh().await;
    }

    pub async fn go_to_today(&mut self, today: NaiveDate) {
        self.today = today;
        let month_changed = self.navigator.go_to_today(today);
        if month_changed || self.buffer.month != self.visible_month() {
            self.refresh().await;
        }
    }

    pub async fn select_date(&mut self, date: NaiveDate) {
        debug!(%date, "Selected date");
        if self.navigator.select_date(date) {
            self.refresh().await;
        }
    }

    pub async fn jump_to(&mut self, date: NaiveDate) {
        if self.navigator.jump_to(date) {
            self.refresh().await;
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn month_grid(&self) -> MonthGrid {
        build_month_grid_starting(self.visible_month(), self.preferences.week_start())
    }

    /// Grid cells with today/selection flags and per-day event counts.
    pub fn grid(&self) -> Vec<DayView> {
        let selected = self.selected_date();
        let loaded = self.buffer.month == self.visible_month();

        self.month_grid()
            .cells()
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => DayView::Blank,
                GridCell::Day(date) => DayView::Day {
                    date: *date,
                    is_today: *date == self.today,
                    is_selected: *date == selected,
                    event_count: if loaded {
                        count_events_on_date(&self.buffer.events, *date, &self.tz)
                    } else {
                        0
                    },
                },
            })
            .collect()
    }

    /// Events of the selected day, in store order.
    pub fn selected_events(&self) -> Vec<&CalendarEvent> {
        events_on_date(&self.buffer.events, self.selected_date(), &self.tz)
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.buffer.events.iter().find(|e| e.id == id)
    }

    /// A fresh create form for the selected day: starting now when today is
    /// selected, otherwise at local midnight.
    pub fn new_draft(&self, now: DateTime<Utc>) -> EventDraft {
        let selected = self.selected_date();
        let start = if selected == self.today {
            now
        } else {
            start_of_day(&self.tz, selected)
        };
        EventDraft::for_date(start)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Create an event from a draft and reload the month.
    ///
    /// Permission and validation are checked before the store is touched.
    pub async fn add_event(&mut self, draft: &EventDraft) -> CalGridResult<String> {
        if !self.permission.is_granted() {
            self.notify(Notice::error(
                "Calendar access is required to add events. Grant access and try again.",
            ));
            return Err(CalGridError::PermissionRequired);
        }

        let new_event = match draft.validate(&self.tz) {
            Ok(event) => event,
            Err(e) => {
                self.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        let created = match self.target_calendar().await {
            Ok(calendar) => self.store.create_event(&calendar.id, &new_event).await,
            Err(e) => Err(e),
        };

        match created {
            Ok(id) => {
                info!(%id, title = %new_event.title, "Created event");
                self.notify(Notice::info("Event created"));
                self.refresh().await;
                Ok(id)
            }
            Err(e) => {
                error!("Error creating event: {}", e);
                self.notify(Notice::error(format!("Could not create the event: {}", e)));
                Err(e)
            }
        }
    }

    pub async fn delete_event(&mut self, event_id: &str) -> CalGridResult<()> {
        match self.store.delete_event(event_id).await {
            Ok(()) => {
                info!(id = %event_id, "Deleted event");
                self.notify(Notice::info("Event deleted"));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!("Error deleting event: {}", e);
                self.notify(Notice::error(format!("Could not delete the event: {}", e)));
                Err(e)
            }
        }
    }

    /// The configured default calendar if writable, else the first writable
    /// calendar, else the first calendar.
    async fn target_calendar(&self) -> CalGridResult<Calendar> {
        let calendars = self.store.list_calendars().await?;

        if let Some(ref preferred) = self.default_calendar {
            match calendars.iter().find(|c| &c.id == preferred) {
                Some(c) if c.allows_modifications => return Ok(c.clone()),
                Some(_) => warn!(calendar = %preferred, "Default calendar is read-only"),
                None => warn!(calendar = %preferred, "Default calendar not found"),
            }
        }

        calendars
            .iter()
            .find(|c| c.allows_modifications)
            .or_else(|| calendars.first())
            .cloned()
            .ok_or(CalGridError::NoCalendarAvailable)
    }

    // =========================================================================
    // Notices
    // =========================================================================

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() || self.preferences.notifications {
            self.notices.push(notice);
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dismiss_notice(&mut self, index: usize) -> Option<Notice> {
        (index < self.notices.len()).then(|| self.notices.remove(index))
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

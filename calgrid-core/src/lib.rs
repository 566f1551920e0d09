//! Core of calgrid: month grid layout, event lookup by day, month navigation,
//! the create-event form, and the calendar store the screens sit on.
//!
//! - [`grid`] lays out a month in 7 columns
//! - [`locate`] finds the events occurring on a day
//! - [`screen`] wires navigation, fetching and event actions together

pub mod config;
pub mod constants;
pub mod date_range;
pub mod draft;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod locate;
pub mod month;
pub mod navigation;
pub mod notice;
pub mod screen;
pub mod store;
pub mod time;

pub use error::{CalGridError, CalGridResult};
pub use event::{Calendar, CalendarEvent, NewEvent, RawEvent};
pub use grid::{GridCell, MonthGrid, WeekStart, build_month_grid};
pub use locate::events_on_date;

//! Configuration types for calgrid.

mod calendar;
mod global;

pub use calendar::CalendarConfig;
pub use global::{GlobalConfig, Locale, Preferences};

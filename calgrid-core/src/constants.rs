/// Fixed locale time zone used when the config does not name one.
pub const DEFAULT_TIME_ZONE: &str = "Europe/Rome";

/// Columns in the month grid.
pub const DAYS_IN_WEEK: usize = 7;

/// Default length of a new event.
pub const DEFAULT_EVENT_MINUTES: i64 = 60;

pub const MAX_TITLE_CHARS: usize = 100;

/// Dots drawn under a day before switching to a "+N" counter.
pub const MAX_DAY_INDICATORS: usize = 3;

/// Name of the per-calendar metadata directory inside a calendar directory.
pub const CALENDAR_META_DIR: &str = ".calgrid";

pub const DEFAULT_CALENDAR_DIR: &str = "~/calendar";

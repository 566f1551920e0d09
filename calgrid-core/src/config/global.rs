//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALENDAR_DIR, DEFAULT_TIME_ZONE};
use crate::error::{CalGridError, CalGridResult};
use crate::grid::WeekStart;

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_true() -> bool {
    true
}

/// Language used for month names, weekday headers and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    It,
    En,
}

/// Display preferences from the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub week_starts_on_monday: bool,

    #[serde(default)]
    pub show_week_numbers: bool,

    /// Show success/failure notices after store actions.
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            week_starts_on_monday: true,
            show_week_numbers: false,
            notifications: true,
        }
    }
}

impl Preferences {
    pub fn week_start(&self) -> WeekStart {
        if self.week_starts_on_monday {
            WeekStart::Monday
        } else {
            WeekStart::Sunday
        }
    }
}

/// Global configuration at ~/.config/calgrid/config.toml
///
/// Calendar-specific configuration (title, read-only flag) is stored in each
/// calendar's .calgrid/config.toml file instead.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    #[serde(default)]
    pub locale: Locale,

    /// Calendar new events go to, when it accepts writes.
    pub default_calendar: Option<String>,

    #[serde(default)]
    pub preferences: Preferences,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            calendar_dir: default_calendar_dir(),
            time_zone: default_time_zone(),
            locale: Locale::default(),
            default_calendar: None,
            preferences: Preferences::default(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/calgrid/config.toml, writing a commented default first
    /// if it does not exist yet. `CALGRID_*` environment variables override
    /// file values (`CALGRID_PREFERENCES__SHOW_WEEK_NUMBERS=true`).
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        let config: GlobalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGRID").separator("__"))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))?;

        // Fail early on a bad zone name rather than on first use.
        config.tz()?;

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn tz(&self) -> CalGridResult<Tz> {
        self.time_zone.parse::<Tz>().map_err(|_| {
            CalGridError::Config(format!("Unknown time zone '{}'", self.time_zone))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where your calendars live:
# calendar_dir = \"{}\"

# Time zone used for day boundaries:
# time_zone = \"{}\"

# Language for month and weekday names (\"it\" or \"en\"):
# locale = \"it\"

# Calendar for new events:
# default_calendar = \"personal\"

# [preferences]
# week_starts_on_monday = true
# show_week_numbers = false
# notifications = true
",
            DEFAULT_CALENDAR_DIR, DEFAULT_TIME_ZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

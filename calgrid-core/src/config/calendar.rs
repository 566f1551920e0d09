//! Per-calendar configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::CALENDAR_META_DIR;
use crate::error::CalGridResult;

/// Configuration stored in each calendar's .calgrid/config.toml
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Display name; the directory name is used when missing.
    pub title: Option<String>,

    pub color: Option<String>,

    #[serde(default)]
    pub read_only: bool,
}

impl CalendarConfig {
    /// Load config from .calgrid/config.toml
    pub async fn load(calendar_dir: &Path) -> CalGridResult<Self> {
        let path = calendar_dir.join(CALENDAR_META_DIR).join("config.toml");

        if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to .calgrid/config.toml
    pub async fn save(&self, calendar_dir: &Path) -> CalGridResult<()> {
        let dir = calendar_dir.join(CALENDAR_META_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(dir.join("config.toml"), content).await?;

        Ok(())
    }
}

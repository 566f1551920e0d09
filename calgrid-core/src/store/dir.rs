//! Event store backed by a directory of calendars.
//!
//! ```text
//! <root>/
//!   personal/
//!     .calgrid/config.toml
//!     2024-03-10T0900__dentist.ics
//!   holidays/
//!     .calgrid/config.toml   (read_only = true)
//!     2024-12-25__christmas.ics
//! ```
//!
//! Each subdirectory holding a `.calgrid` directory is a calendar and each
//! `.ics` file in it is one event.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::CalendarConfig;
use crate::constants::CALENDAR_META_DIR;
use crate::date_range::DateRange;
use crate::error::{CalGridError, CalGridResult};
use crate::event::{Calendar, NewEvent, RawEvent};
use crate::ics::{generate_ics, parse_event};
use crate::store::{EventStore, Permission};
use crate::time::local_date;

const SOURCE_NAME: &str = "Local";

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    tz: Tz,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>, tz: Tz) -> Self {
        DirStore {
            root: root.into(),
            tz,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a calendar directory. The id is slugified.
    pub async fn create_calendar(
        &self,
        id: &str,
        title: Option<String>,
        read_only: bool,
    ) -> CalGridResult<Calendar> {
        let id = slug::slugify(id);
        if id.is_empty() {
            return Err(CalGridError::Store("Calendar id is empty".into()));
        }

        let dir = self.root.join(&id);
        if tokio::fs::try_exists(dir.join(CALENDAR_META_DIR)).await? {
            return Err(CalGridError::Store(format!("Calendar '{}' already exists", id)));
        }

        let config = CalendarConfig {
            title,
            color: None,
            read_only,
        };
        config.save(&dir).await?;

        Ok(to_calendar(id, config))
    }

    async fn load_calendar(&self, id: &str) -> CalGridResult<(PathBuf, CalendarConfig)> {
        let dir = self.root.join(id);
        if !tokio::fs::try_exists(dir.join(CALENDAR_META_DIR)).await? {
            return Err(CalGridError::CalendarNotFound(id.to_string()));
        }
        let config = CalendarConfig::load(&dir).await?;
        Ok((dir, config))
    }

    /// Parse every .ics file in a calendar directory, skipping unreadable ones.
    async fn read_events(&self, calendar_id: &str, dir: &Path) -> CalGridResult<Vec<(PathBuf, RawEvent)>> {
        let mut events = Vec::new();

        for path in ics_files(dir).await? {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), "Skipping unreadable event file: {}", e);
                    continue;
                }
            };
            match parse_event(&content, calendar_id, &self.tz) {
                Some(event) => events.push((path, event)),
                None => warn!(path = %path.display(), "Skipping unparseable event file"),
            }
        }

        Ok(events)
    }
}

impl EventStore for DirStore {
    async fn permission_status(&self) -> CalGridResult<Permission> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if !meta.is_dir() || meta.permissions().readonly() => Ok(Permission::Denied),
            Ok(_) => Ok(Permission::Granted),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Permission::Undetermined),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(Permission::Denied),
            Err(e) => Err(e.into()),
        }
    }

    async fn request_permission(&self) -> CalGridResult<Permission> {
        match tokio::fs::create_dir_all(&self.root).await {
            Ok(()) => self.permission_status().await,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(Permission::Denied),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_calendars(&self) -> CalGridResult<Vec<Calendar>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut calendars = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.join(CALENDAR_META_DIR).is_dir() {
                continue;
            }
            let Some(id) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            let config = CalendarConfig::load(&path).await?;
            calendars.push(to_calendar(id, config));
        }

        calendars.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(calendars)
    }

    async fn list_events(
        &self,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> CalGridResult<Vec<RawEvent>> {
        let range = DateRange::new(range_start, range_end);
        let mut events = Vec::new();

        for id in calendar_ids {
            let (dir, _) = self.load_calendar(id).await?;
            events.extend(
                self.read_events(id, &dir)
                    .await?
                    .into_iter()
                    .map(|(_, event)| event)
                    .filter(|event| range.overlaps(event.start_date, event.end_date)),
            );
        }

        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));

        debug!(count = events.len(), %range, "Listed events");
        Ok(events)
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> CalGridResult<String> {
        let (dir, config) = self.load_calendar(calendar_id).await?;
        if config.read_only {
            return Err(CalGridError::CalendarReadOnly(calendar_id.to_string()));
        }

        let uid = format!("{}@calgrid", Uuid::new_v4());
        let content = generate_ics(event, &uid)?;
        let filename = filename_for(event, &self.tz, &dir).await?;

        tokio::fs::write(dir.join(filename), content).await?;
        Ok(uid)
    }

    async fn delete_event(&self, event_id: &str) -> CalGridResult<()> {
        for calendar in self.list_calendars().await? {
            let (dir, config) = self.load_calendar(&calendar.id).await?;
            let found = self
                .read_events(&calendar.id, &dir)
                .await?
                .into_iter()
                .find(|(_, event)| event.id == event_id);

            if let Some((path, _)) = found {
                if config.read_only {
                    return Err(CalGridError::CalendarReadOnly(calendar.id));
                }
                tokio::fs::remove_file(&path).await?;
                return Ok(());
            }
        }

        Err(CalGridError::EventNotFound(event_id.to_string()))
    }
}

fn to_calendar(id: String, config: CalendarConfig) -> Calendar {
    Calendar {
        title: config.title.unwrap_or_else(|| id.clone()),
        id,
        source: SOURCE_NAME.to_string(),
        color: config.color,
        allows_modifications: !config.read_only,
    }
}

async fn ics_files(dir: &Path) -> CalGridResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "ics") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

// =============================================================================
// Filename generation
// =============================================================================

/// Generate a unique filename for an event, handling collisions.
async fn filename_for(event: &NewEvent, tz: &Tz, dir: &Path) -> CalGridResult<String> {
    let base = base_filename(event, tz);
    let stem = base.trim_end_matches(".ics");

    if !tokio::fs::try_exists(dir.join(&base)).await? {
        return Ok(base);
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}.ics", stem, n);
        if !tokio::fs::try_exists(dir.join(&suffixed)).await? {
            return Ok(suffixed);
        }
    }

    Err(CalGridError::Store(format!(
        "Too many filename collisions for {}",
        base
    )))
}

fn base_filename(event: &NewEvent, tz: &Tz) -> String {
    let slug: String = slug::slugify(&event.title).chars().take(50).collect();

    let date = if event.all_day {
        local_date(tz, event.start_date).format("%Y-%m-%d").to_string()
    } else {
        event.start_date.with_timezone(tz).format("%Y-%m-%dT%H%M").to_string()
    };

    format!("{}__{}.ics", date, slug)
}

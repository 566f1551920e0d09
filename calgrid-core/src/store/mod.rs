//! The calendar store the screens read from and write to.
//!
//! Every call is asynchronous and may fail with a store-level error. The
//! screen awaits each call before touching its own state.

mod dir;

pub use dir::DirStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalGridResult;
use crate::event::{Calendar, NewEvent, RawEvent};

/// Access to the calendar store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    Undetermined,
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        *self == Permission::Granted
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Undetermined => "undetermined",
        };
        write!(f, "{}", label)
    }
}

#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// Current permission without prompting.
    async fn permission_status(&self) -> CalGridResult<Permission>;

    /// Ask for access to the store.
    async fn request_permission(&self) -> CalGridResult<Permission>;

    async fn list_calendars(&self) -> CalGridResult<Vec<Calendar>>;

    /// Events from `calendar_ids` overlapping `[range_start, range_end)`.
    async fn list_events(
        &self,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> CalGridResult<Vec<RawEvent>>;

    /// Write a new event and return its id.
    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> CalGridResult<String>;

    async fn delete_event(&self, event_id: &str) -> CalGridResult<()>;
}

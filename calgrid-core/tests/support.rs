//! In-memory event store that records every call.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use calgrid_core::date_range::DateRange;
use calgrid_core::error::{CalGridError, CalGridResult};
use calgrid_core::event::{Calendar, NewEvent, RawEvent};
use calgrid_core::store::{EventStore, Permission};
use chrono::{DateTime, Utc};

pub struct MockStore {
    pub permission: Permission,
    pub calendars: Vec<Calendar>,
    pub events: RefCell<Vec<RawEvent>>,
    pub fail_listing: Cell<bool>,
    pub list_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub delete_calls: Cell<usize>,
    pub created_in: RefCell<Vec<String>>,
    next_id: Cell<usize>,
}

impl MockStore {
    pub fn new(permission: Permission) -> Self {
        MockStore {
            permission,
            calendars: vec![calendar("holidays", false), calendar("personal", true)],
            events: RefCell::new(Vec::new()),
            fail_listing: Cell::new(false),
            list_calls: Cell::new(0),
            create_calls: Cell::new(0),
            delete_calls: Cell::new(0),
            created_in: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn with_events(self, events: Vec<RawEvent>) -> Self {
        *self.events.borrow_mut() = events;
        self
    }

    pub fn store_calls(&self) -> usize {
        self.create_calls.get() + self.delete_calls.get()
    }
}

pub fn calendar(id: &str, writable: bool) -> Calendar {
    Calendar {
        id: id.to_string(),
        title: id.to_string(),
        source: "Mock".to_string(),
        color: None,
        allows_modifications: writable,
    }
}

pub fn raw_event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        calendar_id: "personal".to_string(),
        title: id.to_string(),
        start_date: start,
        end_date: end,
        notes: None,
        location: None,
        all_day: None,
    }
}

impl EventStore for MockStore {
    async fn permission_status(&self) -> CalGridResult<Permission> {
        Ok(self.permission)
    }

    async fn request_permission(&self) -> CalGridResult<Permission> {
        Ok(self.permission)
    }

    async fn list_calendars(&self) -> CalGridResult<Vec<Calendar>> {
        Ok(self.calendars.clone())
    }

    async fn list_events(
        &self,
        _calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> CalGridResult<Vec<RawEvent>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_listing.get() {
            return Err(CalGridError::Store("store offline".to_string()));
        }
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| DateRange::new(range_start, range_end).overlaps(e.start_date, e.end_date))
            .cloned()
            .collect())
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> CalGridResult<String> {
        self.create_calls.set(self.create_calls.get() + 1);
        let id = format!("created-{}", self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.created_in.borrow_mut().push(calendar_id.to_string());
        self.events.borrow_mut().push(RawEvent {
            id: id.clone(),
            calendar_id: calendar_id.to_string(),
            title: event.title.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            notes: event.notes.clone(),
            location: event.location.clone(),
            all_day: Some(event.all_day),
        });
        Ok(id)
    }

    async fn delete_event(&self, event_id: &str) -> CalGridResult<()> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        let mut events = self.events.borrow_mut();
        let before = events.len();
        events.retain(|e| e.id != event_id);
        if events.len() == before {
            return Err(CalGridError::EventNotFound(event_id.to_string()));
        }
        Ok(())
    }
}

//! Month navigation state.
//!
//! Two anchors: `current_date` picks the visible month and `selected_date`
//! picks the day whose events are listed. Transitions report whether the
//! events for the visible month have to be fetched again.

use chrono::NaiveDate;

use crate::month::{YearMonth, shift_months};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current_date: NaiveDate,
    selected_date: NaiveDate,
}

impl Navigator {
    pub fn new(today: NaiveDate) -> Self {
        Navigator {
            current_date: today,
            selected_date: today,
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn visible_month(&self) -> YearMonth {
        YearMonth::of(self.current_date)
    }

    /// Move the visible month by one. The day is clamped to the target
    /// month's length, so `Next` then `Prev` lands in the starting month.
    pub fn navigate_month(&mut self, direction: Direction) -> YearMonth {
        let delta = match direction {
            Direction::Prev => -1,
            Direction::Next => 1,
        };
        self.current_date = shift_months(self.current_date, delta);
        self.visible_month()
    }

    /// Reset both anchors to `today`. Returns true when the visible month changed.
    pub fn go_to_today(&mut self, today: NaiveDate) -> bool {
        let before = self.visible_month();
        self.current_date = today;
        self.selected_date = today;
        before != self.visible_month()
    }

    /// Select a day. A day outside the visible month also moves the month
    /// anchor there; returns true in that case.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        self.selected_date = date;
        if self.visible_month().contains(date) {
            return false;
        }
        self.current_date = date;
        true
    }

    /// Date-picker jump: both anchors move to `date`.
    pub fn jump_to(&mut self, date: NaiveDate) -> bool {
        let before = self.visible_month();
        self.current_date = date;
        self.selected_date = date;
        before != self.visible_month()
    }
}

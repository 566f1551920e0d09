//! Calendar months.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{CalGridError, CalGridResult};

/// A year and zero-based month (0 = January .. 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    pub fn new(year: i32, month0: u32) -> CalGridResult<Self> {
        if month0 > 11 {
            return Err(CalGridError::InvalidMonth(format!(
                "month index {} is outside 0..=11",
                month0
            )));
        }
        let ym = YearMonth { year, month0 };
        if ym.first_day().is_none() || ym.next().first_day().is_none() {
            return Err(CalGridError::InvalidMonth(format!(
                "year {} is out of range",
                year
            )));
        }
        Ok(ym)
    }

    /// Build a month from any month offset, rolling over into adjacent years.
    ///
    /// `normalized(2024, 12)` is January 2025 and `normalized(2024, -1)` is
    /// December 2023.
    pub fn normalized(year: i32, month: i64) -> Self {
        let total = i64::from(year) * 12 + month;
        let year = total.div_euclid(12).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        YearMonth {
            year,
            month0: total.rem_euclid(12) as u32,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// One-based month number.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    /// Day 1 of the month, or `None` for years chrono cannot represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
    }

    /// The day before day 1 of the following month.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.next().first_day()?.pred_opt()
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().map(|d| d.day()).unwrap_or(0)
    }

    /// Weekday index of day 1, 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday(&self) -> Option<u32> {
        self.first_day().map(|d| d.weekday().num_days_from_sunday())
    }

    pub fn first_weekday_as(&self) -> Option<Weekday> {
        self.first_day().map(|d| d.weekday())
    }

    pub fn next(&self) -> Self {
        Self::normalized(self.year, i64::from(self.month0) + 1)
    }

    pub fn prev(&self) -> Self {
        Self::normalized(self.year, i64::from(self.month0) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        YearMonth::of(date) == *self
    }

    /// Instant range covering the whole month in `tz`.
    pub fn window(&self, tz: &Tz) -> Option<DateRange> {
        DateRange::for_month(*self, tz)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CalGridError;

    /// Parse `YYYY-MM` with a one-based month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalGridError::InvalidMonth(format!("'{}' is not YYYY-MM", s));

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        YearMonth::new(year, month - 1)
    }
}

/// Shift a date by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

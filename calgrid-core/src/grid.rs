//! Month grid construction.
//!
//! A month is laid out in a fixed 7-column grid: blank cells up to the
//! weekday of day 1, then one cell per day. Rows simply wrap every 7 cells.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::DAYS_IN_WEEK;
use crate::month::YearMonth;

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column index (0..7) of `weekday` in a grid starting on this day.
    pub fn column_of(&self, weekday: Weekday) -> usize {
        let offset = match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        };
        offset as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(NaiveDate),
}

impl GridCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(date) => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GridCell::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    week_start: WeekStart,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    /// Dates of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(GridCell::date)
    }

    /// Rows of the grid; the last row may hold fewer than 7 cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    /// ISO week number of each row, taken from the row's first day.
    pub fn iso_week_numbers(&self) -> Vec<u32> {
        self.weeks()
            .filter_map(|row| row.iter().find_map(GridCell::date))
            .map(|date| date.iso_week().week())
            .collect()
    }
}

/// Build the grid for a zero-based `month` of `year`, weeks starting on Sunday.
///
/// Months outside 0..=11 roll over into neighbouring years. Years outside
/// the representable date range produce an empty grid.
pub fn build_month_grid(year: i32, month: u32) -> MonthGrid {
    build_month_grid_starting(YearMonth::normalized(year, i64::from(month)), WeekStart::Sunday)
}

pub fn build_month_grid_starting(month: YearMonth, week_start: WeekStart) -> MonthGrid {
    let (Some(first), Some(last)) = (month.first_day(), month.last_day()) else {
        warn!(%month, "Month outside the supported date range, grid left empty");
        return MonthGrid {
            month,
            week_start,
            cells: Vec::new(),
        };
    };

    let leading = week_start.column_of(first.weekday());
    let days_in_month = last.day() as usize;

    let mut cells = Vec::with_capacity(leading + days_in_month);
    cells.extend(std::iter::repeat_n(GridCell::Blank, leading));
    cells.extend(first.iter_days().take(days_in_month).map(GridCell::Day));

    MonthGrid {
        month,
        week_start,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_february_leap_year() {
        let grid = build_month_grid(2024, 1);

        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.days().count(), 29);
        assert_eq!(grid.len(), 33);
        assert_eq!(grid.cells()[4], GridCell::Day(ymd(2024, 2, 1)));
        assert_eq!(grid.cells().last(), Some(&GridCell::Day(ymd(2024, 2, 29))));
    }

    #[test]
    fn test_length_is_blanks_plus_days_for_every_month() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let grid = build_month_grid(year, month);
                let ym = YearMonth::new(year, month).unwrap();
                let blanks = ym.first_weekday().unwrap() as usize;

                assert_eq!(grid.leading_blanks(), blanks, "{}", ym);
                assert_eq!(grid.len(), blanks + ym.days_in_month() as usize, "{}", ym);
                assert_eq!(grid.days().next(), ym.first_day(), "{}", ym);
            }
        }
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_blanks() {
        // 2024-09-01 is a Sunday.
        let grid = build_month_grid(2024, 8);
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.cells()[0], GridCell::Day(ymd(2024, 9, 1)));
    }

    #[test]
    fn test_monday_start_shifts_blanks() {
        let feb = YearMonth::new(2024, 1).unwrap();
        assert_eq!(build_month_grid_starting(feb, WeekStart::Monday).leading_blanks(), 3);

        // A Sunday first day needs six blanks when weeks start on Monday.
        let sep = YearMonth::new(2024, 8).unwrap();
        assert_eq!(build_month_grid_starting(sep, WeekStart::Monday).leading_blanks(), 6);
    }

    #[test]
    fn test_rows_wrap_at_seven() {
        let grid = build_month_grid(2024, 1);
        let rows: Vec<_> = grid.weeks().collect();

        assert_eq!(rows.len(), 5);
        assert!(rows[..4].iter().all(|r| r.len() == 7));
        assert_eq!(rows[4].len(), 5);
        // Row 2 starts on Sunday the 4th.
        assert_eq!(rows[1][0], GridCell::Day(ymd(2024, 2, 4)));
    }

    #[test]
    fn test_month_index_rolls_over() {
        let grid = build_month_grid(2024, 12);
        assert_eq!(grid.month(), YearMonth::new(2025, 0).unwrap());
        assert_eq!(grid.days().count(), 31);
    }

    #[test]
    fn test_iso_week_numbers_per_row() {
        let grid = build_month_grid(2024, 1);
        assert_eq!(grid.iso_week_numbers(), vec![5, 5, 6, 7, 8]);
    }

    #[test]
    fn test_unrepresentable_year_gives_empty_grid() {
        let grid = build_month_grid(i32::MAX, 0);
        assert!(grid.is_empty());
    }
}

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::aggregate::{bucket_by_day, summarize_month, DayBucket, MonthSummary};
use super::keys::{DateKey, MonthKey};
use crate::deposit::DepositRecord;

pub const DAYS_PER_WEEK: usize = 7;

/// Sunday-first month grid: `None` for the leading cells that belong to the
/// previous month, then `Some(1)..=Some(N)`.
pub fn days_in_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    days_in_grid_starting(year, month, Weekday::Sun)
}

/// Month grid whose first column is `week_start`. An invalid month yields
/// an empty grid.
pub fn days_in_grid_starting(year: i32, month: u32, week_start: Weekday) -> Vec<Option<u32>> {
    let Some(key) = MonthKey::new(year, month) else {
        tracing::debug!(year, month, "no grid for invalid month");
        return Vec::new();
    };
    let Some(first) = key.first_day() else {
        return Vec::new();
    };
    let offset = leading_blanks(first, week_start);
    let days = key.days_in_month();

    let mut grid = Vec::with_capacity(offset + days as usize);
    grid.extend(std::iter::repeat(None).take(offset));
    grid.extend((1..=days).map(Some));
    grid
}

fn leading_blanks(first: NaiveDate, week_start: Weekday) -> usize {
    let first_col = first.weekday().num_days_from_sunday();
    let start_col = week_start.num_days_from_sunday();
    ((first_col + 7 - start_col) % 7) as usize
}

/// Column headers for a grid starting on `week_start`.
pub fn weekday_headers(week_start: Weekday) -> Vec<Weekday> {
    let mut day = week_start;
    (0..DAYS_PER_WEEK)
        .map(|_| {
            let current = day;
            day = day.succ();
            current
        })
        .collect()
}

/// True when `day` of `month` is the viewer's current day.
pub fn is_today(month: MonthKey, day: u32, today: NaiveDate) -> bool {
    MonthKey::of(today) == month && today.day() == day
}

/// One cell of the rendered calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub bucket: Option<DayBucket>,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn has_deposits(&self) -> bool {
        self.bucket.is_some_and(|bucket| bucket.count > 0)
    }
}

/// View model for one displayed month: grid cells and the month summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: MonthKey,
    pub week_start: Weekday,
    pub cells: Vec<CalendarCell>,
    pub summary: MonthSummary,
}

impl CalendarMonth {
    /// Buckets `records` (normally the unfiltered set) and lays out `month`.
    /// `today` is supplied by the caller.
    pub fn build(
        records: &[DepositRecord],
        month: MonthKey,
        week_start: Weekday,
        today: NaiveDate,
    ) -> Self {
        let buckets = bucket_by_day(records);
        let cells = days_in_grid_starting(month.year(), month.month(), week_start)
            .into_iter()
            .map(|day| CalendarCell {
                day,
                bucket: day.and_then(|day| {
                    buckets
                        .get(&DateKey {
                            year: month.year(),
                            month: month.month(),
                            day,
                        })
                        .copied()
                }),
                is_today: day.is_some_and(|day| is_today(month, day, today)),
            })
            .collect();
        Self {
            month,
            week_start,
            cells,
            summary: summarize_month(&buckets, month),
        }
    }

    /// Cells split into week rows; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn days_with_deposits(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_deposits()).count()
    }
}

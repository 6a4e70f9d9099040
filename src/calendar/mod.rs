//! Calendar aggregation: local day buckets, month grids, month summaries
//! and month navigation.

pub mod aggregate;
pub mod cursor;
pub mod grid;
pub mod keys;

pub use aggregate::{bucket_by_day, month_summary, summarize_month, DayBucket, MonthSummary};
pub use cursor::CalendarCursor;
pub use grid::{
    days_in_grid, days_in_grid_starting, is_today, weekday_headers, CalendarCell, CalendarMonth,
};
pub use keys::{is_leap_year, next_month, prev_month, DateKey, MonthKey};

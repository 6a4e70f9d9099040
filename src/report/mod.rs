//! Report aggregates built from the same deposit records as the calendar:
//! export totals, the trailing-months trend, per-event statistics and goal
//! progress.

pub mod events;
pub mod goal;
pub mod summary;
pub mod trend;

pub use events::{event_breakdown, EventInfo, EventStats};
pub use goal::{GoalProgress, DEFAULT_SAVINGS_GOAL};
pub use summary::{report_file_name, DepositReport};
pub use trend::{trailing_months, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS};

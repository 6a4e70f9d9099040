#![doc(test(attr(deny(warnings))))]

//! Savings Core turns the deposit records of a community savings program
//! into the views the client shows: filtered deposit tables, a calendar of
//! daily deposits with monthly summaries, and report aggregates.

pub mod calendar;
pub mod cli;
pub mod clock;
pub mod config;
pub mod currency;
pub mod deposit;
pub mod errors;
pub mod filter;
pub mod report;
pub mod utils;

pub use calendar::{
    bucket_by_day, days_in_grid, month_summary, next_month, prev_month, CalendarCursor,
    CalendarMonth, DateKey, DayBucket, MonthKey, MonthSummary,
};
pub use deposit::{DepositRecord, DepositStore, RawDeposit};
pub use errors::{Result, SavingsError};
pub use filter::{filter_records, FilterCriteria};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Savings Core tracing initialized.");
    });
}

//! Deposit records and the store boundary that normalizes API payloads.

pub mod record;
pub mod store;
pub mod timestamp;

pub use record::{DepositRecord, RawAmount, RawDeposit, RawTimestamp};
pub use store::DepositStore;
pub use timestamp::{parse_calendar_date, parse_epoch_millis, parse_timestamp};

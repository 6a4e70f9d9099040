#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use savings_core::DepositRecord;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders outlive the test that made them.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that lives for the whole test run.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}

pub fn deposit(id: &str, amount: f64, timestamp: NaiveDateTime) -> DepositRecord {
    DepositRecord::new(id, amount, timestamp)
}

/// Four dated deposits across Jan-Mar 2024 plus one without a date.
pub fn sample_records() -> Vec<DepositRecord> {
    vec![
        deposit("jan-10", 100.0, at(2024, 1, 10, 9, 0)).with_description("Aporte Enero"),
        deposit("jan-31", 20.0, at(2024, 1, 31, 23, 59)).with_description("Cuota semanal"),
        deposit("feb-15", 60.0, at(2024, 2, 15, 12, 0)).with_description("aporte extra"),
        deposit("mar-01", 200.0, at(2024, 3, 1, 0, 0)).with_description("Bono"),
        DepositRecord::undated("no-date", 15.0).with_description("Aporte sin fecha"),
    ]
}

pub fn ids<'a>(records: impl IntoIterator<Item = &'a DepositRecord>) -> Vec<&'a str> {
    records.into_iter().map(|record| record.id.as_str()).collect()
}

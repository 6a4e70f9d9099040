use std::{fs, path::Path};

use chrono::{Local, TimeZone};
use serde_json::Value;

use super::record::{DepositRecord, RawDeposit};
use crate::errors::{Result, SavingsError};

/// Items of a deposits export: either a bare array or the API envelope
/// `{ "data": [...] }`. An envelope without `data` holds no deposits.
fn payload_items(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut envelope) => match envelope.remove("data") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(SavingsError::InvalidInput(format!(
                "`data` must be an array of deposits, found {}",
                json_kind(&other)
            ))),
        },
        other => Err(SavingsError::InvalidInput(format!(
            "expected an array of deposits or an object with `data`, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Immutable, ordered collection of normalized deposits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositStore {
    records: Vec<DepositRecord>,
}

impl DepositStore {
    pub fn new(records: Vec<DepositRecord>) -> Self {
        Self { records }
    }

    /// Normalizes wire payloads for a viewer in `zone`, keeping their order.
    pub fn from_raw<Tz, I>(raws: I, zone: &Tz) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = RawDeposit>,
    {
        let records = raws
            .into_iter()
            .enumerate()
            .map(|(position, raw)| DepositRecord::from_raw(&raw, position, zone))
            .collect();
        Self { records }
    }

    /// Parses a deposits export. Entries that are not deposit documents are
    /// skipped with a warning; the remaining ones keep their positions for
    /// fallback ids.
    pub fn from_json_str<Tz: TimeZone>(json: &str, zone: &Tz) -> Result<Self> {
        let items = payload_items(serde_json::from_str(json)?)?;
        let records = items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| {
                match serde_json::from_value::<RawDeposit>(item) {
                    Ok(raw) => Some(DepositRecord::from_raw(&raw, position, zone)),
                    Err(err) => {
                        tracing::warn!(position, error = %err, "skipping malformed deposit entry");
                        None
                    }
                }
            })
            .collect();
        let store = Self::new(records);
        tracing::debug!(
            records = store.len(),
            undated = store.undated_count(),
            "parsed deposit payload"
        );
        Ok(store)
    }

    /// Reads a deposits export from disk using the system time zone.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let store = Self::from_json_str(&data, &Local)?;
        tracing::info!(path = %path.display(), records = store.len(), "loaded deposits");
        Ok(store)
    }

    pub fn records(&self) -> &[DepositRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DepositRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_amount(&self) -> f64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Records that will be left out of calendar aggregation.
    pub fn undated_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.timestamp.is_none())
            .count()
    }
}

impl From<Vec<DepositRecord>> for DepositStore {
    fn from(records: Vec<DepositRecord>) -> Self {
        Self::new(records)
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deposit::DepositRecord;

/// Totals printed at the foot of a deposit report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DepositReport {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub maximum: f64,
}

impl DepositReport {
    /// Every field is zero for an empty input.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DepositRecord>) -> Self {
        let mut report = Self::default();
        for record in records {
            report.count += 1;
            report.total += record.amount;
            if report.count == 1 || record.amount > report.maximum {
                report.maximum = record.amount;
            }
        }
        if report.count > 0 {
            report.average = report.total / report.count as f64;
        }
        report
    }
}

/// File name for an exported report, e.g. `Depositos_Ana_Maria_2024-03-15.pdf`.
pub fn report_file_name(participant: Option<&str>, date: NaiveDate) -> String {
    let name = participant
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join("_"))
        .filter(|name| !name.is_empty());
    match name {
        Some(name) => format!("Depositos_{}_{}.pdf", name, date.format("%Y-%m-%d")),
        None => format!("Depositos_{}.pdf", date.format("%Y-%m-%d")),
    }
}

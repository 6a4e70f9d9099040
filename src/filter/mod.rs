//! Composable deposit filters backing the deposits table.
//!
//! Criteria arrive as the raw strings a user typed. Parsing is total: a
//! field that cannot be understood constrains nothing, so a filter pass can
//! never fail.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::deposit::{parse_calendar_date, DepositRecord};

/// Individual criterion of a [`FilterCriteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Text,
    MinAmount,
    MaxAmount,
    StartDate,
    EndDate,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Text,
        FilterField::MinAmount,
        FilterField::MaxAmount,
        FilterField::StartDate,
        FilterField::EndDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Text => "text",
            FilterField::MinAmount => "min",
            FilterField::MaxAmount => "max",
            FilterField::StartDate => "from",
            FilterField::EndDate => "to",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "search" | "description" => Ok(FilterField::Text),
            "min" | "min-amount" | "min_amount" => Ok(FilterField::MinAmount),
            "max" | "max-amount" | "max_amount" => Ok(FilterField::MaxAmount),
            "from" | "start" | "start-date" | "start_date" => Ok(FilterField::StartDate),
            "to" | "end" | "end-date" | "end_date" => Ok(FilterField::EndDate),
            other => Err(format!("unknown filter field `{}`", other)),
        }
    }
}

/// User-entered filter state. `None` and `""` both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl FilterCriteria {
    /// The reset state.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    pub fn with_min_amount(mut self, value: impl Into<String>) -> Self {
        self.min_amount = Some(value.into());
        self
    }

    pub fn with_max_amount(mut self, value: impl Into<String>) -> Self {
        self.max_amount = Some(value.into());
        self
    }

    pub fn with_start_date(mut self, value: impl Into<String>) -> Self {
        self.start_date = Some(value.into());
        self
    }

    pub fn with_end_date(mut self, value: impl Into<String>) -> Self {
        self.end_date = Some(value.into());
        self
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        let slot = match field {
            FilterField::Text => &self.text,
            FilterField::MinAmount => &self.min_amount,
            FilterField::MaxAmount => &self.max_amount,
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
        };
        slot.as_deref().filter(|value| !value.is_empty())
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let slot = match field {
            FilterField::Text => &mut self.text,
            FilterField::MinAmount => &mut self.min_amount,
            FilterField::MaxAmount => &mut self.max_amount,
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
        };
        *slot = value;
    }

    /// Number of fields holding a value; shown as a badge next to the
    /// filter toggle.
    pub fn active_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn parse(&self) -> ParsedCriteria {
        let mut parsed = ParsedCriteria::default();

        if let Some(text) = self.get(FilterField::Text) {
            parsed.needle = Some(text.to_lowercase());
        }

        parsed.min_amount =
            self.parse_field(FilterField::MinAmount, parse_amount, &mut parsed.ignored);
        parsed.max_amount =
            self.parse_field(FilterField::MaxAmount, parse_amount, &mut parsed.ignored);
        parsed.start = self
            .parse_field(FilterField::StartDate, parse_calendar_date, &mut parsed.ignored)
            .map(start_of_day);
        parsed.end = self
            .parse_field(FilterField::EndDate, parse_calendar_date, &mut parsed.ignored)
            .and_then(end_of_day);

        parsed
    }

    fn parse_field<T>(
        &self,
        field: FilterField,
        parse: impl Fn(&str) -> Option<T>,
        ignored: &mut Vec<FilterField>,
    ) -> Option<T> {
        let raw = self.get(field)?;
        let value = parse(raw);
        if value.is_none() {
            tracing::debug!(field = %field, value = raw, "ignoring malformed filter value");
            ignored.push(field);
        }
        value
    }
}

/// Filter criteria resolved into typed bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCriteria {
    /// Lowercased search text.
    pub needle: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Local midnight of the start date.
    pub start: Option<NaiveDateTime>,
    /// 23:59:59.999 local of the end date.
    pub end: Option<NaiveDateTime>,
    /// Fields that held a value that could not be parsed.
    pub ignored: Vec<FilterField>,
}

impl ParsedCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.needle.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    pub fn matches(&self, record: &DepositRecord) -> bool {
        if let Some(needle) = &self.needle {
            let matched = record
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle.as_str()));
            if !matched {
                return false;
            }
        }
        if self.min_amount.is_some_and(|min| record.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| record.amount > max) {
            return false;
        }
        if self.start.is_some() || self.end.is_some() {
            let Some(timestamp) = record.timestamp else {
                return false;
            };
            if self.start.is_some_and(|start| timestamp < start) {
                return false;
            }
            if self.end.is_some_and(|end| timestamp > end) {
                return false;
            }
        }
        true
    }
}

/// Returns the records satisfying every present criterion, in their
/// original order.
pub fn filter_records<'a>(
    records: &'a [DepositRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a DepositRecord> {
    let parsed = criteria.parse();
    if parsed.is_unconstrained() {
        return records.iter().collect();
    }
    records.iter().filter(|record| parsed.matches(record)).collect()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::default())
}

fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
}

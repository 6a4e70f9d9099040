use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::timestamp::{parse_epoch_millis, parse_timestamp};
use crate::calendar::DateKey;

/// Amount as it appears on the wire. Some endpoints serialize decimals as
/// strings; anything else is kept so the record still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawAmount {
    fn resolve(&self) -> Option<f64> {
        let value = match self {
            RawAmount::Number(value) => *value,
            RawAmount::Text(text) => text.trim().parse().ok()?,
            RawAmount::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Timestamp as it appears on the wire: ISO text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(Value),
}

impl RawTimestamp {
    fn is_blank(&self) -> bool {
        match self {
            RawTimestamp::Text(text) => text.trim().is_empty(),
            RawTimestamp::Millis(_) => false,
            RawTimestamp::Other(value) => value.is_null(),
        }
    }

    /// Local wall-clock time in `zone`, or `None` when unrecognised.
    pub fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> Option<NaiveDateTime> {
        match self {
            RawTimestamp::Text(text) => parse_timestamp(text, zone),
            RawTimestamp::Millis(millis) => parse_epoch_millis(*millis, zone),
            RawTimestamp::Other(_) => None,
        }
    }
}

/// Deposit payload exactly as returned by `GET /deposits`.
///
/// Every field is optional and loosely typed so that one odd document never
/// rejects the rest of the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeposit {
    #[serde(
        default,
        rename = "_id",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub object_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RawTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<RawTimestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_emoji: Option<String>,
}

impl RawDeposit {
    /// The first non-empty of `_id` and `id`.
    pub fn identifier(&self) -> Option<&str> {
        [self.object_id.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
    }

    /// The authoritative timestamp: the first non-empty of `date` and
    /// `createdAt`.
    pub fn timestamp_source(&self) -> Option<&RawTimestamp> {
        [self.date.as_ref(), self.created_at.as_ref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_blank())
    }
}

/// Strings pass through, numbers are rendered, anything else is dropped.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Reference to another API resource: a bare id or a populated document
/// carrying `_id` or `id`.
fn lenient_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(reference_id(&Value::deserialize(deserializer)?))
}

fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()).filter(|id| !id.trim().is_empty()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(document) => ["_id", "id"]
            .into_iter()
            .filter_map(|key| document.get(key))
            .find_map(reference_id),
        _ => None,
    }
}

/// Canonical deposit consumed by the filter, calendar and report modules.
///
/// `timestamp` is local wall-clock time of the viewer; `None` means the
/// payload carried no parseable timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub id: String,
    pub amount: f64,
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_emoji: Option<String>,
}

impl DepositRecord {
    pub fn new(id: impl Into<String>, amount: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            amount,
            timestamp: Some(timestamp),
            description: None,
            event_id: None,
            user_id: None,
            event_name: None,
            event_emoji: None,
        }
    }

    /// A record whose timestamp could not be resolved.
    pub fn undated(id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            amount,
            timestamp: None,
            description: None,
            event_id: None,
            user_id: None,
            event_name: None,
            event_emoji: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_event(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Normalizes a wire payload. `position` seeds a fallback id when the
    /// payload has none; `zone` is the viewer's time zone.
    pub fn from_raw<Tz: TimeZone>(raw: &RawDeposit, position: usize, zone: &Tz) -> Self {
        let id = raw
            .identifier()
            .map(str::to_string)
            .unwrap_or_else(|| format!("deposit-{}", position + 1));

        let amount = match raw.amount.as_ref() {
            None => 0.0,
            Some(value) => value.resolve().unwrap_or_else(|| {
                tracing::debug!(deposit = %id, "unparseable amount treated as zero");
                0.0
            }),
        };

        let timestamp = raw
            .timestamp_source()
            .and_then(|source| source.resolve(zone));
        if timestamp.is_none() {
            tracing::debug!(
                deposit = %id,
                source = ?raw.timestamp_source(),
                "deposit has no usable timestamp"
            );
        }

        Self {
            id,
            amount,
            timestamp,
            description: raw.description.clone(),
            event_id: raw.event_id.clone(),
            user_id: raw.user_id.clone(),
            event_name: raw.event_name.clone(),
            event_emoji: raw.event_emoji.clone(),
        }
    }

    pub fn local_date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }

    pub fn date_key(&self) -> Option<DateKey> {
        self.local_date().map(DateKey::from_date)
    }

    /// Description or `-` for table cells.
    pub fn description_label(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "-",
        }
    }

    /// Event label with its emoji, or `-`.
    pub fn event_label(&self) -> String {
        match (self.event_emoji.as_deref(), self.event_name.as_deref()) {
            (Some(emoji), Some(name)) => format!("{emoji} {name}"),
            (None, Some(name)) => name.to_string(),
            _ => "-".to_string(),
        }
    }
}

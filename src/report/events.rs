use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::deposit::DepositRecord;

/// Savings event as returned by `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub goal: f64,
}

impl EventInfo {
    pub fn label(&self) -> String {
        match self.emoji.as_deref() {
            Some(emoji) if !emoji.is_empty() => format!("{} {}", emoji, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Per-event deposit statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStats {
    pub event_id: String,
    pub label: String,
    pub goal: f64,
    pub deposits: usize,
    pub total_saved: f64,
    pub unique_users: usize,
}

/// Aggregates deposits per known event, in the order of `events`.
/// Deposits with no event, or an event not listed, are ignored.
pub fn event_breakdown(records: &[DepositRecord], events: &[EventInfo]) -> Vec<EventStats> {
    let mut tallies: HashMap<&str, (usize, f64, HashSet<&str>)> = events
        .iter()
        .map(|event| (event.id.as_str(), (0, 0.0, HashSet::new())))
        .collect();

    for record in records {
        let Some(event_id) = record.event_id.as_deref() else {
            continue;
        };
        let Some((count, total, users)) = tallies.get_mut(event_id) else {
            continue;
        };
        *count += 1;
        *total += record.amount;
        if let Some(user) = record.user_id.as_deref() {
            users.insert(user);
        }
    }

    events
        .iter()
        .map(|event| {
            let (deposits, total_saved, unique_users) = tallies
                .get(event.id.as_str())
                .map(|(count, total, users)| (*count, *total, users.len()))
                .unwrap_or_default();
            EventStats {
                event_id: event.id.clone(),
                label: event.label(),
                goal: event.goal,
                deposits,
                total_saved,
                unique_users,
            }
        })
        .collect()
}

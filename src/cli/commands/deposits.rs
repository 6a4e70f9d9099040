use std::{fs, path::Path};

use serde::Deserialize;

use super::usage_error;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::format_date;
use crate::deposit::DepositStore;
use crate::errors::SavingsError;
use crate::filter::{FilterCriteria, FilterField};
use crate::report::EventInfo;

const FILTER_USAGE: &str = "filter [text|min|max|from|to] [value]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load a deposits JSON export",
            "load <path>",
            cmd_load,
        ),
        CommandEntry::new(
            "events",
            "Load savings events used to label deposits",
            "events <path>",
            cmd_events,
        ),
        CommandEntry::new(
            "list",
            "Show the deposits matching the active filters",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "filter",
            "Show filters, or set one (no value clears it)",
            FILTER_USAGE,
            cmd_filter,
        ),
        CommandEntry::new("reset", "Clear every filter", "reset", cmd_reset),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error("load <path>"));
    };
    let path = Path::new(path);
    let store = DepositStore::load_from_path(path)?;
    let count = store.len();
    let undated = store.undated_count();
    context.set_store(store, path)?;

    output::success(format!(
        "Loaded {} deposits from `{}`.",
        count,
        path.display()
    ));
    if undated > 0 {
        output::warning(format!(
            "{} deposits have no usable date and are left out of the calendar.",
            undated
        ));
    }
    Ok(())
}

/// Events export: a bare array or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventPayload {
    List(Vec<EventInfo>),
    Envelope { data: Vec<EventInfo> },
}

fn cmd_events(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error("events <path>"));
    };
    let data = fs::read_to_string(path)?;
    let payload: EventPayload =
        serde_json::from_str(&data).map_err(SavingsError::from)?;
    context.events = match payload {
        EventPayload::List(events) => events,
        EventPayload::Envelope { data } => data,
    };
    tracing::info!(path = %path, events = context.events.len(), "loaded events");
    output::success(format!("Loaded {} events.", context.events.len()));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let total = context.require_store()?.len();
    let rows = context.filtered();
    warn_ignored(context);

    if rows.is_empty() {
        output::info("No deposits match the active filters.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(32),
        TableColumn::left("Event").max_width(24),
        TableColumn::right("Amount"),
    ]);
    let mut shown_total = 0.0;
    for record in &rows {
        shown_total += record.amount;
        let date = record
            .local_date()
            .map(|date| format_date(&context.config.locale, date))
            .unwrap_or_else(|| "-".to_string());
        table.push_row(vec![
            date,
            record.description_label().to_string(),
            event_label(context, record.event_id.as_deref(), &record.event_label()),
            context.format_amount(record.amount),
        ]);
    }
    output::info(table.render());
    output::info(format!(
        "Showing {} of {} deposits, total {}.",
        rows.len(),
        total,
        context.format_amount(shown_total)
    ));
    Ok(())
}

/// Prefers the name from a loaded events file over the one embedded in the
/// deposit.
fn event_label(context: &ShellContext, event_id: Option<&str>, fallback: &str) -> String {
    event_id
        .and_then(|id| context.events.iter().find(|event| event.id == id))
        .map(EventInfo::label)
        .unwrap_or_else(|| fallback.to_string())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, value)) = args.split_first() else {
        show_filters(context);
        return Ok(());
    };
    let field: FilterField = field
        .parse()
        .map_err(|_| usage_error(FILTER_USAGE))?;
    let value = (!value.is_empty()).then(|| value.join(" "));
    let cleared = value.is_none();
    context.criteria.set(field, value);

    if cleared {
        output::success(format!("Cleared `{}` filter.", field));
    } else {
        warn_ignored(context);
    }
    if let Some(store) = &context.store {
        output::info(format!(
            "{} of {} deposits match.",
            context.filtered().len(),
            store.len()
        ));
    }
    Ok(())
}

fn show_filters(context: &ShellContext) {
    output::section("Filters");
    for field in FilterField::ALL {
        output::info(format!(
            "  {:<5} {}",
            field.name(),
            context.criteria.get(field).unwrap_or("-")
        ));
    }
}

fn warn_ignored(context: &ShellContext) {
    for field in context.criteria.parse().ignored {
        output::warning(format!(
            "Ignoring `{}` filter: `{}` is not understood.",
            field,
            context.criteria.get(field).unwrap_or_default()
        ));
    }
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.criteria = FilterCriteria::cleared();
    output::success("Filters cleared.");
    Ok(())
}

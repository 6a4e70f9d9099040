use super::usage_error;
use crate::calendar::{CalendarMonth, MonthKey};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::render_grid;
use crate::currency::format_date;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "calendar",
            "Show the displayed month with daily deposits",
            "calendar",
            cmd_calendar,
        )
        .with_aliases(&["cal"]),
        CommandEntry::new("next", "Move to the next month", "next", cmd_next),
        CommandEntry::new("prev", "Move to the previous month", "prev", cmd_prev),
        CommandEntry::new("today", "Move to the current month", "today", cmd_today),
        CommandEntry::new("goto", "Move to a given month", "goto <YYYY-MM>", cmd_goto),
    ]
}

fn cmd_calendar(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    // The calendar always shows the unfiltered set.
    let records = context.require_store()?.records();
    let view = CalendarMonth::build(
        records,
        context.cursor.current(),
        context.config.locale.first_weekday,
        context.today(),
    );

    output::section(view.month.title());
    for line in render_grid(&view) {
        output::info(line);
    }
    output::info("  > today   * deposits");

    for bucket in view.cells.iter().filter_map(|cell| cell.bucket) {
        let Some(date) = bucket.date.to_date() else {
            continue;
        };
        output::info(format!(
            "  {}  {:>3} deposits  {}",
            format_date(&context.config.locale, date),
            bucket.count,
            context.format_amount(bucket.total)
        ));
    }

    let summary = view.summary;
    output::info(format!(
        "Deposits: {}  Total: {}  Average: {}",
        summary.count,
        context.format_amount(summary.total),
        context.format_amount(summary.average)
    ));
    Ok(())
}

fn show_month(context: &mut ShellContext, month: MonthKey) -> CommandResult {
    output::info(format!("Now showing {} ({}).", month.title(), month));
    if context.store.is_some() {
        cmd_calendar(context, &[])?;
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let month = context.cursor.next();
    show_month(context, month)
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let month = context.cursor.prev();
    show_month(context, month)
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let month = context.cursor.jump_to(MonthKey::of(context.today()));
    show_month(context, month)
}

fn cmd_goto(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = match args {
        [raw] => MonthKey::parse(raw).ok_or_else(|| usage_error("goto <YYYY-MM>"))?,
        _ => return Err(usage_error("goto <YYYY-MM>")),
    };
    let month = context.cursor.jump_to(month);
    show_month(context, month)
}

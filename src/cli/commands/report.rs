use super::usage_error;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::report::{
    event_breakdown, report_file_name, trailing_months, DepositReport, GoalProgress,
    DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS,
};

const TREND_USAGE: &str = "trend [months]";
const GOAL_USAGE: &str = "goal [amount]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Summarize the deposits matching the active filters",
            "report",
            cmd_report,
        ),
        CommandEntry::new(
            "trend",
            "Monthly totals ending at the displayed month",
            TREND_USAGE,
            cmd_trend,
        ),
        CommandEntry::new(
            "goal",
            "Show progress toward the savings goal, or set it",
            GOAL_USAGE,
            cmd_goal,
        ),
        CommandEntry::new(
            "breakdown",
            "Per-event deposits, totals and savers",
            "breakdown",
            cmd_breakdown,
        ),
    ]
}

fn cmd_report(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_store()?;
    let records = context.filtered();
    let report = DepositReport::from_records(records.iter().copied());

    output::section("Deposit report");
    if let Some(source) = &context.source {
        output::info(format!("  Source     : {}", source.display()));
    }
    if !context.criteria.is_empty() {
        output::info(format!(
            "  Filters    : {} active",
            context.criteria.active_count()
        ));
    }
    output::info(format!("  Deposits   : {}", report.count));
    output::info(format!("  Total      : {}", context.format_amount(report.total)));
    output::info(format!(
        "  Average    : {}",
        context.format_amount(report.average)
    ));
    output::info(format!(
        "  Largest    : {}",
        context.format_amount(report.maximum)
    ));
    output::info(format!(
        "  Export name: {}",
        report_file_name(context.config.participant.as_deref(), context.today())
    ));
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = match args {
        [] => DEFAULT_TREND_MONTHS,
        [raw] => raw
            .parse::<usize>()
            .ok()
            .filter(|months| (1..=MAX_TREND_MONTHS).contains(months))
            .ok_or_else(|| usage_error(TREND_USAGE))?,
        _ => return Err(usage_error(TREND_USAGE)),
    };
    let series = trailing_months(
        context.require_store()?.records(),
        context.cursor.current(),
        months,
    );

    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Deposits"),
        TableColumn::right("Total"),
        TableColumn::right("Average"),
    ]);
    for summary in &series {
        table.push_row(vec![
            summary.month.to_string(),
            summary.count.to_string(),
            context.format_amount(summary.total),
            context.format_amount(summary.average),
        ]);
    }
    output::section(format!("Last {} months", months));
    output::info(table.render());
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [raw] => {
            let goal = raw
                .parse::<f64>()
                .ok()
                .filter(|goal| goal.is_finite() && *goal >= 0.0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`{}` is not a valid goal amount.",
                        raw
                    ))
                })?;
            context.config.savings_goal = goal;
            context.persist_config()?;
            output::success(format!("Savings goal set to {}.", context.format_amount(goal)));
        }
        _ => return Err(usage_error(GOAL_USAGE)),
    }

    let Some(store) = &context.store else {
        return Ok(());
    };
    let progress = GoalProgress::new(store.total_amount(), context.config.savings_goal);
    output::section("Savings goal");
    output::info(format!(
        "  Saved    : {} of {} ({:.0}%)",
        context.format_amount(progress.saved),
        context.format_amount(progress.goal),
        progress.percentage
    ));
    if progress.reached {
        output::success("Goal reached!");
    } else {
        output::info(format!(
            "  Remaining: {}",
            context.format_amount(progress.remaining)
        ));
    }
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = context.require_store()?.records();
    if context.events.is_empty() {
        return Err(CommandError::InvalidArguments(
            "No events loaded. Use `events <path>` first.".into(),
        ));
    }

    let mut table = Table::new(vec![
        TableColumn::left("Event").max_width(28),
        TableColumn::right("Deposits"),
        TableColumn::right("Savers"),
        TableColumn::right("Saved"),
        TableColumn::right("Goal"),
    ]);
    for stats in event_breakdown(records, &context.events) {
        table.push_row(vec![
            stats.label,
            stats.deposits.to_string(),
            stats.unique_users.to_string(),
            context.format_amount(stats.total_saved),
            context.format_amount(stats.goal),
        ]);
    }
    output::section("Events");
    output::info(table.render());
    Ok(())
}

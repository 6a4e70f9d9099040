use chrono::Weekday;

use super::usage_error;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::{CurrencyCode, DateFormatStyle};
use crate::utils::build_info;

const CONFIG_USAGE: &str = "config [participant|currency|week-start|date-format <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "config",
            "Show or change viewer preferences",
            CONFIG_USAGE,
            cmd_config,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::info(format!("  Description: {}", entry.description));
                output::info(format!("  Usage: {}", entry.usage));
                if !entry.aliases.is_empty() {
                    output::info(format!("  Aliases: {}", entry.aliases.join(", ")));
                }
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        output::info(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
    if context.mode == CliMode::Interactive {
        output::info("Press Tab to complete command names.");
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Savings Core {}", meta.version));
    output::info(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            show_config(context);
            Ok(())
        }
        [key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))?;
            context.persist_config()?;
            output::success(format!("Updated `{}`.", key));
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!(
        "  Participant : {}",
        config.participant.as_deref().unwrap_or("-")
    ));
    output::info(format!("  Currency    : {}", config.currency.as_str()));
    output::info(format!("  Locale      : {}", config.locale.language_tag));
    output::info(format!("  Week start  : {}", config.locale.first_weekday));
    output::info(format!("  Date format : {:?}", config.locale.date_format));
    output::info(format!(
        "  Savings goal: {}",
        context.format_amount(config.savings_goal)
    ));
    if let Some(path) = &config.last_deposits_file {
        output::info(format!("  Last file   : {}", path));
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let config = &mut context.config;
    match key.to_ascii_lowercase().as_str() {
        "participant" | "name" => {
            let trimmed = value.trim();
            config.participant = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        "currency" => config.currency = CurrencyCode::new(value),
        "week-start" | "week_start" => {
            config.locale.first_weekday = value.trim().parse::<Weekday>().map_err(|_| {
                CommandError::InvalidArguments(format!("`{}` is not a weekday.", value))
            })?;
        }
        "date-format" | "date_format" => {
            config.locale.date_format = match value.trim().to_ascii_lowercase().as_str() {
                "short" => DateFormatStyle::Short,
                "medium" => DateFormatStyle::Medium,
                "long" => DateFormatStyle::Long,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "Unknown date format `{}` (short, medium, long).",
                        other
                    )))
                }
            };
        }
        _ => return Err(usage_error(CONFIG_USAGE)),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

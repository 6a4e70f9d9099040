//! Shell context, dispatch and error reporting.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    calendar::CalendarCursor,
    clock::{Clock, FixedClock, SystemClock},
    config::{Config, ConfigManager},
    currency::format_currency_value,
    deposit::{parse_calendar_date, DepositRecord, DepositStore},
    errors::SavingsError,
    filter::{filter_records, FilterCriteria},
    report::EventInfo,
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

/// Set to run the shell non-interactively over stdin lines.
pub const SCRIPT_ENV: &str = "SAVINGS_CORE_CLI_SCRIPT";
/// `YYYY-MM-DD` override for the shell's notion of today.
pub const TODAY_ENV: &str = "SAVINGS_CORE_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("No deposits loaded. Use `load <path>` first.")]
    NoDeposits,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] SavingsError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// User-facing shell failure.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SavingsError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(SavingsError::Io(err))
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// Session state of one shell run. Everything a command reads or changes
/// lives here; nothing is stored globally.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    config_manager: ConfigManager,
    pub(crate) config: Config,
    clock: Box<dyn Clock>,
    pub(crate) store: Option<DepositStore>,
    pub(crate) source: Option<PathBuf>,
    pub(crate) criteria: FilterCriteria,
    pub(crate) cursor: CalendarCursor,
    pub(crate) events: Vec<EventInfo>,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_parts(mode, config_manager, clock_from_env())
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }
        let cursor = CalendarCursor::starting_at(clock.as_ref());

        let mut context = Self {
            mode,
            registry,
            config_manager,
            config,
            clock,
            store: None,
            source: None,
            criteria: FilterCriteria::cleared(),
            cursor,
            events: Vec::new(),
            last_command: None,
            running: true,
        };
        context.auto_load_last();
        Ok(context)
    }

    fn auto_load_last(&mut self) {
        let Some(path) = self.config.last_deposits_file.clone().map(PathBuf::from) else {
            return;
        };
        if !path.exists() {
            output::warning(format!(
                "Last deposits file `{}` no longer exists.",
                path.display()
            ));
            return;
        }
        match DepositStore::load_from_path(&path) {
            Ok(store) => {
                output::info(format!(
                    "Loaded {} deposits from `{}`.",
                    store.len(),
                    path.display()
                ));
                self.store = Some(store);
                self.source = Some(path);
            }
            Err(err) => output::warning(format!(
                "Could not reload `{}`: {}",
                path.display(),
                err
            )),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        let active = self.criteria.active_count();
        if active == 0 {
            format!("savings [{}]> ", self.cursor.current())
        } else {
            format!("savings [{}] ({} filters)> ", self.cursor.current(), active)
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn require_store(&self) -> Result<&DepositStore, CommandError> {
        self.store.as_ref().ok_or(CommandError::NoDeposits)
    }

    /// Every loaded record; empty before the first `load`.
    pub(crate) fn records(&self) -> &[DepositRecord] {
        self.store.as_ref().map(DepositStore::records).unwrap_or(&[])
    }

    pub(crate) fn filtered(&self) -> Vec<&DepositRecord> {
        filter_records(self.records(), &self.criteria)
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.config.currency, &self.config.locale)
    }

    pub(crate) fn set_store(&mut self, store: DepositStore, path: &Path) -> CommandResult {
        self.store = Some(store);
        self.source = Some(path.to_path_buf());
        self.config.last_deposits_file = Some(path.display().to_string());
        self.persist_config()
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Tokenizes and runs one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                let command = self
                    .last_command
                    .as_deref()
                    .and_then(|line| line.split_whitespace().next())
                    .unwrap_or("<command>");
                output::hint(format!("Use `help {}` for usage details.", command));
            }
            CommandError::NoDeposits => {
                output::error(CommandError::NoDeposits);
                output::hint("Try `load deposits.json` with an export of your deposits.");
            }
            other => output::error(other),
        }
    }
}

fn clock_from_env() -> Box<dyn Clock> {
    let Ok(raw) = env::var(TODAY_ENV) else {
        return Box::new(SystemClock);
    };
    match parse_calendar_date(&raw) {
        Some(date) => {
            tracing::debug!(%date, "using fixed clock from environment");
            Box::new(FixedClock::at_date(date))
        }
        None => {
            tracing::warn!(value = %raw, "ignoring malformed {}", TODAY_ENV);
            Box::new(SystemClock)
        }
    }
}

/// Runs `lines` in script mode against a config home in `base`, with the
/// clock frozen on `today`.
#[cfg(test)]
pub(crate) fn process_script(
    base: &Path,
    today: NaiveDate,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let manager = ConfigManager::with_base_dir(base.to_path_buf())?;
    let mut context =
        ShellContext::with_parts(CliMode::Script, manager, Box::new(FixedClock::at_date(today)))?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}

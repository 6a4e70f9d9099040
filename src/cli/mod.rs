//! Interactive and scripted shell over the deposit views.

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod table;

pub use self::core::{CliError, CliMode, ShellContext};
pub use shell::run_cli;

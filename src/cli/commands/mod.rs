mod calendar;
mod deposits;
mod report;
mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = system::definitions();
    entries.extend(deposits::definitions());
    entries.extend(calendar::definitions());
    entries.extend(report::definitions());
    entries
}

fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {}", usage))
}

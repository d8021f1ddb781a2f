//! Shell command handlers grouped by concern.

pub mod entries;
pub mod settings;
pub mod system;
pub mod view;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

/// Registers every shell command. Order here is the order `help` lists them.
pub fn register_all(registry: &mut CommandRegistry) {
    for entry in view::definitions()
        .into_iter()
        .chain(entries::definitions())
        .chain(settings::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

/// Reads a 1-based row number (`3` or `#3`) and returns the store index.
pub(crate) fn parse_row(args: &[&str], usage: &str) -> Result<usize, CommandError> {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))?;
    raw.trim_start_matches('#')
        .parse::<usize>()
        .ok()
        .filter(|row| *row >= 1)
        .map(|row| row - 1)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{raw}` is not a row number. Usage: {usage}"))
        })
}

//! Line dispatch, confirmation handling and error reporting for the shell.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::controller::{Calculator, Confirmation};
use crate::errors::CalcError;

use super::io as cli_io;
use super::output;
use super::shell::parse_command_line;
use super::view;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Words closer than this to a command name get a "did you mean" hint.
const SUGGESTION_DISTANCE: usize = 2;

impl ShellContext {
    /// Handles one input line: a command when the first word names one,
    /// otherwise a confirmation event for the active calculator.
    pub(crate) fn handle_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let trimmed = line.trim();
        let Some(head) = trimmed.split_whitespace().next() else {
            return Ok(LoopControl::Continue);
        };

        let command = head.to_lowercase();
        if self.registry.resolve(&command).is_none() {
            self.confirm_input(trimmed);
            return Ok(LoopControl::Continue);
        }

        let tokens = match parse_command_line(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(trimmed.to_string());

        match self.dispatch(&command, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(command);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Feeds raw text to the active calculator. Non-numeric text is dropped
    /// without a message; only command look-alikes get a hint.
    pub(crate) fn confirm_input(&mut self, raw: &str) -> Confirmation {
        self.pending_input = None;
        let outcome = self.calculator_mut().confirm(raw);
        match outcome {
            Confirmation::Discarded => {
                if raw.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    self.hint_similar_command(raw);
                }
            }
            Confirmation::Staged { .. } => {}
            Confirmation::Committed { index, .. } => {
                output::success(format!("Added {}", self.describe_entry(index)));
            }
            Confirmation::Updated { index, .. } => {
                output::success(format!("Updated {}", self.describe_entry(index)));
            }
        }
        if outcome.changed_entries() {
            self.show_entries();
        }
        outcome
    }

    /// One-line summary of the stored entry at `index`.
    pub(crate) fn describe_entry(&self, index: usize) -> String {
        let format = &self.config.number;
        match self.calculator() {
            Calculator::Invoice(controller) => match controller.store().get(index) {
                Some(entry) => format!(
                    "#{}: sales {} + tax {} = {}",
                    index + 1,
                    format.format(entry.sales),
                    format.format(entry.tax),
                    format.format(entry.total())
                ),
                None => format!("#{}", index + 1),
            },
            Calculator::Sum(controller) => match controller.store().get(index) {
                Some(entry) => format!("#{}: {}", index + 1, format.format(entry.amount)),
                None => format!("#{}", index + 1),
            },
        }
    }

    /// Prints the list followed by the totals.
    pub(crate) fn show_entries(&self) {
        println!("{}", view::list_text(self.calculator(), &self.config.number));
        println!();
        self.show_totals();
    }

    pub(crate) fn show_totals(&self) {
        println!(
            "{}",
            output::emphasize(&view::totals_text(self.calculator(), &self.config.number))
        );
    }

    /// Prompt naming the value expected next, e.g. `tax> ` or `edit #2 sales> `.
    pub fn prompt(&self) -> String {
        let calculator = self.calculator();
        let field = calculator.expected_field();
        match calculator.editing_index() {
            Some(index) => format!("edit #{} {}> ", index + 1, field),
            None => format!("{}> ", field),
        }
    }

    /// Yes/no gate before destructive actions. Script mode and
    /// `confirm_deletes = false` answer yes without asking.
    pub(crate) fn confirm_gate(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script || !self.config.confirm_deletes {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .all_names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    fn hint_similar_command(&self, input: &str) {
        if let Some(best) = self.closest_command(input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Calc(err @ CalcError::IndexOutOfRange { .. }) => {
                output::error(err);
                output::hint("Use `list` to see row numbers.");
            }
            other => output::error(other),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        self.handle_line(line)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("Line editor failed: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Calc(inner) => CliError::Calc(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Calc(CalcError::Io(err))
    }
}

#[cfg(test)]
pub(crate) fn test_context(mode: CliMode) -> (ShellContext, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("create temp dir");
    let manager = crate::config::ConfigManager::with_base_dir(dir.path().to_path_buf())
        .expect("config manager in temp dir");
    let context =
        ShellContext::with_config_manager(mode, None, manager).expect("build shell context");
    (context, dir)
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> (ShellContext, tempfile::TempDir) {
    let (mut context, dir) = test_context(CliMode::Script);
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    (context, dir)
}

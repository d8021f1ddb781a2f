use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::CalcError;

use super::parse_row;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "edit",
            "Re-enter the values of an entry",
            "edit <n>",
            cmd_edit,
        ),
        CommandEntry::new(
            "cancel",
            "Stop editing and drop any half-entered values",
            "cancel",
            cmd_cancel,
        ),
        CommandEntry::new("up", "Move an entry one row up", "up <n>", cmd_up),
        CommandEntry::new("down", "Move an entry one row down", "down <n>", cmd_down),
        CommandEntry::new("delete", "Remove an entry", "delete <n>", cmd_delete)
            .with_aliases(&["rm", "del"]),
        CommandEntry::new("clear", "Remove every entry", "clear", cmd_clear),
    ]
}

fn out_of_range(context: &ShellContext, index: usize) -> CommandError {
    CommandError::Calc(CalcError::IndexOutOfRange {
        index,
        len: context.calculator().len(),
    })
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_row(args, "edit <n>")?;
    let prefill = context.calculator_mut().begin_edit(index)?;
    context.pending_input = Some(prefill.to_string());
    output::info(format!(
        "Editing {}. Enter the new {} or `cancel`.",
        context.describe_entry(index),
        context.calculator().expected_field()
    ));
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.calculator_mut().cancel_edit();
    context.pending_input = None;
    output::info("Input cleared.");
    Ok(())
}

fn cmd_up(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    move_row(context, args, "up <n>", true)
}

fn cmd_down(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    move_row(context, args, "down <n>", false)
}

fn move_row(context: &mut ShellContext, args: &[&str], usage: &str, up: bool) -> CommandResult {
    let index = parse_row(args, usage)?;
    if index >= context.calculator().len() {
        return Err(out_of_range(context, index));
    }
    let moved = if up {
        context.calculator_mut().move_up(index)
    } else {
        context.calculator_mut().move_down(index)
    };
    if moved {
        context.show_entries();
    } else {
        output::warning(format!(
            "#{} is already the {} entry.",
            index + 1,
            if up { "first" } else { "last" }
        ));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_row(args, "delete <n>")?;
    if index >= context.calculator().len() {
        return Err(out_of_range(context, index));
    }
    let description = context.describe_entry(index);
    let confirmed = context.confirm_gate(&format!("Delete {description}?"))?;
    if context.calculator_mut().delete(index, confirmed)? {
        output::success(format!("Deleted {description}"));
        context.show_entries();
    } else {
        output::info("Nothing deleted.");
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.calculator().is_empty() {
        output::info("Nothing to clear.");
        return Ok(());
    }
    let count = context.calculator().len();
    let confirmed = context.confirm_gate(&format!("Remove all {count} entries?"))?;
    let removed = context.calculator_mut().clear(confirmed);
    if removed > 0 {
        context.pending_input = None;
        output::success(format!("Removed {removed} entries."));
        context.show_entries();
    } else {
        output::info("Nothing removed.");
    }
    Ok(())
}

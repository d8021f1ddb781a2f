use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::config::CONFIG_KEYS;
use crate::controller::Variant;

const USAGE: &str = "config [show|path|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("config", "Show or change preferences", USAGE, cmd_config)
        .with_aliases(&["settings"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show(context),
        ["path"] => {
            println!("{}", context.config_manager.path().display());
            Ok(())
        }
        ["set", key, value] => set(context, key, value),
        ["set", ..] => Err(CommandError::InvalidArguments(format!(
            "Usage: config set <key> <value>. Keys: {}",
            CONFIG_KEYS.join(", ")
        ))),
        _ => Err(CommandError::InvalidArguments(format!("Usage: {USAGE}"))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let mut table = Table::new(vec![TableColumn::left("Key"), TableColumn::left("Value")]);
    for (key, value) in context.config.entries() {
        table.push_row(vec![key.to_string(), value]);
    }
    output::section("Configuration");
    println!("{}", table.render());
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_ascii_lowercase();
    context.config.set(&key, value)?;
    context.config_manager.save(&context.config)?;
    output::set_preferences(OutputPreferences::from_config(&context.config));

    match key.as_str() {
        "invoice_order" => {
            let order = context.config.invoice_order;
            context.calculator_for_mut(Variant::Invoice).set_sort_order(order);
        }
        "sum_order" => {
            let order = context.config.sum_order;
            context.calculator_for_mut(Variant::Sum).set_sort_order(order);
        }
        _ => {}
    }

    tracing::info!(key = %key, value, "configuration updated");
    output::success(format!("{key} = {value}"));
    Ok(())
}

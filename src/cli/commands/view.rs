use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::controller::Variant;
use crate::render::SortOrder;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show entries and totals", "list", cmd_list)
            .with_aliases(&["ls"]),
        CommandEntry::new("summary", "Show the totals", "summary", cmd_summary)
            .with_aliases(&["totals"]),
        CommandEntry::new(
            "sort",
            "Set or toggle the display order",
            "sort [asc|desc|toggle]",
            cmd_sort,
        ),
        CommandEntry::new(
            "mode",
            "Switch between the invoice and sum calculators",
            "mode [invoice|sum]",
            cmd_mode,
        ),
        CommandEntry::new(
            "export",
            "Print rows and totals as JSON",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_entries();
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_totals();
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let current = context.calculator().sort_order();
    let order = match args.first().map(|arg| arg.to_ascii_lowercase()) {
        None => current.toggle(),
        Some(arg) if arg == "toggle" => current.toggle(),
        Some(arg) => arg.parse::<SortOrder>().map_err(|err| {
            CommandError::InvalidArguments(format!("{err}. Usage: sort [asc|desc|toggle]"))
        })?,
    };
    context.calculator_mut().set_sort_order(order);
    output::info(format!("Display order: {}", order.label()));
    context.show_entries();
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Active calculator: {}", context.active_variant()));
        return Ok(());
    };
    let variant = raw
        .parse::<Variant>()
        .map_err(CommandError::InvalidArguments)?;
    if variant == context.active_variant() {
        output::info(format!("Already using the {variant} calculator."));
        return Ok(());
    }
    context.switch_to(variant);
    output::success(format!("Switched to the {variant} calculator."));
    context.show_entries();
    Ok(())
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    println!("{}", context.calculator().snapshot_json()?);
    Ok(())
}

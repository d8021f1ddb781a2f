use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::utils::build_info::BuildInfo;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("cls", "Clear the screen", "cls", cmd_cls),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_cls(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode == CliMode::Interactive {
        io::clear_screen()?;
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.resolve(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let info = BuildInfo::current();
    output_section(format!("Quick Tally {}", info.version));
    let mut table = Table::new(vec![TableColumn::left("Field"), TableColumn::left("Value")]);
    for (label, value) in info.rows() {
        table.push_row(vec![label.to_string(), value]);
    }
    #[cfg(feature = "ffi")]
    table.push_row(vec!["FFI".to_string(), crate::ffi::FFI_VERSION.to_string()]);
    println!("{}", table.render());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

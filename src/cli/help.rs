use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn overview_text(registry: &CommandRegistry) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Description"),
    ]);
    for entry in registry.list() {
        table.push_row(vec![entry.name.to_string(), entry.description.to_string()]);
    }
    table.render()
}

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    println!("{}", overview_text(registry));
    output::info("Any other input is read as a number for the active calculator.");
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    println!("  Description: {}", entry.description);
    println!("  Usage: {}", entry.usage);
    if !entry.aliases.is_empty() {
        println!("  Aliases: {}", entry.aliases.join(", "));
    }
}

//! Text views of the entry list and totals.

use crate::controller::{Calculator, InvoiceController, SumController};
use crate::format::NumberFormat;

use super::table::{Table, TableColumn};

pub const EMPTY_LIST: &str = "No entries yet.";

/// The entry list as a table in the calculator's current display order.
pub fn list_text(calculator: &Calculator, format: &NumberFormat) -> String {
    if calculator.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let editing = calculator.editing_index();
    let table = match calculator {
        Calculator::Invoice(controller) => invoice_table(controller, format, editing),
        Calculator::Sum(controller) => sum_table(controller, format, editing),
    };
    table.render()
}

fn row_label(index: usize, editing: Option<usize>) -> String {
    if editing == Some(index) {
        format!("#{} *", index + 1)
    } else {
        format!("#{}", index + 1)
    }
}

fn invoice_table(
    controller: &InvoiceController,
    format: &NumberFormat,
    editing: Option<usize>,
) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("#"),
        TableColumn::right("Sales"),
        TableColumn::right("Tax"),
        TableColumn::right("Total"),
    ]);
    for row in controller.rows() {
        table.push_row(vec![
            row_label(row.index, editing),
            format.format(row.entry.sales),
            format.format(row.entry.tax),
            format.format(row.entry.total()),
        ]);
    }
    table
}

fn sum_table(controller: &SumController, format: &NumberFormat, editing: Option<usize>) -> Table {
    let mut table = Table::new(vec![TableColumn::left("#"), TableColumn::right("Amount")]);
    for row in controller.rows() {
        table.push_row(vec![
            row_label(row.index, editing),
            format.format(row.entry.amount),
        ]);
    }
    table
}

/// Totals as label/value pairs.
pub fn totals_rows(calculator: &Calculator, format: &NumberFormat) -> Vec<(&'static str, String)> {
    match calculator {
        Calculator::Invoice(controller) => {
            let totals = controller.totals();
            vec![
                ("Sales", format.format(totals.total_sales)),
                ("Tax", format.format(totals.total_tax)),
                ("Total", format.format(totals.grand_total)),
            ]
        }
        Calculator::Sum(controller) => {
            vec![("Total", format.format(controller.totals().grand_total))]
        }
    }
}

pub fn totals_text(calculator: &Calculator, format: &NumberFormat) -> String {
    let rows = totals_rows(calculator, format);
    let width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<6} {:>width$}", format!("{label}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Variant;
    use crate::render::SortOrder;

    #[test]
    fn empty_list_has_placeholder() {
        let calc = Calculator::new(Variant::Sum, SortOrder::Descending);
        assert_eq!(list_text(&calc, &NumberFormat::default()), EMPTY_LIST);
    }

    #[test]
    fn invoice_list_shows_row_totals_newest_first() {
        let mut calc = Calculator::new(Variant::Invoice, SortOrder::Descending);
        for raw in ["1000", "50", "200", "10"] {
            calc.confirm(raw);
        }
        let text = list_text(&calc, &NumberFormat::default());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Sales") && lines[0].contains("Total"));
        assert!(lines[2].starts_with(" #2"));
        assert!(lines[2].ends_with("210"));
        assert!(lines[3].starts_with(" #1"));
        assert!(lines[3].ends_with("1,050"));
    }

    #[test]
    fn edited_row_is_marked() {
        let mut calc = Calculator::new(Variant::Sum, SortOrder::Ascending);
        calc.confirm("5");
        calc.begin_edit(0).unwrap();
        assert!(list_text(&calc, &NumberFormat::default()).contains("#1 *"));
    }

    #[test]
    fn totals_text_matches_example() {
        let mut calc = Calculator::new(Variant::Invoice, SortOrder::Ascending);
        for raw in ["100", "5", "200", "10"] {
            calc.confirm(raw);
        }
        let text = totals_text(&calc, &NumberFormat::default());
        assert_eq!(text, "Sales: 300\nTax:    15\nTotal: 315");
    }
}

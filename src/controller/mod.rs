//! Input controllers: turn confirmation events into entry store mutations.

pub mod invoice;
pub mod sum;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::entries::EntryId;
use crate::errors::{CalcError, Result};
use crate::render::SortOrder;

pub use invoice::{InvoiceController, Mode};
pub use sum::SumController;

/// Parses one confirmed input value. Surrounding whitespace is ignored;
/// empty text, non-numeric text and non-finite values are rejected.
///
/// The whole text must be a number. Unlike a prefix parse, `12abc` and
/// `1,000` are rejected rather than read as 12 and 1.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumericInput(trimmed.to_string())),
    }
}

/// What a confirmation event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confirmation {
    /// Input was not a number; nothing changed and the field should be cleared.
    Discarded,
    /// First half of a two-phase entry is waiting for its second value.
    Staged { value: f64, editing: bool },
    /// A new entry was appended.
    Committed { index: usize, id: EntryId },
    /// The entry under edit was replaced in place.
    Updated { index: usize, id: EntryId },
}

impl Confirmation {
    /// True when the entry list changed and views should be refreshed.
    pub fn changed_entries(&self) -> bool {
        matches!(
            self,
            Confirmation::Committed { .. } | Confirmation::Updated { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Invoice,
    Sum,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Invoice => "invoice",
            Variant::Sum => "sum",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "invoice" | "inv" => Ok(Variant::Invoice),
            "sum" | "total" => Ok(Variant::Sum),
            other => Err(format!("unknown calculator `{other}` (use invoice or sum)")),
        }
    }
}

/// Either calculator behind one value, so a shell can switch between them.
pub enum Calculator {
    Invoice(InvoiceController),
    Sum(SumController),
}

impl Calculator {
    pub fn new(variant: Variant, order: SortOrder) -> Self {
        match variant {
            Variant::Invoice => {
                let mut controller = InvoiceController::new();
                controller.set_sort_order(order);
                Calculator::Invoice(controller)
            }
            Variant::Sum => {
                let mut controller = SumController::new();
                controller.set_sort_order(order);
                Calculator::Sum(controller)
            }
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Calculator::Invoice(_) => Variant::Invoice,
            Calculator::Sum(_) => Variant::Sum,
        }
    }

    pub fn confirm(&mut self, raw: &str) -> Confirmation {
        match self {
            Calculator::Invoice(controller) => controller.confirm(raw),
            Calculator::Sum(controller) => controller.confirm(raw),
        }
    }

    /// Starts editing the entry at `index` and returns the value to
    /// pre-populate the input with.
    pub fn begin_edit(&mut self, index: usize) -> Result<f64> {
        match self {
            Calculator::Invoice(controller) => controller.begin_edit(index),
            Calculator::Sum(controller) => controller.begin_edit(index),
        }
    }

    pub fn cancel_edit(&mut self) {
        match self {
            Calculator::Invoice(controller) => controller.cancel_edit(),
            Calculator::Sum(controller) => controller.cancel_edit(),
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self {
            Calculator::Invoice(controller) => controller.editing_index(),
            Calculator::Sum(controller) => controller.editing_index(),
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        match self {
            Calculator::Invoice(controller) => controller.move_up(index),
            Calculator::Sum(controller) => controller.move_up(index),
        }
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        match self {
            Calculator::Invoice(controller) => controller.move_down(index),
            Calculator::Sum(controller) => controller.move_down(index),
        }
    }

    /// Removes the entry at `index` when `confirmed`; returns whether it did.
    pub fn delete(&mut self, index: usize, confirmed: bool) -> Result<bool> {
        match self {
            Calculator::Invoice(controller) => {
                controller.delete(index, confirmed).map(|removed| removed.is_some())
            }
            Calculator::Sum(controller) => {
                controller.delete(index, confirmed).map(|removed| removed.is_some())
            }
        }
    }

    pub fn clear(&mut self, confirmed: bool) -> usize {
        match self {
            Calculator::Invoice(controller) => controller.clear(confirmed),
            Calculator::Sum(controller) => controller.clear(confirmed),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Calculator::Invoice(controller) => controller.store().len(),
            Calculator::Sum(controller) => controller.store().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sort_order(&self) -> SortOrder {
        match self {
            Calculator::Invoice(controller) => controller.sort_order(),
            Calculator::Sum(controller) => controller.sort_order(),
        }
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        match self {
            Calculator::Invoice(controller) => controller.set_sort_order(order),
            Calculator::Sum(controller) => controller.set_sort_order(order),
        }
    }

    /// Rows and totals as pretty JSON, in the current display order.
    pub fn snapshot_json(&self) -> Result<String> {
        let json = match self {
            Calculator::Invoice(controller) => serde_json::to_string_pretty(&controller.snapshot())?,
            Calculator::Sum(controller) => serde_json::to_string_pretty(&controller.snapshot())?,
        };
        Ok(json)
    }

    /// Name of the value the next confirmation is expected to carry.
    pub fn expected_field(&self) -> &'static str {
        match self {
            Calculator::Invoice(controller) => match controller.mode() {
                Mode::AwaitingFirst => "sales",
                Mode::AwaitingSecond => "tax",
            },
            Calculator::Sum(_) => "amount",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("42").unwrap(), 42.0);
        assert_eq!(parse_amount("  -3.5 ").unwrap(), -3.5);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn parse_amount_rejects_non_numbers() {
        for raw in ["", "   ", "abc", "12abc", "inf", "NaN", "1,000"] {
            assert!(
                matches!(parse_amount(raw), Err(CalcError::InvalidNumericInput(_))),
                "`{raw}` should be rejected"
            );
        }
    }

    #[test]
    fn calculator_reports_expected_field() {
        let mut calc = Calculator::new(Variant::Invoice, SortOrder::Ascending);
        assert_eq!(calc.expected_field(), "sales");
        calc.confirm("10");
        assert_eq!(calc.expected_field(), "tax");

        let calc = Calculator::new(Variant::Sum, SortOrder::Descending);
        assert_eq!(calc.expected_field(), "amount");
        assert_eq!(calc.sort_order(), SortOrder::Descending);
    }

    #[test]
    fn snapshot_json_lists_rows_with_original_index() {
        let mut calc = Calculator::new(Variant::Sum, SortOrder::Descending);
        calc.confirm("1");
        calc.confirm("2");
        let value: serde_json::Value = serde_json::from_str(&calc.snapshot_json().unwrap()).unwrap();
        assert_eq!(value["variant"], "sum");
        assert_eq!(value["order"], "desc");
        assert_eq!(value["rows"][0]["index"], 1);
        assert_eq!(value["rows"][0]["entry"]["amount"], 2.0);
        assert_eq!(value["totals"]["grand_total"], 3.0);
    }

    #[test]
    fn variant_parses_aliases() {
        assert_eq!("Invoice".parse::<Variant>(), Ok(Variant::Invoice));
        assert_eq!("total".parse::<Variant>(), Ok(Variant::Sum));
        assert!("other".parse::<Variant>().is_err());
    }
}

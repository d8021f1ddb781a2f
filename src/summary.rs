//! Totals recomputed from scratch over the entry list.

use serde::Serialize;

use crate::entries::{AmountEntry, InvoiceEntry};

/// Aggregates of the invoice calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub total_sales: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    pub fn from_entries(entries: &[InvoiceEntry]) -> Self {
        let (total_sales, total_tax) = entries
            .iter()
            .fold((0.0, 0.0), |(sales, tax), entry| {
                (sales + entry.sales, tax + entry.tax)
            });
        Self {
            total_sales,
            total_tax,
            grand_total: total_sales + total_tax,
        }
    }
}

/// Aggregate of the sum calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SumTotals {
    pub grand_total: f64,
}

impl SumTotals {
    pub fn from_entries(entries: &[AmountEntry]) -> Self {
        Self {
            grand_total: entries.iter().map(|entry| entry.amount).sum(),
        }
    }
}

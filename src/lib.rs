#![doc(test(attr(deny(warnings))))]

//! Quick Tally keeps a running list of invoice lines (sales plus tax) or plain
//! amounts, with live totals, editing, reordering and a terminal shell.

pub mod cli;
pub mod clock;
pub mod config;
pub mod controller;
pub mod entries;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod format;
pub mod render;
pub mod summary;
pub mod utils;

pub use controller::{Calculator, Confirmation, InvoiceController, SumController, Variant};
pub use errors::{CalcError, Result};
pub use render::{render_rows, SortOrder};
pub use summary::{InvoiceTotals, SumTotals};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Quick Tally tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

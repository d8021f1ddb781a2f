//! Entry types and the ordered store that holds them.

pub mod entry;
pub mod store;

pub use entry::{AmountEntry, EntryId, InvoiceEntry};
pub use store::EntryStore;

/// Entities that carry a stable identifier across edits and moves.
pub trait Identifiable {
    fn id(&self) -> EntryId;
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identifiable;

/// Stable identity of a committed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell rows apart in logs.
    pub fn short(&self) -> String {
        let mut short = self.0.simple().to_string();
        short.truncate(8);
        short
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One invoice line: a sales amount and the tax charged on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceEntry {
    pub id: EntryId,
    pub sales: f64,
    pub tax: f64,
    pub timestamp: i64,
}

impl InvoiceEntry {
    pub fn new(sales: f64, tax: f64, timestamp: i64) -> Self {
        Self {
            id: EntryId::new(),
            sales,
            tax,
            timestamp,
        }
    }

    pub fn total(&self) -> f64 {
        self.sales + self.tax
    }
}

impl Identifiable for InvoiceEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

/// One line of the plain sum calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountEntry {
    pub id: EntryId,
    pub amount: f64,
    pub timestamp: i64,
}

impl AmountEntry {
    pub fn new(amount: f64, timestamp: i64) -> Self {
        Self {
            id: EntryId::new(),
            amount,
            timestamp,
        }
    }
}

impl Identifiable for AmountEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_total_adds_tax() {
        let entry = InvoiceEntry::new(100.0, 5.0, 0);
        assert_eq!(entry.total(), 105.0);
    }

    #[test]
    fn new_entries_get_distinct_ids() {
        let a = AmountEntry::new(1.0, 0);
        let b = AmountEntry::new(1.0, 0);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.short().len(), 8);
    }
}

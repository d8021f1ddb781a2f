//! Display ordering of the entry list.
//!
//! Rows always carry the original store index, so edit/move/delete actions
//! taken from a displayed row address the right entry whatever the order.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::controller::Variant;
use crate::entries::{EntryId, Identifiable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Insertion order, oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order `{other}` (use asc or desc)")),
        }
    }
}

/// One displayed row.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow<'a, E> {
    /// Zero-based position in the display.
    pub position: usize,
    /// Zero-based index in the entry store.
    pub index: usize,
    pub id: EntryId,
    pub entry: &'a E,
}

impl<E> DisplayRow<'_, E> {
    /// Row label as shown to users (`#1` is the first stored entry).
    pub fn label(&self) -> String {
        format!("#{}", self.index + 1)
    }
}

/// Everything a view layer needs to draw one calculator.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a, E, T> {
    pub variant: Variant,
    pub order: SortOrder,
    pub rows: Vec<DisplayRow<'a, E>>,
    pub totals: T,
}

pub fn render_rows<E: Identifiable>(entries: &[E], order: SortOrder) -> Vec<DisplayRow<'_, E>> {
    let indexed = entries.iter().enumerate();
    let ordered: Vec<(usize, &E)> = match order {
        SortOrder::Ascending => indexed.collect(),
        SortOrder::Descending => indexed.rev().collect(),
    };
    ordered
        .into_iter()
        .enumerate()
        .map(|(position, (index, entry))| DisplayRow {
            position,
            index,
            id: entry.id(),
            entry,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::AmountEntry;

    fn sample() -> Vec<AmountEntry> {
        vec![
            AmountEntry::new(1.0, 0),
            AmountEntry::new(2.0, 1),
            AmountEntry::new(3.0, 2),
        ]
    }

    #[test]
    fn ascending_keeps_insertion_order() {
        let entries = sample();
        let rows = render_rows(&entries, SortOrder::Ascending);
        let indexes: Vec<usize> = rows.iter().map(|row| row.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn descending_reverses_but_keeps_original_index() {
        let entries = sample();
        let rows = render_rows(&entries, SortOrder::Descending);
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].entry.amount, 3.0);
        assert_eq!(rows[0].id, entries[2].id);
        assert_eq!(rows[2].label(), "#1");
    }

    #[test]
    fn toggle_flips_order() {
        assert_eq!(SortOrder::Ascending.toggle(), SortOrder::Descending);
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}

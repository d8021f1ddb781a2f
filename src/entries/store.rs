use serde::Serialize;

use crate::errors::{CalcError, Result};

use super::{EntryId, Identifiable};

/// Ordered collection of entries. Insertion order is the canonical order and
/// an index is simply a position in that order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntryStore<E> {
    entries: Vec<E>,
}

impl<E> Default for EntryStore<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> EntryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its index.
    pub fn push(&mut self, entry: E) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    /// Removes the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<E> {
        self.check(index)?;
        Ok(self.entries.remove(index))
    }

    /// Applies `update` to the entry at `index` in place.
    pub fn replace(&mut self, index: usize, update: impl FnOnce(&mut E)) -> Result<()> {
        self.check(index)?;
        update(&mut self.entries[index]);
        Ok(())
    }

    /// Swaps the entry with its predecessor. Returns `false` when nothing moved.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        true
    }

    /// Swaps the entry with its successor. Returns `false` when nothing moved.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(CalcError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}

impl<E: Identifiable> EntryStore<E> {
    /// Current position of the entry with the given id.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }
}

impl<'a, E> IntoIterator for &'a EntryStore<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::AmountEntry;

    fn store_of(amounts: &[f64]) -> EntryStore<AmountEntry> {
        let mut store = EntryStore::new();
        for (ts, amount) in amounts.iter().enumerate() {
            store.push(AmountEntry::new(*amount, ts as i64));
        }
        store
    }

    fn amounts(store: &EntryStore<AmountEntry>) -> Vec<f64> {
        store.iter().map(|entry| entry.amount).collect()
    }

    #[test]
    fn push_returns_index() {
        let mut store = EntryStore::new();
        assert_eq!(store.push(AmountEntry::new(1.0, 0)), 0);
        assert_eq!(store.push(AmountEntry::new(2.0, 0)), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut store = store_of(&[1.0, 2.0, 3.0]);
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.amount, 2.0);
        assert_eq!(amounts(&store), vec![1.0, 3.0]);
        assert_eq!(store.get(1).unwrap().amount, 3.0);
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut store = store_of(&[1.0]);
        let err = store.remove(3).unwrap_err();
        assert!(matches!(err, CalcError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn moves_at_the_edges_are_noops() {
        let mut store = store_of(&[1.0, 2.0, 3.0]);
        assert!(!store.move_up(0));
        assert!(!store.move_down(2));
        assert!(!store.move_down(7));
        assert!(!store.move_down(usize::MAX));
        assert!(!store.move_up(usize::MAX));
        assert!(!EntryStore::<AmountEntry>::new().move_down(0));
        assert_eq!(amounts(&store), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn moves_swap_with_neighbour() {
        let mut store = store_of(&[1.0, 2.0, 3.0]);
        assert!(store.move_up(2));
        assert_eq!(amounts(&store), vec![1.0, 3.0, 2.0]);
        assert!(store.move_down(0));
        assert_eq!(amounts(&store), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn position_follows_id_after_move() {
        let mut store = store_of(&[1.0, 2.0]);
        let id = store.get(1).unwrap().id;
        store.move_up(1);
        assert_eq!(store.position_of(id), Some(0));
    }
}

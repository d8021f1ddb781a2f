use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::entries::{AmountEntry, EntryId, EntryStore};
use crate::errors::{CalcError, Result};
use crate::render::{render_rows, DisplayRow, Snapshot, SortOrder};
use crate::summary::SumTotals;

use super::{parse_amount, Confirmation, Variant};

/// Single-phase capture: every valid confirmation is one amount.
pub struct SumController {
    store: EntryStore<AmountEntry>,
    editing: Option<EntryId>,
    sort_order: SortOrder,
    clock: Box<dyn Clock>,
}

impl Default for SumController {
    fn default() -> Self {
        Self::new()
    }
}

impl SumController {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            store: EntryStore::new(),
            editing: None,
            sort_order: SortOrder::Descending,
            clock,
        }
    }

    pub fn confirm(&mut self, raw: &str) -> Confirmation {
        let amount = match parse_amount(raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "discarding sum input");
                return Confirmation::Discarded;
            }
        };

        if let Some(id) = self.editing.take() {
            if let Some(index) = self.store.position_of(id) {
                if self
                    .store
                    .replace(index, |entry| entry.amount = amount)
                    .is_ok()
                {
                    info!(index, id = %id.short(), amount, "amount updated");
                    return Confirmation::Updated { index, id };
                }
            }
        }

        let entry = AmountEntry::new(amount, self.clock.now_millis());
        let id = entry.id;
        let index = self.store.push(entry);
        info!(index, id = %id.short(), amount, "amount added");
        Confirmation::Committed { index, id }
    }

    /// Puts the entry at `index` under edit and returns its amount.
    pub fn begin_edit(&mut self, index: usize) -> Result<f64> {
        let entry = self.store.get(index).ok_or(CalcError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })?;
        self.editing = Some(entry.id);
        Ok(entry.amount)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        self.store.move_up(index)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        self.store.move_down(index)
    }

    pub fn delete(&mut self, index: usize, confirmed: bool) -> Result<Option<AmountEntry>> {
        if !confirmed {
            return Ok(None);
        }
        let removed = self.store.remove(index)?;
        if self.editing == Some(removed.id) {
            self.editing = None;
        }
        info!(index, id = %removed.id.short(), "amount deleted");
        Ok(Some(removed))
    }

    pub fn clear(&mut self, confirmed: bool) -> usize {
        if !confirmed {
            return 0;
        }
        let count = self.store.len();
        self.store.clear();
        self.editing = None;
        count
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing.and_then(|id| self.store.position_of(id))
    }

    pub fn store(&self) -> &EntryStore<AmountEntry> {
        &self.store
    }

    pub fn totals(&self) -> SumTotals {
        SumTotals::from_entries(self.store.as_slice())
    }

    pub fn rows(&self) -> Vec<DisplayRow<'_, AmountEntry>> {
        render_rows(self.store.as_slice(), self.sort_order)
    }

    pub fn snapshot(&self) -> Snapshot<'_, AmountEntry, SumTotals> {
        Snapshot {
            variant: Variant::Sum,
            order: self.sort_order,
            rows: self.rows(),
            totals: self.totals(),
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;

    fn controller() -> SumController {
        SumController::with_clock(Box::new(SteppingClock::new(0, 5)))
    }

    #[test]
    fn each_valid_confirmation_appends() {
        let mut controller = controller();
        assert!(matches!(
            controller.confirm("12.5"),
            Confirmation::Committed { index: 0, .. }
        ));
        assert!(matches!(
            controller.confirm("7.5"),
            Confirmation::Committed { index: 1, .. }
        ));
        assert_eq!(controller.totals().grand_total, 20.0);
        assert_eq!(controller.store().get(1).unwrap().timestamp, 5);
    }

    #[test]
    fn invalid_input_is_discarded() {
        let mut controller = controller();
        assert_eq!(controller.confirm("twelve"), Confirmation::Discarded);
        assert!(controller.store().is_empty());
    }

    #[test]
    fn newest_first_by_default() {
        let mut controller = controller();
        controller.confirm("1");
        controller.confirm("2");
        let rows = controller.rows();
        assert_eq!(rows[0].entry.amount, 2.0);
        assert_eq!(rows[0].index, 1);
    }

    #[test]
    fn edit_replaces_amount_in_place() {
        let mut controller = controller();
        controller.confirm("1");
        controller.confirm("2");
        let before = controller.store().get(0).unwrap().clone();

        assert_eq!(controller.begin_edit(0).unwrap(), 1.0);
        let outcome = controller.confirm("10");
        assert_eq!(
            outcome,
            Confirmation::Updated {
                index: 0,
                id: before.id
            }
        );
        let after = controller.store().get(0).unwrap();
        assert_eq!(after.amount, 10.0);
        assert_eq!(after.timestamp, before.timestamp);
        assert_eq!(controller.store().len(), 2);
    }

    #[test]
    fn delete_shifts_indices() {
        let mut controller = controller();
        for raw in ["1", "2", "3"] {
            controller.confirm(raw);
        }
        controller.delete(0, true).unwrap();
        let amounts: Vec<f64> = controller.store().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0]);
        assert!(controller.delete(5, true).is_err());
    }
}

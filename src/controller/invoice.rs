use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::entries::{EntryId, EntryStore, InvoiceEntry};
use crate::errors::{CalcError, Result};
use crate::render::{render_rows, DisplayRow, Snapshot, SortOrder};
use crate::summary::InvoiceTotals;

use super::{parse_amount, Confirmation, Variant};

/// Which half of an invoice line the next confirmation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AwaitingFirst,
    AwaitingSecond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    AwaitingFirst,
    AwaitingSecond { staged: f64 },
}

/// Two-phase capture of invoice lines: sales first, then tax.
pub struct InvoiceController {
    store: EntryStore<InvoiceEntry>,
    phase: Phase,
    editing: Option<EntryId>,
    sort_order: SortOrder,
    clock: Box<dyn Clock>,
}

impl Default for InvoiceController {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceController {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            store: EntryStore::new(),
            phase: Phase::AwaitingFirst,
            editing: None,
            sort_order: SortOrder::Descending,
            clock,
        }
    }

    pub fn confirm(&mut self, raw: &str) -> Confirmation {
        let value = match parse_amount(raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "discarding invoice input");
                return Confirmation::Discarded;
            }
        };

        match self.phase {
            Phase::AwaitingFirst => {
                self.phase = Phase::AwaitingSecond { staged: value };
                Confirmation::Staged {
                    value,
                    editing: self.editing.is_some(),
                }
            }
            Phase::AwaitingSecond { staged } => {
                self.phase = Phase::AwaitingFirst;
                self.commit(staged, value)
            }
        }
    }

    fn commit(&mut self, sales: f64, tax: f64) -> Confirmation {
        if let Some(id) = self.editing.take() {
            if let Some(index) = self.store.position_of(id) {
                let updated = self.store.replace(index, |entry| {
                    entry.sales = sales;
                    entry.tax = tax;
                });
                if updated.is_ok() {
                    info!(index, id = %id.short(), sales, tax, "invoice entry updated");
                    return Confirmation::Updated { index, id };
                }
            }
        }

        let entry = InvoiceEntry::new(sales, tax, self.clock.now_millis());
        let id = entry.id;
        let index = self.store.push(entry);
        info!(index, id = %id.short(), sales, tax, "invoice entry added");
        Confirmation::Committed { index, id }
    }

    /// Puts the entry at `index` under edit and returns its sales value for
    /// pre-populating the input. Both values must be entered again.
    pub fn begin_edit(&mut self, index: usize) -> Result<f64> {
        let entry = self.store.get(index).ok_or(CalcError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })?;
        let (id, sales) = (entry.id, entry.sales);
        self.editing = Some(id);
        self.phase = Phase::AwaitingFirst;
        debug!(index, id = %id.short(), "editing invoice entry");
        Ok(sales)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.phase = Phase::AwaitingFirst;
    }

    /// Drops a staged sales value without leaving edit mode.
    pub fn reset_input(&mut self) {
        self.phase = Phase::AwaitingFirst;
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        self.store.move_up(index)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        self.store.move_down(index)
    }

    /// Removes the entry at `index` if the caller's confirmation gate agreed.
    pub fn delete(&mut self, index: usize, confirmed: bool) -> Result<Option<InvoiceEntry>> {
        if !confirmed {
            return Ok(None);
        }
        let removed = self.store.remove(index)?;
        if self.editing == Some(removed.id) {
            self.cancel_edit();
        }
        info!(index, id = %removed.id.short(), "invoice entry deleted");
        Ok(Some(removed))
    }

    /// Removes every entry if confirmed and returns how many were dropped.
    pub fn clear(&mut self, confirmed: bool) -> usize {
        if !confirmed {
            return 0;
        }
        let count = self.store.len();
        self.store.clear();
        self.cancel_edit();
        count
    }

    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::AwaitingFirst => Mode::AwaitingFirst,
            Phase::AwaitingSecond { .. } => Mode::AwaitingSecond,
        }
    }

    pub fn staged(&self) -> Option<f64> {
        match self.phase {
            Phase::AwaitingFirst => None,
            Phase::AwaitingSecond { staged } => Some(staged),
        }
    }

    /// Current index of the entry under edit, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing.and_then(|id| self.store.position_of(id))
    }

    pub fn store(&self) -> &EntryStore<InvoiceEntry> {
        &self.store
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::from_entries(self.store.as_slice())
    }

    pub fn rows(&self) -> Vec<DisplayRow<'_, InvoiceEntry>> {
        render_rows(self.store.as_slice(), self.sort_order)
    }

    pub fn snapshot(&self) -> Snapshot<'_, InvoiceEntry, InvoiceTotals> {
        Snapshot {
            variant: Variant::Invoice,
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

    pub fn toggle_sort_order(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggle();
        self.sort_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;

    fn controller() -> InvoiceController {
        InvoiceController::with_clock(Box::new(SteppingClock::new(1_000, 1)))
    }

    fn enter(controller: &mut InvoiceController, sales: &str, tax: &str) -> Confirmation {
        controller.confirm(sales);
        controller.confirm(tax)
    }

    #[test]
    fn two_confirmations_append_one_entry() {
        let mut controller = controller();
        let first = controller.confirm("100");
        assert_eq!(
            first,
            Confirmation::Staged {
                value: 100.0,
                editing: false
            }
        );
        assert_eq!(controller.mode(), Mode::AwaitingSecond);
        assert_eq!(controller.staged(), Some(100.0));
        assert!(controller.store().is_empty());

        let second = controller.confirm("5");
        assert!(matches!(second, Confirmation::Committed { index: 0, .. }));
        assert_eq!(controller.mode(), Mode::AwaitingFirst);
        assert_eq!(controller.staged(), None);

        let entry = controller.store().get(0).unwrap();
        assert_eq!((entry.sales, entry.tax, entry.timestamp), (100.0, 5.0, 1_000));
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut controller = controller();
        assert_eq!(controller.confirm("oops"), Confirmation::Discarded);
        assert_eq!(controller.mode(), Mode::AwaitingFirst);

        controller.confirm("10");
        assert_eq!(controller.confirm(""), Confirmation::Discarded);
        assert_eq!(controller.mode(), Mode::AwaitingSecond);
        assert_eq!(controller.staged(), Some(10.0));
        assert_eq!(controller.store().len(), 0);
    }

    #[test]
    fn edit_replaces_values_and_keeps_timestamp() {
        let mut controller = controller();
        enter(&mut controller, "100", "5");
        enter(&mut controller, "200", "10");
        let original = controller.store().get(0).unwrap().clone();

        let prefill = controller.begin_edit(0).unwrap();
        assert_eq!(prefill, 100.0);
        assert_eq!(controller.editing_index(), Some(0));

        let staged = controller.confirm("150");
        assert_eq!(
            staged,
            Confirmation::Staged {
                value: 150.0,
                editing: true
            }
        );
        let done = controller.confirm("7.5");
        assert_eq!(
            done,
            Confirmation::Updated {
                index: 0,
                id: original.id
            }
        );

        let edited = controller.store().get(0).unwrap();
        assert_eq!(controller.store().len(), 2);
        assert_eq!((edited.sales, edited.tax), (150.0, 7.5));
        assert_eq!(edited.timestamp, original.timestamp);
        assert_eq!(edited.id, original.id);
        assert_eq!(controller.editing_index(), None);
    }

    #[test]
    fn begin_edit_discards_a_staged_value() {
        let mut controller = controller();
        enter(&mut controller, "1", "2");
        controller.confirm("99");
        controller.begin_edit(0).unwrap();
        assert_eq!(controller.mode(), Mode::AwaitingFirst);
        assert_eq!(controller.staged(), None);
    }

    #[test]
    fn reset_input_keeps_the_edit_target() {
        let mut controller = controller();
        enter(&mut controller, "1", "2");
        controller.begin_edit(0).unwrap();
        controller.confirm("5");
        controller.reset_input();
        assert_eq!(controller.staged(), None);
        assert_eq!(controller.editing_index(), Some(0));
        controller.confirm("6");
        assert!(matches!(
            controller.confirm("7"),
            Confirmation::Updated { index: 0, .. }
        ));
    }

    #[test]
    fn begin_edit_out_of_range_fails() {
        let mut controller = controller();
        assert!(controller.begin_edit(0).is_err());
        assert_eq!(controller.editing_index(), None);
    }

    #[test]
    fn edit_follows_the_entry_when_it_moves() {
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        enter(&mut controller, "2", "0");
        controller.begin_edit(1).unwrap();
        assert!(controller.move_up(1));
        assert_eq!(controller.editing_index(), Some(0));

        let done = enter(&mut controller, "20", "1");
        assert!(matches!(done, Confirmation::Updated { index: 0, .. }));
        assert_eq!(controller.store().get(0).unwrap().sales, 20.0);
        assert_eq!(controller.store().get(1).unwrap().sales, 1.0);
    }

    #[test]
    fn deleting_the_edited_entry_cancels_the_edit() {
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        enter(&mut controller, "2", "0");
        controller.begin_edit(0).unwrap();
        controller.delete(0, true).unwrap();
        assert_eq!(controller.editing_index(), None);

        let next = enter(&mut controller, "3", "0");
        assert!(matches!(next, Confirmation::Committed { index: 1, .. }));
    }

    #[test]
    fn moves_at_boundaries_are_noops() {
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        enter(&mut controller, "2", "0");
        assert!(!controller.move_up(0));
        assert!(!controller.move_down(1));
        let sales: Vec<f64> = controller.store().iter().map(|e| e.sales).collect();
        assert_eq!(sales, vec![1.0, 2.0]);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut controller = controller();
        enter(&mut controller, "100", "5");
        enter(&mut controller, "200", "10");
        assert_eq!(controller.delete(0, false).unwrap(), None);
        assert_eq!(controller.store().len(), 2);

        let removed = controller.delete(0, true).unwrap().unwrap();
        assert_eq!(removed.sales, 100.0);
        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.store().get(0).unwrap().sales, 200.0);

        let totals = controller.totals();
        assert_eq!(
            (totals.total_sales, totals.total_tax, totals.grand_total),
            (200.0, 10.0, 210.0)
        );
    }

    #[test]
    fn totals_follow_every_commit() {
        let mut controller = controller();
        enter(&mut controller, "100", "5");
        enter(&mut controller, "200", "10");
        let totals = controller.totals();
        assert_eq!(
            (totals.total_sales, totals.total_tax, totals.grand_total),
            (300.0, 15.0, 315.0)
        );
        assert_eq!(controller.totals(), totals);
    }

    #[test]
    fn rows_follow_sort_order() {
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        enter(&mut controller, "2", "0");
        assert_eq!(controller.rows()[0].index, 1);
        assert_eq!(controller.toggle_sort_order(), SortOrder::Ascending);
        assert_eq!(controller.rows()[0].index, 0);
    }

    #[test]
    fn newest_entry_is_listed_first_by_default() {
        assert_eq!(InvoiceController::new().sort_order(), SortOrder::Descending);
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        enter(&mut controller, "2", "0");
        let rows = controller.rows();
        assert_eq!(rows[0].label(), "#2");
        assert_eq!(rows[0].entry.sales, 2.0);
    }

    #[test]
    fn clear_needs_confirmation() {
        let mut controller = controller();
        enter(&mut controller, "1", "0");
        assert_eq!(controller.clear(false), 0);
        assert_eq!(controller.clear(true), 1);
        assert!(controller.store().is_empty());
    }
}

//! Reverse index from style slots to the things formatted by them

use std::collections::BTreeSet;

use ahash::AHashMap;

use super::record::SlotRef;

/// Something that points at a style slot
///
/// Sheets are identified by their index in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Referrer {
    Cell { sheet: usize, row: u32, col: u16 },
    /// Format applied to cells of a row that have none of their own
    RowDefault { sheet: usize, row: u32 },
    /// Format applied to cells of a column that have none of their own
    ColumnDefault { sheet: usize, col: u16 },
}

impl Referrer {
    pub fn cell(sheet: usize, row: u32, col: u16) -> Self {
        Referrer::Cell { sheet, row, col }
    }

    pub fn sheet(&self) -> usize {
        match *self {
            Referrer::Cell { sheet, .. }
            | Referrer::RowDefault { sheet, .. }
            | Referrer::ColumnDefault { sheet, .. } => sheet,
        }
    }
}

/// Two-way map between referrers and slots
#[derive(Debug, Clone, Default)]
pub struct ReferrerIndex {
    by_slot: AHashMap<SlotRef, BTreeSet<Referrer>>,
    by_referrer: AHashMap<Referrer, SlotRef>,
}

impl ReferrerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_of(&self, referrer: &Referrer) -> Option<SlotRef> {
        self.by_referrer.get(referrer).copied()
    }

    /// Referrers of `slot` in sorted order
    pub fn referrers_of(&self, slot: SlotRef) -> impl Iterator<Item = &Referrer> {
        self.by_slot.get(&slot).into_iter().flatten()
    }

    /// Number of referrers of `slot`
    pub fn count(&self, slot: SlotRef) -> usize {
        self.by_slot.get(&slot).map_or(0, BTreeSet::len)
    }

    /// Point `referrer` at `slot`, returning the slot it pointed at before
    pub fn insert(&mut self, referrer: Referrer, slot: SlotRef) -> Option<SlotRef> {
        let previous = self.by_referrer.insert(referrer, slot);
        if let Some(old) = previous.filter(|&old| old != slot) {
            self.forget(old, &referrer);
        }
        self.by_slot.entry(slot).or_default().insert(referrer);
        previous
    }

    /// Drop `referrer`, returning the slot it pointed at
    pub fn remove(&mut self, referrer: &Referrer) -> Option<SlotRef> {
        let slot = self.by_referrer.remove(referrer)?;
        self.forget(slot, referrer);
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.by_referrer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_referrer.is_empty()
    }

    fn forget(&mut self, slot: SlotRef, referrer: &Referrer) {
        if let Some(set) = self.by_slot.get_mut(&slot) {
            set.remove(referrer);
            if set.is_empty() {
                self.by_slot.remove(&slot);
            }
        }
    }
}

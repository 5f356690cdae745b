//! The workbook's style table
//!
//! Cells, row defaults and column defaults point at slots in a finite table
//! of [`StyleRecord`]s, and records point at slots in a table of
//! [`FontRecord`]s. Both tables are hash-consed on the serialized record, so
//! equal formatting shares one slot.
//!
//! Changing the formatting of a slot goes through [`StyleTable::intern`] (or
//! [`StyleTable::apply`], which also takes care of the font). When nobody
//! else uses the slot, it is rewritten in place; otherwise the change lands
//! in a matching or newly allocated slot and the caller moves its referrers
//! over with [`StyleTable::propagate_to_referrers`]. Slots are never
//! compacted.

use ahash::AHashMap;

use super::font::{FontRecord, FontRef};
use super::number_format::NumberFormats;
use super::record::{SlotRef, StyleRecord, STYLE_RECORD_LEN};
use super::referrer::{Referrer, ReferrerIndex};
use crate::error::{Error, Result};

/// Slot read by cells that were never given a format
pub const DEFAULT_CELL_SLOT: SlotRef = SlotRef(15);

/// Limits of a [`StyleTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleTableConfig {
    /// Most style slots the table may hold
    pub max_style_slots: usize,
    /// Slots below this index are never rewritten in place
    pub reserved_style_slots: usize,
    /// Most fonts the table may hold
    pub max_font_slots: usize,
    /// Fonts below this position are never rewritten in place
    pub reserved_font_slots: usize,
}

impl Default for StyleTableConfig {
    fn default() -> Self {
        Self {
            max_style_slots: 4000,
            reserved_style_slots: 16,
            max_font_slots: 512,
            reserved_font_slots: 4,
        }
    }
}

impl StyleTableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_style_slots(mut self, max: usize) -> Self {
        self.max_style_slots = max;
        self
    }

    pub fn with_reserved_style_slots(mut self, reserved: usize) -> Self {
        self.reserved_style_slots = reserved;
        self
    }

    pub fn with_max_font_slots(mut self, max: usize) -> Self {
        self.max_font_slots = max;
        self
    }

    pub fn with_reserved_font_slots(mut self, reserved: usize) -> Self {
        self.reserved_font_slots = reserved;
        self
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    record: T,
    uses: u32,
}

/// Style and font slots of one workbook
#[derive(Debug, Clone)]
pub struct StyleTable {
    config: StyleTableConfig,
    slots: Vec<Slot<StyleRecord>>,
    signatures: AHashMap<[u8; STYLE_RECORD_LEN], SlotRef>,
    fonts: Vec<Slot<FontRecord>>,
    font_signatures: AHashMap<Vec<u8>, FontRef>,
    formats: NumberFormats,
    referrers: ReferrerIndex,
}

impl StyleTable {
    /// Create a table holding the built-in fonts and records
    ///
    /// Fonts 0-3 are Arial 10pt. Records 0-14 are the built-in named styles
    /// and record 15 is [`DEFAULT_CELL_SLOT`].
    pub fn new(config: StyleTableConfig) -> Self {
        let mut table = Self::empty(config);
        for _ in 0..4 {
            table.push_font(FontRecord::default());
        }
        for i in 0..15u16 {
            let font = match i {
                1 | 2 => FontRef(1),
                3 | 4 => FontRef(2),
                _ => FontRef(0),
            };
            let used = if i == 0 { 0 } else { 0xF4 };
            table.push_slot(
                StyleRecord::style().with_font(font).with_used_attributes(used),
                0,
            );
        }
        table.push_slot(StyleRecord::cell(), 0);
        table
    }

    /// Create a table with no slots, to be filled by `load_raw`
    pub fn empty(config: StyleTableConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            signatures: AHashMap::new(),
            fonts: Vec::new(),
            font_signatures: AHashMap::new(),
            formats: NumberFormats::new(),
            referrers: ReferrerIndex::new(),
        }
    }

    pub fn config(&self) -> &StyleTableConfig {
        &self.config
    }

    /// Number of style slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of fonts
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn record(&self, slot: SlotRef) -> Result<&StyleRecord> {
        self.slots
            .get(slot.index())
            .map(|s| &s.record)
            .ok_or(Error::InvalidStyleIndex(u32::from(slot.0)))
    }

    pub fn font(&self, font: FontRef) -> Result<&FontRecord> {
        let position = self.font_position(font)?;
        Ok(&self.fonts[position].record)
    }

    /// Style slots with their records
    pub fn iter(&self) -> impl Iterator<Item = (SlotRef, &StyleRecord)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (SlotRef(i as u16), &slot.record))
    }

    /// Fonts with their references
    pub fn fonts(&self) -> impl Iterator<Item = (FontRef, &FontRecord)> {
        self.fonts
            .iter()
            .enumerate()
            .map(|(i, slot)| (FontRef::from_position(i), &slot.record))
    }

    /// Referrers counted against `slot`; 0 for unknown slots
    pub fn use_count(&self, slot: SlotRef) -> u32 {
        self.slots.get(slot.index()).map_or(0, |s| s.uses)
    }

    /// Style slots whose record references `font`; 0 for unknown fonts
    pub fn font_use_count(&self, font: FontRef) -> u32 {
        font.position()
            .and_then(|p| self.fonts.get(p))
            .map_or(0, |s| s.uses)
    }

    /// Find or make a slot for `candidate` on behalf of one referrer
    ///
    /// `current` is the slot the referrer used before, if any. Its count
    /// drops when the referrer moves elsewhere.
    pub fn intern(&mut self, candidate: StyleRecord, current: Option<SlotRef>) -> Result<SlotRef> {
        self.intern_weighted(candidate, current, 1)
    }

    /// Find or make a slot for `candidate` on behalf of `weight` referrers
    /// that all use `current`
    ///
    /// 1. A slot with an equal record is reused.
    /// 2. Otherwise `current` is rewritten in place if it is not reserved
    ///    and nobody but these referrers uses it.
    /// 3. Otherwise a new slot is allocated.
    ///
    /// Counts move by `weight`. Nothing changes when allocation fails.
    pub fn intern_weighted(
        &mut self,
        candidate: StyleRecord,
        current: Option<SlotRef>,
        weight: u32,
    ) -> Result<SlotRef> {
        self.font_position(candidate.font)?;
        if let Some(current) = current {
            self.record(current)?;
        }

        let signature = candidate.to_bytes();
        if let Some(current) =
            current.filter(|c| self.slots[c.index()].record.to_bytes() == signature)
        {
            return Ok(current);
        }
        if let Some(&existing) = self.signatures.get(&signature) {
            self.slots[existing.index()].uses += weight;
            if let Some(current) = current {
                self.release(current, weight);
            }
            return Ok(existing);
        }
        if let Some(current) = current.filter(|&c| self.is_exclusive(c, weight)) {
            self.rewrite_slot(current, candidate);
            log::debug!("rewrote style slot {current} in place");
            return Ok(current);
        }

        let slot = self.allocate_slot(candidate, weight)?;
        if let Some(current) = current {
            self.release(current, weight);
        }
        Ok(slot)
    }

    /// Edit a copy of `current`'s record and font, then intern the result
    /// for `weight` referrers
    ///
    /// The font goes through [`intern_font`](Self::intern_font) first. It is
    /// rewritten in place only when `current` itself will be, and no other
    /// slot uses it. A font allocated here is dropped again if the style
    /// slot cannot be allocated.
    pub fn apply<F>(&mut self, current: SlotRef, weight: u32, edit: F) -> Result<SlotRef>
    where
        F: FnOnce(&mut StyleRecord, &mut FontRecord),
    {
        let record = self.record(current)?.clone();
        let font = self.font(record.font)?.clone();
        let mut next = record.clone();
        let mut next_font = font.clone();
        edit(&mut next, &mut next_font);

        let mut allocated_font = None;
        if next_font != font {
            let exclusive = (self.is_exclusive(current, weight)
                && self.font_use_count(record.font) <= 1)
                .then_some(record.font);
            let (font_ref, allocated) = self.intern_font_inner(next_font, exclusive)?;
            next.font = font_ref;
            if allocated {
                allocated_font = Some(font_ref);
            }
        }

        match self.intern_weighted(next, Some(current), weight) {
            Ok(slot) => Ok(slot),
            Err(err) => {
                if let Some(font) = allocated_font {
                    self.discard_font(font);
                }
                Err(err)
            }
        }
    }

    /// Find or make a font equal to `candidate`
    ///
    /// Pass `current_if_exclusive` when the caller is rewriting the only
    /// style slot that uses that font; the font is then rewritten in place
    /// instead of growing the table. Font counts follow the style slots, so
    /// a freshly allocated font has no users until a record references it.
    pub fn intern_font(
        &mut self,
        candidate: FontRecord,
        current_if_exclusive: Option<FontRef>,
    ) -> Result<FontRef> {
        self.intern_font_inner(candidate, current_if_exclusive)
            .map(|(font, _)| font)
    }

    /// Drop one use of `slot`
    ///
    /// The slot stays in the table even when its count reaches zero.
    pub fn detach(&mut self, slot: SlotRef) -> Result<()> {
        self.record(slot)?;
        self.release(slot, 1);
        Ok(())
    }

    /// Point `referrer` at `slot`, moving its count from any previous slot
    pub fn bind(&mut self, referrer: Referrer, slot: SlotRef) -> Result<()> {
        self.record(slot)?;
        match self.referrers.insert(referrer, slot) {
            Some(previous) if previous == slot => {}
            Some(previous) => {
                self.release(previous, 1);
                self.slots[slot.index()].uses += 1;
            }
            None => self.slots[slot.index()].uses += 1,
        }
        Ok(())
    }

    /// Forget `referrer`, returning the slot it used
    pub fn unbind(&mut self, referrer: &Referrer) -> Option<SlotRef> {
        let slot = self.referrers.remove(referrer)?;
        self.release(slot, 1);
        Some(slot)
    }

    pub fn slot_of(&self, referrer: &Referrer) -> Option<SlotRef> {
        self.referrers.slot_of(referrer)
    }

    pub fn referrers_of(&self, slot: SlotRef) -> impl Iterator<Item = &Referrer> {
        self.referrers.referrers_of(slot)
    }

    /// Move those of `owners` that use `old` over to `new`
    ///
    /// Only the index changes; counts were already moved by `intern`.
    /// Returns how many referrers moved.
    pub fn propagate_to_referrers(
        &mut self,
        old: SlotRef,
        new: SlotRef,
        owners: &[Referrer],
    ) -> Result<usize> {
        self.record(new)?;
        if old == new {
            return Ok(0);
        }
        let mut moved = 0;
        for owner in owners {
            if self.referrers.slot_of(owner) == Some(old) {
                self.referrers.insert(*owner, new);
                moved += 1;
            }
        }
        log::trace!("moved {moved} referrers from style slot {old} to {new}");
        Ok(moved)
    }

    /// Serialized record of `slot`
    pub fn raw_bytes(&self, slot: SlotRef) -> Result<[u8; STYLE_RECORD_LEN]> {
        self.record(slot).map(StyleRecord::to_bytes)
    }

    /// Overwrite `slot` with a serialized record, keeping its referrers
    pub fn set_raw_bytes(&mut self, slot: SlotRef, bytes: &[u8]) -> Result<()> {
        self.record(slot)?;
        let record = StyleRecord::from_bytes(bytes)?;
        self.font_position(record.font)?;
        self.rewrite_slot(slot, record);
        Ok(())
    }

    /// Append a serialized record as read from a file
    ///
    /// The slot keeps its position even when an equal record exists already.
    pub fn load_raw(&mut self, bytes: &[u8]) -> Result<SlotRef> {
        let record = StyleRecord::from_bytes(bytes)?;
        self.font_position(record.font)?;
        self.allocate_slot(record, 0)
    }

    /// Serialized FONT record of `font`
    pub fn font_raw_bytes(&self, font: FontRef) -> Result<Vec<u8>> {
        self.font(font).map(FontRecord::to_bytes)
    }

    /// Append a serialized font as read from a file
    pub fn load_font_raw(&mut self, bytes: &[u8]) -> Result<FontRef> {
        let record = FontRecord::from_bytes(bytes)?;
        self.allocate_font(record)
    }

    /// Id of a number format pattern, registering custom patterns
    pub fn number_format_id(&mut self, pattern: &str) -> Result<u16> {
        self.formats.id_for(pattern)
    }

    pub fn number_format_pattern(&self, id: u16) -> Option<&str> {
        self.formats.pattern(id)
    }

    pub fn number_formats(&self) -> &NumberFormats {
        &self.formats
    }

    pub fn number_formats_mut(&mut self) -> &mut NumberFormats {
        &mut self.formats
    }

    fn is_exclusive(&self, slot: SlotRef, weight: u32) -> bool {
        slot.index() >= self.config.reserved_style_slots && self.use_count(slot) <= weight
    }

    fn font_position(&self, font: FontRef) -> Result<usize> {
        font.position()
            .filter(|&p| p < self.fonts.len())
            .ok_or(Error::InvalidStyleIndex(u32::from(font.0)))
    }

    fn release(&mut self, slot: SlotRef, weight: u32) {
        let entry = &mut self.slots[slot.index()];
        if entry.uses < weight {
            log::warn!(
                "style slot {slot} released {weight} times with {} uses",
                entry.uses
            );
        }
        entry.uses = entry.uses.saturating_sub(weight);
    }

    fn push_slot(&mut self, record: StyleRecord, uses: u32) -> SlotRef {
        let slot = SlotRef(self.slots.len() as u16);
        if let Some(position) = record.font.position() {
            if let Some(font) = self.fonts.get_mut(position) {
                font.uses += 1;
            }
        }
        self.signatures.entry(record.to_bytes()).or_insert(slot);
        self.slots.push(Slot { record, uses });
        slot
    }

    fn allocate_slot(&mut self, record: StyleRecord, uses: u32) -> Result<SlotRef> {
        let capacity = self.config.max_style_slots.min(usize::from(u16::MAX) + 1);
        if self.slots.len() >= capacity {
            return Err(Error::StyleTableExhausted {
                capacity: self.config.max_style_slots,
            });
        }
        let slot = self.push_slot(record, uses);
        log::debug!("allocated style slot {slot}");
        Ok(slot)
    }

    fn rewrite_slot(&mut self, slot: SlotRef, record: StyleRecord) {
        let signature = record.to_bytes();
        let new_font = record.font;
        let old = std::mem::replace(&mut self.slots[slot.index()].record, record);

        if old.font != new_font {
            for (font, delta) in [(old.font, -1i64), (new_font, 1)] {
                if let Some(entry) = font.position().and_then(|p| self.fonts.get_mut(p)) {
                    entry.uses = (i64::from(entry.uses) + delta).max(0) as u32;
                }
            }
        }

        let old_signature = old.to_bytes();
        if old_signature != signature && self.signatures.get(&old_signature) == Some(&slot) {
            self.signatures.remove(&old_signature);
            if let Some(other) = self
                .slots
                .iter()
                .position(|s| s.record.to_bytes() == old_signature)
            {
                self.signatures.insert(old_signature, SlotRef(other as u16));
            }
        }
        self.signatures.entry(signature).or_insert(slot);
    }

    fn push_font(&mut self, record: FontRecord) -> FontRef {
        let font = FontRef::from_position(self.fonts.len());
        self.font_signatures.entry(record.to_bytes()).or_insert(font);
        self.fonts.push(Slot { record, uses: 0 });
        font
    }

    fn allocate_font(&mut self, record: FontRecord) -> Result<FontRef> {
        if self.fonts.len() >= self.config.max_font_slots {
            return Err(Error::FontTableExhausted {
                capacity: self.config.max_font_slots,
            });
        }
        let font = self.push_font(record);
        log::debug!("allocated font {font}");
        Ok(font)
    }

    /// Returns the font and whether it was newly allocated
    fn intern_font_inner(
        &mut self,
        candidate: FontRecord,
        current_if_exclusive: Option<FontRef>,
    ) -> Result<(FontRef, bool)> {
        let signature = candidate.to_bytes();
        if let Some(&existing) = self.font_signatures.get(&signature) {
            return Ok((existing, false));
        }

        if let Some(current) = current_if_exclusive {
            let position = self.font_position(current)?;
            if position >= self.config.reserved_font_slots && self.fonts[position].uses <= 1 {
                let old = std::mem::replace(&mut self.fonts[position].record, candidate);
                let old_signature = old.to_bytes();
                if self.font_signatures.get(&old_signature) == Some(&current) {
                    self.font_signatures.remove(&old_signature);
                    if let Some(other) = self
                        .fonts
                        .iter()
                        .position(|f| f.record.to_bytes() == old_signature)
                    {
                        self.font_signatures
                            .insert(old_signature, FontRef::from_position(other));
                    }
                }
                self.font_signatures.insert(signature, current);
                log::debug!("rewrote font {current} in place");
                return Ok((current, false));
            }
        }

        self.allocate_font(candidate).map(|font| (font, true))
    }

    /// Undo the allocation of the most recent font
    fn discard_font(&mut self, font: FontRef) {
        if font.position() == Some(self.fonts.len().wrapping_sub(1)) {
            if let Some(slot) = self.fonts.pop() {
                self.font_signatures.remove(&slot.record.to_bytes());
                log::debug!("dropped font {font}");
            }
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new(StyleTableConfig::default())
    }
}

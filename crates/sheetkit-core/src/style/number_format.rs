//! Number format table
//!
//! Built-in formats resolve through [`BuiltinFormats`]; anything else is
//! registered as a custom format with an id from 164 up.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::format::{validate_pattern, BuiltinFormats, FIRST_CUSTOM_FORMAT_ID};

/// Number formats known to one workbook
#[derive(Debug, Clone)]
pub struct NumberFormats {
    custom: Vec<(u16, String)>,
    by_pattern: AHashMap<String, u16>,
    next_id: u16,
}

impl NumberFormats {
    /// 0 - General
    pub const ID_GENERAL: u16 = 0;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u16 = 2;
    /// 10 - 0.00%
    pub const ID_PERCENT_DEC2: u16 = 10;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u16 = 14;
    /// 49 - @
    pub const ID_TEXT: u16 = 49;

    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            by_pattern: AHashMap::new(),
            next_id: FIRST_CUSTOM_FORMAT_ID,
        }
    }

    /// Id for `pattern`, registering it as a custom format if needed
    pub fn id_for(&mut self, pattern: &str) -> Result<u16> {
        if let Some(id) = BuiltinFormats::id(pattern) {
            return Ok(id);
        }
        if let Some(&id) = self.by_pattern.get(pattern) {
            return Ok(id);
        }
        validate_pattern(pattern)?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| {
            Error::InvalidNumberFormat(format!("no format id left for {pattern:?}"))
        })?;
        log::debug!("registered number format {id}: {pattern:?}");
        self.insert(id, pattern.to_string());
        Ok(id)
    }

    /// Register a custom format under a known id, as read from a file
    ///
    /// Ids below 164 are rejected.
    pub fn load(&mut self, id: u16, pattern: impl Into<String>) -> Result<()> {
        if id < FIRST_CUSTOM_FORMAT_ID {
            return Err(Error::InvalidNumberFormat(format!(
                "custom format id {id} is below {FIRST_CUSTOM_FORMAT_ID}"
            )));
        }
        let pattern = pattern.into();
        self.custom.retain(|(existing, _)| *existing != id);
        self.by_pattern.retain(|_, existing| *existing != id);
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.insert(id, pattern);
        Ok(())
    }

    /// Pattern of a built-in or custom format
    pub fn pattern(&self, id: u16) -> Option<&str> {
        if let Some(pattern) = BuiltinFormats::pattern(id) {
            return Some(pattern);
        }
        self.custom
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, pattern)| pattern.as_str())
    }

    /// Custom formats in registration order
    pub fn custom(&self) -> impl Iterator<Item = (u16, &str)> {
        self.custom.iter().map(|(id, pattern)| (*id, pattern.as_str()))
    }

    fn insert(&mut self, id: u16, pattern: String) {
        self.by_pattern.entry(pattern.clone()).or_insert(id);
        self.custom.push((id, pattern));
    }
}

impl Default for NumberFormats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_ids() {
        let mut formats = NumberFormats::new();
        assert_eq!(formats.id_for("0.00").unwrap(), NumberFormats::ID_NUMBER_DEC2);
        assert_eq!(formats.id_for("general").unwrap(), NumberFormats::ID_GENERAL);
        assert_eq!(formats.custom().count(), 0);
    }

    #[test]
    fn test_custom_ids_start_at_164() {
        let mut formats = NumberFormats::new();
        assert_eq!(formats.id_for("0.000").unwrap(), 164);
        assert_eq!(formats.id_for("yyyy-mm-dd").unwrap(), 165);
        assert_eq!(formats.id_for("0.000").unwrap(), 164);
        assert_eq!(formats.pattern(165), Some("yyyy-mm-dd"));
        assert_eq!(formats.pattern(14), Some("mm-dd-yy"));
        assert_eq!(formats.pattern(170), None);
    }

    #[test]
    fn test_invalid_pattern_is_not_registered() {
        let mut formats = NumberFormats::new();
        assert!(matches!(
            formats.id_for("\"open"),
            Err(Error::InvalidNumberFormat(_))
        ));
        assert_eq!(formats.id_for("0.0").unwrap(), 164);
    }

    #[test]
    fn test_loaded_ids_move_the_counter() {
        let mut formats = NumberFormats::new();
        formats.load(200, "0.0000").unwrap();
        assert_eq!(formats.id_for("0.0000").unwrap(), 200);
        assert_eq!(formats.id_for("#,##0.000").unwrap(), 201);
        assert!(formats.load(20, "h:mm").is_err());
    }
}

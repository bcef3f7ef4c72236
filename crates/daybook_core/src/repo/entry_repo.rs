//! Date-keyed collection of daily records.

use crate::model::entry::DailyEntry;
use std::collections::BTreeMap;

/// Holds every [`DailyEntry`] by its `YYYY-MM-DD` key. Entries are created
/// lazily and never deleted.
#[derive(Debug, Default)]
pub struct DailyEntryRepository {
    entries: BTreeMap<String, DailyEntry>,
}

impl DailyEntryRepository {
    pub fn new(entries: BTreeMap<String, DailyEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, date: &str) -> Option<&DailyEntry> {
        self.entries.get(date)
    }

    /// Returns the entry for `date`, inserting the canonical default first
    /// when absent.
    pub fn entry_or_default(&mut self, date: &str) -> &mut DailyEntry {
        self.entries
            .entry(date.to_string())
            .or_insert_with(|| DailyEntry::new(date))
    }

    /// Full map view used for serialization at write-back.
    pub fn all(&self) -> &BTreeMap<String, DailyEntry> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_or_default_creates_lazily_and_is_stable() {
        let mut repo = DailyEntryRepository::default();
        assert!(repo.get("2024-01-01").is_none());

        repo.entry_or_default("2024-01-01").water_count = 4;
        assert_eq!(repo.get("2024-01-01").unwrap().water_count, 4);

        // A second access must not reset the stored entry.
        assert_eq!(repo.entry_or_default("2024-01-01").water_count, 4);
    }
}

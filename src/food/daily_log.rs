use crate::food::models::{DailyTotals, LogEntry, NutritionEstimate};
use serde::Serialize;
use uuid::Uuid;

/// Session food log. Entries are stored in insertion order and shown
/// newest-first; totals are recomputed on every read.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FoodLog {
    entries: Vec<LogEntry>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, estimate: NutritionEstimate) -> LogEntry {
        let entry = LogEntry::new(estimate);
        log::debug!("Logged {} ({})", entry.estimate.name, entry.id);
        self.entries.push(entry.clone());
        entry
    }

    /// Removes the entry with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<LogEntry> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn totals(&self) -> DailyTotals {
        self.entries.iter().map(|entry| DailyTotals::from(&entry.estimate)).sum()
    }

    /// Storage order (oldest first).
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Display order (most recently added first).
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Roll history
//!
//! In-memory, append-only record of completed rolls. Entries are kept in
//! the order they were rolled and never evicted.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dice::RollReport;

/// One completed roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub rolled_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: RollReport,
}

/// Shared roll history
#[derive(Debug, Default)]
pub struct RollHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl RollHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a roll and return the stored entry
    pub fn record(&self, report: RollReport) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            rolled_at: Utc::now(),
            report,
        };
        self.entries.lock().push(entry.clone());
        entry
    }

    /// Snapshot of every entry, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

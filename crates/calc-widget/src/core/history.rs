//! Calculation history
//!
//! Bounded, most-recent-first log of completed computations. Entries are
//! immutable once recorded; the oldest one is evicted on overflow.

use crate::core::CalcResult;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A single completed computation, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Left operand as displayed
    pub left_display: String,
    /// Operator symbol (`+ - × ÷`)
    pub operator_symbol: String,
    /// Right operand as displayed
    pub right_display: String,
    /// Rounded result as displayed
    pub result_display: String,
}

impl HistoryEntry {
    /// Creates a new history entry
    #[must_use]
    pub fn new(
        left_display: impl Into<String>,
        operator_symbol: impl Into<String>,
        right_display: impl Into<String>,
        result_display: impl Into<String>,
    ) -> Self {
        Self {
            left_display: left_display.into(),
            operator_symbol: operator_symbol.into(),
            right_display: right_display.into(),
            result_display: result_display.into(),
        }
    }

    /// Returns the list-item text, e.g. `5 + 3 = 8`
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.left_display, self.operator_symbol, self.right_display, self.result_display
        )
    }
}

/// Bounded history log
#[derive(Debug, Clone)]
pub struct History {
    /// Entries, newest at the front
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of entries to keep
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 20;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size (at least one entry)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries + 1),
            max_entries,
        }
    }

    /// Records an entry as the newest one.
    ///
    /// Returns the evicted oldest entry when the log was full.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.max_entries {
            let evicted = self.entries.pop_back();
            if let Some(old) = &evicted {
                tracing::trace!(entry = %old, "history full, evicted oldest entry");
            }
            return evicted;
        }
        None
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the oldest retained entry
    #[must_use]
    pub fn oldest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the entry at the given index (0 = newest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Returns the list-item texts, newest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(HistoryEntry::display).collect()
    }

    /// Serializes the history (newest first) to JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

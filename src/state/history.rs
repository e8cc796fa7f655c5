//! In-memory history of sent lines.

use std::collections::VecDeque;

/// Default number of lines kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Bounded list of previously sent lines with a selection cursor.
///
/// Oldest entries are evicted first. Pushing the same line twice in a row
/// keeps a single entry.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
    selected: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    /// Empty history holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            selected: 0,
        }
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no lines are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Index of the selected line.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected line, if any.
    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.selected).map(String::as_str)
    }

    /// Record a sent line and select it. Blank lines are ignored.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.trim().is_empty() || self.capacity == 0 {
            return;
        }
        if self.entries.back() != Some(&line) {
            if self.entries.len() >= self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(line);
        }
        self.selected = self.entries.len() - 1;
    }

    /// Select the next newer line, stopping at the newest.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Select the next older line, stopping at the oldest.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Remove the selected line and return it.
    pub fn remove_selected(&mut self) -> Option<String> {
        let removed = self.entries.remove(self.selected)?;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        Some(removed)
    }
}

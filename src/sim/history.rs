//! Step-back history.

use std::collections::VecDeque;

use crate::core::EngineState;
use crate::sim::snapshot::Snapshot;

/// A saved point the session can step back to.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub state: EngineState,
}

/// Bounded stack of saved engine states, newest last.
///
/// When full, pushing discards the oldest entry.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: Option<usize>,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history keeping at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == Some(0) {
            return;
        }
        if self.capacity.is_some_and(|cap| self.entries.len() >= cap) {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

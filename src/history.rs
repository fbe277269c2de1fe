//! Bounded undo/redo history of committed store states.

use std::collections::{BTreeMap, VecDeque};

/// One committed state: a deep copy of the exported variable mapping.
pub type HistoryEntry = BTreeMap<String, String>;

/// Default number of states kept on each stack.
pub const DEFAULT_CAPACITY: usize = 10;

/// Two bounded stacks of committed states.
///
/// Every user-driven change commits a snapshot onto the undo stack and
/// invalidates the redo stack. Undo/redo replay and bulk import run with
/// tracking disabled so the reload itself never commits. When a stack
/// overflows its capacity the oldest entry is evicted.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo: VecDeque<HistoryEntry>,
    redo: VecDeque<HistoryEntry>,
    capacity: usize,
    tracking_enabled: bool,
}

impl HistoryManager {
    /// Creates a manager with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a manager keeping at most `capacity` states per stack.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: VecDeque::with_capacity(capacity),
            capacity,
            tracking_enabled: true,
        }
    }

    /// Whether commits are currently recorded.
    pub fn is_tracking(&self) -> bool {
        self.tracking_enabled
    }

    /// Turns commit recording on or off (off during replay and import).
    pub fn set_tracking(&mut self, enabled: bool) {
        self.tracking_enabled = enabled;
    }

    /// Records a committed state. Ignored while tracking is disabled.
    /// A new commit invalidates all redo states.
    pub fn commit(&mut self, state: HistoryEntry) {
        if !self.tracking_enabled {
            return;
        }
        self.redo.clear();
        push_bounded(&mut self.undo, state, self.capacity);
    }

    /// Steps back one committed state.
    ///
    /// Returns the state to reload: the second-newest committed state, or
    /// an empty state when the popped entry was the only one. Returns
    /// `None` (a no-op) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let popped = self.undo.pop_back()?;
        push_bounded(&mut self.redo, popped, self.capacity);
        Some(self.undo.back().cloned().unwrap_or_default())
    }

    /// Steps forward one previously undone state, returning it for reload.
    /// `None` (a no-op) when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop_back()?;
        push_bounded(&mut self.undo, entry.clone(), self.capacity);
        Some(entry)
    }

    /// Number of undoable states.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable states.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(entry);
}

//! Bounded undo/redo history for a single-line text field
//!
//! The tracker keeps two stacks of [`HistorySnapshot`]s plus the snapshot
//! that mirrors the live field. Snapshots are moved between the stacks and
//! never edited, so every entry is exactly what the field showed at the time
//! it was recorded.

use std::collections::VecDeque;
use tracing::debug;

use super::models::HistorySnapshot;

/// Default bound for both the undo and the redo stack
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Linear undo/redo history
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    undo_stack: VecDeque<HistorySnapshot>,
    redo_stack: VecDeque<HistorySnapshot>,
    current: Option<HistorySnapshot>,
    capacity: usize,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a tracker whose stacks hold at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::with_capacity(capacity),
            current: None,
            capacity,
        }
    }

    /// Record the field content after an edit.
    ///
    /// Returns `true` when a new snapshot was stored. Text identical to the
    /// current snapshot is ignored, and the first call only initialises
    /// `current`.
    pub fn record_edit(&mut self, current_text: &str, cursor_position: usize) -> bool {
        if let Some(current) = &self.current {
            if current.text() == current_text {
                return false;
            }
        }

        let snapshot = HistorySnapshot::new(current_text, cursor_position);
        if let Some(previous) = self.current.replace(snapshot) {
            push_bounded(&mut self.undo_stack, previous, self.capacity);
        }

        // 新操作使重做历史无效
        self.redo_stack.clear();

        debug!(
            undo = self.undo_stack.len(),
            "Recorded edit ({} chars)",
            current_text.chars().count()
        );
        true
    }

    /// Step back one edit; returns the snapshot the field must now show
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        let previous = self.undo_stack.pop_back()?;
        if let Some(current) = self.current.replace(previous) {
            push_bounded(&mut self.redo_stack, current, self.capacity);
        }
        self.current.as_ref()
    }

    /// Step forward one undone edit; returns the snapshot the field must now show
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        let next = self.redo_stack.pop_back()?;
        if let Some(current) = self.current.replace(next) {
            push_bounded(&mut self.undo_stack, current, self.capacity);
        }
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.current.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn push_bounded(
    stack: &mut VecDeque<HistorySnapshot>,
    snapshot: HistorySnapshot,
    capacity: usize,
) {
    stack.push_back(snapshot);
    while stack.len() > capacity {
        stack.pop_front();
    }
}

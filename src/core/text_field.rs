//! History-tracked single-line text field
//!
//! [`EnhancedEntry`] couples a [`HistoryTracker`] with whatever surface
//! displays the text. The input layer calls [`EnhancedEntry::on_key_release`]
//! (or [`EnhancedEntry::record_edit`]) after each edit; nothing is bound to a
//! particular UI toolkit.

use tracing::debug;

use super::history::HistoryTracker;
use super::models::{HistorySnapshot, Key};

/// Display surface holding the live text and cursor.
///
/// Cursor offsets are counted in chars. `replace` must be visible to the
/// next `text`/`cursor` call.
pub trait TextSurface {
    fn text(&self) -> String;
    fn cursor(&self) -> usize;
    fn replace(&mut self, text: &str, cursor: usize);
}

/// In-memory single-line buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    /// Insert at the cursor and move the cursor past the inserted text
    pub fn insert_str(&mut self, s: &str) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert_str(offset, s);
        self.cursor += s.chars().count();
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// Replace the whole content and put the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextSurface for LineBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn replace(&mut self, text: &str, cursor: usize) {
        self.text = text.to_string();
        self.cursor = cursor.min(self.char_len());
    }
}

/// Text field with bounded undo/redo
#[derive(Debug)]
pub struct EnhancedEntry<S: TextSurface> {
    surface: S,
    history: HistoryTracker,
}

impl<S: TextSurface> EnhancedEntry<S> {
    /// Wrap a surface; its present content becomes the initial state
    pub fn new(surface: S) -> Self {
        Self::with_history(surface, HistoryTracker::new())
    }

    pub fn with_history(surface: S, history: HistoryTracker) -> Self {
        let mut entry = Self { surface, history };
        entry.record_edit();
        entry
    }

    /// Key-release hook; navigation and modifier keys are ignored
    pub fn on_key_release(&mut self, key: &Key) -> bool {
        if key.is_navigation() {
            return false;
        }
        self.record_edit()
    }

    /// Snapshot the surface if its text changed since the last snapshot
    pub fn record_edit(&mut self) -> bool {
        let text = self.surface.text();
        let cursor = self.surface.cursor();
        self.history.record_edit(&text, cursor)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                Self::apply_state(&mut self.surface, &snapshot);
                debug!("↩️ Undo to {:?}", snapshot.text());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                Self::apply_state(&mut self.surface, &snapshot);
                debug!("↪️ Redo to {:?}", snapshot.text());
                true
            }
            None => false,
        }
    }

    // The tracker already holds `state` as current, so the next key release
    // on this text is a no-op.
    fn apply_state(surface: &mut S, state: &HistorySnapshot) {
        surface.replace(state.text(), state.cursor_position());
    }

    pub fn text(&self) -> String {
        self.surface.text()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the input layer; call `on_key_release` afterwards
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }
}

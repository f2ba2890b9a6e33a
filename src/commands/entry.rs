//! Interactive history-tracked entry
//!
//! Each line typed by the user replaces the field content, as if it had been
//! edited in place. Lines starting with `:` are commands.

use std::str::FromStr;

use crate::core::history::HistoryTracker;
use crate::core::models::Key;
use crate::core::text_field::{EnhancedEntry, LineBuffer};
use crate::AppState;

/// One line of entry-session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCommand {
    Text(String),
    Undo,
    Redo,
    Show,
    Check,
    Detect,
    Parse(Option<String>),
    Help,
    Quit,
}

impl FromStr for EntryCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(EntryCommand::Text(line.to_string()));
        };

        let mut parts = command.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match name {
            "undo" | "u" => Ok(EntryCommand::Undo),
            "redo" | "r" => Ok(EntryCommand::Redo),
            "show" | "s" => Ok(EntryCommand::Show),
            "check" | "c" => Ok(EntryCommand::Check),
            "detect" | "d" => Ok(EntryCommand::Detect),
            "parse" | "p" => Ok(EntryCommand::Parse(arg)),
            "help" | "h" => Ok(EntryCommand::Help),
            "quit" | "q" => Ok(EntryCommand::Quit),
            other => Err(format!("Unknown command :{}", other)),
        }
    }
}

pub const ENTRY_HELP: &str = "\
Type a line to replace the field content.
  :undo / :redo       step through the edit history
  :show               print the field
  :check              check the field against the supported portals
  :detect             copy the URL from the browser into the field
  :parse [api]        open the field's link with a parse service
  :quit               leave";

/// History-tracked field fed line by line
#[derive(Debug)]
pub struct EntrySession {
    entry: EnhancedEntry<LineBuffer>,
}

impl EntrySession {
    pub fn new(state: &AppState) -> Self {
        let history = HistoryTracker::with_capacity(state.config.history.capacity);
        Self {
            entry: EnhancedEntry::with_history(LineBuffer::new(), history),
        }
    }

    /// Replace the content and record it; returns whether a snapshot was stored
    pub fn set_text(&mut self, text: &str) -> bool {
        self.entry.surface_mut().set_text(text);
        self.entry.on_key_release(&Key::Other("Return".to_string()))
    }

    pub fn undo(&mut self) -> bool {
        self.entry.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.entry.redo()
    }

    pub fn text(&self) -> String {
        self.entry.text()
    }

    pub fn entry(&self) -> &EnhancedEntry<LineBuffer> {
        &self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;

    #[test]
    fn test_command_parsing() {
        assert_eq!("abc".parse::<EntryCommand>(), Ok(EntryCommand::Text("abc".to_string())));
        assert_eq!(":undo".parse::<EntryCommand>(), Ok(EntryCommand::Undo));
        assert_eq!(":r".parse::<EntryCommand>(), Ok(EntryCommand::Redo));
        assert_eq!(":parse".parse::<EntryCommand>(), Ok(EntryCommand::Parse(None)));
        assert_eq!(
            ":parse  ckplayer ".parse::<EntryCommand>(),
            Ok(EntryCommand::Parse(Some("ckplayer".to_string())))
        );
        assert!(":launch".parse::<EntryCommand>().is_err());
    }

    #[test]
    fn test_session_history() {
        let mut config = AppConfig::default();
        config.history.capacity = 3;
        let state = AppState::from_config(config).unwrap();
        let mut session = EntrySession::new(&state);

        assert!(session.set_text("a"));
        assert!(session.set_text("ab"));
        assert!(!session.set_text("ab"));
        assert!(session.set_text("abc"));
        assert!(session.set_text("abcd"));
        assert_eq!(session.entry().history().undo_len(), 3);

        assert!(session.undo());
        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.entry().history().can_undo());
        assert!(!session.undo());
        assert_eq!(session.text(), "a");
        assert_eq!(session.entry().history().capacity(), 3);

        assert!(session.redo());
        assert_eq!(session.text(), "ab");
        assert!(session.entry().history().can_redo());
    }
}

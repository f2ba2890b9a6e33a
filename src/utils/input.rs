//! Keyboard and clipboard back-ends for URL autodetection
//!
//! Keys are simulated through `enigo` and the clipboard is reached through
//! `arboard`. Both open a fresh connection per call, so the back-ends hold no
//! state and can be shared across tasks.

use std::sync::Arc;
use std::time::Duration;

use arboard::Clipboard;
use enigo::{Direction, Enigo, Key as EnigoKey, Keyboard, Settings};

use crate::core::autodetect::{ClipboardAccess, ClipboardScript, KeyChord, KeyName, KeyboardDriver};
use crate::core::classifier::UrlClassifier;
use crate::core::models::{AppError, AppResult};

/// Keyboard simulated through the platform's input API
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemKeyboard;

fn enigo_key(key: KeyName) -> EnigoKey {
    match key {
        KeyName::Alt => EnigoKey::Alt,
        KeyName::Ctrl => EnigoKey::Control,
        KeyName::Shift => EnigoKey::Shift,
        KeyName::Tab => EnigoKey::Tab,
        KeyName::F6 => EnigoKey::F6,
        KeyName::Char(c) => EnigoKey::Unicode(c),
    }
}

impl KeyboardDriver for SystemKeyboard {
    fn press_and_release(&self, chord: &KeyChord) -> AppResult<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| AppError::Input(format!("Failed to access the keyboard: {}", e)))?;

        for key in chord.keys() {
            enigo
                .key(enigo_key(*key), Direction::Press)
                .map_err(|e| AppError::Input(format!("Failed to press {}: {}", key, e)))?;
        }
        for key in chord.keys().iter().rev() {
            enigo
                .key(enigo_key(*key), Direction::Release)
                .map_err(|e| AppError::Input(format!("Failed to release {}: {}", key, e)))?;
        }
        Ok(())
    }
}

/// Text clipboard of the desktop session
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

fn open_clipboard() -> AppResult<Clipboard> {
    Clipboard::new().map_err(|e| AppError::Input(format!("Failed to open clipboard: {}", e)))
}

/// An empty or non-text clipboard reads as an empty string
fn clipboard_text(result: Result<String, arboard::Error>) -> AppResult<String> {
    match result {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(AppError::Input(format!("Failed to read clipboard: {}", e))),
    }
}

impl ClipboardAccess for SystemClipboard {
    fn get_text(&self) -> AppResult<String> {
        clipboard_text(open_clipboard()?.get_text())
    }

    fn set_text(&self, text: &str) -> AppResult<()> {
        let mut clipboard = open_clipboard()?;
        let result = if text.is_empty() {
            clipboard.clear()
        } else {
            clipboard.set_text(text)
        };
        result.map_err(|e| AppError::Input(format!("Failed to write clipboard: {}", e)))
    }
}

/// Autodetect script wired to the desktop keyboard and clipboard
pub fn system_autodetect(
    classifier: Arc<UrlClassifier>,
    pause: Duration,
) -> ClipboardScript<SystemKeyboard, SystemClipboard> {
    ClipboardScript::new(SystemKeyboard, SystemClipboard, classifier).with_pause(pause)
}

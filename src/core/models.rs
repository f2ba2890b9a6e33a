//! Core data models for the video parser application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Immutable record of a text field's content and cursor position

#[derive(Debug, Clone, PartialEq, Eq)]

pub struct HistorySnapshot {
    text: String,

    // 光标位置按字符计数，而不是字节
    cursor_position: usize,
}

impl HistorySnapshot {
    /// Create a snapshot, clamping the cursor into `0..=chars(text)`
    pub fn new(text: impl Into<String>, cursor_position: usize) -> Self {
        let text = text.into();
        let cursor_position = cursor_position.min(text.chars().count());
        Self {
            text,
            cursor_position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}

/// Symbolic key identifier delivered with a key-release event

#[derive(Debug, Clone, PartialEq, Eq)]

pub enum Key {
    Left,

    Right,

    Up,

    Down,

    ShiftLeft,

    ShiftRight,

    ControlLeft,

    ControlRight,

    AltLeft,

    AltRight,

    CapsLock,

    Char(char),

    Other(String),
}

impl Key {
    /// Navigation and modifier keys never change the field content
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Left
                | Key::Right
                | Key::Up
                | Key::Down
                | Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::CapsLock
        )
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Parse a Tk-style keysym (`Left`, `Shift_L`, `Caps_Lock`, `a`, `BackSpace`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "Left" => Key::Left,
            "Right" => Key::Right,
            "Up" => Key::Up,
            "Down" => Key::Down,
            "Shift_L" => Key::ShiftLeft,
            "Shift_R" => Key::ShiftRight,
            "Control_L" => Key::ControlLeft,
            "Control_R" => Key::ControlRight,
            "Alt_L" => Key::AltLeft,
            "Alt_R" => Key::AltRight,
            "Caps_Lock" => Key::CapsLock,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        };
        Ok(key)
    }
}

/// Homepage of a supported video portal

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]

pub struct Platform {
    pub name: String,

    pub url: String,
}

/// Third-party parse endpoint; the video link is appended to `prefix`

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]

pub struct ParseApi {
    pub name: String,

    pub prefix: String,
}

impl ParseApi {
    /// Build the parse URL for a video link (plain concatenation, no escaping)
    pub fn build_url(&self, video_url: &str) -> String {
        format!("{}{}", self.prefix, video_url)
    }
}

impl fmt::Display for ParseApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name.trim(), self.prefix)
    }
}

/// Application error types

#[derive(Debug, thiserror::Error)]

pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Please get the video link first")]
    EmptyUrl,

    #[error("Unknown parse API: {0}")]
    UnknownApi(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Failed to get the video link: {0}")]
    AutodetectFailed(String),

    #[error("Input simulation error: {0}")]
    Input(String),

    #[error("System error: {0}")]
    System(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

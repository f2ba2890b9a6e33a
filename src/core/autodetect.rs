//! Best-effort detection of the URL open in the foreground browser tab
//!
//! The detector switches to the previous window, focuses the address bar,
//! copies it and switches back, pausing between key presses so the other
//! application can react. None of this is reliable: the window order, the
//! browser's shortcuts and clipboard access are all outside our control, so
//! every failure simply yields `None`.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::classifier::UrlClassifier;
use super::models::{AppError, AppResult};

/// Default pause after each simulated key press
pub const DEFAULT_KEY_PAUSE: Duration = Duration::from_millis(200);

/// A single key inside a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    Alt,
    Ctrl,
    Shift,
    Tab,
    F6,
    Char(char),
}

impl FromStr for KeyName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alt" => Ok(KeyName::Alt),
            "ctrl" | "control" => Ok(KeyName::Ctrl),
            "shift" => Ok(KeyName::Shift),
            "tab" => Ok(KeyName::Tab),
            "f6" => Ok(KeyName::F6),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Ok(KeyName::Char(c)),
                    _ => Err(AppError::Input(format!("Unknown key name: {:?}", s))),
                }
            }
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Alt => write!(f, "alt"),
            KeyName::Ctrl => write!(f, "ctrl"),
            KeyName::Shift => write!(f, "shift"),
            KeyName::Tab => write!(f, "tab"),
            KeyName::F6 => write!(f, "f6"),
            KeyName::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Keys pressed in order and released in reverse, e.g. `alt+tab`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    keys: Vec<KeyName>,
}

impl KeyChord {
    pub fn keys(&self) -> &[KeyName] {
        &self.keys
    }
}

impl FromStr for KeyChord {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split('+')
            .map(|key| key.parse::<KeyName>())
            .collect::<AppResult<Vec<KeyName>>>()?;
        Ok(Self { keys })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Simulated keyboard
pub trait KeyboardDriver {
    fn press_and_release(&self, chord: &KeyChord) -> AppResult<()>;
}

/// System clipboard text access
pub trait ClipboardAccess {
    fn get_text(&self) -> AppResult<String>;
    fn set_text(&self, text: &str) -> AppResult<()>;
}

/// Source of a guessed video URL
#[async_trait]
pub trait UrlAutodetect {
    async fn attempt_autodetect_url(&self) -> Option<String>;
}

/// Detector used when autodetection is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAutodetect;

#[async_trait]
impl UrlAutodetect for DisabledAutodetect {
    async fn attempt_autodetect_url(&self) -> Option<String> {
        debug!("Autodetect disabled by configuration");
        None
    }
}

/// Address-bar copy sequences: `alt+d` first, then the `f6` variant
pub fn default_sequences() -> (Vec<KeyChord>, Vec<KeyChord>) {
    (
        chords(&["alt+tab", "alt+d", "ctrl+c", "alt+tab"]),
        chords(&[
            "alt+tab+tab",
            "f6",
            "ctrl+c",
            "f6",
            "ctrl+c",
            "f6",
            "ctrl+c",
        ]),
    )
}

fn chords(specs: &[&str]) -> Vec<KeyChord> {
    specs
        .iter()
        .filter_map(|spec| spec.parse().ok())
        .collect()
}

/// Keyboard/clipboard script that copies the browser's address bar
pub struct ClipboardScript<K, C> {
    keyboard: K,
    clipboard: C,
    classifier: Arc<UrlClassifier>,
    pause: Duration,
    primary: Vec<KeyChord>,
    fallback: Vec<KeyChord>,
}

impl<K, C> ClipboardScript<K, C>
where
    K: KeyboardDriver + Send + Sync,
    C: ClipboardAccess + Send + Sync,
{
    pub fn new(keyboard: K, clipboard: C, classifier: Arc<UrlClassifier>) -> Self {
        let (primary, fallback) = default_sequences();
        Self {
            keyboard,
            clipboard,
            classifier,
            pause: DEFAULT_KEY_PAUSE,
            primary,
            fallback,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    async fn capture(&self, sequence: &[KeyChord]) -> AppResult<String> {
        self.clipboard.set_text("")?;
        sleep(self.pause).await;

        for chord in sequence {
            debug!("⌨️ Pressing {}", chord);
            self.keyboard.press_and_release(chord)?;
            sleep(self.pause).await;
        }

        Ok(self.clipboard.get_text()?.trim().to_string())
    }

    async fn run(&self) -> AppResult<Option<String>> {
        let copied = self.capture(&self.primary).await?;
        if self.classifier.is_supported_video_url(&copied) {
            return Ok(Some(copied));
        }

        debug!("Primary sequence copied {:?}, trying fallback", copied);
        let copied = self.capture(&self.fallback).await?;
        if self.classifier.is_supported_video_url(&copied) {
            Ok(Some(copied))
        } else {
            debug!("Fallback sequence copied {:?}", copied);
            Ok(None)
        }
    }
}

#[async_trait]
impl<K, C> UrlAutodetect for ClipboardScript<K, C>
where
    K: KeyboardDriver + Send + Sync,
    C: ClipboardAccess + Send + Sync,
{
    async fn attempt_autodetect_url(&self) -> Option<String> {
        match self.run().await {
            Ok(Some(url)) => {
                info!("🔗 Detected video URL: {}", url);
                Some(url)
            }
            Ok(None) => {
                warn!("⚠️ No supported video URL found in the browser address bar");
                None
            }
            Err(e) => {
                warn!("⚠️ URL autodetect failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingKeyboard {
        pressed: Mutex<Vec<String>>,
        fail: bool,
    }

    impl KeyboardDriver for RecordingKeyboard {
        fn press_and_release(&self, chord: &KeyChord) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Input("no input access".to_string()));
            }
            self.pressed.lock().unwrap().push(chord.to_string());
            Ok(())
        }
    }

    /// Clipboard that yields one scripted value per read
    #[derive(Default)]
    struct ScriptedClipboard {
        reads: Mutex<VecDeque<String>>,
        cleared: Mutex<usize>,
    }

    impl ScriptedClipboard {
        fn with_reads(reads: &[&str]) -> Self {
            Self {
                reads: Mutex::new(reads.iter().map(|s| s.to_string()).collect()),
                cleared: Mutex::new(0),
            }
        }
    }

    impl ClipboardAccess for ScriptedClipboard {
        fn get_text(&self) -> AppResult<String> {
            Ok(self.reads.lock().unwrap().pop_front().unwrap_or_default())
        }

        fn set_text(&self, text: &str) -> AppResult<()> {
            assert!(text.is_empty());
            *self.cleared.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn script(
        keyboard: RecordingKeyboard,
        clipboard: ScriptedClipboard,
    ) -> ClipboardScript<RecordingKeyboard, ScriptedClipboard> {
        ClipboardScript::new(keyboard, clipboard, Arc::new(UrlClassifier::default()))
            .with_pause(Duration::ZERO)
    }

    #[test]
    fn test_chord_parsing() {
        let chord: KeyChord = "alt+tab+tab".parse().unwrap();
        assert_eq!(chord.keys(), &[KeyName::Alt, KeyName::Tab, KeyName::Tab]);
        assert_eq!(chord.to_string(), "alt+tab+tab");

        let chord: KeyChord = "Ctrl+C".parse().unwrap();
        assert_eq!(chord.keys(), &[KeyName::Ctrl, KeyName::Char('c')]);

        assert!("alt+escape".parse::<KeyChord>().is_err());
    }

    #[test]
    fn test_default_sequences() {
        let (primary, fallback) = default_sequences();
        assert_eq!(primary.len(), 4);
        assert_eq!(fallback.len(), 7);
    }

    #[tokio::test]
    async fn test_primary_sequence_success() {
        let detector = script(
            RecordingKeyboard::default(),
            ScriptedClipboard::with_reads(&[" https://www.bilibili.com/video/BV1xx411c7mD \n"]),
        );

        let url = detector.attempt_autodetect_url().await;
        assert_eq!(url.as_deref(), Some("https://www.bilibili.com/video/BV1xx411c7mD"));
        assert_eq!(
            *detector.keyboard.pressed.lock().unwrap(),
            vec!["alt+tab", "alt+d", "ctrl+c", "alt+tab"]
        );
        assert_eq!(*detector.clipboard.cleared.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fallback_sequence_success() {
        let detector = script(
            RecordingKeyboard::default(),
            ScriptedClipboard::with_reads(&[
                "https://www.youku.com/",
                "https://v.qq.com/x/cover/abc.html",
            ]),
        );

        let url = detector.attempt_autodetect_url().await;
        assert_eq!(url.as_deref(), Some("https://v.qq.com/x/cover/abc.html"));

        let pressed = detector.keyboard.pressed.lock().unwrap();
        assert_eq!(pressed.len(), 11);
        assert_eq!(pressed[4], "alt+tab+tab");
        assert_eq!(*detector.clipboard.cleared.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_nothing_detected() {
        let detector = script(
            RecordingKeyboard::default(),
            ScriptedClipboard::with_reads(&["", "hello"]),
        );
        assert!(detector.attempt_autodetect_url().await.is_none());
    }

    #[tokio::test]
    async fn test_driver_error_yields_none() {
        let keyboard = RecordingKeyboard {
            fail: true,
            ..Default::default()
        };
        let detector = script(keyboard, ScriptedClipboard::default());
        assert!(detector.attempt_autodetect_url().await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_autodetect() {
        assert!(DisabledAutodetect.attempt_autodetect_url().await.is_none());
    }
}

//! Core business logic module
//!
//! This module contains the text field history, the video URL classifier,
//! the platform/parse-API catalog and the autodetect adapter.

pub mod autodetect;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod history;
pub mod models;
pub mod text_field;


// Re-export commonly used types
pub use catalog::Catalog;
pub use classifier::{is_supported_video_url, UrlClassifier};
pub use config::AppConfig;
pub use history::HistoryTracker;
pub use text_field::{EnhancedEntry, LineBuffer, TextSurface};

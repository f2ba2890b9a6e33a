//! VIP Video Parser - Core Library
//!
//! Finds the link of a streaming-video page and forwards it to third-party
//! parse services. Provides the history-tracked URL entry, the video URL
//! classifier, the platform/parse-API catalog and the browser autodetect
//! adapter.

pub mod commands;
pub mod core;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    autodetect::{ClipboardScript, DisabledAutodetect, UrlAutodetect},
    catalog::Catalog,
    classifier::{is_supported_video_url, DomainRule, UrlClassifier, SUPPORTED_DOMAINS},
    config::AppConfig,
    history::HistoryTracker,
    models::{AppError, AppResult, HistorySnapshot, Key, ParseApi, Platform},
    text_field::{EnhancedEntry, LineBuffer, TextSurface},
};

use std::sync::Arc;

/// Application state shared by the command handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub classifier: Arc<UrlClassifier>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = config.catalog()?;

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            classifier: Arc::new(UrlClassifier::default()),
        })
    }

    /// Detector for the current browser URL, honouring configuration
    pub fn autodetector(&self) -> Box<dyn UrlAutodetect + Send + Sync> {
        if self.config.autodetect.enabled {
            Box::new(utils::input::system_autodetect(
                self.classifier.clone(),
                self.config.autodetect.pause(),
            ))
        } else {
            Box::new(DisabledAutodetect)
        }
    }
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Application configuration management
//!
//! Configuration is read-only: a missing file means defaults, and nothing is
//! ever written back to disk.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::catalog::Catalog;
use super::history::DEFAULT_HISTORY_CAPACITY;
use super::models::{ParseApi, Platform};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "VIP_PARSER_CONFIG";

/// Main application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub history: HistoryConfig,
    pub autodetect: AutodetectConfig,
    pub advanced: AdvancedConfig,
    /// Replaces the built-in platform table when set
    pub platforms: Option<Vec<Platform>>,
    /// Replaces the built-in parse API table when set
    pub parse_apis: Option<Vec<ParseApi>>,
}

/// UI-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub language: String,
    /// 1-based index or name of the parse API used when none is given
    pub default_api: String,
    pub default_platform: Option<String>,
}

/// Text field history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

/// Browser URL autodetect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutodetectConfig {
    pub enabled: bool,
    pub pause_ms: u64,
}

/// Advanced configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    pub log_level: String, // "error", "warn", "info", "debug", "trace"
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            history: HistoryConfig::default(),
            autodetect: AutodetectConfig::default(),
            advanced: AdvancedConfig::default(),
            platforms: None,
            parse_apis: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: "zh-CN".to_string(),
            default_api: "1".to_string(),
            default_platform: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Default for AutodetectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pause_ms: 200,
        }
    }
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AutodetectConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl AppConfig {
    /// Load configuration from the default location, using defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, using defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::import(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path))?;

        tracing::info!("Loaded configuration from: {:?}", path);
        Ok(config)
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let project_dirs = ProjectDirs::from("com", "vipparser", "vip-video-parser")
            .with_context(|| "Failed to get project directories")?;

        Ok(project_dirs.config_dir().join("config.json"))
    }

    /// Export configuration as JSON string
    pub fn export(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Failed to export configuration")
    }

    /// Parse and validate configuration from a JSON string
    pub fn import(json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).with_context(|| "Failed to parse configuration")?;

        config
            .validate()
            .with_context(|| "Configuration is invalid")?;

        Ok(config)
    }

    /// Build the lookup catalog, applying any table overrides
    pub fn catalog(&self) -> Result<Catalog> {
        let builtin = Catalog::builtin();
        let platforms = self
            .platforms
            .clone()
            .unwrap_or_else(|| builtin.platforms().to_vec());
        let parse_apis = self
            .parse_apis
            .clone()
            .unwrap_or_else(|| builtin.parse_apis().to_vec());

        Catalog::new(platforms, parse_apis).with_context(|| "Invalid catalog configuration")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 || self.history.capacity > 1000 {
            anyhow::bail!("History capacity should be between 1 and 1000");
        }

        if self.autodetect.pause_ms > 5000 {
            anyhow::bail!("Autodetect pause should not exceed 5000 ms");
        }

        if !["error", "warn", "info", "debug", "trace"].contains(&self.advanced.log_level.as_str())
        {
            anyhow::bail!(
                "Invalid log level: must be 'error', 'warn', 'info', 'debug', or 'trace'"
            );
        }

        if let Some(ref platforms) = self.platforms {
            if platforms.is_empty() {
                anyhow::bail!("Platform list must not be empty");
            }
            for platform in platforms {
                crate::utils::validation::validate_url(&platform.url)
                    .with_context(|| format!("Invalid URL for platform {}", platform.name))?;
            }
        }

        if let Some(ref apis) = self.parse_apis {
            if apis.is_empty() {
                anyhow::bail!("Parse API list must not be empty");
            }
            for api in apis {
                crate::utils::validation::validate_url(&api.prefix)
                    .with_context(|| format!("Invalid prefix for parse API {}", api.name))?;
            }
        }

        let catalog = self.catalog()?;
        catalog
            .find_api(&self.ui.default_api)
            .with_context(|| "Default parse API not found")?;
        if let Some(ref platform) = self.ui.default_platform {
            catalog
                .find_platform(platform)
                .with_context(|| "Default platform not found")?;
        }

        Ok(())
    }
}

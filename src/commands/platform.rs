//! Platform command handlers

use tracing::info;

use crate::core::models::{AppError, AppResult, ParseApi, Platform};
use crate::utils::browser::BrowserLauncher;
use crate::AppState;

pub fn list_platforms(state: &AppState) -> &[Platform] {
    state.catalog.platforms()
}

pub fn list_parse_apis(state: &AppState) -> &[ParseApi] {
    state.catalog.parse_apis()
}

/// Open a platform's homepage; without a name the configured default (or the
/// first platform) is used
pub async fn visit_platform(
    state: &AppState,
    browser: &dyn BrowserLauncher,
    platform: Option<&str>,
) -> AppResult<Platform> {
    let selected = match platform.or(state.config.ui.default_platform.as_deref()) {
        Some(key) => state.catalog.find_platform(key)?,
        None => state
            .catalog
            .platforms()
            .first()
            .ok_or_else(|| AppError::UnknownPlatform("no platforms configured".to_string()))?,
    };

    info!("📺 Visiting {}: {}", selected.name, selected.url);
    browser.open(&selected.url).await?;
    Ok(selected.clone())
}

//! Parse-service command handlers

use tracing::{info, warn};

use crate::core::models::{AppError, AppResult, ParseApi};
use crate::utils::browser::BrowserLauncher;
use crate::AppState;

/// Resolve the parse API to use, falling back to the configured default
pub fn select_api<'a>(state: &'a AppState, api: Option<&str>) -> AppResult<&'a ParseApi> {
    let key = api.unwrap_or(state.config.ui.default_api.as_str());
    state.catalog.find_api(key)
}

/// Forward a video link to a parse service and open the result.
///
/// Surrounding whitespace is trimmed first. Returns the parse URL that was
/// opened. Links the classifier does not recognise are still forwarded.
pub async fn parse_video(
    state: &AppState,
    browser: &dyn BrowserLauncher,
    url: &str,
    api: Option<&str>,
) -> AppResult<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::EmptyUrl);
    }

    let parse_api = select_api(state, api)?;
    if !state.classifier.is_supported_video_url(url) {
        warn!("⚠️ {} is not a recognised video page, forwarding anyway", url);
    }

    let parse_url = parse_api.build_url(url);
    info!("🎬 Parsing with {}: {}", parse_api.name.trim(), url);
    browser.open(&parse_url).await?;

    Ok(parse_url)
}

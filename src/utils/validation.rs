//! URL and input validation utilities

use url::Url;

use crate::core::models::{AppError, AppResult};

/// Parse a URL, rejecting anything that is not absolute
pub fn validate_url(url: &str) -> AppResult<Url> {
    Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))
}

/// Validate a URL that is about to be handed to the browser
pub fn validate_browser_url(url: &str) -> AppResult<Url> {
    let parsed = validate_url(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(AppError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, scheme
        ))),
    }
}

//! Link detection and checking command handlers

use serde::Serialize;
use tracing::info;

use crate::core::autodetect::UrlAutodetect;
use crate::core::models::{AppError, AppResult};
use crate::AppState;

/// Hint shown when the browser URL could not be detected
pub const AUTODETECT_HINT: &str = "make sure the video page is open in the browser, \
switch to the browser window before detecting, or copy the link manually \
(F6 selects the address bar, Ctrl+C copies it)";

/// Classification result for a link
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UrlCheck {
    pub url: String,
    pub supported: bool,
    pub domain: Option<String>,
}

/// Classify a link against the supported portals
pub fn check_url(state: &AppState, url: &str) -> UrlCheck {
    let url = url.trim();
    let domain = state.classifier.classify(url);
    UrlCheck {
        url: url.to_string(),
        supported: domain.is_some(),
        domain: domain.map(str::to_string),
    }
}

/// Guess the URL of the browser tab the user was looking at
pub async fn get_current_url(detector: &(dyn UrlAutodetect + Send + Sync)) -> AppResult<String> {
    info!("🔍 Detecting the current browser URL");

    detector
        .attempt_autodetect_url()
        .await
        .ok_or_else(|| AppError::AutodetectFailed(AUTODETECT_HINT.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::autodetect::DisabledAutodetect;
    use crate::core::config::AppConfig;
    use async_trait::async_trait;

    struct FixedAutodetect(&'static str);

    #[async_trait]
    impl UrlAutodetect for FixedAutodetect {
        async fn attempt_autodetect_url(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn test_check_url() {
        let state = AppState::from_config(AppConfig::default()).unwrap();

        let check = check_url(&state, " https://www.acfun.cn/v/ac12345678 ");
        assert!(check.supported);
        assert_eq!(check.url, "https://www.acfun.cn/v/ac12345678");
        assert_eq!(check.domain.as_deref(), Some("acfun.cn"));

        let check = check_url(&state, "not a url at all");
        assert!(!check.supported);
        assert!(check.domain.is_none());
    }

    #[test]
    fn test_check_url_serializes() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        let json = serde_json::to_value(check_url(&state, "https://www.youku.com/")).unwrap();
        assert_eq!(json["supported"], false);
        assert!(json["domain"].is_null());
    }

    #[tokio::test]
    async fn test_get_current_url() {
        let detector = FixedAutodetect("https://www.mgtv.com/b/1/2.html");
        assert_eq!(
            get_current_url(&detector).await.unwrap(),
            "https://www.mgtv.com/b/1/2.html"
        );

        let result = get_current_url(&DisabledAutodetect).await;
        assert!(matches!(result, Err(AppError::AutodetectFailed(_))));
    }
}

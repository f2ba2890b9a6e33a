//! Opening URLs in the user's default browser

use async_trait::async_trait;
use tracing::info;

use super::validation::validate_browser_url;
use crate::core::models::{AppError, AppResult};

/// Something that can show a URL to the user
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn open(&self, url: &str) -> AppResult<()>;
}

/// Default browser of the running desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &str) -> AppResult<()> {
        validate_browser_url(url)?;
        info!("🌐 Opening in browser: {}", url);

        let mut command = browser_command(url);
        let output = command
            .output()
            .await
            .map_err(|e| AppError::System(format!("Failed to launch browser: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::System(format!(
                "Browser command failed: {}",
                error.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(url);
    command
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn browser_command(url: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_http_urls() {
        let result = SystemBrowser.open("file:///etc/hosts").await;
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));

        let result = SystemBrowser.open("").await;
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
    }
}

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::actions::Navigator;
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Navigator for the command line: follows an export URL and saves the
/// spreadsheet the server sends back, as a browser download would.
pub struct DownloadNavigator {
    http_client: Client,
    download_dir: PathBuf,
}

impl DownloadNavigator {
    /// # Errors
    ///
    /// Returns `AppError::Api` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::Api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            download_dir: config.download_dir.clone(),
        })
    }
}

impl Navigator for DownloadNavigator {
    async fn navigate(&self, url: Url) -> AppResult<()> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Api(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| fallback_file_name(&url));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Api(format!("Failed to read export body: {e}")))?;

        let path = self.download_dir.join(&file_name);
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Export saved");
        Ok(())
    }
}

/// File name from a `Content-Disposition: attachment; filename=...` header.
/// Path separators are dropped so the file always lands in the download directory.
#[must_use]
pub fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name).to_string())
        .filter(|name| !name.is_empty())
}

fn fallback_file_name(url: &Url) -> String {
    let stem = url
        .path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or("export");
    format!("{stem}.xlsx")
}

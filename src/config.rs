use std::env;
use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Dashboard API
    pub base_url: Url,
    pub http_timeout_seconds: u64,

    // UI behaviour
    pub feedback_clear_millis: u64,
    pub export_default_interval_hours: String,

    // Exports
    pub download_dir: PathBuf,

    // Logging
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `DASHBOARD_BASE_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("DASHBOARD_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::Invalid("DASHBOARD_BASE_URL", e.to_string()))?;

        Ok(Self {
            base_url,
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            feedback_clear_millis: env::var("FEEDBACK_CLEAR_MILLIS")
                .unwrap_or_else(|_| "2400".to_string())
                .parse()
                .unwrap_or(2400),
            export_default_interval_hours: env::var("EXPORT_DEFAULT_INTERVAL_HOURS")
                .unwrap_or_else(|_| "4".to_string()),

            download_dir: env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            log_format: LogFormat::from_str(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            ),
        })
    }

    /// Configuration pointing at `base_url` with every other setting at its default.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            http_timeout_seconds: 30,
            feedback_clear_millis: 2400,
            export_default_interval_hours: "4".to_string(),
            download_dir: PathBuf::from("."),
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

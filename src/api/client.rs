use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::api::models::{AlarmUpdate, RenameRequest, ScheduleUpdate};
use crate::api::sensors_url;
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Remote update calls made by the dashboard controls.
///
/// Every call resolves to `Ok(())` on a success status and to an error otherwise.
pub trait SensorApi: Send + Sync {
    fn rename_sensor(&self, mac: &str, name: &str) -> impl Future<Output = AppResult<()>> + Send;

    fn update_alarms(
        &self,
        mac: &str,
        update: &AlarmUpdate,
    ) -> impl Future<Output = AppResult<()>> + Send;

    fn update_schedule(
        &self,
        mac: &str,
        update: &ScheduleUpdate,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

pub struct HttpSensorApi {
    http_client: Client,
    base_url: Url,
}

impl HttpSensorApi {
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
            base_url: config.base_url.clone(),
        })
    }

    async fn put_json<T: Serialize + Sync>(&self, url: Url, body: &T) -> AppResult<()> {
        tracing::debug!(url = %url, "PUT");

        let response = self
            .http_client
            .put(url)
            .json(body)
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

        Ok(())
    }
}

impl SensorApi for HttpSensorApi {
    async fn rename_sensor(&self, mac: &str, name: &str) -> AppResult<()> {
        let url = sensors_url(&self.base_url, Some(mac), &[])?;
        let body = RenameRequest {
            name: name.to_string(),
        };
        self.put_json(url, &body).await
    }

    async fn update_alarms(&self, mac: &str, update: &AlarmUpdate) -> AppResult<()> {
        let url = sensors_url(&self.base_url, Some(mac), &["alarms"])?;
        self.put_json(url, update).await
    }

    async fn update_schedule(&self, mac: &str, update: &ScheduleUpdate) -> AppResult<()> {
        let url = sensors_url(&self.base_url, Some(mac), &["schedules"])?;
        self.put_json(url, update).await
    }
}

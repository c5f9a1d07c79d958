pub mod client;
pub mod download;
pub mod models;

pub use client::{HttpSensorApi, SensorApi};
pub use download::DownloadNavigator;

use url::Url;

use crate::error::{AppError, AppResult};

/// `{base}/api/sensors[/{mac}]/{tail...}` with every segment percent-encoded.
///
/// # Errors
///
/// Returns `AppError::Validation` if `base` cannot carry a path (e.g. `mailto:`).
pub fn sensors_url(base: &Url, mac: Option<&str>, tail: &[&str]) -> AppResult<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| AppError::Validation(format!("Base URL cannot carry a path: {base}")))?;
        segments.pop_if_empty().extend(["api", "sensors"]);
        if let Some(mac) = mac {
            segments.push(mac);
        }
        segments.extend(tail);
    }
    Ok(url)
}

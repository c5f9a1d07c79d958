//! State the server embeds in the dashboard page before any script runs.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::chart::{render_readings, ChartConfig, DisplayMode};
use crate::error::{AppError, AppResult};
use crate::models::{Reading, SensorThresholds};

/// Threshold attributes and chart target of one sensor card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorCard {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub temp_min: Option<String>,
    #[serde(default)]
    pub temp_max: Option<String>,
    #[serde(default)]
    pub hum_min: Option<String>,
    #[serde(default)]
    pub hum_max: Option<String>,
    #[serde(default = "default_has_canvas")]
    pub has_canvas: bool,
}

fn default_has_canvas() -> bool {
    true
}

impl SensorCard {
    #[must_use]
    pub fn thresholds(&self) -> SensorThresholds {
        SensorThresholds::from_attributes(
            self.temp_min.as_deref(),
            self.temp_max.as_deref(),
            self.hum_min.as_deref(),
            self.hum_max.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    /// Recent readings per sensor mac, for the mini charts.
    #[serde(default)]
    pub sensor_chart_data: HashMap<String, Vec<Reading>>,
    /// Full history of the sensor shown on a detail page.
    #[serde(default)]
    pub sensor_readings: Option<Vec<Reading>>,
    #[serde(default)]
    pub cards: HashMap<String, SensorCard>,
}

impl DashboardPage {
    /// # Errors
    ///
    /// Returns `AppError::Json` if the document does not match the page layout.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `AppError::Io` or `AppError::Json` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_json(&raw)
    }

    /// # Errors
    ///
    /// Returns `AppError::MissingTarget` when the page has no card for `mac`.
    pub fn card(&self, mac: &str) -> AppResult<&SensorCard> {
        self.cards
            .get(mac)
            .ok_or_else(|| AppError::MissingTarget(format!("sensor card for {mac}")))
    }

    /// Mini chart of one sensor.
    ///
    /// `Ok(None)` when the sensor has no readings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingTarget` if the card or its canvas is absent.
    pub fn render_sensor(&self, mac: &str) -> AppResult<Option<ChartConfig>> {
        let card = self.card(mac)?;
        if !card.has_canvas {
            return Err(AppError::MissingTarget(format!("chart canvas for {mac}")));
        }
        let thresholds = card.thresholds();
        Ok(render_readings(
            self.readings(mac),
            Some(&thresholds),
            DisplayMode::Compact,
        ))
    }

    /// Mini charts for every sensor with chart data, keyed by mac.
    ///
    /// A sensor whose card or canvas is missing is logged and skipped; the
    /// others are still rendered.
    #[must_use]
    pub fn render_all(&self) -> BTreeMap<String, ChartConfig> {
        let mut charts = BTreeMap::new();
        for mac in self.sensor_chart_data.keys() {
            match self.render_sensor(mac) {
                Ok(Some(chart)) => {
                    charts.insert(mac.clone(), chart);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(mac = %mac, error = %e, "Skipping sensor chart"),
            }
        }
        charts
    }

    /// Full-history chart, if the page carries one.
    #[must_use]
    pub fn render_history(&self, thresholds: Option<&SensorThresholds>) -> Option<ChartConfig> {
        match &self.sensor_readings {
            Some(readings) => render_readings(readings, thresholds, DisplayMode::Full),
            None => {
                tracing::warn!("No sensor readings embedded in page");
                None
            }
        }
    }

    /// Readings embedded for `mac`, or an empty slice.
    #[must_use]
    pub fn readings(&self, mac: &str) -> &[Reading] {
        self.sensor_chart_data
            .get(mac)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for sensors that have no display name yet.
pub const DEFAULT_SENSOR_NAME: &str = "Unnamed Sensor";

/// A single reading as embedded in the dashboard page.
///
/// Raw readings carry `temperature`/`humidity`; aggregated (cleaned or
/// scheduled) readings carry the `avg_*`, `min_*` and `max_*` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Empty when the page omits it or sends `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub avg_temp: Option<f64>,
    #[serde(default)]
    pub avg_hum: Option<f64>,
    #[serde(default)]
    pub min_temp: Option<f64>,
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub min_hum: Option<f64>,
    #[serde(default)]
    pub max_hum: Option<f64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Reading {
    /// Raw reading with both metrics set.
    #[must_use]
    pub fn raw(timestamp: &str, temperature: f64, humidity: f64) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            temperature: Some(temperature),
            humidity: Some(humidity),
            ..Self::default()
        }
    }

    /// Aggregated reading with both averages set.
    #[must_use]
    pub fn aggregated(timestamp: &str, avg_temp: f64, avg_hum: f64) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            avg_temp: Some(avg_temp),
            avg_hum: Some(avg_hum),
            ..Self::default()
        }
    }
}

/// The two plotted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    pub const ALL: [Self; 2] = [Self::Temperature, Self::Humidity];

    /// Value of this metric for a reading, in priority order:
    /// aggregated average, then raw value, then nothing.
    #[must_use]
    pub fn resolve(self, reading: &Reading) -> Option<f64> {
        let candidates = match self {
            Self::Temperature => [reading.avg_temp, reading.temperature],
            Self::Humidity => [reading.avg_hum, reading.humidity],
        };
        candidates.into_iter().flatten().next()
    }
}

/// Per-sensor alarm bounds. A missing bound means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorThresholds {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,
}

impl SensorThresholds {
    /// Build thresholds from the string attributes of a sensor card.
    /// Blank or unparseable attributes count as absent bounds.
    #[must_use]
    pub fn from_attributes(
        temp_min: Option<&str>,
        temp_max: Option<&str>,
        humidity_min: Option<&str>,
        humidity_max: Option<&str>,
    ) -> Self {
        Self {
            temp_min: parse_bound(temp_min),
            temp_max: parse_bound(temp_max),
            humidity_min: parse_bound(humidity_min),
            humidity_max: parse_bound(humidity_max),
        }
    }

    /// `(min, max)` for the given metric.
    #[must_use]
    pub fn bounds(&self, metric: Metric) -> (Option<f64>, Option<f64>) {
        match metric {
            Metric::Temperature => (self.temp_min, self.temp_max),
            Metric::Humidity => (self.humidity_min, self.humidity_max),
        }
    }
}

fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

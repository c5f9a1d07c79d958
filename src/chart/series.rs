//! Turns embedded readings into plot-ready label/value arrays.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{Metric, Reading};

/// How x-axis labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// Timestamp string as received (full-history chart).
    #[default]
    Full,
    /// `HH:MM` only (per-sensor mini charts).
    HourMinute,
}

/// Index-aligned label and value arrays, all of the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temperature: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
}

impl ChartSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn values(&self, metric: Metric) -> &[Option<f64>] {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
        }
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp. Timestamps without an offset are taken as UTC,
/// and a bare date as its midnight.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Stable chronological copy of `readings`.
///
/// Unparseable timestamps sort first, in their input order.
#[must_use]
pub fn sorted_readings(readings: &[Reading]) -> Vec<Reading> {
    let mut keyed: Vec<(Option<DateTime<FixedOffset>>, &Reading)> = readings
        .iter()
        .map(|r| (parse_timestamp(&r.timestamp), r))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Build a sorted [`ChartSeries`] from readings in any order.
#[must_use]
pub fn build_series(readings: &[Reading], format: LabelFormat) -> ChartSeries {
    let sorted = sorted_readings(readings);

    let mut series = ChartSeries {
        labels: Vec::with_capacity(sorted.len()),
        temperature: Vec::with_capacity(sorted.len()),
        humidity: Vec::with_capacity(sorted.len()),
    };
    for reading in &sorted {
        series.labels.push(format_label(&reading.timestamp, format));
        series.temperature.push(Metric::Temperature.resolve(reading));
        series.humidity.push(Metric::Humidity.resolve(reading));
    }
    series
}

fn format_label(timestamp: &str, format: LabelFormat) -> String {
    match format {
        LabelFormat::Full => timestamp.to_string(),
        LabelFormat::HourMinute => match parse_timestamp(timestamp) {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => timestamp.chars().skip(11).take(5).collect(),
        },
    }
}

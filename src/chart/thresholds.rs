//! Out-of-range classification for chart points.

use crate::models::{Metric, SensorThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    InRange,
    OutOfRange,
}

/// Classify a value against optional bounds.
///
/// Checking only kicks in when both `min` and `max` are present.
/// A missing value is never flagged.
#[must_use]
pub fn classify(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> RangeStatus {
    match (value, min, max) {
        (Some(v), Some(lo), Some(hi)) if v < lo || v > hi => RangeStatus::OutOfRange,
        _ => RangeStatus::InRange,
    }
}

/// Point colors for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub in_range: &'static str,
    pub out_of_range: &'static str,
}

impl Palette {
    #[must_use]
    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Temperature => Self {
                in_range: "rgba(0,123,255,0.9)",
                out_of_range: "rgba(220,53,69,0.9)",
            },
            Metric::Humidity => Self {
                in_range: "rgba(40,167,69,0.9)",
                out_of_range: "rgba(255,111,0,0.8)",
            },
        }
    }

    #[must_use]
    pub fn color(&self, status: RangeStatus) -> &'static str {
        match status {
            RangeStatus::InRange => self.in_range,
            RangeStatus::OutOfRange => self.out_of_range,
        }
    }
}

/// One color per value, picked from the metric's palette.
#[must_use]
pub fn point_colors(
    values: &[Option<f64>],
    metric: Metric,
    thresholds: Option<&SensorThresholds>,
) -> Vec<String> {
    let palette = Palette::for_metric(metric);
    let (min, max) = thresholds.map_or((None, None), |t| t.bounds(metric));
    values
        .iter()
        .map(|v| palette.color(classify(*v, min, max)).to_string())
        .collect()
}

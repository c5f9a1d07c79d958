use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Metric;

/// Line chart description, serialized in the shape Chart.js accepts.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Datasets carrying readings (not threshold lines).
    pub fn data_datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.data
            .datasets
            .iter()
            .filter(|d| matches!(d.role, DatasetRole::Data(_)))
    }

    /// Flat threshold reference lines.
    pub fn reference_datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.data
            .datasets
            .iter()
            .filter(|d| matches!(d.role, DatasetRole::Reference { .. }))
    }

    #[must_use]
    pub fn dataset(&self, metric: Metric) -> Option<&Dataset> {
        self.data
            .datasets
            .iter()
            .find(|d| d.role == DatasetRole::Data(metric))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Which bound a reference line draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetRole {
    Data(Metric),
    Reference { metric: Metric, bound: Bound },
}

/// Either one value for every point or one value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PerPoint<T> {
    Uniform(T),
    Each(Vec<T>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<Vec<String>>,
    pub point_radius: PerPoint<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_width: Option<PerPoint<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hit_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    pub fill: bool,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: String,
    #[serde(skip)]
    pub role: DatasetRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: BTreeMap<String, Scale>,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scale {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ScaleTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaleTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticks {
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tooltip {
    pub enabled: bool,
}

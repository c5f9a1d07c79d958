//! Chart descriptions for the full-history chart and the per-sensor mini charts.

use std::collections::BTreeMap;

use crate::chart::series::{build_series, ChartSeries, LabelFormat};
use crate::chart::thresholds::point_colors;
use crate::chart::types::{
    Bound, ChartConfig, ChartData, ChartOptions, Dataset, DatasetRole, Legend, PerPoint, Plugins,
    Scale, ScaleTitle, Ticks, Toggle, Tooltip,
};
use crate::models::{Metric, Reading, SensorThresholds};

const LATEST_POINT_RADIUS: f64 = 6.0;
const POINT_RADIUS: f64 = 3.0;
const LATEST_POINT_BORDER: f64 = 2.0;
const POINT_BORDER: f64 = 1.0;
const LINE_TENSION: f64 = 0.3;
const REFERENCE_LINE_WIDTH: f64 = 1.4;
const SHARED_AXIS: &str = "y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Legend and titled axes, both metrics on one value axis.
    Full,
    /// Sparkline: no axes or legend, one hidden axis per metric, tooltips only.
    Compact,
}

impl DisplayMode {
    #[must_use]
    pub fn label_format(self) -> LabelFormat {
        match self {
            Self::Full => LabelFormat::Full,
            Self::Compact => LabelFormat::HourMinute,
        }
    }
}

struct MetricStyle {
    full_label: &'static str,
    compact_label: &'static str,
    short_label: &'static str,
    border: &'static str,
    background: &'static str,
    axis_id: &'static str,
    reference_color: &'static str,
    reference_dash: [u8; 2],
}

fn style(metric: Metric) -> MetricStyle {
    match metric {
        Metric::Temperature => MetricStyle {
            full_label: "Temperature (°C)",
            compact_label: "Temp (°C)",
            short_label: "Temp",
            border: "rgba(0,123,255,1)",
            background: "rgba(0,123,255,0.07)",
            axis_id: "y-temp",
            reference_color: "#ffc107",
            reference_dash: [6, 6],
        },
        Metric::Humidity => MetricStyle {
            full_label: "Humidity (%)",
            compact_label: "Hum (%)",
            short_label: "Hum",
            border: "rgba(40,167,69,1)",
            background: "rgba(40,167,69,0.07)",
            axis_id: "y-hum",
            reference_color: "#17a2b8",
            reference_dash: [4, 4],
        },
    }
}

/// Sort `readings` with the label format matching `mode`, then render.
#[must_use]
pub fn render_readings(
    readings: &[Reading],
    thresholds: Option<&SensorThresholds>,
    mode: DisplayMode,
) -> Option<ChartConfig> {
    render_chart(&build_series(readings, mode.label_format()), thresholds, mode)
}

/// Build the chart description for a series.
///
/// Returns `None` for an empty series; no chart is constructed in that case.
#[must_use]
pub fn render_chart(
    series: &ChartSeries,
    thresholds: Option<&SensorThresholds>,
    mode: DisplayMode,
) -> Option<ChartConfig> {
    if series.is_empty() {
        tracing::warn!("No sensor readings available to render chart");
        return None;
    }

    let mut datasets: Vec<Dataset> = Metric::ALL
        .iter()
        .map(|&metric| data_dataset(series, metric, thresholds, mode))
        .collect();

    if let Some(t) = thresholds {
        for metric in Metric::ALL {
            let (min, max) = t.bounds(metric);
            for (bound, value) in [(Bound::Min, min), (Bound::Max, max)] {
                if let Some(value) = value {
                    datasets.push(reference_dataset(metric, bound, value, series.len(), mode));
                }
            }
        }
    }

    Some(ChartConfig {
        chart_type: "line",
        data: ChartData {
            labels: series.labels.clone(),
            datasets,
        },
        options: options(mode),
    })
}

fn axis_id(metric: Metric, mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Full => SHARED_AXIS,
        DisplayMode::Compact => style(metric).axis_id,
    }
}

/// Per-point sizes where only the most recent point is emphasized.
fn emphasize_last(len: usize, latest: f64, other: f64) -> PerPoint<f64> {
    PerPoint::Each(
        (0..len)
            .map(|i| if i + 1 == len { latest } else { other })
            .collect(),
    )
}

fn data_dataset(
    series: &ChartSeries,
    metric: Metric,
    thresholds: Option<&SensorThresholds>,
    mode: DisplayMode,
) -> Dataset {
    let s = style(metric);
    let values = series.values(metric);
    Dataset {
        label: match mode {
            DisplayMode::Full => s.full_label,
            DisplayMode::Compact => s.compact_label,
        }
        .to_string(),
        data: values.to_vec(),
        border_color: s.border.to_string(),
        background_color: Some(s.background.to_string()),
        point_background_color: Some(point_colors(values, metric, thresholds)),
        point_radius: emphasize_last(values.len(), LATEST_POINT_RADIUS, POINT_RADIUS),
        point_border_width: Some(emphasize_last(
            values.len(),
            LATEST_POINT_BORDER,
            POINT_BORDER,
        )),
        point_hit_radius: None,
        border_dash: None,
        border_width: None,
        tension: Some(LINE_TENSION),
        fill: false,
        y_axis_id: axis_id(metric, mode).to_string(),
        role: DatasetRole::Data(metric),
    }
}

fn reference_dataset(
    metric: Metric,
    bound: Bound,
    value: f64,
    len: usize,
    mode: DisplayMode,
) -> Dataset {
    let s = style(metric);
    let suffix = match bound {
        Bound::Min => "Min",
        Bound::Max => "Max",
    };
    Dataset {
        label: format!("{} {suffix}", s.short_label),
        data: vec![Some(value); len],
        border_color: s.reference_color.to_string(),
        background_color: None,
        point_background_color: None,
        point_radius: PerPoint::Uniform(0.0),
        point_border_width: None,
        point_hit_radius: Some(0.0),
        border_dash: Some(s.reference_dash.to_vec()),
        border_width: Some(REFERENCE_LINE_WIDTH),
        tension: None,
        fill: false,
        y_axis_id: axis_id(metric, mode).to_string(),
        role: DatasetRole::Reference { metric, bound },
    }
}

fn options(mode: DisplayMode) -> ChartOptions {
    let mut scales = BTreeMap::new();
    match mode {
        DisplayMode::Full => {
            scales.insert("x".to_string(), titled_axis("Time"));
            scales.insert(SHARED_AXIS.to_string(), titled_axis("Value"));
        }
        DisplayMode::Compact => {
            scales.insert("x".to_string(), hidden_axis(None, None));
            scales.insert(
                style(Metric::Temperature).axis_id.to_string(),
                hidden_axis(Some("left"), Some("#0d6efd")),
            );
            scales.insert(
                style(Metric::Humidity).axis_id.to_string(),
                hidden_axis(Some("right"), Some("#28a745")),
            );
        }
    }

    let show_legend = mode == DisplayMode::Full;
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: show_legend,
        scales,
        plugins: Plugins {
            legend: Legend {
                display: show_legend,
                position: show_legend.then_some("bottom"),
            },
            tooltip: Tooltip { enabled: true },
        },
    }
}

fn titled_axis(text: &str) -> Scale {
    Scale {
        display: true,
        position: None,
        title: Some(ScaleTitle {
            display: true,
            text: text.to_string(),
        }),
        grid: None,
        ticks: None,
    }
}

fn hidden_axis(position: Option<&'static str>, tick_color: Option<&'static str>) -> Scale {
    Scale {
        display: false,
        position,
        title: None,
        grid: Some(Toggle { display: false }),
        ticks: tick_color.map(|color| Ticks { color }),
    }
}

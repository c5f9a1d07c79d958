//! Tests for threshold classification and chart descriptions.
//!
//! Run with: cargo test --test chart_test

use sensor_dashboard::chart::thresholds::{point_colors, Palette};
use sensor_dashboard::chart::types::{Bound, DatasetRole, PerPoint};
use sensor_dashboard::chart::{
    build_series, classify, render_chart, render_readings, DisplayMode, LabelFormat, RangeStatus,
};
use sensor_dashboard::models::{Metric, Reading, SensorThresholds};

fn readings() -> Vec<Reading> {
    vec![
        Reading::raw("2024-03-01T10:00:00", 21.0, 50.0),
        Reading::raw("2024-03-01T09:00:00", 25.0, 30.0),
        Reading::raw("2024-03-01T11:00:00", 19.0, 65.0),
    ]
}

fn thresholds() -> SensorThresholds {
    SensorThresholds {
        temp_min: Some(20.0),
        temp_max: Some(24.0),
        humidity_min: Some(35.0),
        humidity_max: None,
    }
}

#[test]
fn classify_needs_both_bounds() {
    assert_eq!(classify(Some(25.0), Some(20.0), Some(24.0)), RangeStatus::OutOfRange);
    assert_eq!(classify(Some(19.9), Some(20.0), Some(24.0)), RangeStatus::OutOfRange);
    assert_eq!(classify(Some(24.0), Some(20.0), Some(24.0)), RangeStatus::InRange);
    assert_eq!(classify(Some(25.0), None, Some(24.0)), RangeStatus::InRange);
    assert_eq!(classify(Some(-5.0), Some(20.0), None), RangeStatus::InRange);
    assert_eq!(classify(None, Some(20.0), Some(24.0)), RangeStatus::InRange);
}

#[test]
fn palettes_differ_per_metric() {
    let temp = Palette::for_metric(Metric::Temperature);
    let hum = Palette::for_metric(Metric::Humidity);
    assert_ne!(temp.in_range, temp.out_of_range);
    assert_ne!(temp.out_of_range, hum.out_of_range);
    assert_ne!(temp.in_range, hum.in_range);
}

#[test]
fn point_colors_follow_classification() {
    let t = thresholds();
    let temp = Palette::for_metric(Metric::Temperature);
    let colors = point_colors(&[Some(25.0), Some(21.0), None], Metric::Temperature, Some(&t));
    assert_eq!(colors, vec![temp.out_of_range, temp.in_range, temp.in_range]);

    // Humidity has only a lower bound, so nothing is flagged.
    let hum = Palette::for_metric(Metric::Humidity);
    let colors = point_colors(&[Some(10.0)], Metric::Humidity, Some(&t));
    assert_eq!(colors, vec![hum.in_range]);
}

#[test]
fn empty_series_renders_nothing() {
    assert!(render_readings(&[], Some(&thresholds()), DisplayMode::Compact).is_none());
    assert!(render_chart(&build_series(&[], LabelFormat::Full), None, DisplayMode::Full).is_none());
}

#[test]
fn compact_chart_layout() {
    let t = thresholds();
    let chart = render_readings(&readings(), Some(&t), DisplayMode::Compact).unwrap();

    assert_eq!(chart.chart_type, "line");
    assert_eq!(chart.data.labels, vec!["09:00", "10:00", "11:00"]);

    let temp = chart.dataset(Metric::Temperature).unwrap();
    assert_eq!(temp.data, vec![Some(25.0), Some(21.0), Some(19.0)]);
    assert_eq!(temp.y_axis_id, "y-temp");
    let palette = Palette::for_metric(Metric::Temperature);
    assert_eq!(
        temp.point_background_color.as_deref().unwrap(),
        &[palette.out_of_range, palette.in_range, palette.out_of_range]
    );
    assert_eq!(temp.point_radius, PerPoint::Each(vec![3.0, 3.0, 6.0]));
    assert_eq!(temp.point_border_width, Some(PerPoint::Each(vec![1.0, 1.0, 2.0])));

    let hum = chart.dataset(Metric::Humidity).unwrap();
    assert_eq!(hum.y_axis_id, "y-hum");

    assert!(!chart.options.plugins.legend.display);
    assert!(chart.options.plugins.tooltip.enabled);
    assert!(chart.options.scales.values().all(|s| !s.display));
    assert!(chart.options.scales.contains_key("y-temp"));
    assert!(chart.options.scales.contains_key("y-hum"));
}

#[test]
fn latest_point_is_emphasized_even_in_range() {
    let chart = render_readings(
        &[
            Reading::raw("2024-03-01T09:00:00", 30.0, 50.0),
            Reading::raw("2024-03-01T10:00:00", 22.0, 50.0),
        ],
        Some(&thresholds()),
        DisplayMode::Compact,
    )
    .unwrap();
    let temp = chart.dataset(Metric::Temperature).unwrap();
    assert_eq!(temp.point_radius, PerPoint::Each(vec![3.0, 6.0]));
}

#[test]
fn reference_lines_for_present_bounds_only() {
    let t = thresholds();
    let chart = render_readings(&readings(), Some(&t), DisplayMode::Compact).unwrap();

    let refs: Vec<_> = chart.reference_datasets().collect();
    assert_eq!(refs.len(), 3);
    assert_eq!(chart.data_datasets().count(), 2);

    let temp_min = refs
        .iter()
        .find(|d| {
            d.role
                == DatasetRole::Reference {
                    metric: Metric::Temperature,
                    bound: Bound::Min,
                }
        })
        .unwrap();
    assert_eq!(temp_min.label, "Temp Min");
    assert_eq!(temp_min.data, vec![Some(20.0); 3]);
    assert_eq!(temp_min.border_dash.as_deref(), Some(&[6u8, 6][..]));
    assert_eq!(temp_min.point_radius, PerPoint::Uniform(0.0));
    assert_eq!(temp_min.point_hit_radius, Some(0.0));
    assert_eq!(temp_min.y_axis_id, "y-temp");

    let hum_min = refs.iter().find(|d| d.label == "Hum Min").unwrap();
    assert_eq!(hum_min.y_axis_id, "y-hum");
    assert!(refs.iter().all(|d| d.label != "Hum Max"));
}

#[test]
fn full_chart_layout() {
    let chart = render_readings(&readings(), None, DisplayMode::Full).unwrap();

    assert_eq!(chart.data.labels[0], "2024-03-01T09:00:00");
    assert_eq!(chart.reference_datasets().count(), 0);
    assert!(chart.data_datasets().all(|d| d.y_axis_id == "y"));
    assert!(chart.options.plugins.legend.display);
    assert_eq!(chart.options.plugins.legend.position, Some("bottom"));

    let x = &chart.options.scales["x"];
    let y = &chart.options.scales["y"];
    assert!(x.display && y.display);
    assert_eq!(x.title.as_ref().unwrap().text, "Time");
    assert_eq!(y.title.as_ref().unwrap().text, "Value");
}

#[test]
fn serializes_in_chart_js_shape() {
    let chart = render_readings(&readings(), Some(&thresholds()), DisplayMode::Compact).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["type"], "line");
    let first = &json["data"]["datasets"][0];
    assert_eq!(first["yAxisID"], "y-temp");
    assert_eq!(first["pointRadius"], serde_json::json!([3.0, 3.0, 6.0]));
    assert!(first.get("role").is_none());
    assert_eq!(json["options"]["maintainAspectRatio"], false);

    let reference = &json["data"]["datasets"][2];
    assert_eq!(reference["pointRadius"], 0.0);
    assert_eq!(reference["borderDash"], serde_json::json!([6, 6]));
}

#[test]
fn gaps_serialize_as_null() {
    let chart = render_readings(
        &[
            Reading {
                timestamp: "2024-03-01T09:00:00".to_string(),
                humidity: Some(40.0),
                ..Reading::default()
            },
            Reading::raw("2024-03-01T10:00:00", 20.0, 41.0),
        ],
        None,
        DisplayMode::Compact,
    )
    .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["data"]["datasets"][0]["data"], serde_json::json!([null, 20.0]));
}

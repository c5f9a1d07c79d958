pub mod render;
pub mod series;
pub mod thresholds;
pub mod types;

pub use render::{render_chart, render_readings, DisplayMode};
pub use series::{build_series, sorted_readings, ChartSeries, LabelFormat};
pub use thresholds::{classify, RangeStatus};
pub use types::ChartConfig;

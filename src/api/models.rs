use serde::{Deserialize, Serialize};

/// Body of `PUT /api/sensors/{mac}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Body of `PUT /api/sensors/{mac}/alarms`.
///
/// Bounds that did not parse are sent as `null`; the server decides what to do with them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmUpdate {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,
}

/// Body of `PUT /api/sensors/{mac}/schedules`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub delta_time: f64,
}

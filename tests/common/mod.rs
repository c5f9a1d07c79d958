//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

use sensor_dashboard::actions::Navigator;
use sensor_dashboard::api::models::{AlarmUpdate, ScheduleUpdate};
use sensor_dashboard::api::SensorApi;
use sensor_dashboard::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Rename { mac: String, name: String },
    Alarms { mac: String, update: AlarmUpdate },
    Schedule { mac: String, update: ScheduleUpdate },
}

/// Records every call and answers with a fixed outcome.
#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<Call>>,
    pub fail: bool,
    /// When set, rename calls wait for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl MockApi {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::Api("HTTP 500 Internal Server Error: boom".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SensorApi for MockApi {
    async fn rename_sensor(&self, mac: &str, name: &str) -> AppResult<()> {
        self.calls.lock().unwrap().push(Call::Rename {
            mac: mac.to_string(),
            name: name.to_string(),
        });
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome()
    }

    async fn update_alarms(&self, mac: &str, update: &AlarmUpdate) -> AppResult<()> {
        self.calls.lock().unwrap().push(Call::Alarms {
            mac: mac.to_string(),
            update: *update,
        });
        self.outcome()
    }

    async fn update_schedule(&self, mac: &str, update: &ScheduleUpdate) -> AppResult<()> {
        self.calls.lock().unwrap().push(Call::Schedule {
            mac: mac.to_string(),
            update: *update,
        });
        self.outcome()
    }
}

/// Remembers every URL it was asked to open.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    pub visited: Arc<Mutex<Vec<Url>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    async fn navigate(&self, url: Url) -> AppResult<()> {
        self.visited.lock().unwrap().push(url);
        Ok(())
    }
}

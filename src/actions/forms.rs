use url::Url;

use crate::api::models::{AlarmUpdate, ScheduleUpdate};
use crate::api::sensors_url;
use crate::error::{AppError, AppResult};
use crate::models::SensorThresholds;

/// Date range and aggregation interval for a spreadsheet export.
/// `mac: None` exports every sensor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportForm {
    pub mac: Option<String>,
    pub from: String,
    pub to: String,
    pub interval: String,
}

impl ExportForm {
    /// Fresh form: empty dates, default interval.
    #[must_use]
    pub fn new(mac: Option<&str>, default_interval: &str) -> Self {
        Self {
            mac: mac.map(str::to_string),
            from: String::new(),
            to: String::new(),
            interval: default_interval.to_string(),
        }
    }

    /// # Errors
    ///
    /// Returns `AppError::Validation` naming every empty input.
    pub fn validate(&self) -> AppResult<ExportRequest> {
        let mut missing = Vec::new();
        if self.mac.as_deref().is_some_and(|m| m.trim().is_empty()) {
            missing.push("mac");
        }
        for (name, value) in [("from", &self.from), ("to", &self.to), ("interval", &self.interval)] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing export parameters: {}",
                missing.join(", ")
            )));
        }

        Ok(ExportRequest {
            mac: self.mac.as_deref().map(|m| m.trim().to_string()),
            from: self.from.trim().to_string(),
            to: self.to.trim().to_string(),
            interval: self.interval.trim().to_string(),
        })
    }
}

/// A validated export, ready to become a download URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub mac: Option<String>,
    pub from: String,
    pub to: String,
    pub interval: String,
}

impl ExportRequest {
    /// `/api/sensors/{mac}/export_excel` or `/api/sensors/export_all_excel`,
    /// with `from`, `to` and `interval` as query parameters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `base` cannot carry a path.
    pub fn url(&self, base: &Url) -> AppResult<Url> {
        let mut url = match &self.mac {
            Some(mac) => sensors_url(base, Some(mac), &["export_excel"])?,
            None => sensors_url(base, None, &["export_all_excel"])?,
        };
        url.query_pairs_mut()
            .append_pair("from", &self.from)
            .append_pair("to", &self.to)
            .append_pair("interval", &self.interval);
        Ok(url)
    }
}

/// Alarm bounds as typed into the alarm modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmForm {
    pub mac: String,
    pub temp_min: String,
    pub temp_max: String,
    pub humidity_min: String,
    pub humidity_max: String,
}

impl AlarmForm {
    /// Form for `mac`, pre-filled with its current bounds.
    #[must_use]
    pub fn for_sensor(mac: &str, current: Option<&SensorThresholds>) -> Self {
        let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        let t = current.copied().unwrap_or_default();
        Self {
            mac: mac.to_string(),
            temp_min: show(t.temp_min),
            temp_max: show(t.temp_max),
            humidity_min: show(t.humidity_min),
            humidity_max: show(t.humidity_max),
        }
    }

    /// Each input is read up to its first non-numeric character; inputs with
    /// no leading number become `None` and are still sent.
    #[must_use]
    pub fn to_update(&self) -> AlarmUpdate {
        AlarmUpdate {
            temp_min: parse_number(&self.temp_min),
            temp_max: parse_number(&self.temp_max),
            humidity_min: parse_number(&self.humidity_min),
            humidity_max: parse_number(&self.humidity_max),
        }
    }
}

/// Polling interval as typed into the schedule modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    pub mac: String,
    pub delta_time: String,
}

impl ScheduleForm {
    #[must_use]
    pub fn for_sensor(mac: &str) -> Self {
        Self {
            mac: mac.to_string(),
            delta_time: String::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `AppError::Validation` if the interval has no leading number or is zero.
    pub fn to_update(&self) -> AppResult<ScheduleUpdate> {
        match parse_number(&self.delta_time) {
            Some(delta_time) if delta_time != 0.0 => Ok(ScheduleUpdate { delta_time }),
            _ => Err(AppError::Validation(format!(
                "Invalid schedule interval: {:?}",
                self.delta_time
            ))),
        }
    }
}

/// Leading decimal number of `raw`, ignoring anything after it (`"5min"` is 5).
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    raw[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

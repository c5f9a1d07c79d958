use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::actions::feedback::FeedbackSlot;
use crate::actions::forms::{AlarmForm, ExportForm, ScheduleForm};
use crate::actions::modal::Modal;
use crate::actions::Navigator;
use crate::api::SensorApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::SensorThresholds;

const ALARM_SAVED: &str = "Alarm limits saved!";
const ALARM_FAILED: &str = "Error saving alarm limits!";
const SCHEDULE_SAVED: &str = "Schedule saved!";
const SCHEDULE_FAILED: &str = "Error saving schedule!";
const SCHEDULE_MISSING: &str = "Fill in the interval!";

/// Wires export, alarm and schedule controls to the API and the navigator.
pub struct Dispatcher<A, N> {
    api: Arc<A>,
    navigator: N,
    base_url: Url,
    default_interval: String,
    feedback_delay: Duration,
}

impl<A: SensorApi, N: Navigator> Dispatcher<A, N> {
    pub fn new(config: &Config, api: Arc<A>, navigator: N) -> Self {
        Self {
            api,
            navigator,
            base_url: config.base_url.clone(),
            default_interval: config.export_default_interval_hours.clone(),
            feedback_delay: Duration::from_millis(config.feedback_clear_millis),
        }
    }

    /// Feedback area for a form, using the configured clear delay.
    #[must_use]
    pub fn feedback_slot(&self) -> FeedbackSlot {
        FeedbackSlot::new(self.feedback_delay)
    }

    /// Open the export dialog for one sensor, or for all sensors with `None`.
    pub fn open_export(&self, modal: &mut Modal<ExportForm>, mac: Option<&str>) {
        modal.open(ExportForm::new(mac, &self.default_interval));
    }

    /// Validate the open export form, close the dialog and navigate to the export.
    ///
    /// An incomplete form keeps the dialog open and navigates nowhere.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingTarget` when the dialog is not open,
    /// `AppError::Validation` for empty inputs, or the navigator's error.
    pub async fn submit_export(&self, modal: &mut Modal<ExportForm>) -> AppResult<Url> {
        let request = modal
            .form()
            .ok_or_else(|| AppError::MissingTarget("export form".to_string()))?
            .validate()?;
        modal.close();

        let url = request.url(&self.base_url)?;
        tracing::info!(url = %url, "Navigating to export");
        self.navigator.navigate(url.clone()).await?;
        Ok(url)
    }

    /// Open the alarm dialog for `mac`, pre-filled with its current bounds.
    pub fn open_alarm(
        &self,
        modal: &mut Modal<AlarmForm>,
        mac: &str,
        current: Option<&SensorThresholds>,
    ) {
        modal.open(AlarmForm::for_sensor(mac, current));
    }

    /// Send the alarm bounds and report the outcome in `feedback`.
    ///
    /// # Errors
    ///
    /// Returns the API error after showing the failure message.
    pub async fn submit_alarm(&self, form: &AlarmForm, feedback: &FeedbackSlot) -> AppResult<()> {
        let update = form.to_update();
        match self.api.update_alarms(&form.mac, &update).await {
            Ok(()) => {
                tracing::info!(mac = %form.mac, "Alarm limits saved");
                feedback.show(ALARM_SAVED, true).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(mac = %form.mac, error = %e, "Failed to save alarm limits");
                feedback.show(ALARM_FAILED, false).await;
                Err(e)
            }
        }
    }

    /// Open the schedule dialog for `mac`.
    pub fn open_schedule(&self, modal: &mut Modal<ScheduleForm>, mac: &str) {
        modal.open(ScheduleForm::for_sensor(mac));
    }

    /// Send the polling interval and report the outcome in `feedback`.
    /// An empty or zero interval is rejected without calling the API.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a missing interval, or the API error.
    pub async fn submit_schedule(
        &self,
        form: &ScheduleForm,
        feedback: &FeedbackSlot,
    ) -> AppResult<()> {
        let update = match form.to_update() {
            Ok(update) => update,
            Err(e) => {
                feedback.show(SCHEDULE_MISSING, false).await;
                return Err(e);
            }
        };

        match self.api.update_schedule(&form.mac, &update).await {
            Ok(()) => {
                tracing::info!(mac = %form.mac, delta_time = update.delta_time, "Schedule saved");
                feedback.show(SCHEDULE_SAVED, true).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(mac = %form.mac, error = %e, "Failed to save schedule");
                feedback.show(SCHEDULE_FAILED, false).await;
                Err(e)
            }
        }
    }
}

//! Tests for export, alarm and schedule actions.
//!
//! Run with: cargo test --test actions_test

mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use url::Url;

use common::{Call, MockApi, RecordingNavigator};
use sensor_dashboard::actions::{
    AlarmForm, Dispatcher, ExportForm, FeedbackSlot, Modal, ScheduleForm,
};
use sensor_dashboard::api::models::{AlarmUpdate, ScheduleUpdate};
use sensor_dashboard::config::Config;
use sensor_dashboard::error::AppError;
use sensor_dashboard::models::SensorThresholds;

fn config() -> Config {
    Config::with_base_url(Url::parse("http://dashboard.local").unwrap())
}

fn dispatcher(api: MockApi) -> (Dispatcher<MockApi, RecordingNavigator>, Arc<MockApi>, RecordingNavigator) {
    let api = Arc::new(api);
    let navigator = RecordingNavigator::default();
    let dispatcher = Dispatcher::new(&config(), Arc::clone(&api), navigator.clone());
    (dispatcher, api, navigator)
}

#[test]
fn export_url_for_one_sensor() {
    let form = ExportForm {
        mac: Some("AA:BB".to_string()),
        from: "2024-01-01".to_string(),
        to: "2024-01-02".to_string(),
        interval: "4".to_string(),
    };
    let url = form
        .validate()
        .unwrap()
        .url(&Url::parse("http://dashboard.local").unwrap())
        .unwrap();

    assert_eq!(url.path(), "/api/sensors/AA:BB/export_excel");
    assert_eq!(url.query(), Some("from=2024-01-01&to=2024-01-02&interval=4"));
    assert_eq!(
        url.as_str(),
        "http://dashboard.local/api/sensors/AA:BB/export_excel?from=2024-01-01&to=2024-01-02&interval=4"
    );
}

#[test]
fn export_url_encodes_values() {
    let form = ExportForm {
        mac: Some("lab/1 a".to_string()),
        from: "2024-01-01T00:00".to_string(),
        to: "2024-01-02 12:00".to_string(),
        interval: "4".to_string(),
    };
    let url = form
        .validate()
        .unwrap()
        .url(&Url::parse("http://dashboard.local/app/").unwrap())
        .unwrap();

    assert_eq!(url.path(), "/app/api/sensors/lab%2F1%20a/export_excel");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("from".to_string(), "2024-01-01T00:00".to_string()),
            ("to".to_string(), "2024-01-02 12:00".to_string()),
            ("interval".to_string(), "4".to_string()),
        ]
    );
}

#[test]
fn export_all_has_no_sensor_segment() {
    let form = ExportForm {
        mac: None,
        from: "2024-01-01".to_string(),
        to: "2024-01-31".to_string(),
        interval: "24".to_string(),
    };
    let url = form
        .validate()
        .unwrap()
        .url(&Url::parse("http://dashboard.local").unwrap())
        .unwrap();
    assert_eq!(url.path(), "/api/sensors/export_all_excel");
}

#[test]
fn export_requires_every_input() {
    let form = ExportForm::new(Some("AA:BB"), "4");
    let err = assert_err!(form.validate());
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("from"));
            assert!(msg.contains("to"));
            assert!(!msg.contains("interval"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let form = ExportForm {
        mac: Some(" ".to_string()),
        from: "2024-01-01".to_string(),
        to: "2024-01-02".to_string(),
        interval: "4".to_string(),
    };
    assert_err!(form.validate());
}

#[tokio::test]
async fn export_submission_navigates_and_closes() {
    let (dispatcher, _, navigator) = dispatcher(MockApi::ok());
    let mut modal = Modal::new();
    dispatcher.open_export(&mut modal, Some("AA:BB"));
    assert_eq!(modal.form().unwrap().interval, "4");

    let form = modal.form_mut().unwrap();
    form.from = "2024-01-01".to_string();
    form.to = "2024-01-02".to_string();

    let url = assert_ok!(dispatcher.submit_export(&mut modal).await);
    assert!(!modal.is_open());
    assert_eq!(navigator.visited(), vec![url]);
}

#[tokio::test]
async fn incomplete_export_stays_open() {
    let (dispatcher, _, navigator) = dispatcher(MockApi::ok());
    let mut modal = Modal::new();
    dispatcher.open_export(&mut modal, None);

    assert_err!(dispatcher.submit_export(&mut modal).await);
    assert!(modal.is_open());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn reopening_export_resets_the_form() {
    let (dispatcher, _, _) = dispatcher(MockApi::ok());
    let mut modal = Modal::new();
    dispatcher.open_export(&mut modal, Some("AA"));
    modal.form_mut().unwrap().from = "2024-01-01".to_string();
    modal.form_mut().unwrap().interval = "12".to_string();

    dispatcher.open_export(&mut modal, Some("BB"));
    assert_eq!(modal.form(), Some(&ExportForm::new(Some("BB"), "4")));
}

#[test]
fn alarm_form_sends_unparseable_as_null() {
    let form = AlarmForm {
        mac: "AA".to_string(),
        temp_min: "2.5".to_string(),
        temp_max: " 8 ".to_string(),
        humidity_min: "abc".to_string(),
        humidity_max: String::new(),
    };
    let update = form.to_update();
    assert_eq!(
        update,
        AlarmUpdate {
            temp_min: Some(2.5),
            temp_max: Some(8.0),
            humidity_min: None,
            humidity_max: None,
        }
    );
    let json = serde_json::to_value(update).unwrap();
    assert!(json["humidity_min"].is_null());
}

#[test]
fn alarm_form_reads_leading_numbers() {
    let form = AlarmForm {
        mac: "AA".to_string(),
        temp_min: "12abc".to_string(),
        temp_max: " -3.5e1°C".to_string(),
        humidity_min: ".5%".to_string(),
        humidity_max: "-.".to_string(),
    };
    assert_eq!(
        form.to_update(),
        AlarmUpdate {
            temp_min: Some(12.0),
            temp_max: Some(-35.0),
            humidity_min: Some(0.5),
            humidity_max: None,
        }
    );
}

#[test]
fn alarm_form_prefills_current_bounds() {
    let current = SensorThresholds {
        temp_min: Some(-20.0),
        temp_max: Some(-15.5),
        humidity_min: None,
        humidity_max: None,
    };
    let form = AlarmForm::for_sensor("AA", Some(&current));
    assert_eq!(form.temp_min, "-20");
    assert_eq!(form.temp_max, "-15.5");
    assert_eq!(form.humidity_min, "");
}

#[tokio::test]
async fn alarm_submission_reports_success() {
    let (dispatcher, api, _) = dispatcher(MockApi::ok());
    let mut modal = Modal::new();
    dispatcher.open_alarm(&mut modal, "AA:BB", None);
    {
        let form = modal.form_mut().unwrap();
        form.temp_min = "2".to_string();
        form.temp_max = "8".to_string();
    }
    let feedback = dispatcher.feedback_slot();

    assert_ok!(dispatcher.submit_alarm(modal.form().unwrap(), &feedback).await);
    let shown = feedback.current().await.unwrap();
    assert!(shown.ok);
    assert_eq!(shown.color(), "#28a745");
    assert_eq!(
        api.calls(),
        vec![Call::Alarms {
            mac: "AA:BB".to_string(),
            update: AlarmUpdate {
                temp_min: Some(2.0),
                temp_max: Some(8.0),
                humidity_min: None,
                humidity_max: None,
            }
        }]
    );
}

#[tokio::test]
async fn alarm_failure_is_reported_inline() {
    let (dispatcher, _, _) = dispatcher(MockApi::failing());
    let feedback = dispatcher.feedback_slot();
    let form = AlarmForm::for_sensor("AA", None);

    assert_err!(dispatcher.submit_alarm(&form, &feedback).await);
    let shown = feedback.current().await.unwrap();
    assert!(!shown.ok);
    assert_eq!(shown.color(), "#dc3545");
}

#[tokio::test]
async fn schedule_requires_nonzero_interval() {
    let (dispatcher, api, _) = dispatcher(MockApi::ok());
    let feedback = dispatcher.feedback_slot();

    for bad in ["", "  ", "0", "abc"] {
        let form = ScheduleForm {
            mac: "AA".to_string(),
            delta_time: bad.to_string(),
        };
        let err = assert_err!(dispatcher.submit_schedule(&form, &feedback).await);
        assert!(err.is_local());
        assert_eq!(
            feedback.current().await.unwrap().message,
            "Fill in the interval!"
        );
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn schedule_interval_with_trailing_text_is_sent() {
    let (dispatcher, api, _) = dispatcher(MockApi::ok());
    let feedback = dispatcher.feedback_slot();
    let form = ScheduleForm {
        mac: "AA".to_string(),
        delta_time: "5min".to_string(),
    };

    assert_ok!(dispatcher.submit_schedule(&form, &feedback).await);
    assert_eq!(
        api.calls(),
        vec![Call::Schedule {
            mac: "AA".to_string(),
            update: ScheduleUpdate { delta_time: 5.0 }
        }]
    );
}

#[tokio::test]
async fn schedule_submission_sends_interval() {
    let (dispatcher, api, _) = dispatcher(MockApi::ok());
    let feedback = dispatcher.feedback_slot();
    let mut modal = Modal::new();
    dispatcher.open_schedule(&mut modal, "AA:BB");
    modal.form_mut().unwrap().delta_time = "2".to_string();

    assert_ok!(dispatcher.submit_schedule(modal.form().unwrap(), &feedback).await);
    assert_eq!(feedback.current().await.unwrap().message, "Schedule saved!");
    assert_eq!(
        api.calls(),
        vec![Call::Schedule {
            mac: "AA:BB".to_string(),
            update: ScheduleUpdate { delta_time: 2.0 }
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn feedback_clears_after_delay() {
    let slot = FeedbackSlot::new(Duration::from_millis(2400));
    slot.show("Saved", true).await;

    tokio::time::sleep(Duration::from_millis(2300)).await;
    assert!(slot.current().await.is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(slot.current().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn newer_feedback_outlives_older_timer() {
    let slot = FeedbackSlot::new(Duration::from_millis(2400));
    slot.show("First", true).await;

    tokio::time::sleep(Duration::from_millis(1000)).await;
    slot.show("Second", false).await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(slot.current().await.unwrap().message, "Second");

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(slot.current().await.is_none());
}

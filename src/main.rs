use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sensor_dashboard::actions::{AlarmForm, Dispatcher, ExportForm, Modal, ScheduleForm};
use sensor_dashboard::api::{DownloadNavigator, HttpSensorApi};
use sensor_dashboard::config::{Config, LogFormat};
use sensor_dashboard::edit::FieldBoard;
use sensor_dashboard::error::AppError;
use sensor_dashboard::export::write_readings_csv;
use sensor_dashboard::page::DashboardPage;

/// Sensor dashboard client
#[derive(Parser, Debug)]
#[command(name = "sensor-dashboard")]
#[command(about = "Render sensor charts and drive dashboard actions from the command line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print chart descriptions (JSON) for the readings embedded in a page
    Render {
        /// Page state document
        #[arg(long)]
        page: PathBuf,
        /// Render a single sensor
        #[arg(long)]
        mac: Option<String>,
        /// Render the full-history chart instead of mini charts
        #[arg(long)]
        full: bool,
    },
    /// Write embedded readings as CSV to stdout
    Csv {
        #[arg(long)]
        page: PathBuf,
        /// Sensor to export; the full-history readings when omitted
        #[arg(long)]
        mac: Option<String>,
    },
    /// Rename sensors, given as MAC=NAME pairs
    Rename {
        #[arg(required = true)]
        pairs: Vec<String>,
        /// Page state document providing the current names
        #[arg(long)]
        page: Option<PathBuf>,
    },
    /// Update alarm thresholds of a sensor
    Alarms {
        mac: String,
        #[arg(long, allow_hyphen_values = true)]
        temp_min: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        temp_max: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        hum_min: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        hum_max: Option<String>,
    },
    /// Update the polling interval of a sensor
    Schedule {
        mac: String,
        #[arg(long)]
        interval: String,
    },
    /// Download a spreadsheet export for one sensor or all sensors
    Export {
        #[arg(long)]
        mac: Option<String>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Aggregation interval in hours
        #[arg(long)]
        interval: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    match cli.command {
        Command::Render { page, mac, full } => {
            let page = DashboardPage::load(&page).await?;
            let output = if full {
                let thresholds = mac
                    .as_deref()
                    .and_then(|m| page.card(m).ok())
                    .map(|c| c.thresholds());
                serde_json::to_string_pretty(&page.render_history(thresholds.as_ref()))?
            } else if let Some(mac) = mac {
                serde_json::to_string_pretty(&page.render_sensor(&mac)?)?
            } else {
                serde_json::to_string_pretty(&page.render_all())?
            };
            println!("{output}");
        }
        Command::Csv { page, mac } => {
            let page = DashboardPage::load(&page).await?;
            let readings = match &mac {
                Some(mac) => page.readings(mac),
                None => page.sensor_readings.as_deref().unwrap_or_default(),
            };
            write_readings_csv(std::io::stdout().lock(), readings)?;
        }
        Command::Rename { pairs, page } => {
            let page = match page {
                Some(path) => DashboardPage::load(&path).await?,
                None => DashboardPage::default(),
            };
            let api = HttpSensorApi::new(&config)?;

            let mut board = FieldBoard::new();
            let mut renames = Vec::with_capacity(pairs.len());
            for pair in &pairs {
                let (mac, name) = pair
                    .split_once('=')
                    .ok_or_else(|| AppError::Validation(format!("Expected MAC=NAME, got {pair:?}")))?;
                let current = page
                    .cards
                    .get(mac)
                    .and_then(|c| c.name.clone())
                    .unwrap_or_default();
                board.insert(mac, &current);
                renames.push((mac, name));
            }

            let results = futures::future::join_all(
                renames
                    .iter()
                    .map(|(mac, name)| board.rename(&api, mac, name)),
            )
            .await;
            for ((mac, _), result) in renames.iter().zip(results) {
                match result {
                    Ok(text) => println!("{mac}\t{text}"),
                    Err(e) => tracing::error!(mac = %mac, error = %e, "Rename skipped"),
                }
            }
        }
        Command::Alarms {
            mac,
            temp_min,
            temp_max,
            hum_min,
            hum_max,
        } => {
            let dispatcher = dispatcher(&config)?;
            let mut modal = Modal::<AlarmForm>::new();
            dispatcher.open_alarm(&mut modal, &mac, None);
            if let Some(form) = modal.form_mut() {
                form.temp_min = temp_min.unwrap_or_default();
                form.temp_max = temp_max.unwrap_or_default();
                form.humidity_min = hum_min.unwrap_or_default();
                form.humidity_max = hum_max.unwrap_or_default();
            }
            if let Some(form) = modal.close() {
                let feedback = dispatcher.feedback_slot();
                let result = dispatcher.submit_alarm(&form, &feedback).await;
                print_feedback(&feedback).await;
                result?;
            }
        }
        Command::Schedule { mac, interval } => {
            let dispatcher = dispatcher(&config)?;
            let mut modal = Modal::<ScheduleForm>::new();
            dispatcher.open_schedule(&mut modal, &mac);
            if let Some(form) = modal.form_mut() {
                form.delta_time = interval;
            }
            if let Some(form) = modal.close() {
                let feedback = dispatcher.feedback_slot();
                let result = dispatcher.submit_schedule(&form, &feedback).await;
                print_feedback(&feedback).await;
                result?;
            }
        }
        Command::Export {
            mac,
            from,
            to,
            interval,
        } => {
            let dispatcher = dispatcher(&config)?;
            let mut modal = Modal::<ExportForm>::new();
            dispatcher.open_export(&mut modal, mac.as_deref());
            if let Some(form) = modal.form_mut() {
                form.from = from;
                form.to = to;
                if let Some(interval) = interval {
                    form.interval = interval;
                }
            }
            dispatcher.submit_export(&mut modal).await?;
        }
    }

    Ok(())
}

fn dispatcher(
    config: &Config,
) -> Result<Dispatcher<HttpSensorApi, DownloadNavigator>, AppError> {
    let api = Arc::new(HttpSensorApi::new(config)?);
    let navigator = DownloadNavigator::new(config)?;
    Ok(Dispatcher::new(config, api, navigator))
}

async fn print_feedback(feedback: &sensor_dashboard::actions::FeedbackSlot) {
    if let Some(f) = feedback.current().await {
        if f.ok {
            println!("{}", f.message);
        } else {
            eprintln!("{}", f.message);
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,sensor_dashboard=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

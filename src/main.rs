#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod fuel_control;
mod logger;
mod session;

use crate::config::{ConfigError, MonitorConfig, OutputFormat, RunMode};
use crate::fuel_control::MonitorSnapshot;
use crate::session::{MonitorSession, ScenarioKey};
use itertools::Itertools;
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;

/// Time between the initial reading and the first cycle in the scripted suite, in seconds.
const SUITE_STEP: f64 = 0.5;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (config, errors) = MonitorConfig::from_env();
    for ConfigError::InvalidValue { var, value } in errors {
        warn!("Ignoring invalid value '{value}' for {var}, using default");
    }
    info!(
        "Descent fuel monitor starting in {} mode (scenarios: {})",
        config.run_mode(),
        ScenarioKey::iter().join(", ")
    );

    match config.run_mode() {
        RunMode::Suite => run_suite(&config),
        RunMode::Live => run_live(&config).await,
    }
}

fn run_suite(config: &MonitorConfig) {
    for key in ScenarioKey::iter() {
        let scenario = key.scenario();
        info!("Scenario '{key}': {}", scenario.name());
        let mut system = scenario.build_system();
        system.update_sensors(scenario.fuel_delta(), 0.0, 0.0);
        emit(&system.monitor_cycle_at(SUITE_STEP), config.output());
    }
    info!("Scenario suite complete");
}

async fn run_live(config: &MonitorConfig) {
    let mut monitor = MonitorSession::new(config.scenario());
    monitor.start();

    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ctrl_c_token.cancel(),
            Err(e) => error!("Unable to listen for shutdown signal: {e}"),
        }
    });

    let output = config.output();
    let mut last_status = None;
    let polls = session::run_live(&mut monitor, config, token, |report| {
        if last_status != Some(report.status.status) {
            log!("Status now {} at tick {}", report.status.status, report.tick);
            last_status = Some(report.status.status);
        }
        emit(&report.status, output);
    })
    .await;
    info!("Monitoring stopped after {polls} polls");
}

fn emit(snapshot: &MonitorSnapshot, output: OutputFormat) {
    match output {
        OutputFormat::Console => println!("{snapshot}"),
        OutputFormat::Json => match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Unable to serialize snapshot: {e}"),
        },
    }
}

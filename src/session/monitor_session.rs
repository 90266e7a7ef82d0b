use super::scenario::{POLL_ALTITUDE_DELTA, POLL_VELOCITY_DELTA, ScenarioKey};
use crate::fuel_control::{FuelSystem, MonitorSnapshot};
use crate::log;

/// Response to one operator poll.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PollReport {
    pub is_running: bool,
    pub selected_scenario: ScenarioKey,
    pub tick: usize,
    pub status: MonitorSnapshot,
}

/// One operator's monitoring session.
///
/// Owns its [`FuelSystem`] exclusively; resetting or switching scenario
/// discards the old monitor and builds a new one from the scenario table.
#[derive(Debug)]
pub struct MonitorSession {
    system: FuelSystem,
    scenario: ScenarioKey,
    is_running: bool,
    tick: usize,
}

impl MonitorSession {
    pub fn new(scenario: ScenarioKey) -> Self {
        Self { system: scenario.scenario().build_system(), scenario, is_running: false, tick: 0 }
    }

    pub fn system(&self) -> &FuelSystem { &self.system }
    pub fn scenario(&self) -> ScenarioKey { self.scenario }
    pub fn is_running(&self) -> bool { self.is_running }
    pub fn tick(&self) -> usize { self.tick }

    pub fn start(&mut self) {
        self.is_running = true;
        log!("Monitoring started for scenario '{}'", self.scenario);
    }

    pub fn pause(&mut self) {
        self.is_running = false;
        log!("Monitoring paused after {} polls", self.tick);
    }

    /// Rebuilds the monitor for the current scenario and stops the session.
    pub fn reset(&mut self) {
        self.reinit();
        self.is_running = false;
        log!("Session reset to scenario '{}'", self.scenario);
    }

    /// Selects another scenario and rebuilds the monitor. The running flag is kept.
    pub fn switch_scenario(&mut self, scenario: ScenarioKey) {
        self.scenario = scenario;
        self.reinit();
        log!("Switched to scenario '{scenario}' ({})", scenario.scenario().name());
    }

    /// Advances the synthetic telemetry if running and runs one monitoring cycle.
    pub fn poll(&mut self) -> PollReport {
        let now = self.system.now();
        self.poll_at(now)
    }

    /// Same as [`MonitorSession::poll`] with an explicit monotonic timestamp.
    pub fn poll_at(&mut self, timestamp: f64) -> PollReport {
        if self.is_running {
            let fuel_delta = self.scenario.scenario().fuel_delta();
            self.system.update_sensors(fuel_delta, POLL_ALTITUDE_DELTA, POLL_VELOCITY_DELTA);
        }
        let status = self.system.monitor_cycle_at(timestamp);
        self.tick += 1;
        PollReport { is_running: self.is_running, selected_scenario: self.scenario, tick: self.tick, status }
    }

    fn reinit(&mut self) {
        self.system = self.scenario.scenario().build_system();
        self.tick = 0;
    }
}

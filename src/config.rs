use crate::session::ScenarioKey;
use std::{env, str::FromStr, time::Duration};
use strum_macros::{Display, EnumString};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RunMode {
    /// Poll a single scenario on a fixed cadence until stopped.
    #[default]
    Live,
    /// Run every scenario once and exit.
    Suite,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

#[derive(Debug, Display)]
pub enum ConfigError {
    InvalidValue { var: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

/// Runtime settings, read once at startup from `FUEL_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    scenario: ScenarioKey,
    run_mode: RunMode,
    poll_interval: Duration,
    max_cycles: Option<usize>,
    output: OutputFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioKey::default(),
            run_mode: RunMode::default(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            max_cycles: None,
            output: OutputFormat::default(),
        }
    }
}

impl MonitorConfig {
    /// Poll cadence of the operator display.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

    const SCENARIO_VAR: &'static str = "FUEL_SCENARIO";
    const RUN_MODE_VAR: &'static str = "FUEL_RUN_MODE";
    const POLL_MS_VAR: &'static str = "FUEL_POLL_MS";
    const MAX_CYCLES_VAR: &'static str = "FUEL_MAX_CYCLES";
    const OUTPUT_VAR: &'static str = "FUEL_OUTPUT";

    /// Reads the process environment. Invalid values are reported and replaced by defaults.
    pub fn from_env() -> (Self, Vec<ConfigError>) { Self::from_lookup(|var| env::var(var).ok()) }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(raw) = lookup(Self::SCENARIO_VAR) {
            match parse_var::<ScenarioKey>(Self::SCENARIO_VAR, &raw) {
                Ok(scenario) => config.scenario = scenario,
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = lookup(Self::RUN_MODE_VAR) {
            match parse_var::<RunMode>(Self::RUN_MODE_VAR, &raw) {
                Ok(mode) => config.run_mode = mode,
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = lookup(Self::POLL_MS_VAR) {
            match parse_var::<u64>(Self::POLL_MS_VAR, &raw) {
                Ok(ms) => config.poll_interval = Duration::from_millis(ms.max(1)),
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = lookup(Self::MAX_CYCLES_VAR) {
            match parse_var::<usize>(Self::MAX_CYCLES_VAR, &raw) {
                Ok(cycles) => config.max_cycles = Some(cycles),
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = lookup(Self::OUTPUT_VAR) {
            match parse_var::<OutputFormat>(Self::OUTPUT_VAR, &raw) {
                Ok(output) => config.output = output,
                Err(e) => errors.push(e),
            }
        }
        (config, errors)
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn scenario(&self) -> ScenarioKey { self.scenario }
    pub fn run_mode(&self) -> RunMode { self.run_mode }
    pub fn poll_interval(&self) -> Duration { self.poll_interval }
    pub fn max_cycles(&self) -> Option<usize> { self.max_cycles }
    pub fn output(&self) -> OutputFormat { self.output }
}

fn parse_var<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    T::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue { var, value: raw.to_string() })
}

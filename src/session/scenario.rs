use crate::fuel_control::FuelSystem;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Altitude change applied on every running poll, in m.
pub const POLL_ALTITUDE_DELTA: f64 = -50.0;
/// Velocity change applied on every running poll, in m/s.
pub const POLL_VELOCITY_DELTA: f64 = -2.0;

#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    serde::Serialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKey {
    #[default]
    Nominal,
    Anomalous,
    Critical,
    Emergency,
}

impl ScenarioKey {
    /// Parses a scenario key, falling back to [`ScenarioKey::Nominal`] for unknown keys.
    pub fn parse_or_default(key: &str) -> Self { Self::from_str(key).unwrap_or_default() }

    pub fn scenario(self) -> &'static Scenario {
        match self {
            ScenarioKey::Nominal => &NOMINAL,
            ScenarioKey::Anomalous => &ANOMALOUS,
            ScenarioKey::Critical => &CRITICAL,
            ScenarioKey::Emergency => &EMERGENCY,
        }
    }
}

/// Initial conditions and synthetic telemetry of a canned descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    name: &'static str,
    initial_fuel: f64,
    phase: &'static str,
    altitude: f64,
    velocity: f64,
    /// Fuel change applied on every running poll, in kg.
    fuel_delta: f64,
}

impl Scenario {
    pub fn name(&self) -> &'static str { self.name }
    pub fn initial_fuel(&self) -> f64 { self.initial_fuel }
    pub fn phase(&self) -> &'static str { self.phase }
    pub fn altitude(&self) -> f64 { self.altitude }
    pub fn velocity(&self) -> f64 { self.velocity }
    pub fn fuel_delta(&self) -> f64 { self.fuel_delta }

    /// Creates a fresh fuel monitor in this scenario's initial state.
    pub fn build_system(&self) -> FuelSystem {
        FuelSystem::new(self.initial_fuel, self.phase).with_trajectory(self.altitude, self.velocity)
    }
}

static NOMINAL: Scenario = Scenario {
    name: "Nominal Operations",
    initial_fuel: 853.0,
    phase: "constant_deceleration",
    altitude: 2000.0,
    velocity: 45.0,
    fuel_delta: -3.0,
};

static ANOMALOUS: Scenario = Scenario {
    name: "Thruster Leak",
    initial_fuel: 627.0,
    phase: "constant_deceleration",
    altitude: 1200.0,
    velocity: 38.0,
    fuel_delta: -7.0,
};

static CRITICAL: Scenario = Scenario {
    name: "Critical Shortage",
    initial_fuel: 178.0,
    phase: "final_approach",
    altitude: 450.0,
    velocity: 12.0,
    fuel_delta: -3.0,
};

static EMERGENCY: Scenario = Scenario {
    name: "Depletion Imminent",
    initial_fuel: 118.0,
    phase: "landing",
    altitude: 95.0,
    velocity: 3.0,
    fuel_delta: -6.0,
};

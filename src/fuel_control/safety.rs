use std::fmt;
use strum_macros::Display;

/// Fuel held back from every margin calculation, in kg.
pub const SAFE_RESERVE: f64 = 100.0;
/// Fuel that must remain on top of the abort-to-orbit cost to keep the abort option, in kg.
pub const ABORT_RESERVE: f64 = 50.0;
/// Lowest margin still classified as `Caution` when abort is no longer possible, in kg.
pub const CAUTION_MARGIN_FLOOR: f64 = -50.0;

const ABORT_BASE_FUEL: f64 = 200.0;
const ABORT_ALTITUDE_PENALTY: f64 = 50.0;
const ABORT_VELOCITY_PENALTY: f64 = 30.0;
const ABORT_REFERENCE_ALTITUDE: f64 = 5000.0;
const ABORT_REFERENCE_VELOCITY: f64 = 100.0;

/// Overall mission status, ordered from best to worst.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, serde::Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyStatus {
    Nominal,
    Caution,
    Critical,
}

/// Seconds until the tanks run dry at the current burn rate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeToDepletion {
    Finite(f64),
    /// The burn rate is zero or negative, so depletion is not approaching.
    Unbounded,
}

impl TimeToDepletion {
    pub fn from_burn_rate(current_fuel: f64, burn_rate: f64) -> Self {
        if burn_rate > 0.0 {
            TimeToDepletion::Finite(current_fuel / burn_rate)
        } else {
            TimeToDepletion::Unbounded
        }
    }

    pub fn is_below(self, threshold_secs: f64) -> bool {
        match self {
            TimeToDepletion::Finite(secs) => secs < threshold_secs,
            TimeToDepletion::Unbounded => false,
        }
    }

    pub fn as_secs(self) -> f64 {
        match self {
            TimeToDepletion::Finite(secs) => secs,
            TimeToDepletion::Unbounded => f64::INFINITY,
        }
    }
}

impl fmt::Display for TimeToDepletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeToDepletion::Finite(secs) => write!(f, "{secs:.1} s"),
            TimeToDepletion::Unbounded => write!(f, "∞"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyAssessment {
    /// Fuel left over after the margined requirement and the safe reserve, in kg.
    fuel_margin: f64,
    abort_capable: bool,
    status: SafetyStatus,
    time_remaining: TimeToDepletion,
    /// Mirrors `fuel_margin >= 0`, independent of abort capability.
    fuel_sufficient: bool,
}

impl SafetyAssessment {
    /// Classifies the current fuel state against the margined requirement.
    ///
    /// # Arguments
    /// - `current_fuel`: Fuel on board in kg.
    /// - `required_with_margin`: Predicted requirement including the uncertainty buffer.
    /// - `burn_rate`: Current burn rate in kg/s.
    /// - `altitude`, `velocity`: Trajectory state used for the abort-to-orbit cost.
    pub fn evaluate(
        current_fuel: f64,
        required_with_margin: f64,
        burn_rate: f64,
        altitude: f64,
        velocity: f64,
    ) -> Self {
        let fuel_margin = current_fuel - required_with_margin - SAFE_RESERVE;
        let abort_capable = current_fuel >= abort_to_orbit_fuel(altitude, velocity) + ABORT_RESERVE;
        Self {
            fuel_margin,
            abort_capable,
            status: classify(fuel_margin, abort_capable),
            time_remaining: TimeToDepletion::from_burn_rate(current_fuel, burn_rate),
            fuel_sufficient: fuel_margin >= 0.0,
        }
    }

    pub fn fuel_margin(&self) -> f64 { self.fuel_margin }
    pub fn abort_capable(&self) -> bool { self.abort_capable }
    pub fn status(&self) -> SafetyStatus { self.status }
    pub fn time_remaining(&self) -> TimeToDepletion { self.time_remaining }
    pub fn fuel_sufficient(&self) -> bool { self.fuel_sufficient }
}

/// Heuristic abort-to-orbit cost in kg. Cheaper the higher we are, pricier the faster we fall.
pub fn abort_to_orbit_fuel(altitude: f64, velocity: f64) -> f64 {
    let altitude_factor = (altitude / ABORT_REFERENCE_ALTITUDE).max(0.0);
    let velocity_factor = velocity / ABORT_REFERENCE_VELOCITY;
    ABORT_BASE_FUEL
        + ABORT_ALTITUDE_PENALTY * (1.0 - altitude_factor)
        + ABORT_VELOCITY_PENALTY * velocity_factor
}

pub fn classify(fuel_margin: f64, abort_capable: bool) -> SafetyStatus {
    if fuel_margin >= 0.0 && abort_capable {
        SafetyStatus::Nominal
    } else if fuel_margin >= CAUTION_MARGIN_FLOOR || abort_capable {
        SafetyStatus::Caution
    } else {
        SafetyStatus::Critical
    }
}

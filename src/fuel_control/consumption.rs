use super::mission_profile;
use crate::event;

/// Fractional deviation from the nominal burn rate above which consumption is anomalous.
pub const BURN_RATE_TOLERANCE: f64 = 0.15;
/// Floor for the time between two fuel readings, in seconds.
pub const MIN_TIME_DELTA: f64 = 0.001;

/// Burn rate observed between two consecutive fuel readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionSample {
    /// Observed burn rate in kg/s. Negative if the fuel reading went up.
    actual_burn_rate: f64,
    /// Signed deviation from the phase's nominal rate, in percent.
    deviation_percent: f64,
    anomaly_flag: bool,
    /// The fuel reading this sample was derived from, in kg.
    current_fuel: f64,
}

impl ConsumptionSample {
    /// Derives the burn rate between the previous and the current reading.
    ///
    /// Only a non-positive time delta is replaced by [`MIN_TIME_DELTA`]; any
    /// positive delta is used as measured. The returned rate is always finite
    /// for finite inputs.
    pub fn estimate(
        previous_fuel: f64,
        previous_timestamp: f64,
        current_fuel: f64,
        current_timestamp: f64,
        phase_id: &str,
    ) -> Self {
        let raw_dt = current_timestamp - previous_timestamp;
        let dt = if raw_dt <= 0.0 {
            event!("Time delta {raw_dt:.4}s between fuel readings floored to {MIN_TIME_DELTA}s");
            MIN_TIME_DELTA
        } else {
            raw_dt
        };
        let actual_burn_rate = (previous_fuel - current_fuel) / dt;

        let nominal = mission_profile::nominal_burn_rate(phase_id);
        let deviation = if nominal > 0.0 { (actual_burn_rate - nominal) / nominal } else { 0.0 };

        Self {
            actual_burn_rate,
            deviation_percent: deviation * 100.0,
            anomaly_flag: is_anomalous(deviation),
            current_fuel,
        }
    }

    pub fn actual_burn_rate(&self) -> f64 { self.actual_burn_rate }
    pub fn deviation_percent(&self) -> f64 { self.deviation_percent }
    pub fn anomaly_flag(&self) -> bool { self.anomaly_flag }
    pub fn current_fuel(&self) -> f64 { self.current_fuel }
}

/// Strict comparison: a deviation of exactly the tolerance is still nominal.
pub fn is_anomalous(deviation: f64) -> bool { deviation.abs() > BURN_RATE_TOLERANCE }

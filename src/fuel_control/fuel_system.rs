use super::{
    alerts::AlertSet,
    consumption::ConsumptionSample,
    mission_profile::{MissionPhase, ProfileError},
    requirement::FuelRequirementEstimate,
    safety::SafetyAssessment,
    snapshot::MonitorSnapshot,
};
use crate::{event, warn};
use std::time::Instant;

/// Stateful fuel monitor for one descent.
///
/// Holds the last fuel reading and its timestamp so that every monitoring
/// cycle measures consumption relative to exactly the previous cycle. Timestamps
/// are monotonic seconds since the instance was created.
#[derive(Debug)]
pub struct FuelSystem {
    previous_fuel_mass: f64,
    previous_timestamp: f64,
    mission_phase: String,
    current_fuel_mass: f64,
    altitude: f64,
    velocity: f64,
    epoch: Instant,
}

impl FuelSystem {
    /// Altitude in m assumed until the driver provides one.
    pub const DEFAULT_ALTITUDE: f64 = 5000.0;
    /// Velocity in m/s assumed until the driver provides one.
    pub const DEFAULT_VELOCITY: f64 = 80.0;

    /// Creates a monitor with a full history at `initial_fuel` and timestamp `0.0`.
    ///
    /// The phase identifier is not validated; unknown identifiers fall back to the
    /// default nominal burn rate and an empty maneuver plan.
    pub fn new(initial_fuel: f64, mission_phase: impl Into<String>) -> Self {
        Self {
            previous_fuel_mass: initial_fuel,
            previous_timestamp: 0.0,
            mission_phase: mission_phase.into(),
            current_fuel_mass: initial_fuel,
            altitude: Self::DEFAULT_ALTITUDE,
            velocity: Self::DEFAULT_VELOCITY,
            epoch: Instant::now(),
        }
    }

    /// Replaces the default trajectory, clamping both values to zero.
    #[must_use]
    pub fn with_trajectory(mut self, altitude: f64, velocity: f64) -> Self {
        self.altitude = altitude.max(0.0);
        self.velocity = velocity.max(0.0);
        self
    }

    pub fn mission_phase(&self) -> &str { &self.mission_phase }
    pub fn current_fuel(&self) -> f64 { self.current_fuel_mass }
    pub fn altitude(&self) -> f64 { self.altitude }
    pub fn velocity(&self) -> f64 { self.velocity }
    pub fn previous_fuel(&self) -> f64 { self.previous_fuel_mass }
    pub fn previous_timestamp(&self) -> f64 { self.previous_timestamp }

    /// Seconds elapsed on this monitor's monotonic clock.
    pub fn now(&self) -> f64 { self.epoch.elapsed().as_secs_f64() }

    /// Applies additive sensor deltas and clamps every reading to zero.
    pub fn update_sensors(&mut self, fuel_delta: f64, altitude_delta: f64, velocity_delta: f64) {
        self.current_fuel_mass = (self.current_fuel_mass + fuel_delta).max(0.0);
        self.altitude = (self.altitude + altitude_delta).max(0.0);
        self.velocity = (self.velocity + velocity_delta).max(0.0);
    }

    /// Switches to a known mission phase. Unknown identifiers leave the phase unchanged.
    pub fn set_mission_phase(&mut self, phase: &str) -> Result<(), ProfileError> {
        let Some(known) = MissionPhase::lookup(phase) else {
            warn!("Rejected switch to unknown mission phase '{phase}'");
            return Err(ProfileError::UnknownPhase(phase.to_string()));
        };
        self.mission_phase = known.to_string();
        Ok(())
    }

    /// Estimates the burn rate since the last reading and makes `current_fuel`
    /// at `current_time` the new reference point.
    pub fn calculate_burn_rate(&mut self, current_fuel: f64, current_time: f64) -> ConsumptionSample {
        let sample = ConsumptionSample::estimate(
            self.previous_fuel_mass,
            self.previous_timestamp,
            current_fuel,
            current_time,
            &self.mission_phase,
        );
        self.previous_fuel_mass = current_fuel;
        self.previous_timestamp = current_time;
        sample
    }

    /// Runs one full monitoring cycle against the monotonic clock.
    pub fn monitor_cycle(&mut self) -> MonitorSnapshot {
        let now = self.now();
        self.monitor_cycle_at(now)
    }

    /// Runs one full monitoring cycle as if the current fuel reading was taken at `timestamp`.
    pub fn monitor_cycle_at(&mut self, timestamp: f64) -> MonitorSnapshot {
        let consumption = self.calculate_burn_rate(self.current_fuel_mass, timestamp);
        let prediction = FuelRequirementEstimate::predict(
            consumption.actual_burn_rate(),
            consumption.anomaly_flag(),
            &self.mission_phase,
        );
        let safety = SafetyAssessment::evaluate(
            consumption.current_fuel(),
            prediction.with_margin(),
            consumption.actual_burn_rate(),
            self.altitude,
            self.velocity,
        );
        let (warnings, recommendations, status) =
            AlertSet::generate(&safety, &consumption).into_parts();

        event!(
            "Cycle at t={timestamp:.3}s: {status}, {:.2} kg/s, margin {:+.1} kg, {} warning(s)",
            consumption.actual_burn_rate(),
            safety.fuel_margin(),
            warnings.len()
        );

        MonitorSnapshot {
            timestamp: chrono::Utc::now(),
            mission_phase: self.mission_phase.clone(),
            status,
            current_fuel: consumption.current_fuel(),
            burn_rate: consumption.actual_burn_rate(),
            burn_rate_deviation: consumption.deviation_percent(),
            anomaly_detected: consumption.anomaly_flag(),
            required_fuel: prediction.required_fuel(),
            required_fuel_with_margin: prediction.with_margin(),
            fuel_margin: safety.fuel_margin(),
            fuel_at_touchdown: consumption.current_fuel() - prediction.required_fuel(),
            time_remaining: safety.time_remaining(),
            abort_capable: safety.abort_capable(),
            confidence: prediction.confidence(),
            breakdown: prediction.breakdown().to_vec(),
            warnings,
            recommendations,
            altitude: self.altitude,
            velocity: self.velocity,
        }
    }
}

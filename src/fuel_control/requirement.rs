use super::mission_profile::{self, MissionPhase, MissionPhaseSpec};

/// Uncertainty buffer applied on top of the predicted requirement while consumption is anomalous.
pub const ANOMALY_UNCERTAINTY: f64 = 0.20;
/// Uncertainty buffer applied on top of the predicted requirement otherwise.
pub const NOMINAL_UNCERTAINTY: f64 = 0.05;

/// Predicted fuel cost of one remaining maneuver.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PhaseFuelBreakdown {
    phase: MissionPhase,
    fuel_required: f64,
    duration: f64,
}

impl PhaseFuelBreakdown {
    pub fn phase(&self) -> MissionPhase { self.phase }
    pub fn fuel_required(&self) -> f64 { self.fuel_required }
    pub fn duration(&self) -> f64 { self.duration }
}

/// Fuel still needed to complete the descent from the current phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelRequirementEstimate {
    /// Sum over all remaining maneuvers, in kg.
    required_fuel: f64,
    /// `required_fuel` plus the uncertainty buffer, in kg.
    with_margin: f64,
    /// Per-maneuver costs, in flight order.
    breakdown: Vec<PhaseFuelBreakdown>,
    /// Share of the estimate not covered by the uncertainty buffer, in percent.
    confidence: f64,
}

impl FuelRequirementEstimate {
    /// Projects the current burn rate onto every maneuver still ahead of `phase_id`.
    ///
    /// Each maneuver's cost scales with `burn_rate` twice: once through the
    /// planned duration and once through the ratio to its own nominal rate.
    /// Off-nominal consumption therefore inflates the prediction quadratically.
    pub fn predict(burn_rate: f64, anomaly_detected: bool, phase_id: &str) -> Self {
        let maneuvers = mission_profile::remaining_maneuvers(phase_id);

        let mut required_fuel = 0.0;
        let mut breakdown = Vec::with_capacity(maneuvers.len());
        for maneuver in maneuvers {
            let fuel_required = Self::maneuver_fuel(maneuver, burn_rate);
            required_fuel += fuel_required;
            breakdown.push(PhaseFuelBreakdown {
                phase: maneuver.name(),
                fuel_required,
                duration: maneuver.duration(),
            });
        }

        let uncertainty = if anomaly_detected { ANOMALY_UNCERTAINTY } else { NOMINAL_UNCERTAINTY };
        let uncertainty_margin = required_fuel * uncertainty;
        let confidence = if required_fuel > 0.0 {
            (1.0 - uncertainty_margin / required_fuel) * 100.0
        } else {
            100.0
        };

        Self { required_fuel, with_margin: required_fuel + uncertainty_margin, breakdown, confidence }
    }

    fn maneuver_fuel(maneuver: &MissionPhaseSpec, burn_rate: f64) -> f64 {
        let burn_adjustment = if maneuver.nominal_burn_rate() > 0.0 {
            burn_rate / maneuver.nominal_burn_rate()
        } else {
            1.0
        };
        let phase_fuel = maneuver.duration() * burn_rate * burn_adjustment;
        phase_fuel * (1.0 + maneuver.gravity_loss_factor())
    }

    pub fn required_fuel(&self) -> f64 { self.required_fuel }
    pub fn with_margin(&self) -> f64 { self.with_margin }
    pub fn breakdown(&self) -> &[PhaseFuelBreakdown] { &self.breakdown }
    pub fn confidence(&self) -> f64 { self.confidence }
}

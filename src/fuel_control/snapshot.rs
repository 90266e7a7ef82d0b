use super::{
    requirement::PhaseFuelBreakdown,
    safety::{SafetyStatus, TimeToDepletion},
};
use chrono::{DateTime, Utc};
use std::fmt;

const REPORT_WIDTH: usize = 80;

/// Everything one monitoring cycle exposes to the display layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonitorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub mission_phase: String,
    pub status: SafetyStatus,
    pub current_fuel: f64,
    pub burn_rate: f64,
    pub burn_rate_deviation: f64,
    pub anomaly_detected: bool,
    pub required_fuel: f64,
    pub required_fuel_with_margin: f64,
    pub fuel_margin: f64,
    pub fuel_at_touchdown: f64,
    pub time_remaining: TimeToDepletion,
    pub abort_capable: bool,
    pub confidence: f64,
    pub breakdown: Vec<PhaseFuelBreakdown>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub altitude: f64,
    pub velocity: f64,
}

fn yes_no(flag: bool) -> &'static str { if flag { "YES" } else { "NO" } }

impl fmt::Display for MonitorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(REPORT_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "DESCENT FUEL MANAGEMENT SYSTEM - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f")
        )?;
        writeln!(f, "{rule}")?;
        writeln!(f, "\nMISSION PHASE: {}", self.mission_phase.to_uppercase())?;
        writeln!(f, "SYSTEM STATUS: {}", self.status)?;

        writeln!(f, "\n{:-^80}", "FUEL STATE")?;
        writeln!(f, "  Current Fuel:        {:.1} kg", self.current_fuel)?;
        writeln!(
            f,
            "  Burn Rate:           {:.2} kg/s ({:+.1}%)",
            self.burn_rate, self.burn_rate_deviation
        )?;
        writeln!(f, "  Required Fuel:       {:.1} kg", self.required_fuel)?;
        writeln!(f, "  Fuel Margin:         {:+.1} kg", self.fuel_margin)?;
        writeln!(f, "  Est. at Touchdown:   {:.1} kg", self.fuel_at_touchdown)?;

        writeln!(f, "\n{:-^80}", "SAFETY METRICS")?;
        writeln!(f, "  Time to Depletion:   {}", self.time_remaining)?;
        writeln!(f, "  Abort Capable:       {}", yes_no(self.abort_capable))?;
        writeln!(f, "  Prediction Conf:     {:.1}%", self.confidence)?;
        writeln!(f, "  Anomaly Detected:    {}", yes_no(self.anomaly_detected))?;

        writeln!(f, "\n{:-^80}", "TRAJECTORY")?;
        writeln!(f, "  Altitude:            {:.1} m", self.altitude)?;
        writeln!(f, "  Velocity:            {:.1} m/s", self.velocity)?;

        if !self.warnings.is_empty() {
            writeln!(f, "\n{:-^80}", "WARNINGS")?;
            for warning in &self.warnings {
                writeln!(f, "  ⚠ {warning}")?;
            }
        }
        if !self.recommendations.is_empty() {
            writeln!(f, "\n{:-^80}", "RECOMMENDATIONS")?;
            for rec in &self.recommendations {
                writeln!(f, "  → {rec}")?;
            }
        }
        write!(f, "\n{rule}")
    }
}

use super::{
    consumption::ConsumptionSample,
    safety::{SafetyAssessment, SafetyStatus},
};

/// Seconds to depletion below which a time-critical warning is raised.
pub const ALERT_THRESHOLD: f64 = 30.0;

/// Warnings and recommendations of one monitoring cycle, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSet {
    warnings: Vec<String>,
    recommendations: Vec<String>,
    priority: SafetyStatus,
}

impl AlertSet {
    /// Runs every rule of [`ALERT_RULES`] in table order.
    ///
    /// No rule reads the fuel requirement estimate, so it is not an input here.
    pub fn generate(safety: &SafetyAssessment, consumption: &ConsumptionSample) -> Self {
        let ctx = AlertContext { safety, consumption };
        let mut alerts = Self {
            warnings: Vec::new(),
            recommendations: Vec::new(),
            priority: safety.status(),
        };
        for rule in &ALERT_RULES {
            if (rule.applies)(&ctx, &alerts) {
                (rule.emit)(&ctx, &mut alerts);
            }
        }
        alerts
    }

    pub fn warnings(&self) -> &[String] { &self.warnings }
    pub fn recommendations(&self) -> &[String] { &self.recommendations }
    pub fn priority(&self) -> SafetyStatus { self.priority }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>, SafetyStatus) {
        (self.warnings, self.recommendations, self.priority)
    }

    fn warn(&mut self, msg: impl Into<String>) { self.warnings.push(msg.into()); }
    fn recommend(&mut self, msg: impl Into<String>) { self.recommendations.push(msg.into()); }
}

struct AlertContext<'a> {
    safety: &'a SafetyAssessment,
    consumption: &'a ConsumptionSample,
}

/// A predicate over the cycle's results and the alerts emitted so far, paired
/// with the messages it contributes.
struct AlertRule {
    applies: fn(&AlertContext, &AlertSet) -> bool,
    emit: fn(&AlertContext, &mut AlertSet),
}

static ALERT_RULES: [AlertRule; 5] = [
    AlertRule { applies: fuel_shortage, emit: emit_fuel_shortage },
    AlertRule { applies: abort_window_closing, emit: emit_abort_window_closing },
    AlertRule { applies: burn_rate_anomaly, emit: emit_burn_rate_anomaly },
    AlertRule { applies: depletion_imminent, emit: emit_depletion_imminent },
    AlertRule { applies: all_clear, emit: emit_all_clear },
];

fn fuel_shortage(ctx: &AlertContext, _: &AlertSet) -> bool { !ctx.safety.fuel_sufficient() }

fn emit_fuel_shortage(ctx: &AlertContext, alerts: &mut AlertSet) {
    alerts.warn("CRITICAL: Insufficient fuel for nominal landing");
    let deficit = ctx.safety.fuel_margin().abs();
    alerts.warn(format!("DEFICIT: {deficit:.1} kg shortfall"));
    if ctx.safety.abort_capable() {
        alerts.recommend("IMMEDIATE: Consider abort to orbit");
    } else {
        alerts.recommend("EMERGENCY: Optimize trajectory NOW");
        alerts.recommend("Consider emergency landing procedures");
    }
}

// Suppressed under CRITICAL only; the shortage rule already covers that path.
fn abort_window_closing(ctx: &AlertContext, _: &AlertSet) -> bool {
    !ctx.safety.abort_capable() && ctx.safety.status() != SafetyStatus::Critical
}

fn emit_abort_window_closing(_: &AlertContext, alerts: &mut AlertSet) {
    alerts.warn("WARNING: Abort-to-orbit window closing");
}

fn burn_rate_anomaly(ctx: &AlertContext, _: &AlertSet) -> bool { ctx.consumption.anomaly_flag() }

fn emit_burn_rate_anomaly(ctx: &AlertContext, alerts: &mut AlertSet) {
    let deviation = ctx.consumption.deviation_percent();
    alerts.warn(format!("ALERT: Burn rate {deviation:+.1}% from nominal"));
    alerts.recommend("Investigate thruster performance");
}

fn depletion_imminent(ctx: &AlertContext, _: &AlertSet) -> bool {
    ctx.safety.time_remaining().is_below(ALERT_THRESHOLD)
}

fn emit_depletion_imminent(ctx: &AlertContext, alerts: &mut AlertSet) {
    let secs = ctx.safety.time_remaining().as_secs();
    alerts.warn(format!("TIME CRITICAL: {secs:.1}s to depletion"));
}

fn all_clear(ctx: &AlertContext, alerts: &AlertSet) -> bool {
    ctx.safety.status() == SafetyStatus::Nominal && alerts.warnings.is_empty()
}

fn emit_all_clear(_: &AlertContext, alerts: &mut AlertSet) {
    alerts.recommend("Continue nominal descent profile");
}

use super::{
    alerts::{ALERT_THRESHOLD, AlertSet},
    consumption::{self, ConsumptionSample, MIN_TIME_DELTA},
    mission_profile::{self, DEFAULT_NOMINAL_BURN_RATE, MissionPhase, ProfileError},
    requirement::FuelRequirementEstimate,
    safety::{self, SafetyAssessment, SafetyStatus, TimeToDepletion},
    FuelSystem, MonitorSnapshot,
};
use strum::IntoEnumIterator;

const TOL: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < TOL, "expected {expected}, got {actual}");
}

/// Builds a monitor from scenario-style initial conditions and runs one cycle
/// after applying `fuel_delta` half a second after start.
fn run_single_cycle(
    initial_fuel: f64,
    phase: &str,
    altitude: f64,
    velocity: f64,
    fuel_delta: f64,
) -> MonitorSnapshot {
    let mut system = FuelSystem::new(initial_fuel, phase).with_trajectory(altitude, velocity);
    system.update_sensors(fuel_delta, 0.0, 0.0);
    system.monitor_cycle_at(0.5)
}

#[test]
fn test_profile_lookup() {
    for phase in MissionPhase::iter() {
        assert!(phase.nominal_burn_rate() > 0.0);
        assert_eq!(MissionPhase::lookup(&phase.to_string()), Some(phase));
        for maneuver in phase.remaining_maneuvers() {
            assert!(maneuver.nominal_burn_rate() > 0.0);
            assert!(maneuver.duration() >= 0.0);
            assert!(maneuver.gravity_loss_factor() >= 0.0);
        }
    }
    assert_eq!(MissionPhase::ConstantDeceleration.to_string(), "constant_deceleration");
    assert_close(mission_profile::nominal_burn_rate("landing"), 12.0);
    assert_close(mission_profile::nominal_burn_rate("hover"), DEFAULT_NOMINAL_BURN_RATE);
    assert!(mission_profile::remaining_maneuvers("hover").is_empty());
    assert!(MissionPhase::Landing.remaining_maneuvers().is_empty());

    let order: Vec<MissionPhase> = MissionPhase::PoweredDescent
        .remaining_maneuvers()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(
        order,
        vec![MissionPhase::ConstantDeceleration, MissionPhase::FinalApproach, MissionPhase::Landing]
    );
}

#[test]
fn test_burn_rate_from_fuel_delta() {
    let sample = ConsumptionSample::estimate(500.0, 0.0, 495.0, 2.0, "powered_descent");
    assert_close(sample.actual_burn_rate(), 2.5);
    assert_close(sample.deviation_percent(), -68.75);
    assert!(sample.anomaly_flag());
    assert_close(sample.current_fuel(), 495.0);

    let refuel = ConsumptionSample::estimate(100.0, 0.0, 110.0, 1.0, "hover");
    assert_close(refuel.actual_burn_rate(), -10.0);
    assert!(refuel.anomaly_flag());
}

#[test]
fn test_non_positive_time_delta_is_floored() {
    let same_time = ConsumptionSample::estimate(100.0, 5.0, 99.0, 5.0, "landing");
    let backwards = ConsumptionSample::estimate(100.0, 5.0, 99.0, 4.0, "landing");
    assert_close(same_time.actual_burn_rate(), 1.0 / MIN_TIME_DELTA);
    assert_close(backwards.actual_burn_rate(), 1.0 / MIN_TIME_DELTA);
    assert!(same_time.actual_burn_rate().is_finite());
}

#[test]
fn test_sub_millisecond_delta_is_not_floored() {
    let sample = ConsumptionSample::estimate(100.0, 0.0, 99.9995, 0.0005, "landing");
    assert_close(sample.actual_burn_rate(), (100.0 - 99.9995) / 0.0005);
    assert!((sample.actual_burn_rate() - 1.0).abs() < 1e-6);
}

#[test]
fn test_anomaly_boundary_is_strict() {
    assert!(!consumption::is_anomalous(0.15));
    assert!(!consumption::is_anomalous(-0.15));
    assert!(!consumption::is_anomalous(0.0));
    assert!(consumption::is_anomalous(0.150_001));
    assert!(consumption::is_anomalous(-0.16));
}

#[test]
fn test_requirement_for_constant_deceleration() {
    let prediction = FuelRequirementEstimate::predict(6.0, false, "constant_deceleration");
    assert_close(prediction.required_fuel(), 219.9);
    assert_close(prediction.with_margin(), 219.9 * 1.05);
    assert_close(prediction.confidence(), 95.0);

    let breakdown = prediction.breakdown();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].phase(), MissionPhase::FinalApproach);
    assert_close(breakdown[0].fuel_required(), 189.0);
    assert_close(breakdown[0].duration(), 20.0);
    assert_eq!(breakdown[1].phase(), MissionPhase::Landing);
    assert_close(breakdown[1].fuel_required(), 30.9);
}

#[test]
fn test_uncertainty_margin_fractions() {
    for rate in [0.5, 4.0, 6.0, 9.5, 14.0] {
        let nominal = FuelRequirementEstimate::predict(rate, false, "powered_descent");
        let anomalous = FuelRequirementEstimate::predict(rate, true, "powered_descent");
        assert!(nominal.with_margin() >= nominal.required_fuel());
        assert!(anomalous.with_margin() >= anomalous.required_fuel());
        assert_close(nominal.with_margin() / nominal.required_fuel(), 1.05);
        assert_close(anomalous.with_margin() / anomalous.required_fuel(), 1.20);
        assert_close(anomalous.confidence(), 80.0);
    }
}

#[test]
fn test_requirement_scales_with_square_of_burn_rate() {
    let base = FuelRequirementEstimate::predict(4.0, false, "final_approach");
    let doubled = FuelRequirementEstimate::predict(8.0, false, "final_approach");
    assert_close(doubled.required_fuel(), 4.0 * base.required_fuel());
}

#[test]
fn test_empty_plan_requires_nothing() {
    for phase in ["landing", "hover", ""] {
        for rate in [0.0, 6.0, 12.0, 50.0] {
            for anomaly in [false, true] {
                let prediction = FuelRequirementEstimate::predict(rate, anomaly, phase);
                assert_eq!(prediction.required_fuel(), 0.0);
                assert_eq!(prediction.with_margin(), 0.0);
                assert_eq!(prediction.confidence(), 100.0);
                assert!(prediction.breakdown().is_empty());
            }
        }
    }
}

#[test]
fn test_abort_to_orbit_fuel() {
    assert_close(safety::abort_to_orbit_fuel(2000.0, 45.0), 243.5);
    assert_close(safety::abort_to_orbit_fuel(5000.0, 0.0), 200.0);
    assert_close(safety::abort_to_orbit_fuel(0.0, 100.0), 280.0);
    assert_close(safety::abort_to_orbit_fuel(10000.0, 0.0), 150.0);
}

#[test]
fn test_status_precedence() {
    assert_eq!(safety::classify(0.0, true), SafetyStatus::Nominal);
    assert_eq!(safety::classify(-0.1, true), SafetyStatus::Caution);
    assert_eq!(safety::classify(-1000.0, true), SafetyStatus::Caution);
    assert_eq!(safety::classify(10.0, false), SafetyStatus::Caution);
    assert_eq!(safety::classify(-50.0, false), SafetyStatus::Caution);
    assert_eq!(safety::classify(-50.1, false), SafetyStatus::Critical);
    assert_eq!(SafetyStatus::Critical.to_string(), "CRITICAL");
}

#[test]
fn test_safety_assessment() {
    let assessment = SafetyAssessment::evaluate(850.0, 230.0, 5.0, 2000.0, 45.0);
    assert_close(assessment.fuel_margin(), 520.0);
    assert!(assessment.abort_capable());
    assert!(assessment.fuel_sufficient());
    assert_eq!(assessment.status(), SafetyStatus::Nominal);
    assert_eq!(assessment.time_remaining(), TimeToDepletion::Finite(170.0));

    // Short on fuel but still able to abort: insufficient, not critical.
    let short = SafetyAssessment::evaluate(400.0, 400.0, 5.0, 5000.0, 0.0);
    assert!(!short.fuel_sufficient());
    assert!(short.abort_capable());
    assert_eq!(short.status(), SafetyStatus::Caution);

    for rate in [0.0, -3.0] {
        let idle = SafetyAssessment::evaluate(100.0, 0.0, rate, 0.0, 0.0);
        assert_eq!(idle.time_remaining(), TimeToDepletion::Unbounded);
        assert!(!idle.time_remaining().is_below(ALERT_THRESHOLD));
        assert_eq!(idle.time_remaining().to_string(), "∞");
    }
}

#[test]
fn test_alerts_on_critical_shortage() {
    let consumption = ConsumptionSample::estimate(106.0, 0.0, 100.0, 1.0, "hover");
    let safety = SafetyAssessment::evaluate(100.0, 300.0, consumption.actual_burn_rate(), 0.0, 100.0);
    assert_eq!(safety.status(), SafetyStatus::Critical);

    let alerts = AlertSet::generate(&safety, &consumption);
    assert_eq!(
        alerts.warnings(),
        [
            "CRITICAL: Insufficient fuel for nominal landing",
            "DEFICIT: 300.0 kg shortfall",
            "TIME CRITICAL: 16.7s to depletion",
        ]
    );
    assert_eq!(
        alerts.recommendations(),
        ["EMERGENCY: Optimize trajectory NOW", "Consider emergency landing procedures"]
    );
    assert_eq!(alerts.priority(), SafetyStatus::Critical);
}

#[test]
fn test_alerts_layer_shortage_and_abort_window_under_caution() {
    let consumption = ConsumptionSample::estimate(306.0, 0.0, 300.0, 1.0, "hover");
    let safety = SafetyAssessment::evaluate(300.0, 230.0, consumption.actual_burn_rate(), 0.0, 100.0);
    assert_eq!(safety.status(), SafetyStatus::Caution);
    assert!(!safety.abort_capable());

    let alerts = AlertSet::generate(&safety, &consumption);
    assert_eq!(
        alerts.warnings(),
        [
            "CRITICAL: Insufficient fuel for nominal landing",
            "DEFICIT: 30.0 kg shortfall",
            "WARNING: Abort-to-orbit window closing",
        ]
    );
    assert_eq!(alerts.priority(), SafetyStatus::Caution);
}

#[test]
fn test_anomaly_suppresses_all_clear() {
    let consumption = ConsumptionSample::estimate(860.0, 0.0, 850.0, 1.0, "hover");
    let safety = SafetyAssessment::evaluate(850.0, 0.0, consumption.actual_burn_rate(), 2000.0, 45.0);
    assert_eq!(safety.status(), SafetyStatus::Nominal);

    let alerts = AlertSet::generate(&safety, &consumption);
    assert_eq!(alerts.warnings(), ["ALERT: Burn rate +66.7% from nominal"]);
    assert_eq!(alerts.recommendations(), ["Investigate thruster performance"]);
}

#[test]
fn test_negative_deviation_is_signed() {
    let consumption = ConsumptionSample::estimate(100.0, 0.0, 110.0, 1.0, "hover");
    let safety = SafetyAssessment::evaluate(110.0, 0.0, consumption.actual_burn_rate(), 0.0, 100.0);
    let alerts = AlertSet::generate(&safety, &consumption);
    assert!(alerts.warnings().iter().any(|w| w == "ALERT: Burn rate -266.7% from nominal"));
    assert!(!alerts.warnings().iter().any(|w| w.starts_with("TIME CRITICAL")));
}

#[test]
fn test_nominal_scenario() {
    let snapshot = run_single_cycle(853.0, "constant_deceleration", 2000.0, 45.0, -3.0);
    assert_eq!(snapshot.mission_phase, "constant_deceleration");
    assert_close(snapshot.current_fuel, 850.0);
    assert_close(snapshot.burn_rate, 6.0);
    assert_close(snapshot.burn_rate_deviation, 0.0);
    assert!(!snapshot.anomaly_detected);
    assert_close(snapshot.required_fuel, 219.9);
    assert_close(snapshot.fuel_margin, 850.0 - 219.9 * 1.05 - 100.0);
    assert_close(snapshot.fuel_at_touchdown, 630.1);
    assert_eq!(snapshot.status, SafetyStatus::Nominal);
    assert!(snapshot.abort_capable);
    assert!(snapshot.warnings.is_empty());
    assert_eq!(snapshot.recommendations, ["Continue nominal descent profile"]);
    assert_close(snapshot.altitude, 2000.0);
    assert_close(snapshot.velocity, 45.0);
}

#[test]
fn test_anomalous_scenario() {
    let snapshot = run_single_cycle(627.0, "constant_deceleration", 1200.0, 38.0, -7.0);
    assert_close(snapshot.burn_rate, 14.0);
    assert!(snapshot.anomaly_detected);
    assert_close(snapshot.confidence, 80.0);
    assert_eq!(snapshot.status, SafetyStatus::Caution);
    assert!(snapshot.abort_capable);
    assert_eq!(
        snapshot.warnings,
        [
            "CRITICAL: Insufficient fuel for nominal landing",
            "DEFICIT: 916.7 kg shortfall",
            "ALERT: Burn rate +133.3% from nominal",
        ]
    );
    assert_eq!(
        snapshot.recommendations,
        ["IMMEDIATE: Consider abort to orbit", "Investigate thruster performance"]
    );
}

#[test]
fn test_critical_scenario() {
    let snapshot = run_single_cycle(178.0, "final_approach", 450.0, 12.0, -3.0);
    assert_close(snapshot.burn_rate, 6.0);
    assert_close(snapshot.burn_rate_deviation, 50.0);
    assert_eq!(snapshot.status, SafetyStatus::Caution);
    assert!(!snapshot.abort_capable);
    assert_eq!(
        snapshot.warnings,
        [
            "WARNING: Abort-to-orbit window closing",
            "ALERT: Burn rate +50.0% from nominal",
            "TIME CRITICAL: 29.2s to depletion",
        ]
    );
    assert_eq!(snapshot.recommendations, ["Investigate thruster performance"]);
}

#[test]
fn test_emergency_scenario() {
    let snapshot = run_single_cycle(118.0, "landing", 95.0, 3.0, -6.0);
    assert_close(snapshot.burn_rate, 12.0);
    assert!(!snapshot.anomaly_detected);
    assert_eq!(snapshot.required_fuel, 0.0);
    assert_eq!(snapshot.required_fuel_with_margin, 0.0);
    assert_eq!(snapshot.confidence, 100.0);
    assert_close(snapshot.fuel_margin, 12.0);
    assert_eq!(snapshot.status, SafetyStatus::Caution);
    assert!(snapshot.time_remaining.is_below(ALERT_THRESHOLD));
    assert_close(snapshot.time_remaining.as_secs(), 112.0 / 12.0);
    assert_eq!(
        snapshot.warnings,
        ["WARNING: Abort-to-orbit window closing", "TIME CRITICAL: 9.3s to depletion"]
    );
    assert!(snapshot.recommendations.is_empty());
}

#[test]
fn test_cycle_advances_history() {
    let mut system = FuelSystem::new(500.0, "powered_descent");
    system.update_sensors(-4.0, -50.0, -2.0);
    system.monitor_cycle_at(0.5);
    assert_close(system.previous_fuel(), 496.0);
    assert_close(system.previous_timestamp(), 0.5);

    system.update_sensors(-4.0, 0.0, 0.0);
    let snapshot = system.monitor_cycle_at(1.0);
    assert_close(snapshot.burn_rate, 8.0);
    assert!(!snapshot.anomaly_detected);
    assert_close(snapshot.altitude, FuelSystem::DEFAULT_ALTITUDE - 50.0);
    assert_close(snapshot.velocity, FuelSystem::DEFAULT_VELOCITY - 2.0);
}

#[test]
fn test_repeated_cycle_at_same_timestamp_is_deterministic() {
    let mut system = FuelSystem::new(853.0, "constant_deceleration").with_trajectory(2000.0, 45.0);
    let first = system.monitor_cycle_at(0.0);
    let second = system.monitor_cycle_at(0.0);
    assert_close(system.previous_timestamp(), 0.0);

    for snapshot in [&first, &second] {
        assert_eq!(snapshot.burn_rate, 0.0);
        assert_eq!(snapshot.time_remaining, TimeToDepletion::Unbounded);
        assert!(snapshot.anomaly_detected);
    }
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.recommendations, second.recommendations);
    assert_eq!(first.fuel_margin, second.fuel_margin);
    assert_eq!(first.status, second.status);
}

#[test]
fn test_sensor_updates_clamp_at_zero() {
    let mut system = FuelSystem::new(10.0, "landing").with_trajectory(30.0, 1.0);
    system.update_sensors(-20.0, -50.0, -2.0);
    assert_eq!(system.current_fuel(), 0.0);
    assert_eq!(system.altitude(), 0.0);
    assert_eq!(system.velocity(), 0.0);

    let clamped = FuelSystem::new(10.0, "landing").with_trajectory(-5.0, -1.0);
    assert_eq!(clamped.altitude(), 0.0);
    assert_eq!(clamped.velocity(), 0.0);
}

#[test]
fn test_mission_phase_switch() {
    let mut system = FuelSystem::new(400.0, "powered_descent");
    assert!(system.set_mission_phase("final_approach").is_ok());
    assert_eq!(system.mission_phase(), "final_approach");

    let rejected = system.set_mission_phase("orbit_insertion");
    assert!(matches!(rejected, Err(ProfileError::UnknownPhase(ref p)) if p == "orbit_insertion"));
    assert_eq!(system.mission_phase(), "final_approach");
}

#[test]
fn test_unknown_phase_falls_back() {
    let snapshot = run_single_cycle(500.0, "hover", 1000.0, 20.0, -3.0);
    assert_eq!(snapshot.mission_phase, "hover");
    assert!(!snapshot.anomaly_detected);
    assert_eq!(snapshot.required_fuel, 0.0);
    assert_eq!(snapshot.confidence, 100.0);
}

#[test]
fn test_snapshot_rendering() {
    let snapshot = run_single_cycle(853.0, "constant_deceleration", 2000.0, 45.0, -3.0);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["status"], "NOMINAL");
    assert_eq!(json["breakdown"][0]["phase"], "final_approach");
    assert!(json["time_remaining"]["finite"].is_number());

    let report = snapshot.to_string();
    assert!(report.contains("MISSION PHASE: CONSTANT_DECELERATION"));
    assert!(report.contains("SYSTEM STATUS: NOMINAL"));
    assert!(report.contains("→ Continue nominal descent profile"));

    let mut idle = FuelSystem::new(300.0, "landing");
    let idle_snapshot = idle.monitor_cycle_at(1.0);
    let idle_json = serde_json::to_value(&idle_snapshot).unwrap();
    assert_eq!(idle_json["time_remaining"], "unbounded");
    assert!(idle_snapshot.to_string().contains("Time to Depletion:   ∞"));
}

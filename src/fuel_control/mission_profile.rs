use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter, EnumString};

/// Burn rate assumed for phase identifiers missing from the profile table.
pub const DEFAULT_NOMINAL_BURN_RATE: f64 = 6.0;

/// Known descent phases, identified on the wire by their `snake_case` names.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Hash,
    Display,
    EnumString,
    EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MissionPhase {
    PoweredDescent,
    ConstantDeceleration,
    FinalApproach,
    Landing,
}

impl MissionPhase {
    /// Expected burn rate in kg/s while flying this phase.
    pub const fn nominal_burn_rate(self) -> f64 {
        match self {
            MissionPhase::PoweredDescent => 8.0,
            MissionPhase::ConstantDeceleration => 6.0,
            MissionPhase::FinalApproach => 4.0,
            MissionPhase::Landing => 12.0,
        }
    }

    /// Ordered maneuvers still ahead once this phase is active. Empty for `Landing`.
    pub fn remaining_maneuvers(self) -> &'static [MissionPhaseSpec] {
        REMAINING_MANEUVER_LOOKUP.get(&self).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parses a phase identifier, returning `None` for anything outside the table.
    pub fn lookup(id: &str) -> Option<Self> { Self::from_str(id).ok() }
}

/// Static characteristics of one planned maneuver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionPhaseSpec {
    /// The phase this maneuver flies.
    name: MissionPhase,
    /// Planned burn rate in kg/s.
    nominal_burn_rate: f64,
    /// Planned duration in seconds.
    duration: f64,
    /// Fraction of additional fuel lost to gravity and inefficiencies.
    gravity_loss_factor: f64,
}

impl MissionPhaseSpec {
    pub const fn new(
        name: MissionPhase,
        nominal_burn_rate: f64,
        duration: f64,
        gravity_loss_factor: f64,
    ) -> Self {
        Self { name, nominal_burn_rate, duration, gravity_loss_factor }
    }

    pub fn name(&self) -> MissionPhase { self.name }
    pub fn nominal_burn_rate(&self) -> f64 { self.nominal_burn_rate }
    pub fn duration(&self) -> f64 { self.duration }
    pub fn gravity_loss_factor(&self) -> f64 { self.gravity_loss_factor }
}

const CONSTANT_DECELERATION: MissionPhaseSpec =
    MissionPhaseSpec::new(MissionPhase::ConstantDeceleration, 6.0, 40.0, 0.08);
const FINAL_APPROACH: MissionPhaseSpec =
    MissionPhaseSpec::new(MissionPhase::FinalApproach, 4.0, 20.0, 0.05);
const LANDING: MissionPhaseSpec = MissionPhaseSpec::new(MissionPhase::Landing, 12.0, 10.0, 0.03);

static REMAINING_MANEUVER_LOOKUP: LazyLock<HashMap<MissionPhase, Vec<MissionPhaseSpec>>> =
    LazyLock::new(|| {
        let mut lookup = HashMap::new();
        let plans = vec![
            (MissionPhase::PoweredDescent, vec![CONSTANT_DECELERATION, FINAL_APPROACH, LANDING]),
            (MissionPhase::ConstantDeceleration, vec![FINAL_APPROACH, LANDING]),
            (MissionPhase::FinalApproach, vec![LANDING]),
            (MissionPhase::Landing, vec![]),
        ];
        for (phase, maneuvers) in plans {
            lookup.insert(phase, maneuvers);
        }
        lookup
    });

/// Nominal burn rate for a raw phase identifier, falling back to
/// [`DEFAULT_NOMINAL_BURN_RATE`] for unknown identifiers.
pub fn nominal_burn_rate(phase_id: &str) -> f64 {
    MissionPhase::lookup(phase_id).map_or(DEFAULT_NOMINAL_BURN_RATE, MissionPhase::nominal_burn_rate)
}

/// Remaining maneuvers for a raw phase identifier; unknown identifiers have none.
pub fn remaining_maneuvers(phase_id: &str) -> &'static [MissionPhaseSpec] {
    MissionPhase::lookup(phase_id).map(MissionPhase::remaining_maneuvers).unwrap_or_default()
}

#[derive(Debug, Display)]
pub enum ProfileError {
    UnknownPhase(String),
}

impl std::error::Error for ProfileError {}

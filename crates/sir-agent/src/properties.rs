//! Per-agent personality and health traits, and age-banded severity odds.

use sir_core::{AgentRng, Parameters};

use crate::Role;

/// Age-banded base probability of progressing LOW → MODERATE, per decade.
const MODERATE_SEVERITY_PROBS: [f64; 10] =
    [0.001, 0.003, 0.012, 0.032, 0.049, 0.102, 0.166, 0.243, 0.273, 0.273];

/// Age-banded base probability of progressing MODERATE → HIGH, per decade.
const HIGH_SEVERITY_PROBS: [f64; 10] =
    [0.05, 0.05, 0.05, 0.05, 0.063, 0.122, 0.274, 0.432, 0.709, 0.709];

/// Age-banded probability that an agent carries the fatal-outcome mark.
const DEATH_PROBS: [f64; 10] =
    [0.002, 0.00006, 0.0003, 0.0008, 0.0015, 0.006, 0.022, 0.051, 0.093, 0.093];

/// Traits drawn at creation and re-drawn when parameters change.
#[derive(Clone, Debug, PartialEq)]
pub struct IndividualProperties {
    /// In [0, 1].  Lower health scales severity odds up.
    pub base_health: f64,
    /// In [0, 1].  Probability of taking the risky side of a dilemma.
    pub risk_tolerance: f64,
    /// In [0, 1].  Probability of following the herd over one's own choice.
    pub herding_behavior: f64,
}

impl Default for IndividualProperties {
    fn default() -> Self {
        Self {
            base_health: 1.0,
            risk_tolerance: 0.0,
            herding_behavior: 0.0,
        }
    }
}

impl IndividualProperties {
    /// Draw a fresh trait set for `role`.
    pub fn draw(role: Role, params: &Parameters, rng: &mut AgentRng) -> Self {
        let profile = role.profile();
        let mut props = Self {
            base_health: rng.normal_cap(profile.base_health_mean, profile.base_health_stdev, 0.0, 1.0),
            ..Self::default()
        };
        if profile.draws_disposition {
            props.risk_tolerance = rng.normal_cap(
                params.risk_tolerance_mean,
                params.risk_tolerance_stdev,
                0.0,
                1.0,
            );
            props.herding_behavior = rng.normal_cap(
                params.herding_behavior_mean,
                params.herding_behavior_stdev,
                0.0,
                1.0,
            );
        }
        props
    }
}

/// Base severity odds for one age band, before health scaling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeverityOdds {
    pub moderate: f64,
    pub high: f64,
    pub death: f64,
}

impl SeverityOdds {
    /// Odds for `age`.  Bands are decades; ages past 99 share the last band.
    pub fn for_age(age: u32) -> Self {
        let band = ((age / 10) as usize).min(MODERATE_SEVERITY_PROBS.len() - 1);
        Self {
            moderate: MODERATE_SEVERITY_PROBS[band],
            high: HIGH_SEVERITY_PROBS[band],
            death: DEATH_PROBS[band],
        }
    }

    /// Scale the progression odds by `1 / base_health`.  The death mark is
    /// drawn separately and is not scaled.
    pub fn scaled_by_health(self, base_health: f64) -> (f64, f64) {
        (self.moderate / base_health, self.high / base_health)
    }
}

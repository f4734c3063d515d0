//! Epidemic and behavior parameters.
//!
//! `Parameters` is the single configuration lookup every agent operation
//! reads from.  It deserializes from TOML; every field has a default so a
//! file only needs to list what it overrides:
//!
//! ```toml
//! initial_infection_rate = 0.02
//! social_policies = ["social_distancing", "lockdown_retail"]
//!
//! [[locked_student_ages]]
//! policy  = "lockdown_high_school"
//! min_age = 15
//! max_age = 18
//! ```
//!
//! Distribution parameters are only checked here, in [`Parameters::validate`].
//! The agent model assumes a validated set and never re-checks them.

use std::path::Path;

use serde::Deserialize;

use crate::{SirError, SirResult};

// ── WorkClass ─────────────────────────────────────────────────────────────────

/// Occupation class of a working-age adult.
///
/// The declaration order is significant: work assignment weights classes
/// linearly by their position in [`WorkClass::ALL`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkClass {
    Office,
    Housebound,
    Factory,
    Retail,
    Essential,
}

impl WorkClass {
    pub const ALL: [WorkClass; 5] = [
        WorkClass::Office,
        WorkClass::Housebound,
        WorkClass::Factory,
        WorkClass::Retail,
        WorkClass::Essential,
    ];
}

// ── SocialPolicy ──────────────────────────────────────────────────────────────

/// A government intervention that can be switched on for a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPolicy {
    SocialDistancing,
    LockdownOffice,
    LockdownFactory,
    LockdownRetail,
    LockdownElementarySchool,
    LockdownMiddleSchool,
    LockdownHighSchool,
}

/// Work classes sent home while `policy` is active.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorkLock {
    pub policy: SocialPolicy,
    pub classes: Vec<WorkClass>,
}

/// Inclusive student age band kept home while `policy` is active.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SchoolLock {
    pub policy: SocialPolicy,
    pub min_age: u32,
    pub max_age: u32,
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Parameters {
    // ── Population rolls ──────────────────────────────────────────────────
    pub initial_infection_rate: f64,
    pub mask_user_rate: f64,
    pub isolation_cheater_rate: f64,
    #[serde(alias = "imune_rate")]
    pub immune_rate: f64,
    #[serde(alias = "weareable_adoption_rate")]
    pub wearable_adoption_rate: f64,

    // ── Disease timing (days) ─────────────────────────────────────────────
    pub latency_period_mean: f64,
    pub latency_period_stdev: f64,
    pub incubation_period_mean: f64,
    pub incubation_period_stdev: f64,
    pub disease_period_mean: f64,
    pub disease_period_stdev: f64,

    // ── Contagion ─────────────────────────────────────────────────────────
    pub asymptomatic_contagion_probability: f64,
    pub symptomatic_isolation_rate: f64,
    /// Per-contact infection chance used by the reference transmission step.
    pub contagion_probability: f64,

    // ── Healthcare ────────────────────────────────────────────────────────
    /// Hospital beds as a fraction of the total population.
    pub hospitalization_capacity: f64,

    // ── Personality ───────────────────────────────────────────────────────
    pub risk_tolerance_mean: f64,
    pub risk_tolerance_stdev: f64,
    pub herding_behavior_mean: f64,
    pub herding_behavior_stdev: f64,

    // ── Policies ──────────────────────────────────────────────────────────
    pub social_policies: Vec<SocialPolicy>,
    pub locked_work_classes: Vec<WorkLock>,
    pub locked_student_ages: Vec<SchoolLock>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            initial_infection_rate: 0.05,
            mask_user_rate: 0.0,
            isolation_cheater_rate: 0.0,
            immune_rate: 0.05,
            wearable_adoption_rate: 0.0,

            latency_period_mean: 4.0,
            latency_period_stdev: 1.0,
            incubation_period_mean: 7.0,
            incubation_period_stdev: 2.0,
            disease_period_mean: 20.0,
            disease_period_stdev: 5.0,

            asymptomatic_contagion_probability: 0.1,
            symptomatic_isolation_rate: 0.0,
            contagion_probability: 0.1,

            hospitalization_capacity: 0.05,

            risk_tolerance_mean: 0.4,
            risk_tolerance_stdev: 0.3,
            herding_behavior_mean: 0.4,
            herding_behavior_stdev: 0.3,

            social_policies: Vec::new(),
            locked_work_classes: vec![
                WorkLock { policy: SocialPolicy::LockdownOffice,  classes: vec![WorkClass::Office] },
                WorkLock { policy: SocialPolicy::LockdownFactory, classes: vec![WorkClass::Factory] },
                WorkLock { policy: SocialPolicy::LockdownRetail,  classes: vec![WorkClass::Retail] },
            ],
            locked_student_ages: vec![
                SchoolLock { policy: SocialPolicy::LockdownElementarySchool, min_age: 5,  max_age: 11 },
                SchoolLock { policy: SocialPolicy::LockdownMiddleSchool,     min_age: 12, max_age: 14 },
                SchoolLock { policy: SocialPolicy::LockdownHighSchool,       min_age: 15, max_age: 18 },
            ],
        }
    }
}

impl Parameters {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> SirResult<Self> {
        let params: Parameters = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> SirResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the agent model cannot draw from.
    pub fn validate(&self) -> SirResult<()> {
        let rates = [
            ("initial_infection_rate", self.initial_infection_rate),
            ("mask_user_rate", self.mask_user_rate),
            ("isolation_cheater_rate", self.isolation_cheater_rate),
            ("immune_rate", self.immune_rate),
            ("wearable_adoption_rate", self.wearable_adoption_rate),
            ("asymptomatic_contagion_probability", self.asymptomatic_contagion_probability),
            ("symptomatic_isolation_rate", self.symptomatic_isolation_rate),
            ("contagion_probability", self.contagion_probability),
            ("hospitalization_capacity", self.hospitalization_capacity),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(SirError::Config(format!("{name} must lie in [0, 1], got {value}")));
            }
        }

        let normals = [
            ("latency_period", self.latency_period_mean, self.latency_period_stdev),
            ("incubation_period", self.incubation_period_mean, self.incubation_period_stdev),
            ("disease_period", self.disease_period_mean, self.disease_period_stdev),
            ("risk_tolerance", self.risk_tolerance_mean, self.risk_tolerance_stdev),
            ("herding_behavior", self.herding_behavior_mean, self.herding_behavior_stdev),
        ];
        for (name, mean, stdev) in normals {
            if !mean.is_finite() {
                return Err(SirError::Config(format!("{name}_mean must be finite, got {mean}")));
            }
            if !stdev.is_finite() || stdev < 0.0 {
                return Err(SirError::Config(format!(
                    "{name}_stdev must be finite and non-negative, got {stdev}"
                )));
            }
        }

        for lock in &self.locked_student_ages {
            if lock.min_age > lock.max_age {
                return Err(SirError::Config(format!(
                    "locked_student_ages for {:?}: min_age {} > max_age {}",
                    lock.policy, lock.min_age, lock.max_age
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn policy_active(&self, policy: SocialPolicy) -> bool {
        self.social_policies.contains(&policy)
    }

    /// `true` if any active policy sends `class` home.
    pub fn work_class_locked(&self, class: WorkClass) -> bool {
        self.locked_work_classes
            .iter()
            .any(|lock| self.policy_active(lock.policy) && lock.classes.contains(&class))
    }

    /// `true` if any active policy closes the school for a student of `age`.
    pub fn student_age_locked(&self, age: u32) -> bool {
        self.locked_student_ages.iter().any(|lock| {
            self.policy_active(lock.policy) && (lock.min_age..=lock.max_age).contains(&age)
        })
    }
}

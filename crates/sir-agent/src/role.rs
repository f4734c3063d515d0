//! Age roles and the per-role dispatch table.
//!
//! A role is fixed once from the agent's age and never changes.  Everything
//! that differs between roles (baseline-health distribution, whether the
//! agent has a personality worth drawing, and which daily step runs) is
//! looked up through [`Role::profile`] instead of being spread across
//! `match` arms.

use sir_core::AgentId;

use crate::behavior;
use crate::{AgentRngs, AgentStore, Districts, SimContext};

/// Signature shared by every per-role daily step.
pub type StepFn =
    fn(&mut AgentStore, &mut AgentRngs, AgentId, &mut SimContext<'_>, &mut dyn Districts);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    /// Ages 0–1.
    Infant,
    /// Ages 2–4.
    Toddler,
    /// Ages 5–18, attends school.
    Student,
    /// Ages 19–64, holds a job.
    Adult,
    /// Ages 65 and over.
    Elder,
}

/// Static capabilities of one role.
pub struct RoleProfile {
    pub base_health_mean: f64,
    pub base_health_stdev: f64,
    /// Draws risk tolerance and herding behavior from the configured
    /// distributions; other roles keep both at zero.
    pub draws_disposition: bool,
    /// Receives a `WorkInfo` at creation.
    pub works: bool,
    pub step: StepFn,
}

static INFANT: RoleProfile = RoleProfile {
    base_health_mean: 1.0,
    base_health_stdev: 0.2,
    draws_disposition: false,
    works: false,
    step: behavior::step_homebound,
};

static TODDLER: RoleProfile = RoleProfile {
    base_health_mean: 1.0,
    base_health_stdev: 0.2,
    draws_disposition: false,
    works: false,
    step: behavior::step_homebound,
};

static STUDENT: RoleProfile = RoleProfile {
    base_health_mean: 1.0,
    base_health_stdev: 0.2,
    draws_disposition: false,
    works: false,
    step: behavior::step_student,
};

static ADULT: RoleProfile = RoleProfile {
    base_health_mean: 0.9,
    base_health_stdev: 0.2,
    draws_disposition: true,
    works: true,
    step: behavior::step_adult,
};

static ELDER: RoleProfile = RoleProfile {
    base_health_mean: 0.7,
    base_health_stdev: 0.2,
    draws_disposition: false,
    works: false,
    step: behavior::step_homebound,
};

impl Role {
    pub fn from_age(age: u32) -> Role {
        match age {
            0..=1 => Role::Infant,
            2..=4 => Role::Toddler,
            5..=18 => Role::Student,
            19..=64 => Role::Adult,
            _ => Role::Elder,
        }
    }

    #[inline]
    pub fn profile(self) -> &'static RoleProfile {
        match self {
            Role::Infant => &INFANT,
            Role::Toddler => &TODDLER,
            Role::Student => &STUDENT,
            Role::Adult => &ADULT,
            Role::Elder => &ELDER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Infant  => "infant",
            Role::Toddler => "toddler",
            Role::Student => "student",
            Role::Adult   => "adult",
            Role::Elder   => "elder",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

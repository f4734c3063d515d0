//! Simulation time model.
//!
//! # Design
//!
//! Time advances in whole days.  Each day is split into a fixed sequence of
//! [`SimPhase`]s; every living agent is stepped exactly once per phase, in
//! population order.  The weekday is derived from the day counter:
//!
//!   weekday = (start_weekday + day) mod 7
//!
//! Using an integer day as the canonical unit keeps all disease timing
//! (latency, incubation, duration) comparable against a plain counter.

use std::fmt;

// ── Weekday ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The weekday `days` after `self`.
    #[inline]
    pub fn offset(self, days: u64) -> Weekday {
        Self::ALL[((self as u64 + days) % 7) as usize]
    }
}

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// The discrete phases of one simulated day, in execution order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SimPhase {
    MorningAtHome,
    CommutingToMainActivity,
    MainActivity,
    CommutingToPostWorkActivity,
    PostWorkActivity,
    CommutingToHome,
    EveningAtHome,
}

impl SimPhase {
    pub const ALL: [SimPhase; 7] = [
        SimPhase::MorningAtHome,
        SimPhase::CommutingToMainActivity,
        SimPhase::MainActivity,
        SimPhase::CommutingToPostWorkActivity,
        SimPhase::PostWorkActivity,
        SimPhase::CommutingToHome,
        SimPhase::EveningAtHome,
    ];

    /// `true` for the phases where agents stay put and mix with whoever
    /// shares their location.
    #[inline]
    pub fn is_gathering(self) -> bool {
        matches!(self, SimPhase::MainActivity | SimPhase::PostWorkActivity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimPhase::MorningAtHome               => "morning_at_home",
            SimPhase::CommutingToMainActivity     => "commuting_to_main_activity",
            SimPhase::MainActivity                => "main_activity",
            SimPhase::CommutingToPostWorkActivity => "commuting_to_post_work_activity",
            SimPhase::PostWorkActivity            => "post_work_activity",
            SimPhase::CommutingToHome             => "commuting_to_home",
            SimPhase::EveningAtHome               => "evening_at_home",
        }
    }
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current day and phase.  Cheap to copy, holds no heap data.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Weekday of day 0.
    pub start_weekday: Weekday,
    /// Days completed since the start of the run.
    pub day: u64,
    /// Phase currently being executed.
    pub phase: SimPhase,
}

impl SimClock {
    pub fn new(start_weekday: Weekday) -> Self {
        Self {
            start_weekday,
            day: 0,
            phase: SimPhase::MorningAtHome,
        }
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.start_weekday.offset(self.day)
    }

    /// Move to the first phase of the next day.
    #[inline]
    pub fn advance_day(&mut self) {
        self.day += 1;
        self.phase = SimPhase::MorningAtHome;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} ({:?}, {})", self.day, self.weekday(), self.phase)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level settings that are not epidemic parameters.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Master RNG seed.  Must match the seed the population's RNGs were
    /// drawn from; the same seed always produces identical results.
    pub seed: u64,

    /// Total days to simulate.
    pub total_days: u64,

    /// Weekday of day 0.
    pub start_weekday: Weekday,
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_weekday)
    }
}

//! Shared simulation state lent to every agent step.

use sir_core::{GlobalCount, Parameters, SimPhase, Weekday};

use crate::DilemmaHistory;

/// Mutable handles to the process-wide state, built by the controller for
/// each phase and passed to every agent operation that needs them.
///
/// Holding `&mut` to the counters and the dilemma history means only one
/// agent can be touching them at a time; the controller steps agents
/// strictly one after another.
pub struct SimContext<'a> {
    pub phase: SimPhase,
    pub weekday: Weekday,
    pub params: &'a Parameters,
    pub counters: &'a mut GlobalCount,
    pub history: &'a mut DilemmaHistory,
    /// Beds available in total.  Occupancy is `counters.total_hospitalized`.
    pub hospital_beds: u64,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        phase:         SimPhase,
        weekday:       Weekday,
        params:        &'a Parameters,
        counters:      &'a mut GlobalCount,
        history:       &'a mut DilemmaHistory,
        hospital_beds: u64,
    ) -> Self {
        Self { phase, weekday, params, counters, history, hospital_beds }
    }

    /// `true` once every bed is occupied.  Read immediately before a bed is
    /// taken, so the check and the increment see the same occupancy.
    #[inline]
    pub fn reached_hospitalization_limit(&self) -> bool {
        self.counters.total_hospitalized >= self.hospital_beds
    }
}

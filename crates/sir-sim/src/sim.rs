//! The `Sim` struct and its day loop.

use sir_agent::{AgentRngs, AgentStore, DilemmaHistory, InfectionStatus, Location, SimContext};
use sir_core::{AgentId, GlobalCount, Parameters, SimClock, SimConfig, SimPhase, Weekday};
use tracing::{debug, warn};

use crate::{CityMap, SimObserver, SimResult};

#[cfg(feature = "fx-hash")]
type ContactMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type ContactMap<K, V> = std::collections::HashMap<K, V>;

/// Exposure multiplier for a susceptible agent wearing a mask.
const MASK_EXPOSURE: f64 = 0.5;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Every day walks the seven phases of [`SimPhase::ALL`] in order:
///
/// 1. **Step**: each agent, in ascending `AgentId` order, runs its role's
///    behavior for the phase (commutes, dilemmas, evening disease evolution).
/// 2. **Contact** (gathering phases only): agents sharing a location are
///    exposed once per contagious occupant.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Seed, run length and starting weekday.
    pub config: SimConfig,

    /// Day counter and phase cursor.
    pub clock: SimClock,

    /// Current parameter set.  Replace through [`Sim::set_parameters`] so
    /// agents get to re-roll their traits.
    pub params: Parameters,

    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Population-wide epidemic counters.
    pub counters: GlobalCount,

    /// Resolved dilemmas of this run.  Starts empty.
    pub history: DilemmaHistory,

    pub city: CityMap,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current day to `config.total_days`.
    ///
    /// Calls observer hooks at every day and phase boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.day < self.config.total_days {
            self.process_day(observer)?;
        }
        observer.on_sim_end(self.clock.day, &self.counters);
        Ok(())
    }

    /// Run exactly `n` days from the current position (ignores `total_days`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_days<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_day(observer)?;
        }
        Ok(())
    }

    /// Swap in a new parameter set.  Every living agent re-rolls its
    /// policy-dependent traits against it.
    pub fn set_parameters(&mut self, params: Parameters) -> SimResult<()> {
        params.validate()?;
        if self.clock.day > 0 {
            warn!(day = self.clock.day, "parameters replaced mid-run");
        }
        self.params = params;
        for (human, rng) in self.agents.iter_mut().zip(self.rngs.inner.iter_mut()) {
            if human.is_alive() {
                human.parameter_changed(&self.params, rng, &mut self.counters);
            }
        }
        Ok(())
    }

    /// Total hospital beds for the current population.  The limit is
    /// reached once `total_hospitalized` climbs to this value.
    pub fn hospital_beds(&self) -> u64 {
        (self.params.hospitalization_capacity * self.counters.total_population as f64).ceil() as u64
    }

    pub fn counters(&self) -> &GlobalCount {
        &self.counters
    }

    // ── Core day processing ───────────────────────────────────────────────

    fn process_day<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let day = self.clock.day;
        let weekday = self.clock.weekday();
        let beds = self.hospital_beds();
        observer.on_day_start(day, weekday);

        for phase in SimPhase::ALL {
            self.clock.phase = phase;
            self.step_agents(phase, weekday, beds)?;
            if phase.is_gathering() {
                let infections = self.spread_contagion();
                if infections > 0 {
                    debug!(day, phase = phase.as_str(), infections, "contact transmission");
                }
            }
            observer.on_phase_end(day, phase, &self.counters);
        }

        observer.on_day_end(day, &self.counters);
        self.clock.advance_day();
        Ok(())
    }

    fn step_agents(&mut self, phase: SimPhase, weekday: Weekday, beds: u64) -> SimResult<()> {
        let mut ctx = SimContext::new(
            phase,
            weekday,
            &self.params,
            &mut self.counters,
            &mut self.history,
            beds,
        );
        for i in 0..self.agents.len() {
            self.agents
                .step(&mut self.rngs, AgentId(i as u32), &mut ctx, &mut self.city)?;
        }
        Ok(())
    }

    /// Expose co-located agents to each other.  Returns the number of new
    /// infections.
    ///
    /// Every agent sits at exactly one location, and each draw comes from
    /// the drawing agent's own RNG, so the order locations are visited in
    /// does not change the outcome.
    fn spread_contagion(&mut self) -> usize {
        let index = build_contact_index(&self.agents);
        let mut infections = 0;
        for occupants in index.values() {
            infections += expose(
                occupants,
                &mut self.agents,
                &mut self.rngs,
                &self.params,
                &mut self.counters,
            );
        }
        infections
    }
}

// ── Contact helpers ───────────────────────────────────────────────────────────

/// Build a `Location → Vec<AgentId>` index of all placed, living agents.
fn build_contact_index(agents: &AgentStore) -> ContactMap<Location, Vec<AgentId>> {
    let mut index: ContactMap<Location, Vec<AgentId>> = ContactMap::default();
    for human in agents.living() {
        if human.location != Location::Nowhere {
            index.entry(human.location).or_default().push(human.id);
        }
    }
    index
}

/// One location's worth of transmission.  Each susceptible occupant gets one
/// `contagion_probability` draw per contagious occupant, halved when it
/// wears a mask, and is infected on the first success.
fn expose(
    occupants: &[AgentId],
    agents:    &mut AgentStore,
    rngs:      &mut AgentRngs,
    params:    &Parameters,
    counters:  &mut GlobalCount,
) -> usize {
    if occupants.len() < 2 {
        return 0;
    }
    let mut contagious = 0usize;
    for &id in occupants {
        if let (Some(h), Some(rng)) = (agents.get(id), rngs.get_mut(id)) {
            if h.is_contagious(params, rng) {
                contagious += 1;
            }
        }
    }
    if contagious == 0 {
        return 0;
    }

    let mut infected = 0;
    for &id in occupants {
        let (Some(h), Some(rng)) = (agents.get_mut(id), rngs.get_mut(id)) else {
            continue;
        };
        if h.immune || h.disease.status != InfectionStatus::Susceptible {
            continue;
        }
        let mut p = params.contagion_probability;
        if h.is_wearing_mask(params, rng) {
            p *= MASK_EXPOSURE;
        }
        if (0..contagious).any(|_| rng.flip_coin(p)) && h.infect(params, counters, rng) {
            infected += 1;
        }
    }
    infected
}

//! Fluent builder for constructing a [`Sim`].

use sir_agent::{AgentRngs, AgentStore, DilemmaHistory, Districts, Location};
use sir_core::{DistrictId, GlobalCount, Parameters, SimConfig};

use crate::{CityMap, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, total days, starting weekday.  The seed must be
///   the one the agent RNGs were drawn from.
/// - [`Parameters`]: validated again here
/// - [`AgentStore`] + [`AgentRngs`] + the [`GlobalCount`] they were counted
///   into: from [`sir_agent::PopulationBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                       |
/// |--------------|-------------------------------|
/// | `.city(c)`   | `CityMap::new()` (no districts) |
///
/// Agents with a valid home district and no location yet are placed at home.
///
/// # Example
///
/// ```rust,ignore
/// let mut counters = GlobalCount::new();
/// let (store, rngs) = PopulationBuilder::new(n, seed).build(&params, &mut counters)?;
/// let mut sim = SimBuilder::new(config, params, store, rngs, counters)
///     .city(city)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    params:   Parameters,
    agents:   AgentStore,
    rngs:     AgentRngs,
    counters: GlobalCount,
    city:     Option<CityMap>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(
        config:   SimConfig,
        params:   Parameters,
        agents:   AgentStore,
        rngs:     AgentRngs,
        counters: GlobalCount,
    ) -> Self {
        Self { config, params, agents, rngs, counters, city: None }
    }

    /// Supply the districts and gathering spots agents move between.
    pub fn city(mut self, city: CityMap) -> Self {
        self.city = Some(city);
        self
    }

    /// Validate inputs, place agents at home and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let agent_count = self.agents.len();
        self.params.validate()?;

        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if self.rngs.seed() != self.config.seed {
            return Err(SimError::Config(format!(
                "config seed {} differs from the population seed {}",
                self.config.seed,
                self.rngs.seed()
            )));
        }
        if self.counters.total_population != agent_count as u64 {
            return Err(SimError::Config(format!(
                "counters track {} agents but the store holds {agent_count}",
                self.counters.total_population
            )));
        }
        if !self.counters.is_conserved() {
            return Err(SimError::Config("population counters are inconsistent".into()));
        }

        let mut city = self.city.unwrap_or_default();
        let mut agents = self.agents;
        for human in agents.iter_mut() {
            let home = human.home_district;
            if human.location != Location::Nowhere || home == DistrictId::INVALID {
                continue;
            }
            if city.district(home).is_none() {
                return Err(SimError::Config(format!("{} lives in unknown {home}", human.id)));
            }
            city.move_to(human.id, Location::Nowhere, Location::District(home));
            human.location = Location::District(home);
        }

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            params:   self.params,
            agents,
            rngs:     self.rngs,
            counters: self.counters,
            history:  DilemmaHistory::new(),
            city,
        })
    }
}

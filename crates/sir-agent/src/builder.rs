//! Fluent builder for a freshly infected-and-counted population.
//!
//! # Usage
//!
//! ```rust
//! use sir_agent::PopulationBuilder;
//! use sir_core::{GlobalCount, Parameters};
//!
//! let params = Parameters::default();
//! let mut counters = GlobalCount::new();
//! let (store, rngs) = PopulationBuilder::new(1_000, /*seed=*/ 42)
//!     .build(&params, &mut counters)
//!     .unwrap();
//!
//! assert_eq!(store.len(), 1_000);
//! assert_eq!(rngs.len(), 1_000);
//! assert_eq!(counters.total_population, 1_000);
//! assert!(counters.is_conserved());
//! ```
//!
//! Districts and tribes are left empty; wiring them is up to the caller
//! (see `AgentStore::link`).

use sir_core::{AgentId, GlobalCount, Parameters, SimRng, SirError, SirResult};
use tracing::debug;

use crate::{AgentRngs, AgentStore, Human};

/// Shape of the age distribution: `Beta(2, 5)` scaled to 0–100 years.
const AGE_ALPHA: f64 = 2.0;
const AGE_BETA: f64 = 5.0;
const AGE_SCALE: f64 = 100.0;

/// Offset of the age-sampling stream within the run's `SimRng` family.
const AGE_STREAM: u64 = 0xA6E;

pub struct PopulationBuilder {
    count: usize,
    seed: u64,
    ages: Option<Vec<u32>>,
}

impl PopulationBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, ages: None }
    }

    /// Use these ages instead of sampling them.  Must hold exactly `count`
    /// entries.
    pub fn forced_ages(mut self, ages: Vec<u32>) -> Self {
        self.ages = Some(ages);
        self
    }

    /// Create every agent through [`Human::factory`], registering it in
    /// `counters` and rolling its initial infection.
    pub fn build(
        self,
        params:   &Parameters,
        counters: &mut GlobalCount,
    ) -> SirResult<(AgentStore, AgentRngs)> {
        let ages = match self.ages {
            Some(ages) if ages.len() != self.count => {
                return Err(SirError::Config(format!(
                    "{} forced ages for a population of {}",
                    ages.len(),
                    self.count
                )));
            }
            Some(ages) => ages,
            None => {
                let mut rng = SimRng::new(self.seed).child(AGE_STREAM);
                (0..self.count)
                    .map(|_| (rng.beta(AGE_ALPHA, AGE_BETA) * AGE_SCALE).floor() as u32)
                    .collect()
            }
        };

        let mut store = AgentStore::new();
        let mut rngs = AgentRngs::new(self.count, self.seed);
        for (i, (age, rng)) in ages.into_iter().zip(rngs.inner.iter_mut()).enumerate() {
            let id = AgentId::try_from(i)
                .map_err(|_| SirError::Config(format!("population of {} overflows AgentId", self.count)))?;
            store.push(Human::factory(id, age, params, rng, counters));
        }

        debug!(
            population = counters.total_population,
            infected = counters.infected_count,
            immune = counters.immune_count,
            workers = counters.work_population,
            "population built"
        );
        Ok((store, rngs))
    }
}

//! Process-wide epidemic totals.
//!
//! `GlobalCount` is owned by the simulation controller and lent to agents as
//! `&mut` through the per-phase context.  Every agent transition adjusts
//! exactly the fields it documents; the reporting layer relies on these
//! totals agreeing with per-agent state at every phase boundary.
//!
//! Two identities hold after population build and after every transition:
//!
//! ```text
//! susceptible + immune + infected + recovered + death == total_population
//! non_infected + infected + recovered + death          == total_population
//! ```

/// Running epidemic totals for one simulation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalCount {
    pub total_population: u64,
    pub work_population: u64,

    pub non_infected_count: u64,
    pub susceptible_count: u64,
    pub immune_count: u64,

    pub infected_count: u64,
    pub asymptomatic_count: u64,
    pub symptomatic_count: u64,
    pub moderate_severity_count: u64,
    pub high_severity_count: u64,

    pub recovered_count: u64,
    pub death_count: u64,

    pub total_hospitalized: u64,
    pub total_income: f64,
}

impl GlobalCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the population currently infected; 0 for an empty run.
    #[inline]
    pub fn infected_fraction(&self) -> f64 {
        if self.total_population == 0 {
            return 0.0;
        }
        self.infected_count as f64 / self.total_population as f64
    }

    /// `true` when both conservation identities hold.
    pub fn is_conserved(&self) -> bool {
        let by_status = self.susceptible_count
            + self.immune_count
            + self.infected_count
            + self.recovered_count
            + self.death_count;
        let by_exposure =
            self.non_infected_count + self.infected_count + self.recovered_count + self.death_count;
        by_status == self.total_population && by_exposure == self.total_population
    }
}

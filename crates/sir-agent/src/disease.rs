//! Per-agent disease progression.
//!
//! ```text
//!   SUSCEPTIBLE ──infect──▶ INFECTED ─────────────────────────────▶ RECOVERED
//!                            │ ASYMPTOMATIC → LOW → MODERATE → HIGH    (immune)
//!                            │                         (bed?)    │
//!                            └──────────────────────────────────┴─▶ DEATH
//! ```
//!
//! Severity only moves forward.  Every transition adjusts the global
//! counters it is responsible for and nothing else; see
//! [`sir_core::GlobalCount`] for the identities that must keep holding.

use sir_core::{AgentRng, GlobalCount, Parameters};
use tracing::debug;

use crate::{Human, SimContext};

/// Minimum gap, in days, between incubation and the end of the disease.
const MIN_SYMPTOMATIC_DAYS: f64 = 7.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum InfectionStatus {
    #[default]
    Susceptible,
    Infected,
    Recovered,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum DiseaseSeverity {
    #[default]
    Asymptomatic,
    Low,
    Moderate,
    High,
    Death,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseRecord {
    pub status: InfectionStatus,
    pub severity: DiseaseSeverity,
    pub days_infected: u32,

    /// Days until contagious.  Drawn at infection.
    pub latency: f64,
    /// Days until symptomatic; always greater than `latency`.
    pub incubation: f64,
    /// Days until recovery; at least `incubation + 7`.
    pub duration: f64,

    /// LOW → MODERATE odds, fixed at creation.
    pub moderate_severity_prob: f64,
    /// MODERATE → HIGH odds, fixed at creation.
    pub high_severity_prob: f64,
    /// Pre-drawn fatal outcome: a marked agent reaching HIGH dies even in a
    /// hospital bed.
    pub death_mark: bool,

    pub hospitalized: bool,
}

impl DiseaseRecord {
    pub fn new(moderate_severity_prob: f64, high_severity_prob: f64, death_mark: bool) -> Self {
        Self {
            status: InfectionStatus::Susceptible,
            severity: DiseaseSeverity::Asymptomatic,
            days_infected: 0,
            latency: 0.0,
            incubation: 0.0,
            duration: 0.0,
            moderate_severity_prob,
            high_severity_prob,
            death_mark,
            hospitalized: false,
        }
    }
}

impl Human {
    /// Start an infection.  Immune, dead and already infected or recovered
    /// agents are left untouched.  Returns `true` if the agent was infected.
    pub fn infect(
        &mut self,
        params:   &Parameters,
        counters: &mut GlobalCount,
        rng:      &mut AgentRng,
    ) -> bool {
        if self.immune || self.is_dead || self.disease.status != InfectionStatus::Susceptible {
            return false;
        }
        counters.infected_count += 1;
        counters.non_infected_count -= 1;
        counters.susceptible_count -= 1;
        counters.asymptomatic_count += 1;

        let d = &mut self.disease;
        d.status = InfectionStatus::Infected;
        d.severity = DiseaseSeverity::Asymptomatic;
        d.days_infected = 0;

        d.latency = (rng.normal(params.latency_period_mean, params.latency_period_stdev)
            - self.early_symptom_detection as f64)
            .max(1.0);

        d.incubation = rng.normal(params.incubation_period_mean, params.incubation_period_stdev);
        if !(d.incubation > d.latency) {
            d.incubation = d.latency + 1.0;
        }

        d.duration = rng.normal(params.disease_period_mean, params.disease_period_stdev);
        if !(d.duration >= d.incubation + MIN_SYMPTOMATIC_DAYS) {
            d.duration = d.incubation + MIN_SYMPTOMATIC_DAYS;
        }

        debug!(
            agent = %self.id,
            latency = d.latency,
            incubation = d.incubation,
            duration = d.duration,
            "infected"
        );
        true
    }

    /// Advance the infection by one day.  No-op unless infected and alive.
    pub fn disease_evolution(&mut self, ctx: &mut SimContext<'_>, rng: &mut AgentRng) {
        if self.is_dead || !self.is_infected() {
            return;
        }
        self.disease.days_infected += 1;
        let days = self.disease.days_infected as f64;

        match self.disease.severity {
            DiseaseSeverity::Asymptomatic => {
                if days >= self.disease.incubation {
                    self.disease.severity = DiseaseSeverity::Low;
                    ctx.counters.asymptomatic_count -= 1;
                    ctx.counters.symptomatic_count += 1;
                }
            }
            DiseaseSeverity::Low => {
                if rng.flip_coin(self.disease.moderate_severity_prob) {
                    self.disease.severity = DiseaseSeverity::Moderate;
                    ctx.counters.moderate_severity_count += 1;
                    if !ctx.reached_hospitalization_limit() {
                        ctx.counters.total_hospitalized += 1;
                        self.disease.hospitalized = true;
                        debug!(agent = %self.id, "hospitalized");
                    } else {
                        debug!(agent = %self.id, "no hospital bed available");
                    }
                }
            }
            DiseaseSeverity::Moderate => {
                if rng.flip_coin(self.disease.high_severity_prob) {
                    self.disease.severity = DiseaseSeverity::High;
                    ctx.counters.moderate_severity_count -= 1;
                    ctx.counters.high_severity_count += 1;
                    if !self.disease.hospitalized || self.disease.death_mark {
                        self.die(ctx.counters);
                    }
                }
            }
            DiseaseSeverity::High => {
                if self.disease.death_mark {
                    self.die(ctx.counters);
                }
            }
            DiseaseSeverity::Death => {}
        }

        if self.disease.severity != DiseaseSeverity::Death && days > self.disease.duration {
            self.recover(ctx.counters);
        }
    }

    /// Resolve the infection and grant permanent immunity.
    pub fn recover(&mut self, counters: &mut GlobalCount) {
        counters.recovered_count += 1;
        match self.disease.severity {
            DiseaseSeverity::Moderate => counters.moderate_severity_count -= 1,
            DiseaseSeverity::High => counters.high_severity_count -= 1,
            _ => {}
        }
        counters.infected_count -= 1;
        self.release_hospital_bed(counters);
        self.disease.status = InfectionStatus::Recovered;
        self.disease.severity = DiseaseSeverity::Asymptomatic;
        counters.symptomatic_count -= 1;
        counters.asymptomatic_count += 1;
        self.immune = true;
        debug!(agent = %self.id, days = self.disease.days_infected, "recovered");
    }

    /// Terminal transition from HIGH severity.  The agent is never stepped
    /// again.
    pub fn die(&mut self, counters: &mut GlobalCount) {
        counters.symptomatic_count -= 1;
        self.disease.severity = DiseaseSeverity::Death;
        counters.high_severity_count -= 1;
        counters.infected_count -= 1;
        counters.death_count += 1;
        self.release_hospital_bed(counters);
        self.is_dead = true;
        debug!(
            agent = %self.id,
            role = %self.role,
            age = self.age,
            days = self.disease.days_infected,
            "died"
        );
    }

    fn release_hospital_bed(&mut self, counters: &mut GlobalCount) {
        if self.disease.hospitalized {
            counters.total_hospitalized -= 1;
            self.disease.hospitalized = false;
        }
    }

    /// Carrying an active infection.  A dead agent no longer counts.
    #[inline]
    pub fn is_infected(&self) -> bool {
        self.disease.status == InfectionStatus::Infected
            && self.disease.severity != DiseaseSeverity::Death
    }

    #[inline]
    pub fn is_symptomatic(&self) -> bool {
        self.is_infected() && self.disease.days_infected as f64 >= self.disease.incubation
    }

    /// Whether the agent sheds virus right now.
    ///
    /// Past latency, symptomatic agents always do; asymptomatic ones do with
    /// `asymptomatic_contagion_probability`, re-drawn on every call.  Two
    /// calls in the same phase may disagree.
    pub fn is_contagious(&self, params: &Parameters, rng: &mut AgentRng) -> bool {
        if !self.is_infected() || (self.disease.days_infected as f64) < self.disease.latency {
            return false;
        }
        self.is_symptomatic() || rng.flip_coin(params.asymptomatic_contagion_probability)
    }
}

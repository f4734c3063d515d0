//! Simulation observer trait for progress reporting and data collection.

use sir_core::{GlobalCount, SimPhase, Weekday};
use tracing::info;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — infection curve
///
/// ```rust,ignore
/// struct Curve(Vec<u64>);
///
/// impl SimObserver for Curve {
///     fn on_day_end(&mut self, _day: u64, counters: &GlobalCount) {
///         self.0.push(counters.infected_count);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each day, before the morning phase.
    fn on_day_start(&mut self, _day: u64, _weekday: Weekday) {}

    /// Called after every agent has stepped through `phase` (and, for
    /// gathering phases, after contact transmission).
    fn on_phase_end(&mut self, _day: u64, _phase: SimPhase, _counters: &GlobalCount) {}

    /// Called once the evening phase of `day` is done.
    fn on_day_end(&mut self, _day: u64, _counters: &GlobalCount) {}

    /// Called once after the final day completes.
    fn on_sim_end(&mut self, _days: u64, _counters: &GlobalCount) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Emits an `info!` summary of the epidemic every `interval` days and at the
/// end of the run.
pub struct LoggingObserver {
    pub interval: u64,
}

impl LoggingObserver {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1) }
    }
}

impl SimObserver for LoggingObserver {
    fn on_day_end(&mut self, day: u64, c: &GlobalCount) {
        if !day.is_multiple_of(self.interval) {
            return;
        }
        info!(
            day,
            susceptible = c.susceptible_count,
            infected = c.infected_count,
            symptomatic = c.symptomatic_count,
            hospitalized = c.total_hospitalized,
            recovered = c.recovered_count,
            dead = c.death_count,
            "day summary"
        );
    }

    fn on_sim_end(&mut self, days: u64, c: &GlobalCount) {
        info!(
            days,
            population = c.total_population,
            recovered = c.recovered_count,
            dead = c.death_count,
            income = c.total_income,
            "simulation finished"
        );
    }
}

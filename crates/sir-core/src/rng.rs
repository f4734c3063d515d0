//! Deterministic per-agent and simulation-level RNG wrappers, plus the
//! random decision primitives the agent model is written against:
//! biased coin flips, bounded normal draws and weighted selection.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! A decision taken by agent A never perturbs the stream of agent B, so a
//! run is reproducible from `(seed, parameters)` alone.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Normal};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Shared draw helpers ───────────────────────────────────────────────────────

/// `true` with probability `p`.  Values above 1 always succeed; values at or
/// below 0 (and NaN) never do.
#[inline]
fn coin<R: Rng>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        return false;
    }
    rng.gen_bool(p.min(1.0))
}

/// One normal draw.  Invalid parameters (negative or non-finite `stdev`) are
/// rejected at configuration load; here they surface as a NaN draw.
#[inline]
fn normal<R: Rng>(rng: &mut R, mean: f64, stdev: f64) -> f64 {
    match Normal::new(mean, stdev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => f64::NAN,
    }
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at population build; store in the parallel
/// `AgentRngs` vector alongside the `AgentStore` arena.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Biased coin: `true` with probability `p` (clamped to [0, 1]).
    ///
    /// Every call is an independent trial.
    #[inline]
    pub fn flip_coin(&mut self, p: f64) -> bool {
        coin(&mut self.0, p)
    }

    /// Unbounded normal draw.
    #[inline]
    pub fn normal(&mut self, mean: f64, stdev: f64) -> f64 {
        normal(&mut self.0, mean, stdev)
    }

    /// Normal draw clamped into `[lo, hi]`.  Out-of-range draws are clamped,
    /// never re-drawn.
    #[inline]
    pub fn normal_cap(&mut self, mean: f64, stdev: f64, lo: f64, hi: f64) -> f64 {
        normal(&mut self.0, mean, stdev).clamp(lo, hi)
    }

    /// Pick one element with probability proportional to `weights[i]`.
    ///
    /// Returns `None` if `items` is empty, the lengths differ, or no weight is
    /// positive.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> Option<&'a T> {
        if items.len() != weights.len() {
            return None;
        }
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.0.gen_range(0.0..total);
        for (item, &w) in items.iter().zip(weights) {
            if w <= 0.0 {
                continue;
            }
            if roll < w {
                return Some(item);
            }
            roll -= w;
        }
        // Float round-off can leave `roll` a hair above the last bucket.
        items
            .iter()
            .zip(weights)
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(item, _)| item)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for population construction and exogenous events.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Beta(`alpha`, `beta`) draw in `[0, 1]`; NaN for invalid shape parameters.
    pub fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        match Beta::new(alpha, beta) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => f64::NAN,
        }
    }
}

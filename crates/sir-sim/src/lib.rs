//! `sir-sim` — day loop orchestrator for the rust_sir epidemic model.
//!
//! # Day loop
//!
//! ```text
//! for day in 0..config.total_days:
//!   for phase in MORNING_AT_HOME .. EVENING_AT_HOME:
//!     1. Step    : AgentStore::step for every agent, ascending AgentId
//!                  (commutes, dilemmas, invitations, disease evolution).
//!     2. Contact : MAIN_ACTIVITY and POST_WORK_ACTIVITY only: agents sharing
//!                  a district or gathering spot are exposed to each
//!                  contagious occupant.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                            |
//! |-----------|---------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the contact index.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sir_agent::PopulationBuilder;
//! use sir_core::{GlobalCount, Parameters, SimConfig};
//! use sir_sim::{NoopObserver, SimBuilder};
//!
//! let mut counters = GlobalCount::new();
//! let (store, rngs) = PopulationBuilder::new(1_000, 42).build(&params, &mut counters)?;
//! let mut sim = SimBuilder::new(config, params, store, rngs, counters).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod city;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use city::{CityMap, District, GatheringSpot};
pub use error::{SimError, SimResult};
pub use observer::{LoggingObserver, NoopObserver, SimObserver};
pub use sim::Sim;

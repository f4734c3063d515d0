//! `sir-agent` — the human agent of the `rust_sir` epidemic model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`role`]       | `Role` (Infant … Elder) and the per-role dispatch table       |
//! | [`properties`] | `IndividualProperties`, age-banded `SeverityOdds`             |
//! | [`work`]       | `WorkInfo`: occupation class, income, capabilities           |
//! | [`disease`]    | `DiseaseRecord` and the infection state machine               |
//! | [`decision`]   | `Dilemma`, `DilemmaHistory`, personal decisions with herding  |
//! | [`tribe`]      | `TribeSelector`, `Tribe`: peer ids grouped by relation       |
//! | [`human`]      | `Human`: one agent, its predicates and the factory           |
//! | [`behavior`]   | Role-specific daily steps                                     |
//! | [`context`]    | `SimContext<'a>`: shared mutable handles lent per phase      |
//! | [`district`]   | `Location`, `Districts` trait, `NoopDistricts`                |
//! | [`store`]      | `AgentStore` arena, `AgentRngs`                               |
//! | [`builder`]    | `PopulationBuilder`                                           |
//!
//! # Shared state
//!
//! Agents never reach for globals.  The epidemic counters, the dilemma
//! history and the parameter set are owned by the controller and lent to
//! each step through [`SimContext`].  Peers are addressed by `AgentId` and
//! resolved through the [`AgentStore`] arena at call time.

pub mod behavior;
pub mod builder;
pub mod context;
pub mod decision;
pub mod disease;
pub mod district;
pub mod human;
pub mod properties;
pub mod role;
pub mod store;
pub mod tribe;
pub mod work;

#[cfg(test)]
mod tests;

pub use builder::PopulationBuilder;
pub use context::SimContext;
pub use decision::{Dilemma, DilemmaHistory, HERD_WINDOW};
pub use disease::{DiseaseRecord, DiseaseSeverity, InfectionStatus};
pub use district::{Districts, Location, NoopDistricts};
pub use human::Human;
pub use properties::{IndividualProperties, SeverityOdds};
pub use role::Role;
pub use store::{AgentRngs, AgentStore};
pub use tribe::{Tribe, TribeSelector};
pub use work::WorkInfo;

//! `sir-core` — foundational types for the `rust_sir` agent epidemic model.
//!
//! This crate is a dependency of every other `sir-*` crate.  It has no
//! `sir-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `DistrictId`, `SpotId`                     |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`time`]        | `Weekday`, `SimPhase`, `SimClock`, `SimConfig`        |
//! | [`params`]      | `Parameters`, `SocialPolicy`, `WorkClass`             |
//! | [`counters`]    | `GlobalCount`: process-wide epidemic totals          |
//! | [`error`]       | `SirError`, `SirResult`                               |

pub mod counters;
pub mod error;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use counters::GlobalCount;
pub use error::{SirError, SirResult};
pub use ids::{AgentId, DistrictId, SpotId};
pub use params::{Parameters, SocialPolicy, WorkClass};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, SimPhase, Weekday};

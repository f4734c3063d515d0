//! Boundary to the spatial collaborator.
//!
//! How districts are laid out and how co-located agents meet is not this
//! crate's concern.  Agents only need to say "move me from here to there"
//! and "find me a free gathering spot near home", and to give the spot back.

use sir_core::{AgentId, DistrictId, SpotId};

/// Where an agent currently is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Location {
    /// Not placed anywhere (population not yet wired to districts).
    #[default]
    Nowhere,
    District(DistrictId),
    Spot(SpotId),
}

/// Spatial operations an agent step may request.
pub trait Districts {
    /// Record that `agent` left `from` and entered `to`.
    fn move_to(&mut self, agent: AgentId, from: Location, to: Location);

    /// Reserve an empty, available gathering spot reachable from `district`.
    /// The spot stays unavailable until released.
    fn reserve_gathering_spot(&mut self, district: DistrictId) -> Option<SpotId>;

    /// Mark `spot` available again.
    fn release_gathering_spot(&mut self, spot: SpotId);
}

/// A [`Districts`] that tracks nothing and never has a free spot.
pub struct NoopDistricts;

impl Districts for NoopDistricts {
    fn move_to(&mut self, _agent: AgentId, _from: Location, _to: Location) {}

    fn reserve_gathering_spot(&mut self, _district: DistrictId) -> Option<SpotId> {
        None
    }

    fn release_gathering_spot(&mut self, _spot: SpotId) {}
}

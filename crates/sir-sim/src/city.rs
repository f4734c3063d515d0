//! Reference implementation of the agents' spatial collaborator.
//!
//! A `CityMap` is a flat list of districts (homes, schools, workplaces; the
//! map does not distinguish) plus the gathering spots attached to them.
//! Both keep their current occupants so a caller can inspect who is where.
//! Layout and sizing are entirely up to whoever builds the map.

use sir_agent::{Districts, Location};
use sir_core::{AgentId, DistrictId, SpotId};
use tracing::trace;

#[derive(Clone, Debug)]
pub struct District {
    pub id: DistrictId,
    pub occupants: Vec<AgentId>,
    /// Gathering spots reachable from this district, in creation order.
    pub spots: Vec<SpotId>,
}

/// A restaurant table, a party venue: somewhere a small group meets after
/// work.
#[derive(Clone, Debug)]
pub struct GatheringSpot {
    pub id: SpotId,
    pub district: DistrictId,
    /// Cleared while reserved for an event.
    pub available: bool,
    pub participants: Vec<AgentId>,
}

#[derive(Clone, Debug, Default)]
pub struct CityMap {
    districts: Vec<District>,
    spots: Vec<GatheringSpot>,
}

impl CityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_district(&mut self) -> DistrictId {
        let id = DistrictId(self.districts.len() as u32);
        self.districts.push(District { id, occupants: Vec::new(), spots: Vec::new() });
        id
    }

    /// Attach a new gathering spot to `district`.  `None` if the district
    /// does not exist.
    pub fn add_spot(&mut self, district: DistrictId) -> Option<SpotId> {
        let id = SpotId(self.spots.len() as u32);
        self.districts.get_mut(district.index())?.spots.push(id);
        self.spots.push(GatheringSpot {
            id,
            district,
            available: true,
            participants: Vec::new(),
        });
        Some(id)
    }

    pub fn district_count(&self) -> usize {
        self.districts.len()
    }

    pub fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.get(id.index())
    }

    pub fn spot(&self, id: SpotId) -> Option<&GatheringSpot> {
        self.spots.get(id.index())
    }

    /// Agents currently at `location`.
    pub fn occupants(&self, location: Location) -> &[AgentId] {
        match location {
            Location::Nowhere => &[],
            Location::District(d) => self.district(d).map_or(&[][..], |d| d.occupants.as_slice()),
            Location::Spot(s) => self.spot(s).map_or(&[][..], |s| s.participants.as_slice()),
        }
    }

    fn occupants_mut(&mut self, location: Location) -> Option<&mut Vec<AgentId>> {
        match location {
            Location::Nowhere => None,
            Location::District(d) => self.districts.get_mut(d.index()).map(|d| &mut d.occupants),
            Location::Spot(s) => self.spots.get_mut(s.index()).map(|s| &mut s.participants),
        }
    }
}

impl Districts for CityMap {
    fn move_to(&mut self, agent: AgentId, from: Location, to: Location) {
        if let Some(list) = self.occupants_mut(from) {
            if let Some(pos) = list.iter().position(|&a| a == agent) {
                list.swap_remove(pos);
            }
        }
        if let Some(list) = self.occupants_mut(to) {
            list.push(agent);
        }
        trace!(%agent, ?from, ?to, "moved");
    }

    fn reserve_gathering_spot(&mut self, district: DistrictId) -> Option<SpotId> {
        let spots = &self.districts.get(district.index())?.spots;
        let id = spots.iter().copied().find(|s| {
            self.spots
                .get(s.index())
                .is_some_and(|spot| spot.available && spot.participants.is_empty())
        })?;
        if let Some(spot) = self.spots.get_mut(id.index()) {
            spot.available = false;
        }
        Some(id)
    }

    fn release_gathering_spot(&mut self, spot: SpotId) {
        if let Some(spot) = self.spots.get_mut(spot.index()) {
            spot.available = true;
        }
    }
}

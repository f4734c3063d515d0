//! Synthetic town: households, workplaces, schools and friendships.
//!
//! Agents with consecutive ids share a household.  Every household is its
//! own home district with a few gathering spots nearby; adults get a random
//! workplace and a handful of random adult friends, students a random
//! school.

use anyhow::{Result, ensure};
use sir_agent::{AgentStore, Role, TribeSelector};
use sir_core::{AgentId, DistrictId, SimRng};
use sir_sim::CityMap;

pub struct TownLayout {
    pub household_size:    usize,
    pub workplaces:        usize,
    pub schools:           usize,
    pub spots_per_home:    usize,
    pub friends_per_adult: usize,
}

impl Default for TownLayout {
    fn default() -> Self {
        Self {
            household_size:    4,
            workplaces:        20,
            schools:           3,
            spots_per_home:    1,
            friends_per_adult: 5,
        }
    }
}

pub fn build_town(store: &mut AgentStore, layout: &TownLayout, rng: &mut SimRng) -> Result<CityMap> {
    ensure!(layout.household_size > 0, "household size must be positive");
    ensure!(layout.workplaces > 0 && layout.schools > 0, "need at least one workplace and school");

    let mut city = CityMap::new();
    let households = store.len().div_ceil(layout.household_size);
    let homes: Vec<DistrictId> = (0..households).map(|_| city.add_district()).collect();
    for &home in &homes {
        for _ in 0..layout.spots_per_home {
            city.add_spot(home);
        }
    }
    let workplaces: Vec<DistrictId> = (0..layout.workplaces).map(|_| city.add_district()).collect();
    let schools: Vec<DistrictId> = (0..layout.schools).map(|_| city.add_district()).collect();

    let mut adults = Vec::new();
    for (i, human) in store.iter_mut().enumerate() {
        human.home_district = homes[i / layout.household_size];
        match human.role {
            Role::Adult => {
                human.work_district = workplaces[rng.gen_range(0..workplaces.len())];
                adults.push(human.id);
            }
            Role::Student => {
                human.school_district = schools[rng.gen_range(0..schools.len())];
            }
            _ => {}
        }
    }

    // Family: everyone sharing a household.
    let ids: Vec<AgentId> = store.agent_ids().collect();
    for household in ids.chunks(layout.household_size) {
        for (k, &a) in household.iter().enumerate() {
            for &b in &household[k + 1..] {
                store.link(a, b, TribeSelector::Family)?;
            }
        }
    }

    // Friends: random adult pairs.
    if adults.len() > 1 {
        for &a in &adults {
            for _ in 0..layout.friends_per_adult {
                let b = adults[rng.gen_range(0..adults.len())];
                store.link(a, b, TribeSelector::Friend)?;
            }
        }
    }

    Ok(city)
}

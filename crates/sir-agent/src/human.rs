//! The human agent.
//!
//! `Human` is plain data plus the operations that only touch the agent
//! itself.  The disease state machine lives in [`crate::disease`], the
//! dilemma engine in [`crate::decision`] and the daily steps (which also
//! touch peers) in [`crate::behavior`].

use sir_core::{AgentId, AgentRng, DistrictId, GlobalCount, Parameters, SpotId};
use tracing::trace;

use crate::{
    DiseaseRecord, IndividualProperties, InfectionStatus, Location, Role, SeverityOdds, Tribe,
    WorkInfo,
};

#[derive(Clone, Debug)]
pub struct Human {
    pub id: AgentId,
    pub age: u32,
    pub role: Role,
    pub properties: IndividualProperties,
    pub disease: DiseaseRecord,
    /// Present only for the `Adult` role.
    pub work_info: Option<WorkInfo>,
    pub tribe: Tribe,

    pub home_district: DistrictId,
    pub work_district: DistrictId,
    pub school_district: DistrictId,
    pub location: Location,

    /// Gathering spot this agent has committed to for today.
    pub social_event: Option<SpotId>,
    pub days_since_last_social_event: u32,

    pub mask_user: bool,
    pub isolation_cheater: bool,
    /// Blocks every future infection.
    pub immune: bool,
    /// Days by which a wearable shortens the latency period.
    pub early_symptom_detection: u32,

    pub is_dead: bool,
}

impl Human {
    /// Population factory: builds the agent for `age`, registers it in the
    /// population counters and rolls for an initial infection.
    pub fn factory(
        id:       AgentId,
        age:      u32,
        params:   &Parameters,
        rng:      &mut AgentRng,
        counters: &mut GlobalCount,
    ) -> Human {
        let odds = SeverityOdds::for_age(age);
        let death_mark = rng.flip_coin(odds.death);
        let mut human = Human::new(id, age, odds, death_mark, params, rng, counters);

        counters.total_population += 1;
        counters.non_infected_count += 1;
        if human.immune {
            counters.immune_count += 1;
        } else {
            counters.susceptible_count += 1;
        }
        if rng.flip_coin(params.initial_infection_rate) {
            human.infect(params, counters, rng);
        }
        human
    }

    /// Build an agent without registering it in the population counters.
    /// Only `work_population` is touched, when the role holds a job.
    pub fn new(
        id:         AgentId,
        age:        u32,
        odds:       SeverityOdds,
        death_mark: bool,
        params:     &Parameters,
        rng:        &mut AgentRng,
        counters:   &mut GlobalCount,
    ) -> Human {
        let role = Role::from_age(age);
        let properties = IndividualProperties::draw(role, params, rng);
        let (moderate, high) = odds.scaled_by_health(properties.base_health);
        let work_info = role.profile().works.then(|| WorkInfo::assign(rng, counters));

        let mut human = Human {
            id,
            age,
            role,
            properties,
            disease: DiseaseRecord::new(moderate, high, death_mark),
            work_info,
            tribe: Tribe::default(),
            home_district: DistrictId::INVALID,
            work_district: DistrictId::INVALID,
            school_district: DistrictId::INVALID,
            location: Location::Nowhere,
            social_event: None,
            days_since_last_social_event: 0,
            mask_user: false,
            isolation_cheater: false,
            immune: false,
            early_symptom_detection: 0,
            is_dead: false,
        };
        human.roll_policy_traits(params, rng);
        human
    }

    fn roll_policy_traits(&mut self, params: &Parameters, rng: &mut AgentRng) {
        self.mask_user = rng.flip_coin(params.mask_user_rate);
        self.isolation_cheater = rng.flip_coin(params.isolation_cheater_rate);
        self.immune = rng.flip_coin(params.immune_rate);
        self.early_symptom_detection = u32::from(rng.flip_coin(params.wearable_adoption_rate));
    }

    /// Re-roll mask use, cheating, wearables, immunity and personality after
    /// the parameter set changed.  Severity odds are kept.
    ///
    /// Immunity is only re-rolled for susceptible agents, which move between
    /// the `susceptible` and `immune` counters accordingly.  Everyone else
    /// keeps their current immunity.
    pub fn parameter_changed(
        &mut self,
        params:   &Parameters,
        rng:      &mut AgentRng,
        counters: &mut GlobalCount,
    ) {
        let was_immune = self.immune;
        self.roll_policy_traits(params, rng);
        self.properties = IndividualProperties::draw(self.role, params, rng);

        if self.disease.status != InfectionStatus::Susceptible {
            self.immune = was_immune;
            return;
        }
        match (was_immune, self.immune) {
            (false, true) => {
                counters.susceptible_count -= 1;
                counters.immune_count += 1;
            }
            (true, false) => {
                counters.immune_count -= 1;
                counters.susceptible_count += 1;
            }
            _ => {}
        }
        trace!(agent = %self.id, immune = self.immune, "traits re-rolled");
    }

    // ── Read-only predicates ──────────────────────────────────────────────

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    #[inline]
    pub fn is_worker(&self) -> bool {
        self.work_info.is_some()
    }

    /// Today's income; zero for non-workers.
    pub fn current_income(&self) -> f64 {
        self.work_info.as_ref().map_or(0.0, WorkInfo::current_income)
    }

    /// Fresh coin at the configured mask-use rate.  Not cached.
    pub fn is_wearing_mask(&self, params: &Parameters, rng: &mut AgentRng) -> bool {
        rng.flip_coin(params.mask_user_rate)
    }
}

//! Unit tests for sir-agent.

#[cfg(test)]
mod fixtures {
    use sir_core::{AgentId, AgentRng, GlobalCount, Parameters, SimPhase, Weekday};

    use crate::{DilemmaHistory, Human, SeverityOdds, SimContext};

    pub const SEED: u64 = 0xC0FFEE;

    /// Parameters with no random infections or immunity at creation.
    pub fn quiet_params() -> Parameters {
        Parameters {
            initial_infection_rate: 0.0,
            immune_rate: 0.0,
            ..Parameters::default()
        }
    }

    /// Owned backing state for a `SimContext`.
    pub struct World {
        pub params: Parameters,
        pub counters: GlobalCount,
        pub history: DilemmaHistory,
        pub beds: u64,
    }

    impl World {
        pub fn new(params: Parameters) -> Self {
            Self { params, counters: GlobalCount::new(), history: DilemmaHistory::new(), beds: 100 }
        }

        pub fn ctx(&mut self, phase: SimPhase, weekday: Weekday) -> SimContext<'_> {
            SimContext::new(phase, weekday, &self.params, &mut self.counters, &mut self.history, self.beds)
        }

        /// Build one agent with forced odds and register it like the factory does.
        pub fn spawn(&mut self, id: u32, age: u32, odds: SeverityOdds, death_mark: bool) -> (Human, AgentRng) {
            let mut rng = AgentRng::new(SEED, AgentId(id));
            let human =
                Human::new(AgentId(id), age, odds, death_mark, &self.params, &mut rng, &mut self.counters);
            self.counters.total_population += 1;
            self.counters.non_infected_count += 1;
            if human.immune {
                self.counters.immune_count += 1;
            } else {
                self.counters.susceptible_count += 1;
            }
            (human, rng)
        }

        pub fn infect(&mut self, human: &mut Human, rng: &mut AgentRng) -> bool {
            human.infect(&self.params, &mut self.counters, rng)
        }

        pub fn evening(&mut self, human: &mut Human, rng: &mut AgentRng) {
            let mut ctx = self.ctx(SimPhase::EveningAtHome, Weekday::Monday);
            human.disease_evolution(&mut ctx, rng);
        }
    }

    pub fn certain() -> SeverityOdds {
        SeverityOdds { moderate: 1.0, high: 1.0, death: 1.0 }
    }

    pub fn never() -> SeverityOdds {
        SeverityOdds { moderate: 0.0, high: 0.0, death: 0.0 }
    }
}

#[cfg(test)]
mod roles {
    use proptest::prelude::*;
    use sir_core::{AgentId, AgentRng, GlobalCount};

    use super::fixtures::quiet_params;
    use crate::{Human, Role};

    #[test]
    fn band_edges() {
        assert_eq!(Role::from_age(0), Role::Infant);
        assert_eq!(Role::from_age(1), Role::Infant);
        assert_eq!(Role::from_age(2), Role::Toddler);
        assert_eq!(Role::from_age(4), Role::Toddler);
        assert_eq!(Role::from_age(5), Role::Student);
        assert_eq!(Role::from_age(18), Role::Student);
        assert_eq!(Role::from_age(19), Role::Adult);
        assert_eq!(Role::from_age(64), Role::Adult);
        assert_eq!(Role::from_age(65), Role::Elder);
    }

    proptest! {
        #[test]
        fn role_follows_age(age in 0u32..130) {
            let expected = match age {
                0..=1 => Role::Infant,
                2..=4 => Role::Toddler,
                5..=18 => Role::Student,
                19..=64 => Role::Adult,
                _ => Role::Elder,
            };
            prop_assert_eq!(Role::from_age(age), expected);
        }

        #[test]
        fn only_adults_work(age in 0u32..130, seed in any::<u64>()) {
            let params = quiet_params();
            let mut counters = GlobalCount::new();
            let mut rng = AgentRng::new(seed, AgentId(0));
            let h = Human::factory(AgentId(0), age, &params, &mut rng, &mut counters);
            prop_assert_eq!(h.is_worker(), h.role == Role::Adult);
            prop_assert_eq!(counters.work_population, u64::from(h.is_worker()));
        }

        #[test]
        fn traits_stay_in_unit_interval(age in 0u32..130, seed in any::<u64>()) {
            let params = quiet_params();
            let mut counters = GlobalCount::new();
            let mut rng = AgentRng::new(seed, AgentId(3));
            let h = Human::factory(AgentId(3), age, &params, &mut rng, &mut counters);
            prop_assert!((0.0..=1.0).contains(&h.properties.base_health));
            prop_assert!((0.0..=1.0).contains(&h.properties.risk_tolerance));
            prop_assert!((0.0..=1.0).contains(&h.properties.herding_behavior));
            if h.role != Role::Adult {
                prop_assert_eq!(h.properties.risk_tolerance, 0.0);
                prop_assert_eq!(h.properties.herding_behavior, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod work {
    use sir_core::{AgentId, AgentRng, GlobalCount, Weekday, WorkClass};

    use crate::WorkInfo;

    #[test]
    fn housebound_flag_only_for_housebound() {
        for class in WorkClass::ALL {
            let info = WorkInfo::for_class(class);
            assert_eq!(info.house_bound_worker, class == WorkClass::Housebound);
        }
    }

    #[test]
    fn isolation_cuts_income_for_on_site_classes() {
        let mut retail = WorkInfo::for_class(WorkClass::Retail);
        assert_eq!(retail.current_income(), 1.0);
        retail.isolated = true;
        assert_eq!(retail.current_income(), 0.0);

        let mut office = WorkInfo::for_class(WorkClass::Office);
        office.isolated = true;
        assert_eq!(office.current_income(), 1.0);
    }

    #[test]
    fn sunday_is_off() {
        let info = WorkInfo::for_class(WorkClass::Factory);
        assert!(info.is_working_day(Weekday::Saturday));
        assert!(!info.is_working_day(Weekday::Sunday));
    }

    #[test]
    fn later_classes_are_favored() {
        let mut rng = AgentRng::new(11, AgentId(0));
        let mut counters = GlobalCount::new();
        let mut office = 0;
        let mut essential = 0;
        for _ in 0..20_000 {
            match WorkInfo::assign(&mut rng, &mut counters).work_class {
                WorkClass::Office => office += 1,
                WorkClass::Essential => essential += 1,
                _ => {}
            }
        }
        assert_eq!(counters.work_population, 20_000);
        let ratio = essential as f64 / office as f64;
        assert!((4.0..6.0).contains(&ratio), "ratio was {ratio}");
    }
}

#[cfg(test)]
mod disease {
    use proptest::prelude::*;
    use sir_core::{AgentId, AgentRng, GlobalCount, Parameters};

    use super::fixtures::{certain, never, quiet_params, World};
    use crate::{DiseaseSeverity, Human, InfectionStatus, SeverityOdds};

    proptest! {
        #[test]
        fn infection_timing_is_ordered(
            seed in any::<u64>(),
            latency in 0.0f64..10.0,
            incubation in 0.0f64..10.0,
            disease in 0.0f64..30.0,
            sd in 0.0f64..8.0,
        ) {
            let params = Parameters {
                latency_period_mean: latency,
                latency_period_stdev: sd,
                incubation_period_mean: incubation,
                incubation_period_stdev: sd,
                disease_period_mean: disease,
                disease_period_stdev: sd,
                wearable_adoption_rate: 0.5,
                ..quiet_params()
            };
            let mut counters = GlobalCount::new();
            let mut rng = AgentRng::new(seed, AgentId(1));
            let mut h = Human::factory(AgentId(1), 40, &params, &mut rng, &mut counters);
            prop_assert!(h.infect(&params, &mut counters, &mut rng));
            let d = &h.disease;
            prop_assert!(d.latency >= 1.0);
            prop_assert!(d.incubation > d.latency);
            prop_assert!(d.duration >= d.incubation + 7.0);
            prop_assert!(counters.is_conserved());
        }
    }

    #[test]
    fn severity_only_moves_forward_then_freezes() {
        let mut world = World::new(quiet_params());
        let odds = SeverityOdds { moderate: 0.3, high: 0.2, death: 0.0 };
        for id in 0..50 {
            let (mut h, mut rng) = world.spawn(id, 50, odds, false);
            world.infect(&mut h, &mut rng);
            let mut last = h.disease.severity;
            let mut settled = None;
            for _ in 0..120 {
                world.evening(&mut h, &mut rng);
                match settled {
                    None if h.disease.status == InfectionStatus::Recovered || h.is_dead => {
                        settled = Some((h.disease.status, h.disease.severity, h.disease.days_infected));
                    }
                    None => {
                        assert!(h.disease.severity >= last);
                        last = h.disease.severity;
                    }
                    Some(frozen) => {
                        assert_eq!(
                            (h.disease.status, h.disease.severity, h.disease.days_infected),
                            frozen
                        );
                    }
                }
                assert!(world.counters.is_conserved());
            }
            assert!(settled.is_some(), "agent {id} never resolved");
        }
    }

    #[test]
    fn evolution_is_noop_when_not_infected() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, certain(), true);
        let before = (h.disease.clone(), world.counters.clone());
        world.evening(&mut h, &mut rng);
        assert_eq!((h.disease.clone(), world.counters.clone()), before);

        h.is_dead = true;
        h.disease.status = InfectionStatus::Infected;
        let before = (h.disease.clone(), world.counters.clone());
        world.evening(&mut h, &mut rng);
        assert_eq!((h.disease, world.counters), before);
    }

    #[test]
    fn immune_agents_cannot_be_infected() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        h.immune = true;
        world.counters.susceptible_count -= 1;
        world.counters.immune_count += 1;
        let counters = world.counters.clone();
        assert!(!world.infect(&mut h, &mut rng));
        assert_eq!(h.disease.status, InfectionStatus::Susceptible);
        assert_eq!(world.counters, counters);
    }

    #[test]
    fn reinfection_is_a_noop() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        assert!(world.infect(&mut h, &mut rng));
        let counters = world.counters.clone();
        assert!(!world.infect(&mut h, &mut rng));
        assert_eq!(world.counters, counters);

        while h.is_infected() {
            world.evening(&mut h, &mut rng);
        }
        assert_eq!(h.disease.status, InfectionStatus::Recovered);
        assert!(h.immune);
        let counters = world.counters.clone();
        assert!(!world.infect(&mut h, &mut rng));
        assert_eq!(world.counters, counters);
    }

    #[test]
    fn marked_elder_dies_on_reaching_high() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 80, certain(), true);
        world.infect(&mut h, &mut rng);
        let incubation = h.disease.incubation;

        let mut became_low = None;
        while !h.is_dead && h.disease.days_infected < 200 {
            world.evening(&mut h, &mut rng);
            if became_low.is_none() && h.disease.severity == DiseaseSeverity::Low {
                became_low = Some(h.disease.days_infected);
            }
        }
        let low_day = became_low.expect("never became symptomatic") as f64;
        assert!(low_day >= incubation && low_day < incubation + 1.0);
        assert!(h.is_dead);
        assert_eq!(h.disease.severity, DiseaseSeverity::Death);
        assert!(!h.is_infected());
        assert_eq!(world.counters.death_count, 1);
        assert_eq!(world.counters.infected_count, 0);
        assert_eq!(world.counters.total_hospitalized, 0);
        assert_eq!(world.counters.high_severity_count, 0);
        assert!(world.counters.is_conserved());
    }

    #[test]
    fn full_hospital_still_advances_severity() {
        let mut world = World::new(quiet_params());
        world.beds = 0;
        let (mut h, mut rng) = world.spawn(0, 60, SeverityOdds { death: 0.0, ..certain() }, false);
        world.infect(&mut h, &mut rng);
        while h.disease.severity < DiseaseSeverity::Moderate {
            world.evening(&mut h, &mut rng);
        }
        assert_eq!(h.disease.severity, DiseaseSeverity::Moderate);
        assert!(!h.disease.hospitalized);
        assert_eq!(world.counters.total_hospitalized, 0);
        assert_eq!(world.counters.moderate_severity_count, 1);

        // Unhospitalized agents do not survive HIGH severity.
        world.evening(&mut h, &mut rng);
        assert!(h.is_dead);
    }

    #[test]
    fn hospitalized_unmarked_agent_survives_high() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 60, SeverityOdds { death: 0.0, ..certain() }, false);
        world.infect(&mut h, &mut rng);
        while h.is_infected() {
            world.evening(&mut h, &mut rng);
            if h.disease.severity == DiseaseSeverity::High {
                assert!(h.disease.hospitalized);
                assert_eq!(world.counters.total_hospitalized, 1);
            }
        }
        assert!(!h.is_dead);
        assert_eq!(h.disease.status, InfectionStatus::Recovered);
        assert_eq!(world.counters.total_hospitalized, 0);
        assert_eq!(world.counters.recovered_count, 1);
        assert!(world.counters.is_conserved());
    }

    #[test]
    fn low_case_moves_between_severity_counters() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        world.infect(&mut h, &mut rng);
        assert_eq!(world.counters.asymptomatic_count, 1);
        assert_eq!(world.counters.symptomatic_count, 0);

        while h.disease.severity == DiseaseSeverity::Asymptomatic {
            world.evening(&mut h, &mut rng);
        }
        assert_eq!(h.disease.severity, DiseaseSeverity::Low);
        assert_eq!(world.counters.asymptomatic_count, 0);
        assert_eq!(world.counters.symptomatic_count, 1);
        assert_eq!(world.counters.moderate_severity_count, 0);

        while h.is_infected() {
            world.evening(&mut h, &mut rng);
        }
        assert_eq!(h.disease.status, InfectionStatus::Recovered);
        assert_eq!(world.counters.asymptomatic_count, 1);
        assert_eq!(world.counters.symptomatic_count, 0);
        assert_eq!(world.counters.infected_count, 0);
        assert_eq!(world.counters.recovered_count, 1);
    }

    #[test]
    fn moderate_recovery_clears_counters_and_bed() {
        let mut world = World::new(quiet_params());
        let odds = SeverityOdds { moderate: 1.0, high: 0.0, death: 0.0 };
        let (mut h, mut rng) = world.spawn(0, 60, odds, false);
        world.infect(&mut h, &mut rng);
        while h.disease.severity < DiseaseSeverity::Moderate {
            world.evening(&mut h, &mut rng);
        }
        assert!(h.disease.hospitalized);
        assert_eq!(world.counters.moderate_severity_count, 1);
        assert_eq!(world.counters.symptomatic_count, 1);
        assert_eq!(world.counters.asymptomatic_count, 0);
        assert_eq!(world.counters.total_hospitalized, 1);

        while h.is_infected() {
            world.evening(&mut h, &mut rng);
            assert_ne!(h.disease.severity, DiseaseSeverity::High);
        }
        assert_eq!(h.disease.status, InfectionStatus::Recovered);
        assert!(!h.disease.hospitalized);
        assert_eq!(world.counters.moderate_severity_count, 0);
        assert_eq!(world.counters.symptomatic_count, 0);
        assert_eq!(world.counters.asymptomatic_count, 1);
        assert_eq!(world.counters.total_hospitalized, 0);
        assert!(world.counters.is_conserved());
    }

    #[test]
    fn contagious_only_after_latency() {
        let params = Parameters { asymptomatic_contagion_probability: 1.0, ..quiet_params() };
        let mut world = World::new(params);
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        assert!(!h.is_contagious(&world.params, &mut rng));
        world.infect(&mut h, &mut rng);
        assert!(!h.is_contagious(&world.params, &mut rng));
        while (h.disease.days_infected as f64) < h.disease.latency {
            world.evening(&mut h, &mut rng);
        }
        assert!(h.is_contagious(&world.params, &mut rng));
    }

    #[test]
    fn population_stays_conserved() {
        let params = Parameters { initial_infection_rate: 0.3, ..Parameters::default() };
        let mut world = World::new(params.clone());
        let mut agents: Vec<(Human, AgentRng)> = (0..300)
            .map(|i| {
                let mut rng = AgentRng::new(9, AgentId(i));
                let h = Human::factory(AgentId(i), (i % 95) as u32, &params, &mut rng, &mut world.counters);
                (h, rng)
            })
            .collect();
        assert!(world.counters.is_conserved());
        for _ in 0..90 {
            for (h, rng) in agents.iter_mut() {
                world.evening(h, rng);
            }
            assert!(world.counters.is_conserved());
        }
        assert_eq!(world.counters.infected_count, 0);
    }
}

#[cfg(test)]
mod decision {
    use sir_core::{SimPhase, SocialPolicy, SpotId, Weekday, WorkClass};

    use super::fixtures::{never, quiet_params, World};
    use crate::{Dilemma, DilemmaHistory, DiseaseSeverity, HERD_WINDOW, TribeSelector, WorkInfo};

    #[test]
    fn herd_is_majority_of_recent_window() {
        let mut history = DilemmaHistory::new();
        let d = Dilemma::InviteFriendsToGetOut;
        assert_eq!(history.herding_decision(d, TribeSelector::Friend, HERD_WINDOW), None);

        for _ in 0..20 {
            history.record(d, true);
        }
        for _ in 0..6 {
            history.record(d, false);
        }
        // Last ten: 4 true, 6 false.
        assert_eq!(history.herding_decision(d, TribeSelector::Friend, HERD_WINDOW), Some(false));
        history.record(d, true);
        history.record(d, true);
        // Last ten: 6 true, 4 false.
        assert_eq!(history.herding_decision(d, TribeSelector::Friend, HERD_WINDOW), Some(true));
    }

    #[test]
    fn tie_resolves_false() {
        let mut history = DilemmaHistory::new();
        let d = Dilemma::GoToWorkOnLockdown;
        history.record(d, true);
        history.record(d, false);
        assert_eq!(history.herding_decision(d, TribeSelector::Friend, HERD_WINDOW), Some(false));
    }

    #[test]
    fn record_broadcasts_to_every_tribe() {
        let mut history = DilemmaHistory::new();
        history.record(Dilemma::AcceptFriendInvitationToGetOut, true);
        for tribe in TribeSelector::ALL {
            assert_eq!(history.entries(Dilemma::AcceptFriendInvitationToGetOut, tribe), &[true]);
            assert!(history.entries(Dilemma::InviteFriendsToGetOut, tribe).is_empty());
        }
        history.clear();
        assert!(history.entries(Dilemma::AcceptFriendInvitationToGetOut, TribeSelector::Family).is_empty());
    }

    #[test]
    fn herding_extremes() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        h.properties.herding_behavior = 1.0;
        assert!(h.standard_decision(false, Some(true), &mut rng));
        h.properties.herding_behavior = 0.0;
        assert!(!h.standard_decision(false, Some(true), &mut rng));
        assert!(h.standard_decision(true, None, &mut rng));
    }

    #[test]
    fn risk_taking_retail_worker_goes_to_work() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        h.work_info = Some(WorkInfo::for_class(WorkClass::Retail));
        h.properties.risk_tolerance = 1.0;
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(h.personal_decision(Dilemma::GoToWorkOnLockdown, &mut ctx, &mut rng));
        assert_eq!(world.history.entries(Dilemma::GoToWorkOnLockdown, TribeSelector::Friend), &[true]);
    }

    #[test]
    fn other_classes_refuse_without_recording() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        h.work_info = Some(WorkInfo::for_class(WorkClass::Factory));
        h.properties.risk_tolerance = 1.0;
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(!h.personal_decision(Dilemma::GoToWorkOnLockdown, &mut ctx, &mut rng));
        assert!(world.history.entries(Dilemma::GoToWorkOnLockdown, TribeSelector::Friend).is_empty());
    }

    #[test]
    fn pending_event_declines_invite_without_recording() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        h.properties.risk_tolerance = 1.0;
        h.social_event = Some(SpotId(0));
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(!h.personal_decision(Dilemma::InviteFriendsToGetOut, &mut ctx, &mut rng));
        for tribe in TribeSelector::ALL {
            assert!(world.history.entries(Dilemma::InviteFriendsToGetOut, tribe).is_empty());
        }
    }

    #[test]
    fn social_distancing_squares_risk() {
        let params = quiet_params();
        let mut open = World::new(params.clone());
        let mut distancing = World::new(with_policy(params, SocialPolicy::SocialDistancing));
        let (mut h, mut rng) = open.spawn(0, 30, never(), false);
        h.properties.risk_tolerance = 0.5;

        let trials = 4_000;
        let mut yes_open = 0;
        let mut yes_distancing = 0;
        for _ in 0..trials {
            open.history.clear();
            distancing.history.clear();
            let mut ctx = open.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
            yes_open += u32::from(h.personal_decision(Dilemma::InviteFriendsToGetOut, &mut ctx, &mut rng));
            let mut ctx = distancing.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
            yes_distancing +=
                u32::from(h.personal_decision(Dilemma::InviteFriendsToGetOut, &mut ctx, &mut rng));
        }
        let p_open = yes_open as f64 / trials as f64;
        let p_distancing = yes_distancing as f64 / trials as f64;
        assert!((p_open - 0.5).abs() < 0.05, "open {p_open}");
        assert!((p_distancing - 0.25).abs() < 0.05, "distancing {p_distancing}");
    }

    pub(super) fn with_policy(mut params: sir_core::Parameters, policy: SocialPolicy) -> sir_core::Parameters {
        params.social_policies.push(policy);
        params
    }

    #[test]
    fn severe_cases_stay_home() {
        let mut world = World::new(quiet_params());
        let (mut h, mut rng) = world.spawn(0, 30, never(), false);
        world.infect(&mut h, &mut rng);
        h.disease.severity = DiseaseSeverity::Moderate;
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(h.main_activity_isolated(&mut ctx, &mut rng));
    }

    #[test]
    fn locked_school_band_isolates_student() {
        let params = with_policy(quiet_params(), SocialPolicy::LockdownElementarySchool);
        let mut world = World::new(params);
        let (child, mut rng) = world.spawn(0, 8, never(), false);
        let (teen, _) = world.spawn(1, 16, never(), false);
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(child.main_activity_isolated(&mut ctx, &mut rng));
        assert!(!teen.main_activity_isolated(&mut ctx, &mut rng));
    }

    #[test]
    fn locked_office_worker_stays_home() {
        let params = with_policy(quiet_params(), SocialPolicy::LockdownOffice);
        let mut world = World::new(params);
        let (mut h, mut rng) = world.spawn(0, 40, never(), false);
        h.work_info = Some(WorkInfo::for_class(WorkClass::Office));
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(h.main_activity_isolated(&mut ctx, &mut rng));
        h.work_info = Some(WorkInfo::for_class(WorkClass::Essential));
        assert!(!h.main_activity_isolated(&mut ctx, &mut rng));
    }

    #[test]
    fn symptomatic_agents_still_honor_lockdown() {
        let params = with_policy(quiet_params(), SocialPolicy::LockdownOffice);
        let params = with_policy(params, SocialPolicy::LockdownElementarySchool);
        assert_eq!(params.symptomatic_isolation_rate, 0.0);
        let mut world = World::new(params);

        let (mut worker, mut worker_rng) = world.spawn(0, 40, never(), false);
        worker.work_info = Some(WorkInfo::for_class(WorkClass::Office));
        let (mut child, mut child_rng) = world.spawn(1, 8, never(), false);
        for (h, rng) in [(&mut worker, &mut worker_rng), (&mut child, &mut child_rng)] {
            world.infect(h, rng);
            while !h.is_symptomatic() {
                world.evening(h, rng);
            }
            assert_eq!(h.disease.severity, DiseaseSeverity::Low);
        }

        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        assert!(worker.main_activity_isolated(&mut ctx, &mut worker_rng));
        assert!(child.main_activity_isolated(&mut ctx, &mut child_rng));
    }
}

#[cfg(test)]
mod behavior {
    use sir_core::{
        AgentId, DistrictId, GlobalCount, SimPhase, SirError, SpotId, Weekday, WorkClass,
    };

    use super::fixtures::{quiet_params, World};
    use crate::{
        AgentRngs, AgentStore, Districts, Location, NoopDistricts, PopulationBuilder, Role,
        TribeSelector, WorkInfo,
    };

    /// One gathering spot and a log of every move.
    #[derive(Default)]
    struct OneSpot {
        taken: bool,
        moves: Vec<(AgentId, Location, Location)>,
    }

    impl Districts for OneSpot {
        fn move_to(&mut self, agent: AgentId, from: Location, to: Location) {
            self.moves.push((agent, from, to));
        }

        fn reserve_gathering_spot(&mut self, _district: DistrictId) -> Option<SpotId> {
            if self.taken {
                return None;
            }
            self.taken = true;
            Some(SpotId(0))
        }

        fn release_gathering_spot(&mut self, _spot: SpotId) {
            self.taken = false;
        }
    }

    /// Two office workers who are friends, both eager to go out.
    fn two_friends(world: &mut World) -> (AgentStore, AgentRngs) {
        let (mut store, mut rngs) = PopulationBuilder::new(2, 5)
            .forced_ages(vec![30, 35])
            .build(&world.params, &mut world.counters)
            .unwrap();
        for (i, h) in store.iter_mut().enumerate() {
            h.work_info = Some(WorkInfo::for_class(WorkClass::Office));
            h.properties.risk_tolerance = 1.0;
            h.home_district = DistrictId(0);
            h.work_district = DistrictId(1 + i as u32);
            h.location = Location::District(DistrictId(0));
        }
        store.link(AgentId(0), AgentId(1), TribeSelector::Friend).unwrap();
        assert_eq!(rngs.len(), 2);
        (store, rngs)
    }

    fn step(
        world:   &mut World,
        store:   &mut AgentStore,
        rngs:    &mut AgentRngs,
        phase:   SimPhase,
        weekday: Weekday,
        d:       &mut dyn Districts,
    ) {
        let ids: Vec<_> = store.agent_ids().collect();
        for id in ids {
            let mut ctx = world.ctx(phase, weekday);
            store.step(rngs, id, &mut ctx, d).unwrap();
        }
    }

    #[test]
    fn working_day_invitation_cycle() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = two_friends(&mut world);
        let mut city = OneSpot::default();

        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToMainActivity, Weekday::Monday, &mut city);
        let host = store.get(AgentId(0)).unwrap();
        let guest = store.get(AgentId(1)).unwrap();
        assert_eq!(host.location, Location::District(DistrictId(1)));
        assert_eq!(host.social_event, Some(SpotId(0)));
        assert_eq!(guest.social_event, Some(SpotId(0)));
        assert!(city.taken);
        assert_eq!(world.counters.total_income, 2.0);

        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToPostWorkActivity, Weekday::Monday, &mut city);
        for h in store.iter() {
            assert_eq!(h.location, Location::Spot(SpotId(0)));
        }

        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToHome, Weekday::Monday, &mut city);
        for h in store.iter() {
            assert_eq!(h.location, Location::District(DistrictId(0)));
            assert_eq!(h.social_event, None);
            assert_eq!(h.days_since_last_social_event, 0);
        }
        assert!(!city.taken);

        step(&mut world, &mut store, &mut rngs, SimPhase::EveningAtHome, Weekday::Monday, &mut city);
        assert!(store.iter().all(|h| h.days_since_last_social_event == 1));
    }

    #[test]
    fn nobody_accepting_releases_the_spot() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = two_friends(&mut world);
        for h in store.iter_mut() {
            h.properties.herding_behavior = 0.0;
        }
        store.get_mut(AgentId(1)).unwrap().properties.risk_tolerance = 0.0;
        let mut city = OneSpot::default();

        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToMainActivity, Weekday::Monday, &mut city);
        assert!(store.iter().all(|h| h.social_event.is_none()));
        assert!(!city.taken);
    }

    #[test]
    fn day_off_only_runs_the_evening() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = two_friends(&mut world);
        let mut city = OneSpot::default();
        for phase in SimPhase::ALL {
            step(&mut world, &mut store, &mut rngs, phase, Weekday::Sunday, &mut city);
        }
        assert!(city.moves.is_empty());
        assert_eq!(world.counters.total_income, 0.0);
        assert!(store.iter().all(|h| h.days_since_last_social_event == 0));
    }

    #[test]
    fn student_commutes_to_school() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = PopulationBuilder::new(1, 5)
            .forced_ages(vec![10])
            .build(&world.params, &mut world.counters)
            .unwrap();
        {
            let kid = store.get_mut(AgentId(0)).unwrap();
            assert_eq!(kid.role, Role::Student);
            kid.home_district = DistrictId(0);
            kid.school_district = DistrictId(4);
        }
        let mut city = OneSpot::default();
        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToMainActivity, Weekday::Sunday, &mut city);
        assert_eq!(store.get(AgentId(0)).unwrap().location, Location::District(DistrictId(4)));
        step(&mut world, &mut store, &mut rngs, SimPhase::CommutingToHome, Weekday::Sunday, &mut city);
        assert_eq!(store.get(AgentId(0)).unwrap().location, Location::District(DistrictId(0)));
        assert_eq!(city.moves.len(), 2);
    }

    #[test]
    fn unknown_agent_is_an_error() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = two_friends(&mut world);
        let mut ctx = world.ctx(SimPhase::EveningAtHome, Weekday::Monday);
        let err = store.step(&mut rngs, AgentId(9), &mut ctx, &mut NoopDistricts).unwrap_err();
        assert!(matches!(err, SirError::AgentNotFound(AgentId(9))));
    }

    #[test]
    fn dead_agents_are_skipped() {
        let mut world = World::new(quiet_params());
        let (mut store, mut rngs) = two_friends(&mut world);
        store.get_mut(AgentId(0)).unwrap().is_dead = true;
        let mut city = OneSpot::default();
        let mut ctx = world.ctx(SimPhase::CommutingToMainActivity, Weekday::Monday);
        store.step(&mut rngs, AgentId(0), &mut ctx, &mut city).unwrap();
        assert!(city.moves.is_empty());
        assert_eq!(store.living().count(), 1);
    }

    #[test]
    fn link_is_mutual_and_checked() {
        let params = quiet_params();
        let mut counters = GlobalCount::new();
        let (mut store, _) = PopulationBuilder::new(3, 1).build(&params, &mut counters).unwrap();
        store.link(AgentId(0), AgentId(2), TribeSelector::Family).unwrap();
        store.link(AgentId(0), AgentId(2), TribeSelector::Family).unwrap();
        assert_eq!(store.get(AgentId(0)).unwrap().tribe.get(TribeSelector::Family), &[AgentId(2)]);
        assert_eq!(store.get(AgentId(2)).unwrap().tribe.get(TribeSelector::Family), &[AgentId(0)]);
        assert!(store.get(AgentId(1)).unwrap().tribe.get(TribeSelector::Family).is_empty());
        assert!(store.link(AgentId(0), AgentId(7), TribeSelector::Friend).is_err());
    }
}

#[cfg(test)]
mod population {
    use sir_core::{AgentId, GlobalCount, Parameters, SirError};

    use super::fixtures::{never, quiet_params, World};
    use crate::{InfectionStatus, PopulationBuilder, Role};

    #[test]
    fn counters_match_population() {
        let params = Parameters { initial_infection_rate: 0.2, ..Parameters::default() };
        let mut counters = GlobalCount::new();
        let (store, _) = PopulationBuilder::new(2_000, 3).build(&params, &mut counters).unwrap();
        assert_eq!(counters.total_population, 2_000);
        assert!(counters.is_conserved());
        let infected = store.iter().filter(|h| h.is_infected()).count() as u64;
        assert_eq!(counters.infected_count, infected);
        let adults = store.iter().filter(|h| h.role == Role::Adult).count() as u64;
        assert_eq!(counters.work_population, adults);
        assert!(store.iter().all(|h| h.age <= 100));
    }

    #[test]
    fn same_seed_same_population() {
        let params = Parameters::default();
        let build = || {
            let mut counters = GlobalCount::new();
            let (store, _) = PopulationBuilder::new(300, 77).build(&params, &mut counters).unwrap();
            let ages: Vec<_> = store.iter().map(|h| (h.age, h.is_infected(), h.immune)).collect();
            (ages, counters)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn forced_ages_must_cover_population() {
        let mut counters = GlobalCount::new();
        let err = PopulationBuilder::new(3, 1)
            .forced_ages(vec![10, 20])
            .build(&Parameters::default(), &mut counters)
            .err()
            .unwrap();
        assert!(matches!(err, SirError::Config(_)));
    }

    #[test]
    fn parameter_change_moves_susceptible_to_immune() {
        let mut world = World::new(quiet_params());
        let (mut fresh, mut rng_a) = world.spawn(0, 30, never(), false);
        let (mut sick, mut rng_b) = world.spawn(1, 30, never(), false);
        world.infect(&mut sick, &mut rng_b);

        let all_immune = Parameters { immune_rate: 1.0, ..quiet_params() };
        fresh.parameter_changed(&all_immune, &mut rng_a, &mut world.counters);
        sick.parameter_changed(&all_immune, &mut rng_b, &mut world.counters);

        assert!(fresh.immune);
        assert!(!sick.immune);
        assert_eq!(sick.disease.status, InfectionStatus::Infected);
        assert_eq!(world.counters.immune_count, 1);
        assert_eq!(world.counters.susceptible_count, 0);
        assert!(world.counters.is_conserved());

        fresh.parameter_changed(&quiet_params(), &mut rng_a, &mut world.counters);
        assert!(!fresh.immune);
        assert_eq!(world.counters.susceptible_count, 1);
        assert!(world.counters.is_conserved());
        assert_eq!(fresh.id, AgentId(0));
    }
}

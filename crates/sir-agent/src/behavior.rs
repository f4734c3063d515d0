//! Role-specific daily steps.
//!
//! Each phase the controller calls [`AgentStore::step`] once per agent in
//! population order.  The step looks up the agent's [`Role`] profile and runs
//! its step function, which reacts only to the phases it cares about:
//!
//! | Role                    | Phases acted on                                            |
//! |-------------------------|------------------------------------------------------------|
//! | Infant, Toddler, Elder  | evening (disease evolution)                                |
//! | Student                 | commute to school, commute home, evening                   |
//! | Adult, work day         | commute to work (+ invitations, income), commute to event, |
//! |                         | commute home, evening                                      |
//! | Adult, day off          | evening                                                    |

use sir_core::{AgentId, SimPhase, SirError, SirResult};
use tracing::debug;

use crate::{
    AgentRngs, AgentStore, Dilemma, Districts, Human, Location, Role, SimContext, TribeSelector,
};

impl AgentStore {
    /// Run `agent`'s behavior for the current phase.  Dead agents are
    /// skipped.
    pub fn step(
        &mut self,
        rngs:      &mut AgentRngs,
        agent:     AgentId,
        ctx:       &mut SimContext<'_>,
        districts: &mut dyn Districts,
    ) -> SirResult<()> {
        let human = self.get(agent).ok_or(SirError::AgentNotFound(agent))?;
        if agent.index() >= rngs.len() {
            return Err(SirError::AgentNotFound(agent));
        }
        if human.is_dead {
            return Ok(());
        }
        let step = human.role.profile().step;
        step(self, rngs, agent, ctx, districts);
        Ok(())
    }
}

/// Move `human` to `to`, notifying the spatial collaborator.
fn relocate(human: &mut Human, to: Location, districts: &mut dyn Districts) {
    if human.location == to {
        return;
    }
    districts.move_to(human.id, human.location, to);
    human.location = to;
}

/// Infant, Toddler and Elder: stay home, let the disease run its course.
pub(crate) fn step_homebound(
    store:      &mut AgentStore,
    rngs:       &mut AgentRngs,
    agent:      AgentId,
    ctx:        &mut SimContext<'_>,
    _districts: &mut dyn Districts,
) {
    if ctx.phase != SimPhase::EveningAtHome {
        return;
    }
    let (Some(human), Some(rng)) = (store.get_mut(agent), rngs.get_mut(agent)) else {
        return;
    };
    human.disease_evolution(ctx, rng);
}

pub(crate) fn step_student(
    store:     &mut AgentStore,
    rngs:      &mut AgentRngs,
    agent:     AgentId,
    ctx:       &mut SimContext<'_>,
    districts: &mut dyn Districts,
) {
    let (Some(human), Some(rng)) = (store.get_mut(agent), rngs.get_mut(agent)) else {
        return;
    };
    match ctx.phase {
        SimPhase::CommutingToMainActivity => {
            if !human.main_activity_isolated(ctx, rng) {
                let school = Location::District(human.school_district);
                relocate(human, school, districts);
            }
        }
        SimPhase::CommutingToHome => {
            let home = Location::District(human.home_district);
            relocate(human, home, districts);
        }
        SimPhase::EveningAtHome => human.disease_evolution(ctx, rng),
        _ => {}
    }
}

pub(crate) fn step_adult(
    store:     &mut AgentStore,
    rngs:      &mut AgentRngs,
    agent:     AgentId,
    ctx:       &mut SimContext<'_>,
    districts: &mut dyn Districts,
) {
    let working_day = store
        .get(agent)
        .and_then(|h| h.work_info.as_ref())
        .is_some_and(|w| w.is_working_day(ctx.weekday));
    if !working_day {
        step_homebound(store, rngs, agent, ctx, districts);
        return;
    }

    let (Some(human), Some(rng)) = (store.get_mut(agent), rngs.get_mut(agent)) else {
        return;
    };
    match ctx.phase {
        SimPhase::CommutingToMainActivity => {
            let isolated = human.main_activity_isolated(ctx, rng);
            if let Some(work) = human.work_info.as_mut() {
                work.isolated = isolated;
            }
            if !isolated {
                let work = Location::District(human.work_district);
                relocate(human, work, districts);
            }
            let invite = human.personal_decision(Dilemma::InviteFriendsToGetOut, ctx, rng);
            ctx.counters.total_income += human.current_income();
            if invite {
                invite_friends(store, rngs, agent, ctx, districts);
            }
        }
        SimPhase::CommutingToPostWorkActivity => {
            if let Some(spot) = human.social_event {
                relocate(human, Location::Spot(spot), districts);
            }
        }
        SimPhase::CommutingToHome => {
            if let Some(spot) = human.social_event.take() {
                districts.release_gathering_spot(spot);
                human.days_since_last_social_event = 0;
            }
            let home = Location::District(human.home_district);
            relocate(human, home, districts);
        }
        SimPhase::EveningAtHome => {
            human.disease_evolution(ctx, rng);
            human.days_since_last_social_event += 1;
        }
        _ => {}
    }
}

/// Reserve a gathering spot near `host`'s home and ask each living adult
/// friend to join.  The host commits to the spot only if someone accepts;
/// otherwise the spot is given back.
fn invite_friends(
    store:     &mut AgentStore,
    rngs:      &mut AgentRngs,
    host:      AgentId,
    ctx:       &mut SimContext<'_>,
    districts: &mut dyn Districts,
) {
    let Some(h) = store.get(host) else { return };
    let Some(spot) = districts.reserve_gathering_spot(h.home_district) else {
        return;
    };
    let friends = h.tribe.get(TribeSelector::Friend).to_vec();

    let mut guests = 0usize;
    for friend in friends {
        if friend == host {
            continue;
        }
        let (Some(guest), Some(rng)) = (store.get_mut(friend), rngs.get_mut(friend)) else {
            continue;
        };
        if guest.is_dead || guest.role != Role::Adult {
            continue;
        }
        if guest.personal_decision(Dilemma::AcceptFriendInvitationToGetOut, ctx, rng) {
            guest.social_event = Some(spot);
            guests += 1;
        }
    }

    if guests == 0 {
        districts.release_gathering_spot(spot);
        return;
    }
    if let Some(h) = store.get_mut(host) {
        h.social_event = Some(spot);
    }
    debug!(host = %host, %spot, guests, "social event");
}

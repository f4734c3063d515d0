//! Binary behavioral choices and the peer-pressure memory behind them.
//!
//! An agent answering a [`Dilemma`] first forms a personal answer from its
//! risk tolerance and the current epidemic level, then, with probability
//! equal to its herding tendency, replaces it by what its friends decided
//! most recently.  Every answer that is actually resolved is appended to the
//! shared [`DilemmaHistory`].

use sir_core::{AgentRng, SocialPolicy, WorkClass};
use tracing::trace;

use crate::{DiseaseSeverity, Human, Role, SimContext, TribeSelector};

/// Number of most recent entries the herd decision looks at.
pub const HERD_WINDOW: usize = 10;

/// Steepness of the fear response to the infected fraction.
const FEAR_FACTOR: f64 = 3.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Dilemma {
    GoToWorkOnLockdown,
    InviteFriendsToGetOut,
    AcceptFriendInvitationToGetOut,
}

impl Dilemma {
    pub const COUNT: usize = 3;

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dilemma::GoToWorkOnLockdown             => "go_to_work_on_lockdown",
            Dilemma::InviteFriendsToGetOut          => "invite_friends_to_get_out",
            Dilemma::AcceptFriendInvitationToGetOut => "accept_friend_invitation_to_get_out",
        }
    }
}

/// Append-only record of resolved dilemmas, per dilemma and relation kind.
///
/// Owned by the simulation and lent to agents through `SimContext`.  Fresh
/// (empty) at the start of every run.
#[derive(Clone, Debug, Default)]
pub struct DilemmaHistory {
    entries: [[Vec<bool>; TribeSelector::COUNT]; Dilemma::COUNT],
}

impl DilemmaHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `decision` under every relation kind for `dilemma`.
    pub fn record(&mut self, dilemma: Dilemma, decision: bool) {
        for list in &mut self.entries[dilemma.slot()] {
            list.push(decision);
        }
    }

    pub fn entries(&self, dilemma: Dilemma, tribe: TribeSelector) -> &[bool] {
        &self.entries[dilemma.slot()][tribe.slot()]
    }

    /// Majority over the last `window` entries.  `None` when nothing has been
    /// recorded; a tie resolves to `false`.
    pub fn herding_decision(
        &self,
        dilemma: Dilemma,
        tribe:   TribeSelector,
        window:  usize,
    ) -> Option<bool> {
        let list = self.entries(dilemma, tribe);
        if list.is_empty() {
            return None;
        }
        let recent = &list[list.len().saturating_sub(window)..];
        let yes = recent.iter().filter(|&&d| d).count();
        Some(yes * 2 > recent.len())
    }

    pub fn clear(&mut self) {
        for per_dilemma in &mut self.entries {
            for list in per_dilemma {
                list.clear();
            }
        }
    }
}

impl Human {
    /// Combine a personal answer with the herd signal.  With no signal the
    /// personal answer stands; otherwise the herd wins with probability equal
    /// to the agent's herding tendency.
    pub fn standard_decision(
        &self,
        personal: bool,
        herd:     Option<bool>,
        rng:      &mut AgentRng,
    ) -> bool {
        match herd {
            None => personal,
            Some(h) => {
                if rng.flip_coin(self.properties.herding_behavior) {
                    h
                } else {
                    personal
                }
            }
        }
    }

    /// Resolve `dilemma` for this agent.
    ///
    /// Answers that are short-circuited (a non-retail worker asked to break a
    /// lockdown, or a social dilemma while an event is pending or symptoms
    /// show) are `false` and leave the history untouched.
    pub fn personal_decision(
        &self,
        dilemma: Dilemma,
        ctx:     &mut SimContext<'_>,
        rng:     &mut AgentRng,
    ) -> bool {
        let personal = match dilemma {
            Dilemma::GoToWorkOnLockdown => {
                let retail = self
                    .work_info
                    .as_ref()
                    .is_some_and(|w| w.work_class == WorkClass::Retail);
                if !retail {
                    return false;
                }
                rng.flip_coin(self.properties.risk_tolerance)
            }
            Dilemma::InviteFriendsToGetOut | Dilemma::AcceptFriendInvitationToGetOut => {
                if self.social_event.is_some() || self.is_symptomatic() {
                    return false;
                }
                let mut p = self.properties.risk_tolerance;
                if ctx.params.policy_active(SocialPolicy::SocialDistancing) {
                    p *= p;
                }
                p *= (-FEAR_FACTOR * ctx.counters.infected_fraction()).exp();
                rng.flip_coin(p)
            }
        };

        let herd = ctx.history.herding_decision(dilemma, TribeSelector::Friend, HERD_WINDOW);
        let answer = self.standard_decision(personal, herd, rng);
        ctx.history.record(dilemma, answer);
        trace!(agent = %self.id, dilemma = dilemma.as_str(), personal, ?herd, answer, "dilemma");
        answer
    }

    /// Whether today's main activity (work or school) is skipped.
    pub fn main_activity_isolated(&self, ctx: &mut SimContext<'_>, rng: &mut AgentRng) -> bool {
        if self.is_infected() && self.disease.severity >= DiseaseSeverity::Moderate {
            return true;
        }
        if self.is_symptomatic() && rng.flip_coin(ctx.params.symptomatic_isolation_rate) {
            return true;
        }
        match self.role {
            Role::Adult => match &self.work_info {
                Some(w) if ctx.params.work_class_locked(w.work_class) => {
                    !self.personal_decision(Dilemma::GoToWorkOnLockdown, ctx, rng)
                }
                _ => false,
            },
            Role::Student => ctx.params.student_age_locked(self.age),
            _ => false,
        }
    }
}

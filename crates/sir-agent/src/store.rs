//! Agent arena (`AgentStore`) and per-agent RNG state (`AgentRngs`).
//!
//! The two are kept apart so a daily step can hold `&mut AgentStore` (to
//! update the acting agent and, during invitations, its friends) while
//! separately borrowing the acting agent's RNG and then each friend's own.

use sir_core::{AgentId, AgentRng, SirError, SirResult};

use crate::{Human, TribeSelector};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// One deterministic RNG stream per agent, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed:      u64,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner, seed: global_seed }
    }

    /// The global seed every stream was derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Every `Human` of the run.  `humans[i].id == AgentId(i)` always holds;
/// agents are never removed, dead ones are only flagged.
#[derive(Default)]
pub struct AgentStore {
    humans: Vec<Human>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `human`, which must carry the next free id.
    pub(crate) fn push(&mut self, human: Human) {
        debug_assert_eq!(human.id.index(), self.humans.len());
        self.humans.push(human);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.humans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.humans.is_empty()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Human> {
        self.humans.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Human> {
        self.humans.get_mut(agent.index())
    }

    /// Iterate over all agent IDs in population order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.humans.iter().map(|h| h.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Human> {
        self.humans.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Human> {
        self.humans.iter_mut()
    }

    /// Agents that have not died.
    pub fn living(&self) -> impl Iterator<Item = &Human> {
        self.humans.iter().filter(|h| h.is_alive())
    }

    /// Make `a` and `b` members of each other's `selector` tribe.
    pub fn link(&mut self, a: AgentId, b: AgentId, selector: TribeSelector) -> SirResult<()> {
        if a == b {
            return Ok(());
        }
        if b.index() >= self.humans.len() {
            return Err(SirError::AgentNotFound(b));
        }
        self.get_mut(a).ok_or(SirError::AgentNotFound(a))?.tribe.add(selector, b);
        self.humans[b.index()].tribe.add(selector, a);
        Ok(())
    }
}

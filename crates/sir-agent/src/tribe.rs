//! Peer groups an agent belongs to, keyed by relation kind.

use sir_core::AgentId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TribeSelector {
    Family,
    Friend,
    Coworker,
    Classmate,
    AgeGroup,
}

impl TribeSelector {
    pub const COUNT: usize = 5;

    pub const ALL: [TribeSelector; Self::COUNT] = [
        TribeSelector::Family,
        TribeSelector::Friend,
        TribeSelector::Coworker,
        TribeSelector::Classmate,
        TribeSelector::AgeGroup,
    ];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

/// Ordered peer lists, one per [`TribeSelector`].  Holds ids only; peers are
/// resolved through the `AgentStore` when needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tribe {
    members: [Vec<AgentId>; TribeSelector::COUNT],
}

impl Tribe {
    pub fn get(&self, selector: TribeSelector) -> &[AgentId] {
        &self.members[selector.slot()]
    }

    /// Append `peer` unless already present.  Insertion order is kept.
    pub fn add(&mut self, selector: TribeSelector, peer: AgentId) {
        let list = &mut self.members[selector.slot()];
        if !list.contains(&peer) {
            list.push(peer);
        }
    }
}

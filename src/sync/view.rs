use std::sync::Arc;

use tokio::sync::RwLock;

use crate::sync::clock::{days_remaining, SECONDS_PER_BLOCK};
use crate::types::ProposalCreated;

/// View shared between the synchronizer (writer) and readers such as the
/// control API.
pub type SharedView = Arc<RwLock<ChainView>>;

/// Local, best-effort picture of governance state: the latest observed
/// chain height and the last proposal batch received.
#[derive(Clone, Debug)]
pub struct ChainView {
    current_block_number: u64,
    // None until the first non-empty batch arrives
    proposals: Option<Arc<Vec<ProposalCreated>>>,
    seconds_per_block: u64,
}

impl Default for ChainView {
    fn default() -> Self {
        Self::new(SECONDS_PER_BLOCK)
    }
}

impl ChainView {
    pub fn new(seconds_per_block: u64) -> Self {
        Self {
            current_block_number: 0,
            proposals: None,
            seconds_per_block,
        }
    }

    pub fn shared(self) -> SharedView {
        Arc::new(RwLock::new(self))
    }

    /// Most recent notification wins, even if it is lower than the current
    /// value.
    pub fn on_block_number(&mut self, number: u64) {
        self.current_block_number = number;
    }

    /// Replace the whole proposal list with `batch`. Empty batches are
    /// ignored. Returns whether the list was replaced.
    pub fn on_proposal_events(&mut self, batch: Vec<ProposalCreated>) -> bool {
        if batch.is_empty() {
            return false;
        }
        self.proposals = Some(Arc::new(batch));
        true
    }

    pub fn current_block_number(&self) -> u64 {
        self.current_block_number
    }

    pub fn has_proposals(&self) -> bool {
        self.proposals.as_ref().map_or(false, |p| !p.is_empty())
    }

    pub fn proposals(&self) -> &[ProposalCreated] {
        match &self.proposals {
            Some(p) => p.as_slice(),
            None => &[],
        }
    }

    /// Cheap handle on the current list; stays valid after a later replace.
    pub fn snapshot(&self) -> Arc<Vec<ProposalCreated>> {
        self.proposals.clone().unwrap_or_default()
    }

    pub fn proposal_at(&self, index: usize) -> Option<&ProposalCreated> {
        self.proposals().get(index)
    }

    pub fn time_remaining(&self, vote_end: u64) -> i64 {
        days_remaining(vote_end, self.current_block_number, self.seconds_per_block)
    }
}

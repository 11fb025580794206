use std::collections::BTreeMap;

use crate::types::VoteChoice;

/// Pending ballot choices, keyed by the proposal's position in the current
/// list (not by proposal id). Entries survive list replacement and
/// submission.
#[derive(Clone, Debug, Default)]
pub struct VoteSelections {
    votes: BTreeMap<usize, VoteChoice>,
}

impl VoteSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the choice for `index`.
    pub fn handle_vote_selection(&mut self, index: usize, choice: VoteChoice) {
        self.votes.insert(index, choice);
    }

    pub fn get(&self, index: usize) -> Option<VoteChoice> {
        self.votes.get(&index).copied()
    }
}

//! Page-level state and the user operations on it.

pub mod notify;
pub mod submitter;
pub mod votes;

pub use notify::{Notification, Notifier, Variant};
pub use submitter::{IntentSubmitter, VoteError};
pub use votes::VoteSelections;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::sync::SharedView;
use crate::types::{TxHash, VoteChoice};

/// One rendered proposal row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalCard {
    pub index: usize,
    pub proposal_id: String,
    pub proposer: String,
    pub description: String,
    pub vote_end: u64,
    pub days_remaining: i64,
    pub selected: Option<VoteChoice>,
}

/// Everything a single user session holds: the synchronized chain view, the
/// proposal input field and the pending vote selections.
pub struct GovernanceSession {
    view: SharedView,
    votes: Mutex<VoteSelections>,
    proposal_input: Mutex<String>,
    submitter: IntentSubmitter,
}

impl GovernanceSession {
    pub fn new(view: SharedView, submitter: IntentSubmitter) -> Self {
        Self {
            view,
            votes: Mutex::new(VoteSelections::new()),
            proposal_input: Mutex::new(String::new()),
            submitter,
        }
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn notifier(&self) -> &Notifier {
        self.submitter.notifier()
    }

    pub fn handle_input_change(&self, text: impl Into<String>) {
        *self.proposal_input.lock() = text.into();
    }

    pub fn proposal_input(&self) -> String {
        self.proposal_input.lock().clone()
    }

    /// Submit the current input as a new proposal. The input is cleared only
    /// when the wallet layer accepts the call; failures are logged by the
    /// submitter and otherwise ignored.
    pub async fn add_proposal(&self) -> Option<TxHash> {
        let description = self.proposal_input();
        match self.submitter.submit_proposal(&description).await {
            Ok(tx) => {
                self.proposal_input.lock().clear();
                Some(tx)
            }
            Err(_) => None,
        }
    }

    pub fn handle_vote_selection(&self, index: usize, choice: VoteChoice) {
        self.votes.lock().handle_vote_selection(index, choice);
    }

    /// Vote on the proposal currently at `index` with the choice selected
    /// for that index.
    pub async fn submit_vote(
        &self,
        index: usize,
    ) -> Result<JoinHandle<Result<TxHash, VoteError>>, VoteError> {
        let proposal_id = self
            .view
            .read()
            .await
            .proposal_at(index)
            .map(|p| p.proposal_id);
        let votes = self.votes.lock().clone();
        self.submitter.submit_vote(&votes, index, proposal_id)
    }

    /// The proposal list as it should be displayed, with countdowns computed
    /// against the latest block.
    pub async fn render(&self) -> Vec<ProposalCard> {
        let view = self.view.read().await;
        let votes = self.votes.lock().clone();
        view.proposals()
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let vote_end = p.vote_end_block();
                ProposalCard {
                    index,
                    proposal_id: p.proposal_id.to_string(),
                    proposer: p.proposer.to_string(),
                    description: p.description.clone(),
                    vote_end,
                    days_remaining: view.time_remaining(vote_end),
                    selected: votes.get(index),
                }
            })
            .collect()
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifier().drain()
    }
}

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::chain::{ChainClient, ClientError};
use crate::metrics::Metrics;
use crate::session::notify::{Notification, Notifier};
use crate::session::votes::VoteSelections;
use crate::types::{
    Address, CastVoteCall, ContractCall, ProposalId, ProposeCall, TxHash, WriteRequest,
};

pub const VOTE_VALIDATION_TITLE: &str = "Something went wrong.";
pub const VOTE_VALIDATION_MESSAGE: &str = "No vote selected for proposal";
pub const VOTE_ERROR_TITLE: &str = "Vote error.";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// No choice recorded for the index, or the proposal has no id.
    #[error("{}", VOTE_VALIDATION_MESSAGE)]
    Validation,
    /// The wallet/node refused the call; carries the underlying cause.
    #[error("vote submission failed: {0}")]
    Submission(String),
}

/// Turns user intent into writes against the governor contract.
///
/// The two paths report failures differently: proposal failures only reach
/// the log, vote failures become user notifications.
#[derive(Clone)]
pub struct IntentSubmitter {
    client: Arc<dyn ChainClient>,
    contract: Address,
    from: Option<Address>,
    notifier: Notifier,
    metrics: Arc<Metrics>,
}

impl IntentSubmitter {
    pub fn new(
        client: Arc<dyn ChainClient>,
        contract: Address,
        from: Option<Address>,
        notifier: Notifier,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            client,
            contract,
            from,
            notifier,
            metrics,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Send `propose` with a text-only payload and wait for the wallet layer
    /// to accept it. Every call is independent: nothing de-duplicates
    /// concurrent submissions.
    ///
    /// Errors are logged and returned, never turned into notifications.
    pub async fn submit_proposal(&self, description: &str) -> Result<TxHash, ClientError> {
        let request = WriteRequest {
            contract: self.contract,
            from: self.from,
            call: ContractCall::Propose(ProposeCall::placeholder(description)),
        };
        match self.client.write_contract(request).await {
            Ok(tx) => {
                self.metrics.proposals_submitted.inc();
                info!(tx = %tx, "Proposal submitted");
                Ok(tx)
            }
            Err(e) => {
                self.metrics.proposal_submit_failures.inc();
                error!(error = %e, "Proposal submission failed");
                Err(e)
            }
        }
    }

    /// Cast the vote selected for `index` on `proposal_id`.
    ///
    /// Validation happens synchronously: with no selection or no id, a
    /// notification is raised and no call is made. Otherwise the write is
    /// spawned and this returns at once; the handle resolves when the wallet
    /// layer accepted or refused the call (not when it is mined).
    pub fn submit_vote(
        &self,
        votes: &VoteSelections,
        index: usize,
        proposal_id: Option<ProposalId>,
    ) -> Result<JoinHandle<Result<TxHash, VoteError>>, VoteError> {
        let (choice, proposal_id) = match (votes.get(index), proposal_id) {
            (Some(choice), Some(id)) if !id.is_zero() => (choice, id),
            _ => {
                self.metrics.vote_validation_errors.inc();
                self.notifier.push(Notification::destructive(
                    VOTE_VALIDATION_TITLE,
                    VOTE_VALIDATION_MESSAGE,
                ));
                return Err(VoteError::Validation);
            }
        };

        let request = WriteRequest {
            contract: self.contract,
            from: self.from,
            call: ContractCall::CastVote(CastVoteCall::single(proposal_id, choice)),
        };
        let client = self.client.clone();
        let notifier = self.notifier.clone();
        let metrics = self.metrics.clone();

        Ok(tokio::spawn(async move {
            match client.write_contract(request).await {
                Ok(tx) => {
                    metrics.votes_submitted.inc();
                    info!(proposal = %proposal_id, choice = %choice, tx = %tx, "Vote submitted");
                    Ok(tx)
                }
                Err(e) => {
                    metrics.vote_submit_failures.inc();
                    let cause = e.cause();
                    notifier.push(Notification::destructive(VOTE_ERROR_TITLE, cause.clone()));
                    Err(VoteError::Submission(cause))
                }
            }
        }))
    }
}

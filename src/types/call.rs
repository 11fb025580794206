use ethabi::ethereum_types::U256;

use crate::types::{Address, ProposalId, VoteChoice};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
    Propose,
    CastVote,
}

/// An outbound write against the governor contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    Propose(ProposeCall),
    CastVote(CastVoteCall),
}

impl ContractCall {
    pub fn kind(&self) -> CallKind {
        match self {
            ContractCall::Propose(_) => CallKind::Propose,
            ContractCall::CastVote(_) => CallKind::CastVote,
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self.kind() {
            CallKind::Propose => "propose",
            CallKind::CastVote => "castVote",
        }
    }
}

/// `propose(address[] targets, uint256[] values, bytes[] calldatas, string description)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposeCall {
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub calldatas: Vec<Vec<u8>>,
    pub description: String,
}

impl ProposeCall {
    /// Text-only proposal: a single no-op action (zero target, zero value,
    /// empty calldata).
    pub fn placeholder(description: impl Into<String>) -> Self {
        Self {
            targets: vec![Address::ZERO],
            values: vec![U256::zero()],
            calldatas: vec![Vec::new()],
            description: description.into(),
        }
    }
}

/// `castVote(uint256[] proposalIds, uint8[] choices)`. Batched even when a
/// single vote is cast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastVoteCall {
    pub proposal_ids: Vec<ProposalId>,
    pub choices: Vec<VoteChoice>,
}

impl CastVoteCall {
    pub fn single(proposal_id: ProposalId, choice: VoteChoice) -> Self {
        Self {
            proposal_ids: vec![proposal_id],
            choices: vec![choice],
        }
    }
}

/// What the chain client needs to send one write: target contract, sending
/// account (None lets the node pick its default account) and the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub contract: Address,
    pub from: Option<Address>,
    pub call: ContractCall,
}

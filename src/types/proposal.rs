use std::fmt;
use std::str::FromStr;

use ethabi::ethereum_types::U256;

use crate::types::{Address, TxHash};

/// Identifier the governor assigns to a proposal (a uint256 hash of its
/// payload). Zero is treated as "no id".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProposalId(pub U256);

impl ProposalId {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for ProposalId {
    fn from(v: u64) -> Self {
        ProposalId(U256::from(v))
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProposalId {
    type Err = String;

    /// Accepts decimal or 0x-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x") {
            Some(h) => U256::from_str_radix(h, 16).ok(),
            None => U256::from_dec_str(s).ok(),
        };
        parsed.map(ProposalId).ok_or_else(|| format!("invalid proposal id '{}'", s))
    }
}

/// One `ProposalCreated` log as emitted by the governor. Never mutated once
/// it has been decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalCreated {
    pub proposal_id: ProposalId,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Vec<u8>>,
    pub vote_start: U256,
    pub vote_end: U256,
    pub description: String,

    // log metadata, absent for pending logs
    pub block_number: Option<u64>,
    pub transaction_hash: Option<TxHash>,
}

impl ProposalCreated {
    /// `vote_end` clamped into a block height.
    pub fn vote_end_block(&self) -> u64 {
        if self.vote_end > U256::from(u64::MAX) {
            u64::MAX
        } else {
            self.vote_end.low_u64()
        }
    }
}

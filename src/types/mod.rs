pub mod address;
pub mod call;
pub mod hash;
pub mod proposal;
pub mod vote;

pub use address::{Address, AddressError};
pub use call::{CallKind, CastVoteCall, ContractCall, ProposeCall, WriteRequest};
pub use hash::TxHash;
pub use proposal::{ProposalCreated, ProposalId};
pub use vote::{UnknownChoice, VoteChoice};

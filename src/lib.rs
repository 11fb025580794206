//! Governance client for the StrateFi governor contract.
//!
//! Follows the chain head and the contract's `ProposalCreated` history,
//! keeps a local proposal view with vote countdowns, and turns user intent
//! (new proposal, cast vote) into contract writes.

pub mod chain;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod rpc;
pub mod session;
pub mod sync;
pub mod types;

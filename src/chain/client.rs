use async_trait::async_trait;

use crate::chain::ClientError;
use crate::types::{Address, ProposalCreated, TxHash, WriteRequest};

/// The subset of an Ethereum node/wallet the governance client needs.
///
/// One instance is built at startup and shared by `Arc` with the watchers
/// and the intent submitter.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current chain head.
    async fn block_number(&self) -> Result<u64, ClientError>;

    /// Every `ProposalCreated` log emitted by `contract` from `from_block`
    /// up to the head, oldest first.
    async fn proposal_created_logs(
        &self,
        contract: Address,
        from_block: u64,
    ) -> Result<Vec<ProposalCreated>, ClientError>;

    /// Hand a write to the wallet layer. Resolves once the transaction has
    /// been accepted for submission, not once it is mined.
    async fn write_contract(&self, request: WriteRequest) -> Result<TxHash, ClientError>;
}

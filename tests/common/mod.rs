//! Shared test helpers: an in-memory chain client and proposal builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use ethabi::ethereum_types::U256;
use parking_lot::Mutex;

use stratefi_gov::chain::{ChainClient, ClientError};
use stratefi_gov::metrics::Metrics;
use stratefi_gov::session::{GovernanceSession, IntentSubmitter, Notifier};
use stratefi_gov::sync::{ChainView, SharedView};
use stratefi_gov::types::*;

pub fn contract() -> Address {
    let mut a = [0u8; 20];
    a[19] = 0xaa;
    Address(a)
}

pub fn make_addr(seed: u8) -> Address {
    let mut a = [0u8; 20];
    a[0] = seed;
    Address(a)
}

pub fn make_proposal(id: u64, vote_end: u64, description: &str) -> ProposalCreated {
    ProposalCreated {
        proposal_id: ProposalId::from(id),
        proposer: make_addr(1),
        targets: vec![Address::ZERO],
        values: vec![U256::zero()],
        signatures: vec![String::new()],
        calldatas: vec![Vec::new()],
        vote_start: U256::from(vote_end.saturating_sub(100)),
        vote_end: U256::from(vote_end),
        description: description.to_string(),
        block_number: None,
        transaction_hash: None,
    }
}

/// In-memory [`ChainClient`]. Reads return whatever the test set; writes
/// are recorded and answered from a script (success by default).
#[derive(Default)]
pub struct MockChainClient {
    pub head: Mutex<u64>,
    pub logs: Mutex<Vec<ProposalCreated>>,
    pub fail_reads: Mutex<Option<ClientError>>,
    /// Reads never complete while set, like a node that accepted the
    /// connection and went silent.
    pub stall_reads: Mutex<bool>,
    pub writes: Mutex<Vec<WriteRequest>>,
    pub write_results: Mutex<VecDeque<Result<TxHash, ClientError>>>,
}

impl MockChainClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_head(&self, n: u64) {
        *self.head.lock() = n;
    }

    pub fn set_logs(&self, logs: Vec<ProposalCreated>) {
        *self.logs.lock() = logs;
    }

    pub fn set_stalled(&self, stall: bool) {
        *self.stall_reads.lock() = stall;
    }

    async fn read_gate(&self) -> Result<(), ClientError> {
        let stalled = *self.stall_reads.lock();
        if stalled {
            std::future::pending::<()>().await;
        }
        match self.fail_reads.lock().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn reject_next_write(&self, err: ClientError) {
        self.write_results.lock().push_back(Err(err));
    }

    pub fn writes(&self) -> Vec<WriteRequest> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn block_number(&self) -> Result<u64, ClientError> {
        self.read_gate().await?;
        Ok(*self.head.lock())
    }

    async fn proposal_created_logs(
        &self,
        _contract: Address,
        _from_block: u64,
    ) -> Result<Vec<ProposalCreated>, ClientError> {
        self.read_gate().await?;
        Ok(self.logs.lock().clone())
    }

    async fn write_contract(&self, request: WriteRequest) -> Result<TxHash, ClientError> {
        let n = {
            let mut writes = self.writes.lock();
            writes.push(request);
            writes.len()
        };
        match self.write_results.lock().pop_front() {
            Some(r) => r,
            None => {
                let mut h = [0u8; 32];
                h[31] = n as u8;
                Ok(TxHash(h))
            }
        }
    }
}

pub fn make_submitter(client: Arc<MockChainClient>) -> (IntentSubmitter, Notifier) {
    let notifier = Notifier::new(16);
    let submitter = IntentSubmitter::new(
        client,
        contract(),
        None,
        notifier.clone(),
        Arc::new(Metrics::new()),
    );
    (submitter, notifier)
}

pub fn make_session(client: Arc<MockChainClient>) -> (Arc<GovernanceSession>, SharedView) {
    let view = ChainView::default().shared();
    let (submitter, _) = make_submitter(client);
    (Arc::new(GovernanceSession::new(view.clone(), submitter)), view)
}

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::chain::ChainClient;
use crate::sync::SyncEvent;
use crate::types::Address;

/// Polls the chain head and emits [`SyncEvent::BlockNumber`] whenever it
/// changes.
///
/// A failed poll is logged and the watcher waits for the next interval; the
/// view simply stops advancing while the node is unreachable. Shutdown is
/// observed both between polls and while a poll is in flight.
pub struct BlockWatcher {
    client: Arc<dyn ChainClient>,
    interval: Duration,
    to_sync: mpsc::Sender<SyncEvent>,
    shutdown: watch::Receiver<bool>,
}

impl BlockWatcher {
    pub fn new(
        client: Arc<dyn ChainClient>,
        interval: Duration,
        to_sync: mpsc::Sender<SyncEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            interval,
            to_sync,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let mut last: Option<u64> = None;
        loop {
            let polled = tokio::select! {
                res = self.client.block_number() => res,
                _ = wait_shutdown(&mut self.shutdown) => break,
            };
            match polled {
                Ok(number) if last != Some(number) => {
                    last = Some(number);
                    if self.to_sync.send(SyncEvent::BlockNumber { number }).await.is_err() {
                        break; // synchronizer gone
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Block number poll failed"),
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = wait_shutdown(&mut self.shutdown) => break,
            }
        }
        debug!("Block watcher stopped");
    }
}

/// Re-reads the full `ProposalCreated` history from `from_block` on every
/// tick and emits it as one [`SyncEvent::ProposalLogs`] batch. Empty results
/// are not forwarded.
pub struct EventWatcher {
    client: Arc<dyn ChainClient>,
    contract: Address,
    from_block: u64,
    interval: Duration,
    to_sync: mpsc::Sender<SyncEvent>,
    shutdown: watch::Receiver<bool>,
}

impl EventWatcher {
    pub fn new(
        client: Arc<dyn ChainClient>,
        contract: Address,
        from_block: u64,
        interval: Duration,
        to_sync: mpsc::Sender<SyncEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            contract,
            from_block,
            interval,
            to_sync,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        loop {
            let polled = tokio::select! {
                res = self.client.proposal_created_logs(self.contract, self.from_block) => res,
                _ = wait_shutdown(&mut self.shutdown) => break,
            };
            match polled {
                Ok(logs) if !logs.is_empty() => {
                    debug!(count = logs.len(), "ProposalCreated logs received");
                    if self.to_sync.send(SyncEvent::ProposalLogs { logs }).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(
                    error = %e,
                    contract = %self.contract,
                    "ProposalCreated poll failed"
                ),
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = wait_shutdown(&mut self.shutdown) => break,
            }
        }
        debug!("Event watcher stopped");
    }
}

async fn wait_shutdown(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow() {
        if rx.changed().await.is_err() {
            // Sender dropped, treat as shutdown
            return;
        }
    }
}

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::metrics::Metrics;
use crate::sync::events::SyncEvent;
use crate::sync::view::SharedView;

/// Sending side handed to the watchers.
#[derive(Clone)]
pub struct SyncHandle {
    pub tx: mpsc::Sender<SyncEvent>,
}

/// Applies watcher notifications to the shared [`ChainView`](crate::sync::ChainView).
///
/// Block ticks and proposal batches arrive on one channel but from two
/// unsynchronized producers; each event is applied under a single write
/// lock so readers never observe a half-replaced list.
pub struct Synchronizer {
    rx: mpsc::Receiver<SyncEvent>,
    view: SharedView,
    metrics: Arc<Metrics>,
}

impl Synchronizer {
    pub fn new(view: SharedView, metrics: Arc<Metrics>, capacity: usize) -> (Self, SyncHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { rx, view, metrics }, SyncHandle { tx })
    }

    /// Run until every [`SyncHandle`] has been dropped.
    pub async fn run(mut self) {
        while let Some(ev) = self.rx.recv().await {
            self.apply(ev).await;
        }
        debug!("Sync channel closed, synchronizer stopping");
    }

    pub async fn apply(&self, ev: SyncEvent) {
        match ev {
            SyncEvent::BlockNumber { number } => {
                self.view.write().await.on_block_number(number);
                self.metrics.blocks_observed.inc();
                self.metrics.chain_height.set(number as i64);
                debug!(height = number, "Block observed");
            }
            SyncEvent::ProposalLogs { logs } => {
                let count = logs.len();
                let replaced = self.view.write().await.on_proposal_events(logs);
                if replaced {
                    self.metrics.proposal_batches.inc();
                    self.metrics.proposals_in_view.set(count as i64);
                    debug!(count = count, "Proposal list replaced");
                }
            }
        }
    }
}

use crate::types::ProposalCreated;

/// Inbound notifications for the synchronizer. The two variants come from
/// independent watchers and carry no ordering relative to each other.
#[derive(Clone, Debug)]
pub enum SyncEvent {
    // From the block watcher
    BlockNumber { number: u64 },

    // From the event watcher: the full `ProposalCreated` history matching
    // the filter, not a delta.
    ProposalLogs { logs: Vec<ProposalCreated> },
}

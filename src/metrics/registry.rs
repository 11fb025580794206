use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;

/// Prometheus metrics for the governance client.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<parking_lot::Mutex<Registry>>,

    // Synchronizer
    pub chain_height: Gauge<i64, AtomicI64>,
    pub blocks_observed: Counter,
    pub proposal_batches: Counter,
    pub proposals_in_view: Gauge<i64, AtomicI64>,

    // Intent submitter
    pub proposals_submitted: Counter,
    pub proposal_submit_failures: Counter,
    pub votes_submitted: Counter,
    pub vote_submit_failures: Counter,
    pub vote_validation_errors: Counter,

    // Chain client
    pub chain_request_duration: Histogram,
    pub chain_request_failures: Counter,

    // Control API
    pub api_requests: Counter,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let chain_height = Gauge::<i64, AtomicI64>::default();
        registry.register("stratefi_gov_chain_height", "Latest observed block number", chain_height.clone());

        let blocks_observed = Counter::default();
        registry.register("stratefi_gov_blocks_observed", "Block number notifications applied", blocks_observed.clone());

        let proposal_batches = Counter::default();
        registry.register("stratefi_gov_proposal_batches", "ProposalCreated batches applied to the view", proposal_batches.clone());

        let proposals_in_view = Gauge::<i64, AtomicI64>::default();
        registry.register("stratefi_gov_proposals_in_view", "Proposals currently held in the view", proposals_in_view.clone());

        let proposals_submitted = Counter::default();
        registry.register("stratefi_gov_proposals_submitted", "propose calls accepted by the wallet layer", proposals_submitted.clone());

        let proposal_submit_failures = Counter::default();
        registry.register("stratefi_gov_proposal_submit_failures", "propose calls rejected", proposal_submit_failures.clone());

        let votes_submitted = Counter::default();
        registry.register("stratefi_gov_votes_submitted", "castVote calls accepted by the wallet layer", votes_submitted.clone());

        let vote_submit_failures = Counter::default();
        registry.register("stratefi_gov_vote_submit_failures", "castVote calls rejected", vote_submit_failures.clone());

        let vote_validation_errors = Counter::default();
        registry.register("stratefi_gov_vote_validation_errors", "Vote submissions refused before any call", vote_validation_errors.clone());

        let chain_request_duration = Histogram::new(exponential_buckets(0.001, 2.0, 14));
        registry.register("stratefi_gov_chain_request_duration_seconds", "Chain JSON-RPC round trip", chain_request_duration.clone());

        let chain_request_failures = Counter::default();
        registry.register("stratefi_gov_chain_request_failures", "Chain JSON-RPC calls that failed", chain_request_failures.clone());

        let api_requests = Counter::default();
        registry.register("stratefi_gov_api_requests", "Control API requests", api_requests.clone());

        Self {
            registry: Arc::new(parking_lot::Mutex::new(registry)),
            chain_height,
            blocks_observed,
            proposal_batches,
            proposals_in_view,
            proposals_submitted,
            proposal_submit_failures,
            votes_submitted,
            vote_submit_failures,
            vote_validation_errors,
            chain_request_duration,
            chain_request_failures,
            api_requests,
        }
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        let registry = self.registry.lock();
        prometheus_client::encoding::text::encode(&mut buf, &registry)?;
        Ok(buf)
    }
}

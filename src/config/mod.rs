use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::Address;

/// Top-level client configuration, loaded from TOML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub chain: ChainSection,
    #[serde(default)]
    pub sync: SyncSection,
    #[serde(default)]
    pub rpc: RpcSection,
    #[serde(default)]
    pub notifications: NotificationsSection,
    #[serde(default)]
    pub observability: ObservabilitySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSection {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Governor contract.
    #[serde(default = "default_contract_address")]
    pub contract_address: Address,
    /// Sending account for `eth_sendTransaction`; the node's default
    /// account when unset.
    #[serde(default)]
    pub from_address: Option<Address>,
    #[serde(default)]
    pub from_block: u64,
    #[serde(default = "default_seconds_per_block")]
    pub seconds_per_block: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncSection {
    #[serde(default = "default_poll_ms")]
    pub block_poll_interval_ms: u64,
    #[serde(default = "default_poll_ms")]
    pub event_poll_interval_ms: u64,
    #[serde(default = "default_channel_capacity")]
    pub event_channel_capacity: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcSection {
    #[serde(default = "default_rpc_listen")]
    pub listen_addr: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationsSection {
    #[serde(default = "default_max_queued")]
    pub max_queued: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObservabilitySection {
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub module_levels: Option<String>,
}

// Default value functions
fn default_rpc_url() -> String { "http://127.0.0.1:8545".to_string() }
fn default_chain_id() -> u64 { 31337 }
fn default_contract_address() -> Address { Address::ZERO }
fn default_seconds_per_block() -> u64 { crate::sync::SECONDS_PER_BLOCK }
fn default_request_timeout_ms() -> u64 { 30_000 }
fn default_poll_ms() -> u64 { 4_000 }
fn default_channel_capacity() -> usize { 256 }
fn default_rpc_listen() -> String { "127.0.0.1:7545".to_string() }
fn default_max_queued() -> usize { 16 }
fn default_true() -> bool { true }
fn default_log_format() -> String { "pretty".to_string() }
fn default_log_level() -> String { "info".to_string() }

// Default impls
impl Default for ChainSection {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            contract_address: default_contract_address(),
            from_address: None,
            from_block: 0,
            seconds_per_block: default_seconds_per_block(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
impl Default for SyncSection {
    fn default() -> Self {
        Self {
            block_poll_interval_ms: default_poll_ms(),
            event_poll_interval_ms: default_poll_ms(),
            event_channel_capacity: default_channel_capacity(),
        }
    }
}
impl Default for RpcSection {
    fn default() -> Self {
        Self { listen_addr: default_rpc_listen() }
    }
}
impl Default for NotificationsSection {
    fn default() -> Self {
        Self { max_queued: default_max_queued() }
    }
}
impl Default for ObservabilitySection {
    fn default() -> Self {
        Self { metrics_enabled: true }
    }
}
impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
            module_levels: None,
        }
    }
}

impl ChainSection {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl SyncSection {
    pub fn block_poll_interval(&self) -> Duration {
        Duration::from_millis(self.block_poll_interval_ms)
    }

    pub fn event_poll_interval(&self) -> Duration {
        Duration::from_millis(self.event_poll_interval_ms)
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file. Falls back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from file if it exists, otherwise return defaults. A file that
    /// exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML string (useful for generating template configs).
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

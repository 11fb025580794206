pub mod abi;
pub mod client;
pub mod http;
pub mod watch;

pub use abi::AbiError;
pub use client::ChainClient;
pub use http::HttpRpcClient;
pub use watch::{BlockWatcher, EventWatcher};

/// Failure talking to the chain node or wallet layer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("abi error: {0}")]
    Abi(#[from] AbiError),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Innermost human-readable message, without the variant prefix. This
    /// is what a user sees when a write is rejected.
    pub fn cause(&self) -> String {
        match self {
            ClientError::Transport(m) | ClientError::InvalidResponse(m) => m.clone(),
            ClientError::Rpc { message, .. } => message.clone(),
            ClientError::Abi(e) => e.to_string(),
        }
    }
}

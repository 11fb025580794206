use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use ethabi::ethereum_types::H256;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::chain::abi::{self, RawLog};
use crate::chain::{ChainClient, ClientError};
use crate::metrics::Metrics;
use crate::rpc::types::{JsonRpcRequest, JsonRpcResponse};
use crate::types::{Address, ProposalCreated, TxHash, WriteRequest};

/// [`ChainClient`] over Ethereum JSON-RPC (HTTP POST).
///
/// Writes go through `eth_sendTransaction`, so signing is left to the node
/// or wallet behind `url` (e.g. an unlocked dev-chain account).
pub struct HttpRpcClient {
    url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
    metrics: Option<Arc<Metrics>>,
}

impl HttpRpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            http,
            next_id: AtomicU64::new(1),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);

        let start = Instant::now();
        let result = self.send(&req).await;
        if let Some(m) = &self.metrics {
            m.chain_request_duration.observe(start.elapsed().as_secs_f64());
            if result.is_err() {
                m.chain_request_failures.inc();
            }
        }
        debug!(method = method, id = id, ok = result.is_ok(), "Chain RPC call");
        result
    }

    async fn send(&self, req: &JsonRpcRequest) -> Result<Value, ClientError> {
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let body: JsonRpcResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        body.into_result().map_err(|e| ClientError::Rpc {
            code: e.code,
            message: e.message,
        })
    }
}

#[async_trait]
impl ChainClient for HttpRpcClient {
    async fn block_number(&self) -> Result<u64, ClientError> {
        let v = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&v)
    }

    async fn proposal_created_logs(
        &self,
        contract: Address,
        from_block: u64,
    ) -> Result<Vec<ProposalCreated>, ClientError> {
        let filter = json!([{
            "address": contract.to_string(),
            "fromBlock": format_quantity(from_block),
            "toBlock": "latest",
            "topics": [format!("0x{}", hex::encode(abi::proposal_created_topic().0))],
        }]);
        let v = self.call("eth_getLogs", filter).await?;
        let logs: Vec<RpcLog> = serde_json::from_value(v)
            .map_err(|e| ClientError::InvalidResponse(format!("eth_getLogs: {}", e)))?;

        logs.into_iter()
            .map(|log| {
                let raw = log.into_raw()?;
                Ok(abi::decode_proposal_created(&raw)?)
            })
            .collect()
    }

    async fn write_contract(&self, request: WriteRequest) -> Result<TxHash, ClientError> {
        let data = abi::encode_call(&request.call);
        let mut tx = json!({
            "to": request.contract.to_string(),
            "data": format!("0x{}", hex::encode(data)),
        });
        if let Some(from) = request.from {
            tx["from"] = json!(from.to_string());
        }

        let v = self.call("eth_sendTransaction", json!([tx])).await?;
        v.as_str()
            .ok_or_else(|| ClientError::InvalidResponse("transaction hash is not a string".into()))?
            .parse::<TxHash>()
            .map_err(|e| ClientError::InvalidResponse(format!("transaction hash: {}", e)))
    }
}

/// Log object as returned by `eth_getLogs`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcLog {
    topics: Vec<String>,
    data: String,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    transaction_hash: Option<String>,
}

impl RpcLog {
    fn into_raw(self) -> Result<RawLog, ClientError> {
        let topics = self
            .topics
            .iter()
            .map(|t| decode_hex(t).and_then(|b| to_h256(&b)))
            .collect::<Result<Vec<_>, _>>()?;
        let data = decode_hex(&self.data)?;
        let block_number = match self.block_number {
            Some(n) => Some(parse_quantity(&Value::String(n))?),
            None => None,
        };
        let transaction_hash = match self.transaction_hash {
            Some(h) => Some(
                h.parse::<TxHash>()
                    .map_err(|e| ClientError::InvalidResponse(format!("log tx hash: {}", e)))?,
            ),
            None => None,
        };
        Ok(RawLog {
            topics,
            data,
            block_number,
            transaction_hash,
        })
    }
}

/// Hex quantity ("0x1b4") to u64.
pub fn parse_quantity(v: &Value) -> Result<u64, ClientError> {
    let s = v
        .as_str()
        .ok_or_else(|| ClientError::InvalidResponse(format!("expected hex quantity, got {}", v)))?;
    let body = s
        .strip_prefix("0x")
        .ok_or_else(|| ClientError::InvalidResponse(format!("quantity without 0x: {}", s)))?;
    u64::from_str_radix(body, 16)
        .map_err(|e| ClientError::InvalidResponse(format!("quantity {}: {}", s, e)))
}

pub fn format_quantity(n: u64) -> String {
    format!("0x{:x}", n)
}

fn decode_hex(s: &str) -> Result<Vec<u8>, ClientError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
        .map_err(|e| ClientError::InvalidResponse(format!("hex: {}", e)))
}

fn to_h256(bytes: &[u8]) -> Result<H256, ClientError> {
    if bytes.len() != 32 {
        return Err(ClientError::InvalidResponse(format!(
            "topic must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(H256::from_slice(bytes))
}

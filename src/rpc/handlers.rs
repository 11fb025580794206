use std::sync::Arc;

use serde_json::{json, Value};

use crate::metrics::Metrics;
use crate::rpc::types::*;
use crate::session::{GovernanceSession, VoteError};
use crate::types::VoteChoice;

/// Shared state accessible by all control API handlers.
pub struct RpcState {
    pub session: Arc<GovernanceSession>,
    pub metrics: Arc<Metrics>,
    pub chain_id: u64,
    pub contract_address: String,
}

/// Route a JSON-RPC request to the appropriate handler.
pub async fn dispatch(state: &RpcState, req: JsonRpcRequest) -> JsonRpcResponse {
    state.metrics.api_requests.inc();
    match req.method.as_str() {
        "proposals" => handle_proposals(state, req.id).await,
        "block_number" => handle_block_number(state, req.id).await,
        "set_proposal_input" => handle_set_proposal_input(state, req.params, req.id),
        "add_proposal" => handle_add_proposal(state, req.id).await,
        "select_vote" => handle_select_vote(state, req.params, req.id),
        "submit_vote" => handle_submit_vote(state, req.params, req.id).await,
        "notifications" => handle_notifications(state, req.id),
        "status" => handle_status(state, req.id).await,
        _ => JsonRpcResponse::error(req.id, ERR_METHOD_NOT_FOUND, "method not found".into()),
    }
}

/// proposals: the rendered proposal list.
async fn handle_proposals(state: &RpcState, id: Value) -> JsonRpcResponse {
    let cards = state.session.render().await;
    match serde_json::to_value(&cards) {
        Ok(v) => JsonRpcResponse::success(id, json!({ "proposals": v })),
        Err(e) => JsonRpcResponse::error(id, ERR_INTERNAL, format!("encode error: {}", e)),
    }
}

async fn handle_block_number(state: &RpcState, id: Value) -> JsonRpcResponse {
    let height = state.session.view().read().await.current_block_number();
    JsonRpcResponse::success(id, json!({ "height": height }))
}

/// set_proposal_input: replace the contents of the proposal input field.
fn handle_set_proposal_input(state: &RpcState, params: Value, id: Value) -> JsonRpcResponse {
    let text = match params.get("text").and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return JsonRpcResponse::error(id, ERR_INVALID_PARAMS, "missing 'text'".into()),
    };
    state.session.handle_input_change(text);
    JsonRpcResponse::success(id, json!({ "text": text }))
}

/// add_proposal: submit the input field as a proposal and wait for the
/// wallet layer. Failures carry no detail; they are only logged.
async fn handle_add_proposal(state: &RpcState, id: Value) -> JsonRpcResponse {
    match state.session.add_proposal().await {
        Some(tx) => JsonRpcResponse::success(id, json!({ "status": "submitted", "tx_hash": tx.to_string() })),
        None => JsonRpcResponse::success(id, json!({ "status": "failed" })),
    }
}

/// select_vote: record a choice for the proposal at `index`.
fn handle_select_vote(state: &RpcState, params: Value, id: Value) -> JsonRpcResponse {
    let index = match parse_index(&params) {
        Some(i) => i,
        None => return JsonRpcResponse::error(id, ERR_INVALID_PARAMS, "missing 'index'".into()),
    };
    let choice = match params.get("choice") {
        Some(Value::String(s)) => s.parse::<VoteChoice>().ok(),
        Some(Value::Number(n)) => n.as_u64().and_then(|c| u8::try_from(c).ok()).and_then(VoteChoice::from_code),
        _ => None,
    };
    let choice = match choice {
        Some(c) => c,
        None => return JsonRpcResponse::error(id, ERR_INVALID_PARAMS, "invalid 'choice'".into()),
    };
    state.session.handle_vote_selection(index, choice);
    JsonRpcResponse::success(id, json!({ "index": index, "choice": choice }))
}

/// submit_vote: fire the castVote call for `index` without waiting for it.
/// Submission errors surface later through `notifications`.
async fn handle_submit_vote(state: &RpcState, params: Value, id: Value) -> JsonRpcResponse {
    let index = match parse_index(&params) {
        Some(i) => i,
        None => return JsonRpcResponse::error(id, ERR_INVALID_PARAMS, "missing 'index'".into()),
    };
    match state.session.submit_vote(index).await {
        Ok(_pending) => JsonRpcResponse::success(id, json!({ "status": "pending" })),
        Err(VoteError::Validation) => {
            JsonRpcResponse::error(id, ERR_VOTE_VALIDATION, VoteError::Validation.to_string())
        }
        Err(e @ VoteError::Submission(_)) => JsonRpcResponse::error(id, ERR_SUBMISSION, e.to_string()),
    }
}

/// notifications: drain queued user notifications.
fn handle_notifications(state: &RpcState, id: Value) -> JsonRpcResponse {
    let pending = state.session.take_notifications();
    match serde_json::to_value(&pending) {
        Ok(v) => JsonRpcResponse::success(id, json!({ "notifications": v })),
        Err(e) => JsonRpcResponse::error(id, ERR_INTERNAL, format!("encode error: {}", e)),
    }
}

async fn handle_status(state: &RpcState, id: Value) -> JsonRpcResponse {
    let view = state.session.view().read().await;
    JsonRpcResponse::success(
        id,
        json!({
            "chain_id": state.chain_id,
            "contract": state.contract_address,
            "latest_block_height": view.current_block_number(),
            "proposals": view.proposals().len(),
        }),
    )
}

fn parse_index(params: &Value) -> Option<usize> {
    params
        .get("index")
        .and_then(|v| v.as_u64())
        .and_then(|i| usize::try_from(i).ok())
}

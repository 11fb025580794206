use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::watch;

use crate::rpc::handlers::{dispatch, RpcState};
use crate::rpc::types::{JsonRpcRequest, JsonRpcResponse, ERR_INVALID_REQUEST};

/// Control API: JSON-RPC 2.0 over `POST /`, probes, and `GET /metrics`.
pub struct RpcServer {
    pub listen_addr: String,
    pub metrics_enabled: bool,
    pub state: Arc<RpcState>,
}

impl RpcServer {
    pub fn new(listen_addr: String, metrics_enabled: bool, state: Arc<RpcState>) -> Self {
        Self {
            listen_addr,
            metrics_enabled,
            state,
        }
    }

    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/", post(handle_jsonrpc))
            .route("/health", get(handle_health))
            .route("/ready", get(handle_ready));
        if self.metrics_enabled {
            app = app.route("/metrics", get(handle_metrics));
        }
        app.with_state(self.state.clone())
    }

    /// Serve until `shutdown` flips to true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), anyhow::Error> {
        let app = self.router();
        let addr: SocketAddr = self.listen_addr.parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                while !*shutdown.borrow() {
                    if shutdown.changed().await.is_err() {
                        return;
                    }
                }
            })
            .await?;
        Ok(())
    }
}

async fn handle_jsonrpc(
    State(state): State<Arc<RpcState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    if req.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::error(
            req.id,
            ERR_INVALID_REQUEST,
            "jsonrpc must be '2.0'".into(),
        ));
    }
    let resp = dispatch(&state, req).await;
    Json(resp)
}

/// Liveness probe.
async fn handle_health(State(state): State<Arc<RpcState>>) -> impl IntoResponse {
    let height = state.session.view().read().await.current_block_number();
    let body = json!({
        "healthy": true,
        "checks": {
            "chain": { "status": "ok", "latest_height": height },
        }
    });
    (StatusCode::OK, Json(body))
}

/// Ready once a block has been observed.
async fn handle_ready(State(state): State<Arc<RpcState>>) -> impl IntoResponse {
    let height = state.session.view().read().await.current_block_number();
    let ready = height > 0;

    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let body = json!({
        "ready": ready,
        "latest_height": height,
    });
    (status, Json(body))
}

async fn handle_metrics(State(state): State<Arc<RpcState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
    }
}

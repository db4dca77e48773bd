use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{mcp, AppState};

/// `/health` + JSON-RPC MCP endpoint at `/mcp`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/mcp", post(mcp::http))
        .with_state(state)
}

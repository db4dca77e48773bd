use axum::http::StatusCode;
use axum::Json;

use crate::core::error::GatewayError;
use crate::core::mcp::{ok as rpc_ok, RequestId, RpcResp};

pub type Reply = (StatusCode, Json<RpcResp>);

pub fn ok(id: Option<RequestId>, result: serde_json::Value) -> Reply {
    (StatusCode::OK, Json(rpc_ok(id, result)))
}

pub fn parse_error(message: impl Into<String>) -> Reply {
    from_gateway_error(None, GatewayError::Parse(message.into()))
}

/// Map a GatewayError onto its JSON-RPC error envelope and HTTP status.
pub fn from_gateway_error(id: Option<RequestId>, err: GatewayError) -> Reply {
    let status = err.http_status();
    (status, Json(err.into_rpc(id)))
}

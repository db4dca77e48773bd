use axum::http::StatusCode;
use thiserror::Error;

use crate::clients::likeminds::UpstreamError;
use crate::core::mcp::{
    self, RequestId, RpcResp, INTERNAL_ERROR, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    SERVER_ERROR,
};

/// Gateway-wide error model for uniform HTTP/JSON-RPC mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),
    #[error("Invalid protocolVersion: expected {expected}, got {received}")]
    ProtocolVersion { expected: &'static str, received: String },
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("{0}")]
    ToolInvocation(String),
    #[error("Internal server error")]
    Internal(String),
}

impl GatewayError {
    pub fn code(&self) -> i32 {
        match self {
            GatewayError::Parse(_) => PARSE_ERROR,
            GatewayError::InvalidRequest(_) => INVALID_REQUEST,
            GatewayError::MethodNotFound(_) | GatewayError::ToolNotFound(_) => METHOD_NOT_FOUND,
            GatewayError::ProtocolVersion { .. } | GatewayError::ToolInvocation(_) => SERVER_ERROR,
            GatewayError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Protocol-level errors still succeed at the HTTP layer.
    pub fn http_status(&self) -> StatusCode {
        match self {
            GatewayError::Parse(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    pub fn into_rpc(self, id: Option<RequestId>) -> RpcResp {
        let data = match &self {
            GatewayError::Internal(detail) => Some(serde_json::Value::String(detail.clone())),
            _ => None,
        };
        mcp::err(id, self.code(), self.to_string(), data)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Internal(e.to_string())
    }
}

/// Failure inside a tool handler. Never leaves the handler as a protocol error.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("{0}")]
    Message(String),
}

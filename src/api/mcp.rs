use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value as J};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::api::AppState;
use crate::core::error::GatewayError;
use crate::core::mcp::{InitializeResult, RequestId, RpcReq, RpcResp, PROTOCOL_VERSION};
use crate::infra::http::json as http_json;
use crate::tools::registry::ToolRegistry;

fn tools_list(reg: &ToolRegistry) -> Result<J, GatewayError> {
    Ok(json!({ "tools": serde_json::to_value(reg.list())? }))
}

fn initialize(state: &AppState, req: &RpcReq) -> Result<J, GatewayError> {
    let received = req.param("protocolVersion");
    if received.and_then(J::as_str) != Some(PROTOCOL_VERSION) {
        let received = match received {
            Some(J::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "none".to_string(),
        };
        return Err(GatewayError::ProtocolVersion { expected: PROTOCOL_VERSION, received });
    }
    let session_id = uuid::Uuid::new_v4();
    tracing::info!(%session_id, "session initialized");
    Ok(serde_json::to_value(InitializeResult::new(state.server.clone()))?)
}

async fn call_tool(reg: &ToolRegistry, req: &RpcReq) -> Result<J, GatewayError> {
    let name = match req.param("name") {
        None | Some(J::Null) => {
            return Err(GatewayError::ToolInvocation("missing tool name".into()))
        }
        Some(J::String(s)) => s.as_str(),
        Some(other) => return Err(GatewayError::ToolNotFound(other.to_string())),
    };
    let tool = reg
        .get(name)
        .ok_or_else(|| GatewayError::ToolNotFound(name.to_string()))?;
    let args = req
        .param("arguments")
        .cloned()
        .ok_or_else(|| GatewayError::ToolInvocation(format!("missing arguments for tool: {name}")))?;

    // Detached task: the upstream call completes even if the caller goes away.
    let result = tokio::spawn(async move { tool.call(&args).await })
        .await
        .map_err(|e| GatewayError::ToolInvocation(format!("tool {name} failed: {e}")))?;
    Ok(serde_json::to_value(result)?)
}

/// Route a validated envelope to its method.
pub async fn dispatch(state: &AppState, req: &RpcReq) -> Result<J, GatewayError> {
    match req.method.as_str() {
        "initialize" => initialize(state, req),
        "tools/list" => tools_list(&state.registry),
        "tools/call" => call_tool(&state.registry, req).await,
        "resources/list" => Ok(json!({ "resources": [] })),
        "prompts/list" => Ok(json!({ "prompts": [] })),
        other => Err(GatewayError::MethodNotFound(other.to_string())),
    }
}

/// Process one raw message body into a status and reply envelope.
pub async fn handle_message(state: &AppState, body: &[u8]) -> (StatusCode, RpcResp) {
    let value: J = match serde_json::from_slice(body) {
        Ok(v @ J::Object(_)) => v,
        Ok(_) => return unwrap_reply(http_json::parse_error("expected a JSON object")),
        Err(_) => return unwrap_reply(http_json::parse_error("Invalid JSON")),
    };
    let fallback_id = RequestId::lenient(&value);

    let req = match RpcReq::from_value(value) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "rejected envelope");
            return unwrap_reply(http_json::from_gateway_error(fallback_id, e));
        }
    };

    tracing::debug!(method = %req.method, id = ?req.id, "dispatching");
    match dispatch(state, &req).await {
        Ok(result) => unwrap_reply(http_json::ok(req.id, result)),
        Err(e) => {
            match &e {
                GatewayError::Internal(detail) => {
                    tracing::error!(method = %req.method, error = %detail, "internal error")
                }
                _ => tracing::warn!(method = %req.method, error = %e, "request failed"),
            }
            unwrap_reply(http_json::from_gateway_error(req.id, e))
        }
    }
}

fn unwrap_reply((status, Json(resp)): http_json::Reply) -> (StatusCode, RpcResp) {
    (status, resp)
}

// HTTP handler
pub async fn http(State(state): State<AppState>, body: Bytes) -> http_json::Reply {
    let (status, resp) = handle_message(&state, &body).await;
    tracing::trace!(status = status.as_u16(), response = ?resp, "HTTP handler completed");
    (status, Json(resp))
}

// Stdio loop: one envelope per line in, one per line out.
pub async fn stdio_loop(state: AppState) -> anyhow::Result<()> {
    tracing::info!("mode=stdio");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let (_, resp) = handle_message(&state, line.as_bytes()).await;
        let mut out = serde_json::to_vec(&resp)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }
    Ok(())
}

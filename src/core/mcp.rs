//! Shared MCP protocol surface: JSON-RPC envelopes and handshake payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

use crate::core::error::GatewayError;

/// The only protocol version accepted by `initialize`.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;
pub const SERVER_ERROR: i32 = -32000;

/// JSON-RPC request id. Null and absent ids are both `None` on the envelope.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Num(serde_json::Number),
    Str(String),
}

impl RequestId {
    /// Best-effort id extraction for error replies to envelopes that failed validation.
    pub fn lenient(body: &J) -> Option<RequestId> {
        match body.get("id")? {
            J::Number(n) => Some(RequestId::Num(n.clone())),
            J::String(s) => Some(RequestId::Str(s.clone())),
            _ => None,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RpcReq {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<J>,
}

impl RpcReq {
    /// Validate an already-parsed JSON object into a typed envelope.
    pub fn from_value(body: J) -> Result<Self, GatewayError> {
        let req: RpcReq = serde_json::from_value(body)
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        match req.jsonrpc.as_deref() {
            None | Some("2.0") => Ok(req),
            Some(other) => Err(GatewayError::InvalidRequest(format!(
                "unsupported jsonrpc version: {other}"
            ))),
        }
    }

    pub fn param(&self, key: &str) -> Option<&J> {
        self.params.as_ref().and_then(|p| p.get(key))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RpcResp {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub fn ok(id: Option<RequestId>, result: J) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: Some(result), error: None }
}

pub fn err(id: Option<RequestId>, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: None, error: Some(RpcErr { code, message: msg.into(), data }) }
}

// --- initialize handshake ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: Capabilities::default(),
            server_info,
        }
    }
}

/// Advertised capabilities. Each is present but empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Capabilities {
    pub tools: Capability,
    pub resources: Capability,
    pub prompts: Capability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Capability {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_serializes_initialize_result_in_camel_case() {
        let v = InitializeResult::new(ServerInfo { name: "gw".into(), version: "0.1".into() });
        let j = serde_json::to_value(&v).unwrap();
        assert_eq!(j["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(j["serverInfo"]["name"], "gw");
        assert_eq!(j["capabilities"], json!({"tools": {}, "resources": {}, "prompts": {}}));
    }

    #[test]
    fn it_accepts_string_number_and_null_ids() {
        let r = RpcReq::from_value(json!({"jsonrpc":"2.0","id":"abc","method":"x"})).unwrap();
        assert_eq!(r.id, Some(RequestId::Str("abc".into())));
        let r = RpcReq::from_value(json!({"jsonrpc":"2.0","id":7,"method":"x"})).unwrap();
        assert_eq!(r.id, Some(RequestId::Num(7.into())));
        let r = RpcReq::from_value(json!({"jsonrpc":"2.0","id":null,"method":"x"})).unwrap();
        assert_eq!(r.id, None);
    }

    #[test]
    fn it_rejects_missing_method_and_bad_version() {
        let e = RpcReq::from_value(json!({"jsonrpc":"2.0","id":1})).unwrap_err();
        assert!(matches!(e, GatewayError::InvalidRequest(_)));
        let e = RpcReq::from_value(json!({"jsonrpc":"1.0","id":1,"method":"x"})).unwrap_err();
        assert!(e.to_string().contains("1.0"));
        let e = RpcReq::from_value(json!({"id":true,"method":"x"})).unwrap_err();
        assert!(matches!(e, GatewayError::InvalidRequest(_)));
    }

    #[test]
    fn lenient_id_ignores_non_scalar_ids() {
        assert_eq!(RequestId::lenient(&json!({"id": [1]})), None);
        assert_eq!(RequestId::lenient(&json!({"id": 3})), Some(RequestId::Num(3.into())));
    }

    #[test]
    fn response_echoes_null_id() {
        let s = serde_json::to_string(&ok(None, json!({}))).unwrap();
        assert!(s.contains(r#""id":null"#));
        assert!(!s.contains("error"));
    }
}

use axum::body::{to_bytes, Body};
use axum::Router;
use hyper::{Request, StatusCode};
use likeminds_mcp_gateway::api::AppState;
use likeminds_mcp_gateway::infra::{config::Config, http_app::build_app};
use likeminds_mcp_gateway::tools::build_registry;
use serde_json::{json, Value as J};
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

fn app() -> Router {
    let cfg = Config {
        server_name: "lm-gateway-test".into(),
        server_version: "3.2.1".into(),
        ..Config::default()
    };
    build_app(AppState::new(build_registry(&cfg).unwrap(), &cfg))
}

async fn rpc(app: &Router, body: J) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn http_e2e_initialize_list_and_add() {
    let app = app();

    let (status, body) = rpc(
        &app,
        json!({"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let v: J = serde_json::from_str(&body).unwrap();
    assert_eq!(v["id"], 1);
    assert_eq!(v["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(
        v["result"]["capabilities"],
        json!({"tools": {}, "resources": {}, "prompts": {}})
    );
    assert_eq!(v["result"]["serverInfo"], json!({"name": "lm-gateway-test", "version": "3.2.1"}));

    let (_, body) = rpc(&app, json!({"jsonrpc":"2.0","id":2,"method":"tools/list"})).await;
    let v: J = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = v["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["likeminds_query", "flutter_chat_integration", "add"]);

    let (_, body) = rpc(
        &app,
        json!({"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"add","arguments":{"a":2,"b":3}}}),
    )
    .await;
    let v: J = serde_json::from_str(&body).unwrap();
    assert_eq!(v["result"], json!({"content": [{"type": "text", "text": "The sum of 2 and 3 is 5"}]}));
}

#[tokio::test]
async fn repeated_list_and_initialize_are_byte_identical() {
    let app = app();
    let list = json!({"jsonrpc":"2.0","id":7,"method":"tools/list"});
    assert_eq!(rpc(&app, list.clone()).await.1, rpc(&app, list).await.1);

    let init = json!({"jsonrpc":"2.0","id":8,"method":"initialize","params":{"protocolVersion":"2025-06-18"}});
    assert_eq!(rpc(&app, init.clone()).await.1, rpc(&app, init).await.1);
}

#[tokio::test]
async fn wrong_protocol_version_never_returns_result() {
    let app = app();
    for version in [json!("2024-11-05"), json!(""), json!(20250618), J::Null] {
        let (status, body) = rpc(
            &app,
            json!({"jsonrpc":"2.0","id":"v","method":"initialize","params":{"protocolVersion": version}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let v: J = serde_json::from_str(&body).unwrap();
        assert_eq!(v["error"]["code"], -32000);
        assert_eq!(v["id"], "v");
        assert!(v.get("result").is_none());
    }
}

#[tokio::test]
async fn malformed_bodies_are_parse_errors() {
    let app = app();
    for raw in ["", "{", "[]", "true"] {
        let req = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {raw:?}");
        let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
        let v: J = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"]["code"], -32700);
        assert_eq!(v["id"], J::Null);
    }
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

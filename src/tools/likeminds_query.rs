use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::clients::likeminds::LikeMindsClient;
use crate::core::error::ToolError;
use crate::core::tool::{parse_args, Tool, ToolSpec};
use crate::domain::format_response;
use crate::infra::logging::preview;

#[derive(Clone)]
pub struct LikeMindsQueryTool {
    client: LikeMindsClient,
}

impl LikeMindsQueryTool {
    pub fn new(client: LikeMindsClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
    #[serde(default)]
    context: Option<String>,
}

impl ToolSpec for LikeMindsQueryTool {
    fn name(&self) -> &'static str {
        "likeminds_query"
    }
    fn description(&self) -> &'static str {
        "Query LikeMinds AI Agent for chat SDK integration help"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Your question about LikeMinds chat SDK integration"
                },
                "context": {
                    "type": "string",
                    "description": "Additional context (platform, specific issue, etc.)"
                }
            },
            "required": ["query"]
        })
    }
}

#[async_trait]
impl Tool for LikeMindsQueryTool {
    fn failure_context(&self) -> &'static str {
        "querying LikeMinds AI Agent"
    }

    async fn run(&self, arguments: &serde_json::Value) -> Result<String, ToolError> {
        let args: QueryArgs = parse_args(arguments)?;
        tracing::info!(query = %preview(&args.query, 80), "likeminds_query");
        let resp = self
            .client
            .query_ai_agent(&args.query, args.context.as_deref())
            .await?;
        Ok(format_response(&resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn it_calls_remote_and_formats_answer() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/ai-agent/query")
                .json_body(json!({"query": "How do I join a chatroom?", "context": "iOS"}));
            then.status(200)
                .json_body(json!({"success": true, "data": {"answer": "Call joinChatroom."}}));
        });

        let tool = LikeMindsQueryTool::new(LikeMindsClient::new(server.base_url()).unwrap());
        let out = tool
            .call(&json!({"query": "How do I join a chatroom?", "context": "iOS"}))
            .await;
        assert_eq!(out.first_text(), "## Answer\nCall joinChatroom.");
    }

    #[tokio::test]
    async fn upstream_failure_becomes_error_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/ai-agent/query");
            then.status(500).body("boom");
        });

        let tool = LikeMindsQueryTool::new(LikeMindsClient::new(server.base_url()).unwrap());
        let out = tool.call(&json!({"query": "x"})).await;
        assert_eq!(out.first_text(), "Error querying LikeMinds AI Agent: HTTP 500: boom");
    }

    #[tokio::test]
    async fn it_validates_missing_query() {
        let tool = LikeMindsQueryTool::new(LikeMindsClient::new("http://localhost:0").unwrap());
        let out = tool.call(&json!({})).await;
        assert!(out
            .first_text()
            .starts_with("Error querying LikeMinds AI Agent: invalid arguments:"));
    }
}

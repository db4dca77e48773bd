use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::clients::likeminds::LikeMindsClient;
use crate::core::error::ToolError;
use crate::core::tool::{parse_args, Tool, ToolSpec};
use crate::domain::format_flutter_response;
use crate::infra::logging::preview;

#[derive(Clone)]
pub struct FlutterChatTool {
    client: LikeMindsClient,
}

impl FlutterChatTool {
    pub fn new(client: LikeMindsClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct FlutterArgs {
    user_query: String,
}

impl ToolSpec for FlutterChatTool {
    fn name(&self) -> &'static str {
        "flutter_chat_integration"
    }
    fn description(&self) -> &'static str {
        "Generate Flutter code for integrating LikeMinds chat SDK"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "user_query": {
                    "type": "string",
                    "description": "Request for Flutter chat SDK integration"
                }
            },
            "required": ["user_query"]
        })
    }
}

#[async_trait]
impl Tool for FlutterChatTool {
    fn failure_context(&self) -> &'static str {
        "generating Flutter chat integration code"
    }

    async fn run(&self, arguments: &serde_json::Value) -> Result<String, ToolError> {
        let args: FlutterArgs = parse_args(arguments)?;
        tracing::info!(user_query = %preview(&args.user_query, 80), "flutter_chat_integration");
        let resp = self.client.generate_flutter_code(&args.user_query).await?;
        Ok(format_flutter_response(&resp))
    }
}

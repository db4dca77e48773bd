use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};

use crate::core::content::ToolResult;
use crate::core::error::ToolError;

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
}

/// Tool = Spec + handler. `run` may fail; `call` never does.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    /// Gerund phrase used in failure text, e.g. "adding numbers".
    fn failure_context(&self) -> &'static str;

    async fn run(&self, arguments: &serde_json::Value) -> Result<String, ToolError>;

    async fn call(&self, arguments: &serde_json::Value) -> ToolResult {
        match self.run(arguments).await {
            Ok(text) => ToolResult::text(text),
            Err(e) => {
                tracing::error!(tool = self.name(), error = %e, "tool execution failed");
                ToolResult::text(format!("Error {}: {e}", self.failure_context()))
            }
        }
    }
}

/// Deserialize tool arguments into their typed form.
pub fn parse_args<T: DeserializeOwned>(arguments: &serde_json::Value) -> Result<T, ToolError> {
    Ok(T::deserialize(arguments)?)
}

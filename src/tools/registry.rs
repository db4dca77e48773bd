use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::clients::likeminds::{LikeMindsClient, UpstreamError};
use crate::core::tool::Tool;
use crate::infra::config::Config;
use crate::tools::{AddTool, FlutterChatTool, LikeMindsQueryTool};

/// Immutable, ordered tool table. Cloning shares the same tables.
#[derive(Clone)]
pub struct ToolRegistry {
    ordered: Arc<Vec<Arc<dyn Tool>>>,
    by_name: Arc<HashMap<&'static str, usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

impl ToolRegistry {
    /// Build from tools in registration order. A later duplicate name replaces the earlier entry.
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut ordered: Vec<Arc<dyn Tool>> = Vec::new();
        let mut by_name: HashMap<&'static str, usize> = HashMap::new();
        for tool in iter {
            match by_name.get(tool.name()) {
                Some(&idx) => ordered[idx] = tool,
                None => {
                    by_name.insert(tool.name(), ordered.len());
                    ordered.push(tool);
                }
            }
        }
        Self { ordered: Arc::new(ordered), by_name: Arc::new(by_name) }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.ordered
            .iter()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&idx| self.ordered[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Build the fixed gateway registry against the configured upstream.
pub fn build_registry(cfg: &Config) -> Result<ToolRegistry, UpstreamError> {
    let client = LikeMindsClient::new(cfg.api_base_url.clone())?;
    Ok(build_registry_with_client(client))
}

pub fn build_registry_with_client(client: LikeMindsClient) -> ToolRegistry {
    ToolRegistry::with_tools([
        Arc::new(LikeMindsQueryTool::new(client.clone())) as Arc<dyn Tool>,
        Arc::new(FlutterChatTool::new(client)),
        Arc::new(AddTool),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::error::ToolError;
    use crate::core::tool::ToolSpec;

    struct Echo(&'static str);

    impl ToolSpec for Echo {
        fn name(&self) -> &'static str {
            "test.echo"
        }
        fn description(&self) -> &'static str {
            self.0
        }
        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({"type":"object"})
        }
    }

    #[async_trait]
    impl Tool for Echo {
        fn failure_context(&self) -> &'static str {
            "echoing"
        }
        async fn run(&self, args: &serde_json::Value) -> Result<String, ToolError> {
            Ok(args.to_string())
        }
    }

    #[tokio::test]
    async fn registry_registers_lists_and_calls() {
        let reg = ToolRegistry::with_tools([Arc::new(Echo("echo tool")) as Arc<dyn Tool>]);
        let metas = reg.list();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "test.echo");
        let tool = reg.get("test.echo").unwrap();
        let out = tool.call(&serde_json::json!({"x": 2})).await;
        assert_eq!(out.first_text(), r#"{"x":2}"#);
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn duplicate_names_replace_in_place() {
        let reg = ToolRegistry::with_tools([
            Arc::new(Echo("first")) as Arc<dyn Tool>,
            Arc::new(Echo("second")),
        ]);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.list()[0].description, "second");
    }

    #[test]
    fn gateway_registry_lists_tools_in_registration_order() {
        let reg = build_registry(&Config::default()).unwrap();
        let names: Vec<&str> = reg.list().iter().map(|m| m.name).collect();
        assert_eq!(names, ["likeminds_query", "flutter_chat_integration", "add"]);
        assert_eq!(reg.list(), reg.list());
    }

    #[test]
    fn schemas_declare_required_arguments() {
        let reg = build_registry(&Config::default()).unwrap();
        let metas = reg.list();
        assert_eq!(metas[0].input_schema["required"], serde_json::json!(["query"]));
        assert_eq!(metas[1].input_schema["required"], serde_json::json!(["user_query"]));
        assert_eq!(metas[2].input_schema["required"], serde_json::json!(["a", "b"]));
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value as J};

use crate::core::error::ToolError;
use crate::core::tool::{parse_args, Tool, ToolSpec};

#[derive(Clone, Default)]
pub struct AddTool;

#[derive(Deserialize)]
struct AddArgs {
    a: J,
    b: J,
}

/// Coerce a number or numeric string. Numbers display like the sum; numeric strings keep their spelling.
fn coerce(name: &str, v: &J) -> Result<(f64, String), ToolError> {
    let parsed = match v {
        J::Number(n) => n.as_f64().map(|f| (f, f.to_string())),
        J::String(s) => s.trim().parse::<f64>().ok().map(|f| (f, s.clone())),
        _ => None,
    };
    match parsed {
        Some((f, shown)) if f.is_finite() => Ok((f, shown)),
        _ => Err(ToolError::Message(format!("argument '{name}' is not a number: {v}"))),
    }
}

impl ToolSpec for AddTool {
    fn name(&self) -> &'static str {
        "add"
    }
    fn description(&self) -> &'static str {
        "Add two numbers together"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "a": { "type": "number", "description": "First number" },
                "b": { "type": "number", "description": "Second number" }
            },
            "required": ["a", "b"]
        })
    }
}

#[async_trait]
impl Tool for AddTool {
    fn failure_context(&self) -> &'static str {
        "adding numbers"
    }

    async fn run(&self, arguments: &serde_json::Value) -> Result<String, ToolError> {
        let args: AddArgs = parse_args(arguments)?;
        let (a, a_shown) = coerce("a", &args.a)?;
        let (b, b_shown) = coerce("b", &args.b)?;
        let sum = a + b;
        if !sum.is_finite() {
            return Err(ToolError::Message("sum is not a finite number".into()));
        }
        let text = format!("The sum of {a_shown} and {b_shown} is {sum}");
        tracing::info!(%text, "add");
        Ok(text)
    }
}

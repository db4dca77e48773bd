//! Tool result content model.

use serde::Serialize;

/// Result of a `tools/call`. Always carries at least one content item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolResult {
    content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![Content::Text { text: text.into() }] }
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Text of the first item.
    pub fn first_text(&self) -> &str {
        match &self.content[0] {
            Content::Text { text } => text,
        }
    }
}

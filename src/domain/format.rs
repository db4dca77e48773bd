//! Render upstream JSON payloads as display text.
//!
//! Both formatters are total over any JSON value: missing or oddly typed fields
//! fall back to defaults instead of failing.

use serde_json::Value as J;

pub const NO_AGENT_RESPONSE: &str = "No response received from LikeMinds AI Agent";
pub const NO_FLUTTER_CODE: &str = "Error: No code generated from Flutter API";
pub const NO_FLUTTER_CONTENT: &str = "Error: No code content received from Flutter API";
const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Format a LikeMinds agent reply (`{success, message, data}`).
pub fn format_response(response: &J) -> String {
    if !truthy(response.get("success")) {
        return format!("Error: {}", text_or(response.get("message"), "Unknown error occurred"));
    }

    let data = response.get("data");
    let field = |key: &str| data.and_then(|d| d.get(key));
    let mut out: Vec<String> = Vec::new();

    if truthy(field("answer")) {
        out.push(format!("## Answer\n{}", text_or(field("answer"), "")));
    }

    let examples = array(field("code_examples"));
    if !examples.is_empty() {
        out.push("\n## Code Examples".into());
        for example in examples {
            let language = text_or(example.get("language"), DEFAULT_CODE_LANGUAGE);
            let code = text_or(example.get("code"), "");
            let description = text_or(example.get("description"), "");
            if !description.is_empty() {
                out.push(format!("\n### {description}"));
            }
            out.push(format!("\n```{language}\n{code}\n```"));
        }
    }

    let links = array(field("documentation_links"));
    if !links.is_empty() {
        out.push("\n## Documentation Links".into());
        for link in links {
            let title = text_or(link.get("title"), "Documentation");
            let url = text_or(link.get("url"), "");
            out.push(format!("- [{title}]({url})"));
        }
    }

    if out.is_empty() {
        NO_AGENT_RESPONSE.to_string()
    } else {
        out.join("\n")
    }
}

/// Format a Flutter code-generation reply (`{result: {choices, metadata}}`).
pub fn format_flutter_response(response: &J) -> String {
    let result = response.get("result");
    let choices = array(result.and_then(|r| r.get("choices")));
    let Some(first) = choices.first() else {
        return NO_FLUTTER_CODE.to_string();
    };

    let content = first.pointer("/message/content");
    if !truthy(content) {
        return NO_FLUTTER_CONTENT.to_string();
    }

    let mut out = vec!["## Generated Flutter Code\n".to_string(), text_or(content, "")];

    // Only a non-empty object counts as metadata.
    let metadata = result
        .and_then(|r| r.get("metadata"))
        .and_then(J::as_object)
        .filter(|m| !m.is_empty());

    if let Some(meta) = metadata {
        out.push("\n## Integration Details".into());

        let description = text_or(meta.get("description"), "");
        if !description.is_empty() {
            out.push(format!("\n### Description\n{description}"));
        }

        let suggested = meta.get("suggestedInsertion");
        let hint = |key: &str| suggested.and_then(|s| s.get(key));

        let file_path = text_or(hint("filePathHint"), "");
        if !file_path.is_empty() {
            out.push(format!("\n### File Structure\n{file_path}"));
        }

        let placement = text_or(hint("widgetPlacement"), "");
        if !placement.is_empty() {
            out.push(format!("\n### Placement Instructions\n{placement}"));
        }

        push_bullets(&mut out, "\n### Dependencies", array(hint("dependencies")));
        push_bullets(&mut out, "\n### Prerequisites", array(hint("preconditions")));
    }

    out.join("\n")
}

fn push_bullets(out: &mut Vec<String>, heading: &str, items: &[J]) {
    if items.is_empty() {
        return;
    }
    out.push(heading.to_string());
    out.extend(items.iter().map(|item| format!("- {}", text_or(Some(item), ""))));
}

/// JavaScript-style truthiness; absent counts as false.
fn truthy(v: Option<&J>) -> bool {
    match v {
        None | Some(J::Null) => false,
        Some(J::Bool(b)) => *b,
        Some(J::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(J::String(s)) => !s.is_empty(),
        Some(J::Array(_)) | Some(J::Object(_)) => true,
    }
}

/// Strings verbatim, other values as JSON text, absent/null as `default`.
fn text_or(v: Option<&J>, default: &str) -> String {
    match v {
        None | Some(J::Null) => default.to_string(),
        Some(J::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn array(v: Option<&J>) -> &[J] {
    v.and_then(J::as_array).map(Vec::as_slice).unwrap_or(&[])
}

//! ResponseFormatter - turn an OperationResult into model-facing text plus a
//! structured payload
//!
//! The text is a derived view. The structured channel always carries the
//! summary and every field of the result, whatever the text shows.

use serde_json::Value;
use tracing::debug;

use crate::tools::result::format_float;
use crate::tools::{OperationResult, ResultData};

/// Fields the generic renderer never repeats
const SKIPPED_KEYS: &[&str] = &["path", "summary", "entries", "content", "tree", "files", "counts"];

/// Render both channels of a result
pub fn render(result: &OperationResult) -> (String, Value) {
    (render_text(result), structured(result))
}

/// Summary line followed by the kind-specific body
pub fn render_text(result: &OperationResult) -> String {
    debug!(kind = ?result.kind(), "render_text: called");
    let mut lines = vec![result.summary.clone()];

    match &result.data {
        ResultData::Listing { entries, .. } => {
            if entries.is_empty() {
                lines.push("\nThe directory is empty.".to_string());
            } else {
                lines.push("\nHere are the items found:".to_string());
                lines.extend(entries.iter().map(|e| format!("- {}", e)));
            }
        }
        ResultData::Content {
            path,
            size_bytes,
            content: Some(content),
            ..
        } => {
            debug!(%path, %size_bytes, "render_text: text content");
            lines.push("\nFile Content:".to_string());
            lines.push("```".to_string());
            lines.push(content.clone());
            lines.push("```".to_string());
        }
        ResultData::Content {
            path,
            size_bytes,
            content: None,
            ..
        } => {
            let name = path.rsplit('/').next().unwrap_or(path.as_str());
            lines.push(format!("\n(binary file '{}', {} bytes)", name, size_bytes));
        }
        ResultData::Tree { tree, .. } => {
            lines.push("\nDirectory Structure:".to_string());
            lines.push("```".to_string());
            lines.extend(tree.iter().cloned());
            lines.push("```".to_string());
        }
        ResultData::LargeFiles { files, .. } => {
            lines.push("\nLarge Files Found:".to_string());
            lines.extend(
                files
                    .iter()
                    .map(|f| format!("- {} ({} MB)", f.path, format_float(f.size_mb))),
            );
        }
        ResultData::ExtensionCounts { counts, .. } => {
            lines.push("\nFile Counts by Extension:".to_string());
            lines.extend(counts.iter().map(|(ext, count)| format!("- {}: {}", ext, count)));
        }
        ResultData::Metadata { .. } | ResultData::SearchMatches { .. } | ResultData::DiskUsage { .. } => {
            lines.extend(generic_lines(&result.data));
        }
    }

    lines.join("\n")
}

/// `{summary, kind, data}` mirror of the result
pub fn structured(result: &OperationResult) -> Value {
    serde_json::json!({
        "summary": result.summary,
        "kind": result.kind(),
        "data": data_value(&result.data),
    })
}

fn data_value(data: &ResultData) -> Value {
    serde_json::to_value(data).unwrap_or_else(|e| {
        debug!(%e, "data_value: serialization failed");
        Value::Null
    })
}

/// One `- key: value` line per field, in declaration order
fn generic_lines(data: &ResultData) -> Vec<String> {
    match data_value(data) {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| !SKIPPED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| format!("- {}: {}", key, format_value(value)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Flatten a JSON value for a single text line
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Object(map) if map.is_empty() => "(none)".to_string(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) if items.is_empty() => "(none)".to_string(),
        Value::Array(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().filter(|_| n.is_f64()).map(format_float).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "None".to_string(),
    }
}

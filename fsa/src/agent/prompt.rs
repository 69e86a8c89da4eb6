//! System instruction rendering
//!
//! The built-in instruction is compiled in from `prompts/system.pmt`; a config
//! override replaces it. Either is rendered with handlebars against the root
//! path and the tool catalog.

use std::path::Path;

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::llm::ToolDefinition;

/// Built-in system instruction template
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

#[derive(Debug, Serialize)]
struct PromptContext {
    root: String,
    tools: Vec<String>,
}

/// Render `template` (or the built-in one) for this root and catalog
pub fn render_system_prompt(template: Option<&str>, root: &Path, catalog: &[ToolDefinition]) -> Result<String> {
    debug!(custom = template.is_some(), tool_count = catalog.len(), "render_system_prompt: called");
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);

    let context = PromptContext {
        root: root.display().to_string(),
        tools: catalog.iter().map(signature).collect(),
    };

    hbs.render_template(template.unwrap_or(SYSTEM), &context)
        .map_err(|e| eyre!("Failed to render system prompt: {}", e))
}

/// `name(param=default, ...) - description`
fn signature(def: &ToolDefinition) -> String {
    let params: Vec<String> = def
        .parameters
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, schema)| match schema.get("default") {
                    Some(default) => format!("{}={}", name, default),
                    None => name.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    format!("{}({}) - {}", def.name, params.join(", "), def.description)
}

//! list_directory tool - list the entries of one directory

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::str_or;
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// List files and directories in a path
pub struct ListDirectoryTool;

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list_directory"
    }

    fn description(&self) -> &'static str {
        "List the items inside a directory. Directories are suffixed with '/'."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "dir_path": dir_path_schema()
            }
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "ListDirectoryTool::execute: called");
        let path = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        list_directory(sandbox, &path).await
    }
}

/// Non-recursive, alphabetically sorted listing of `dir`
pub async fn list_directory(sandbox: &PathSandbox, dir: &ResolvedPath) -> Result<OperationResult, ToolError> {
    debug!(%dir, "list_directory: called");
    require_dir(sandbox, dir).await?;

    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir.as_path()).await?;

    loop {
        let entry = match reader.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                debug!(%e, "list_directory: unreadable entry, skipping");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();

        // Links are not followed: a symlink is listed by name, never with '/'
        let is_dir = match entry.file_type().await {
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                debug!(%name, %e, "list_directory: no file type, listing as plain entry");
                false
            }
        };

        let suffix = if is_dir { "/" } else { "" };
        entries.push(format!("{}{}", name, suffix));
    }

    entries.sort();
    let rel = sandbox.display(dir);
    let count = entries.len();
    debug!(%count, "list_directory: entries collected");

    let summary = if entries.is_empty() {
        format!("Directory '{}' is empty.", rel)
    } else {
        format!("Directory '{}' contains {} item(s).", rel, count)
    };

    Ok(OperationResult::new(
        summary,
        ResultData::Listing {
            path: rel,
            count,
            entries,
        },
    ))
}

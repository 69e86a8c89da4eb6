//! get_file_info tool - metadata for a file or directory

use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::debug;

use super::stat;
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::required_str;
use crate::tools::error::EntryKind;
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// Provide metadata about a file or directory
pub struct FileInfoTool;

#[async_trait]
impl Tool for FileInfoTool {
    fn name(&self) -> &'static str {
        "get_file_info"
    }

    fn description(&self) -> &'static str {
        "Provide metadata (type, size, timestamps, absolute path) about a file or directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "File or directory path relative to the managed root"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "FileInfoTool::execute: called");
        let path = sandbox.resolve(required_str(&input, "file_path")?)?;
        file_info(sandbox, &path).await
    }
}

/// Size, kind, timestamps and absolute location of `path`
pub async fn file_info(sandbox: &PathSandbox, path: &ResolvedPath) -> Result<OperationResult, ToolError> {
    debug!(%path, "file_info: called");
    let metadata = stat(sandbox, path).await?;

    let kind = if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    let modified = metadata.modified()?;
    // Birth time is unavailable on some filesystems
    let created = metadata.created().unwrap_or(modified);
    let rel = sandbox.display(path);

    Ok(OperationResult::new(
        format!("Metadata retrieved for '{}'.", rel),
        ResultData::Metadata {
            path: rel,
            kind,
            size_bytes: metadata.len(),
            modified: iso_timestamp(modified),
            created: iso_timestamp(created),
            absolute_path: path.to_string(),
        },
    ))
}

fn iso_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%dT%H:%M:%S").to_string()
}

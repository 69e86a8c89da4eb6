//! get_file_content tool - read a UTF-8 text file

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::require_file;
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::required_str;
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// Read a file's contents as text
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "get_file_content"
    }

    fn description(&self) -> &'static str {
        "Read a UTF-8 text file from the managed directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "File path relative to the managed root"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "ReadFileTool::execute: called");
        let path = sandbox.resolve(required_str(&input, "file_path")?)?;
        read_file(sandbox, &path).await
    }
}

/// Read `file` as UTF-8; undecodable content yields a binary placeholder
pub async fn read_file(sandbox: &PathSandbox, file: &ResolvedPath) -> Result<OperationResult, ToolError> {
    debug!(%file, "read_file: called");
    require_file(sandbox, file).await?;

    let bytes = tokio::fs::read(file.as_path()).await?;
    let size_bytes = bytes.len() as u64;
    let rel = sandbox.display(file);

    match String::from_utf8(bytes) {
        Ok(content) => {
            let lines = content.lines().count();
            debug!(%lines, "read_file: decoded text");
            Ok(OperationResult::new(
                format!("Successfully read {} line(s) from '{}'.", lines, rel),
                ResultData::Content {
                    path: rel,
                    size_bytes,
                    is_text: true,
                    content: Some(content),
                },
            ))
        }
        Err(_) => {
            debug!("read_file: not valid UTF-8");
            Ok(OperationResult::new(
                format!("The file '{}' is binary or not UTF-8 decodable.", rel),
                ResultData::Content {
                    path: rel,
                    size_bytes,
                    is_text: false,
                    content: None,
                },
            ))
        }
    }
}

//! find_large_files tool - rank the biggest files under a directory

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::walk::scan;
use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::{f64_or, str_or, usize_or};
use crate::tools::result::{LargeFile, bytes_to_mb, format_float};
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

pub const DEFAULT_MIN_SIZE_MB: f64 = 1.0;
pub const DEFAULT_LIMIT: usize = 10;

/// List the largest files above a minimum size
pub struct LargeFilesTool;

#[async_trait]
impl Tool for LargeFilesTool {
    fn name(&self) -> &'static str {
        "find_large_files"
    }

    fn description(&self) -> &'static str {
        "List the largest files at or above a minimum size (in MB) within a directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "dir_path": dir_path_schema(),
                "min_size_mb": {
                    "type": "number",
                    "description": "Minimum file size in megabytes",
                    "default": DEFAULT_MIN_SIZE_MB
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of files to return",
                    "default": DEFAULT_LIMIT
                }
            }
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "LargeFilesTool::execute: called");
        let min_size_mb = f64_or(&input, "min_size_mb", DEFAULT_MIN_SIZE_MB)?;
        let limit = usize_or(&input, "limit", DEFAULT_LIMIT)?;
        let path = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        large_files(sandbox, &path, min_size_mb, limit).await
    }
}

/// Up to `limit` regular files of at least `min_size_mb`, largest first
pub async fn large_files(
    sandbox: &PathSandbox,
    dir: &ResolvedPath,
    min_size_mb: f64,
    limit: usize,
) -> Result<OperationResult, ToolError> {
    debug!(%dir, %min_size_mb, %limit, "large_files: called");
    require_dir(sandbox, dir).await?;

    let threshold = min_size_mb * 1024.0 * 1024.0;
    let mut files: Vec<LargeFile> = scan(dir)
        .await?
        .into_iter()
        .filter(|entry| entry.metadata.is_file() && entry.metadata.len() as f64 >= threshold)
        .map(|entry| {
            let size_bytes = entry.metadata.len();
            LargeFile {
                path: sandbox.relative(&entry.path),
                size_bytes,
                size_mb: bytes_to_mb(size_bytes),
            }
        })
        .collect();
    files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));
    files.truncate(limit);
    debug!(count = files.len(), "large_files: ranked");

    let rel = sandbox.display(dir);
    let summary = if files.is_empty() {
        format!("No files >= {} MB found in '{}'.", format_float(min_size_mb), rel)
    } else {
        format!(
            "Top {} file(s) >= {} MB found in '{}'.",
            files.len(),
            format_float(min_size_mb),
            rel
        )
    };

    Ok(OperationResult::new(
        summary,
        ResultData::LargeFiles {
            path: rel,
            min_size_mb,
            limit,
            files,
        },
    ))
}

//! get_disk_usage tool - aggregate size of a directory tree

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::walk::scan;
use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::str_or;
use crate::tools::result::bytes_to_mb;
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

pub struct DiskUsageTool;

#[async_trait]
impl Tool for DiskUsageTool {
    fn name(&self) -> &'static str {
        "get_disk_usage"
    }

    fn description(&self) -> &'static str {
        "Summarize disk usage (total size, file and folder counts) for a directory and its descendants."
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
        debug!(?input, "DiskUsageTool::execute: called");
        let path = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        disk_usage(sandbox, &path).await
    }
}

/// Total bytes of regular files under `dir`, with file and directory counts
pub async fn disk_usage(sandbox: &PathSandbox, dir: &ResolvedPath) -> Result<OperationResult, ToolError> {
    debug!(%dir, "disk_usage: called");
    require_dir(sandbox, dir).await?;

    let mut size_bytes = 0u64;
    let mut file_count = 0u64;
    let mut dir_count = 0u64;
    for entry in scan(dir).await? {
        if entry.metadata.is_file() {
            size_bytes += entry.metadata.len();
            file_count += 1;
        } else if entry.metadata.is_dir() {
            dir_count += 1;
        }
    }
    debug!(%size_bytes, %file_count, %dir_count, "disk_usage: totals");

    let rel = sandbox.display(dir);
    Ok(OperationResult::new(
        format!("Calculated disk usage for '{}'.", rel),
        ResultData::DiskUsage {
            path: rel,
            size_bytes,
            size_mb: bytes_to_mb(size_bytes),
            file_count,
            dir_count,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testutil;
    use std::fs;

    #[tokio::test]
    async fn test_disk_usage_counts_everything_below() {
        let (temp, sandbox) = testutil::fixture();
        fs::create_dir(temp.path().join("sub/deeper")).unwrap();
        fs::write(temp.path().join("sub/deeper/blob.bin"), vec![0u8; 2048]).unwrap();

        let result = DiskUsageTool.execute(serde_json::json!({}), &sandbox).await.unwrap();

        assert_eq!(result.summary, "Calculated disk usage for '.'.");
        assert_eq!(
            result.data,
            ResultData::DiskUsage {
                path: ".".to_string(),
                size_bytes: 2058,
                size_mb: 0.0,
                file_count: 2,
                dir_count: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_disk_usage_of_empty_directory() {
        let (_temp, sandbox) = testutil::fixture();

        let result = DiskUsageTool
            .execute(serde_json::json!({"dir_path": "sub"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(
            result.data,
            ResultData::DiskUsage {
                path: "sub".to_string(),
                size_bytes: 0,
                size_mb: 0.0,
                file_count: 0,
                dir_count: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_disk_usage_size_mb() {
        let (temp, sandbox) = testutil::empty();
        fs::write(temp.path().join("big"), vec![0u8; 3 * 1024 * 1024 / 2]).unwrap();

        let result = disk_usage(&sandbox, &sandbox.resolve(".").unwrap()).await.unwrap();

        match result.data {
            ResultData::DiskUsage { size_mb, .. } => assert_eq!(size_mb, 1.5),
            other => panic!("Expected disk usage, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_disk_usage_skips_unreadable_subtree() {
        let (temp, sandbox) = testutil::fixture();
        fs::create_dir(temp.path().join("locked")).unwrap();
        fs::write(temp.path().join("locked/secret.bin"), vec![0u8; 4096]).unwrap();
        let Some(_guard) = testutil::lock_dir(&temp.path().join("locked")) else {
            return;
        };

        let result = DiskUsageTool.execute(serde_json::json!({}), &sandbox).await.unwrap();

        // The locked directory itself is seen, nothing below it is
        assert_eq!(
            result.data,
            ResultData::DiskUsage {
                path: ".".to_string(),
                size_bytes: 10,
                size_mb: 0.0,
                file_count: 1,
                dir_count: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_disk_usage_on_file_is_wrong_kind() {
        let (_temp, sandbox) = testutil::fixture();

        let err = DiskUsageTool
            .execute(serde_json::json!({"dir_path": "notes.txt"}), &sandbox)
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::WrongKind { .. }));
    }
}

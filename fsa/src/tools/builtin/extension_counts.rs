//! count_files_by_extension tool - histogram of file extensions

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::walk::scan;
use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::str_or;
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// Bucket for files without a suffix
pub const NO_EXTENSION: &str = "(no extension)";

/// Count files grouped by extension
pub struct ExtensionCountsTool;

#[async_trait]
impl Tool for ExtensionCountsTool {
    fn name(&self) -> &'static str {
        "count_files_by_extension"
    }

    fn description(&self) -> &'static str {
        "Count files grouped by extension (case-insensitive) within a directory tree."
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
        debug!(?input, "ExtensionCountsTool::execute: called");
        let path = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        extension_counts(sandbox, &path).await
    }
}

/// Regular files under `dir` grouped by lowercased extension, most common first
pub async fn extension_counts(sandbox: &PathSandbox, dir: &ResolvedPath) -> Result<OperationResult, ToolError> {
    debug!(%dir, "extension_counts: called");
    require_dir(sandbox, dir).await?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    for entry in scan(dir).await? {
        if entry.metadata.is_file() {
            *counts.entry(extension_key(&entry.path)).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, u64)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    debug!(buckets = counts.len(), "extension_counts: grouped");

    let rel = sandbox.display(dir);
    let summary = if counts.is_empty() {
        format!("No files detected under '{}'.", rel)
    } else {
        format!("Counted files grouped by extension under '{}'.", rel)
    };

    Ok(OperationResult::new(summary, ResultData::ExtensionCounts { path: rel, counts }))
}

fn extension_key(path: &Path) -> String {
    match path.extension().map(|e| e.to_string_lossy()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => NO_EXTENSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testutil;
    use std::fs;

    #[test]
    fn test_extension_key() {
        assert_eq!(extension_key(Path::new("a/readme.TXT")), ".txt");
        assert_eq!(extension_key(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_key(Path::new("Makefile")), NO_EXTENSION);
        assert_eq!(extension_key(Path::new(".bashrc")), NO_EXTENSION);
    }

    #[tokio::test]
    async fn test_extension_counts_sorted_by_frequency() {
        let (temp, sandbox) = testutil::fixture();
        fs::write(temp.path().join("b.TXT"), "").unwrap();
        fs::write(temp.path().join("sub/c.txt"), "").unwrap();
        fs::write(temp.path().join("sub/main.rs"), "").unwrap();
        fs::write(temp.path().join("LICENSE"), "").unwrap();

        let result = ExtensionCountsTool.execute(serde_json::json!({}), &sandbox).await.unwrap();

        assert_eq!(result.summary, "Counted files grouped by extension under '.'.");
        assert_eq!(
            result.data,
            ResultData::ExtensionCounts {
                path: ".".to_string(),
                counts: vec![
                    (".txt".to_string(), 3),
                    ("(no extension)".to_string(), 1),
                    (".rs".to_string(), 1),
                ],
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extension_counts_skips_unreadable_subtree() {
        let (temp, sandbox) = testutil::fixture();
        fs::create_dir(temp.path().join("locked")).unwrap();
        fs::write(temp.path().join("locked/a.rs"), "").unwrap();
        fs::write(temp.path().join("locked/b.rs"), "").unwrap();
        let Some(_guard) = testutil::lock_dir(&temp.path().join("locked")) else {
            return;
        };

        let result = ExtensionCountsTool.execute(serde_json::json!({}), &sandbox).await.unwrap();

        assert_eq!(
            result.data,
            ResultData::ExtensionCounts {
                path: ".".to_string(),
                counts: vec![(".txt".to_string(), 1)],
            }
        );
    }

    #[tokio::test]
    async fn test_extension_counts_empty_tree() {
        let (_temp, sandbox) = testutil::fixture();

        let result = ExtensionCountsTool
            .execute(serde_json::json!({"dir_path": "sub"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(result.summary, "No files detected under 'sub'.");
        assert_eq!(
            result.data,
            ResultData::ExtensionCounts {
                path: "sub".to_string(),
                counts: vec![],
            }
        );
    }
}

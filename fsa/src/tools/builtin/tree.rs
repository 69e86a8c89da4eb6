//! get_directory_tree tool - display directory structure as a tree

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::{str_or, usize_or};
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// Default depth limit
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Display directory structure as a tree
pub struct TreeTool;

#[async_trait]
impl Tool for TreeTool {
    fn name(&self) -> &'static str {
        "get_directory_tree"
    }

    fn description(&self) -> &'static str {
        "Produce a textual directory tree up to the requested depth. Hidden entries are skipped."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "dir_path": dir_path_schema(),
                "max_depth": {
                    "type": "integer",
                    "description": "Maximum depth to traverse",
                    "default": DEFAULT_MAX_DEPTH
                }
            }
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "TreeTool::execute: called");
        let max_depth = usize_or(&input, "max_depth", DEFAULT_MAX_DEPTH)?;
        let path = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        directory_tree(sandbox, &path, max_depth).await
    }
}

/// Render `dir` as tree lines, at most `max_depth` levels below it
pub async fn directory_tree(
    sandbox: &PathSandbox,
    dir: &ResolvedPath,
    max_depth: usize,
) -> Result<OperationResult, ToolError> {
    debug!(%dir, %max_depth, "directory_tree: called");
    require_dir(sandbox, dir).await?;

    let rel = sandbox.display(dir);
    let base = dir.as_path().to_path_buf();
    let mut tree = vec![format!("{}/", rel)];
    let body = tokio::task::spawn_blocking(move || {
        let mut lines = Vec::new();
        render(&base, "", 0, max_depth, &mut lines);
        lines
    })
    .await
    .map_err(|e| ToolError::Io(std::io::Error::other(e)))?;
    tree.extend(body);

    Ok(OperationResult::new(
        format!("Generated tree for '{}' up to depth {}.", rel, max_depth),
        ResultData::Tree {
            path: rel,
            max_depth,
            tree,
        },
    ))
}

struct TreeEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

fn render(dir: &Path, prefix: &str, depth: usize, max_depth: usize, lines: &mut Vec<String>) {
    if depth >= max_depth {
        return;
    }

    let reader = match fs::read_dir(dir) {
        Ok(r) => r,
        Err(e) => {
            debug!(?dir, %e, "render: unreadable directory, skipping");
            return;
        }
    };

    let mut entries: Vec<TreeEntry> = reader
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            // Same link policy as list_directory: symlinks are leaves
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some(TreeEntry {
                name,
                path: entry.path(),
                is_dir,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    let last = entries.len().saturating_sub(1);
    for (idx, entry) in entries.iter().enumerate() {
        let is_last = idx == last;
        let connector = if is_last { "`-- " } else { "|-- " };
        let suffix = if entry.is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, entry.name, suffix));

        if entry.is_dir {
            let extension = if is_last { "    " } else { "|   " };
            render(&entry.path, &format!("{}{}", prefix, extension), depth + 1, max_depth, lines);
        }
    }
}

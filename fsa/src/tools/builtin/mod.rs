//! Built-in read-only filesystem tools

mod disk_usage;
mod extension_counts;
mod file_info;
mod large_files;
mod list_directory;
mod read_file;
mod search_files;
mod tree;
mod walk;

pub use disk_usage::{DiskUsageTool, disk_usage};
pub use extension_counts::{ExtensionCountsTool, NO_EXTENSION, extension_counts};
pub use file_info::{FileInfoTool, file_info};
pub use large_files::{LargeFilesTool, large_files};
pub use list_directory::{ListDirectoryTool, list_directory};
pub use read_file::{ReadFileTool, read_file};
pub use search_files::{SearchFilesTool, search_files};
pub use tree::{TreeTool, directory_tree};

use std::fs::Metadata;
use std::io;

use tracing::debug;

use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::ToolError;
use crate::tools::error::EntryKind;

/// Stat a resolved path, mapping a missing target to `NotFound`
pub(crate) async fn stat(sandbox: &PathSandbox, path: &ResolvedPath) -> Result<Metadata, ToolError> {
    match tokio::fs::metadata(path.as_path()).await {
        Ok(m) => Ok(m),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(%path, "stat: not found");
            Err(ToolError::NotFound {
                path: sandbox.display(path),
            })
        }
        Err(e) => Err(ToolError::Io(e)),
    }
}

/// Ensure a resolved path exists and is a directory
pub(crate) async fn require_dir(sandbox: &PathSandbox, path: &ResolvedPath) -> Result<Metadata, ToolError> {
    let metadata = stat(sandbox, path).await?;
    if !metadata.is_dir() {
        debug!(%path, "require_dir: not a directory");
        return Err(ToolError::WrongKind {
            path: sandbox.display(path),
            expected: EntryKind::Directory,
        });
    }
    Ok(metadata)
}

/// Ensure a resolved path exists and is a regular file
pub(crate) async fn require_file(sandbox: &PathSandbox, path: &ResolvedPath) -> Result<Metadata, ToolError> {
    let metadata = stat(sandbox, path).await?;
    if !metadata.is_file() {
        debug!(%path, "require_file: not a file");
        return Err(ToolError::WrongKind {
            path: sandbox.display(path),
            expected: EntryKind::File,
        });
    }
    Ok(metadata)
}

/// Schema fragment for the common `dir_path` parameter
pub(crate) fn dir_path_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "Directory path relative to the managed root",
        "default": "."
    })
}

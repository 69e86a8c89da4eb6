//! Recursive traversal shared by the aggregate scans

use std::fs::Metadata;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::sandbox::ResolvedPath;
use crate::tools::ToolError;

/// A descendant found by [`descendants`]
pub(crate) struct WalkEntry {
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Every descendant of `base` (excluding `base` itself), fully materialized
///
/// Symlinks are not followed, so the walk never leaves the tree it started
/// in. Entries that cannot be read or stat'ed are skipped.
pub(crate) fn descendants(base: &ResolvedPath) -> Vec<WalkEntry> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for item in WalkDir::new(base.as_path()).min_depth(1).follow_links(false) {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                debug!(%e, "descendants: unreadable entry, skipping");
                skipped += 1;
                continue;
            }
        };
        match entry.metadata() {
            Ok(metadata) => entries.push(WalkEntry {
                path: entry.into_path(),
                metadata,
            }),
            Err(e) => {
                debug!(%e, "descendants: entry vanished, skipping");
                skipped += 1;
            }
        }
    }

    debug!(%base, count = entries.len(), skipped, "descendants: walk complete");
    entries
}

/// [`descendants`] on the blocking pool
pub(crate) async fn scan(base: &ResolvedPath) -> Result<Vec<WalkEntry>, ToolError> {
    let base = base.clone();
    tokio::task::spawn_blocking(move || descendants(&base))
        .await
        .map_err(|e| ToolError::Io(std::io::Error::other(e)))
}

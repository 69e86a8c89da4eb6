//! PathSandbox - confines every filesystem operation to the administered root
//!
//! Caller-supplied path strings are resolved against a single root directory
//! that is fixed at startup. A [`ResolvedPath`] can only be produced by
//! [`PathSandbox::resolve`], so any function taking one is guaranteed to be
//! working inside the root.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::tools::ToolError;

/// Errors raised while establishing the administered root
#[derive(Debug, Error)]
pub enum RootError {
    #[error("No administered root configured (set FILESYSTEM_ADMIN_ROOT, --root, or `root` in the config file)")]
    NotConfigured,

    #[error("The configured folder '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("The configured path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to canonicalize '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The directory boundary for all operations: absolute, canonical, existing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministeredRoot {
    path: PathBuf,
    /// Lowercased final component, used by the coercion fallback
    name: Option<String>,
}

impl AdministeredRoot {
    /// Validate and canonicalize a root directory
    pub fn new(path: impl AsRef<Path>) -> Result<Self, RootError> {
        let path = expand_home(path.as_ref());
        debug!(?path, "AdministeredRoot::new: called");

        if !path.exists() {
            return Err(RootError::NotFound { path });
        }
        let canonical = path.canonicalize().map_err(|source| RootError::Io {
            path: path.clone(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(RootError::NotADirectory { path: canonical });
        }

        let name = canonical
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase());
        debug!(?canonical, ?name, "AdministeredRoot::new: root established");
        Ok(Self { path: canonical, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `path` equals the root or lies beneath it (component-wise)
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }
}

/// An absolute path proven to lie inside the administered root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final path component, or the empty string for `/`
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolves caller-supplied paths into [`ResolvedPath`]s
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: AdministeredRoot,
}

impl PathSandbox {
    pub fn new(root: AdministeredRoot) -> Self {
        debug!(root = ?root.path(), "PathSandbox::new: called");
        Self { root }
    }

    pub fn root(&self) -> &AdministeredRoot {
        &self.root
    }

    /// Resolve `candidate` to a path inside the root, or fail with `OutsideRoot`
    ///
    /// Relative paths are joined under the root; absolute paths are taken as-is.
    /// If the canonical result escapes the root, a path that mentions the root's
    /// own directory name is re-anchored at the root (models tend to echo
    /// absolute paths they saw in earlier results). The re-anchored path is
    /// canonicalized and checked again, so it can never leave the root.
    pub fn resolve(&self, candidate: &str) -> Result<ResolvedPath, ToolError> {
        debug!(%candidate, "PathSandbox::resolve: called");
        let raw = Path::new(candidate);
        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.root.path.join(raw)
        };

        let canonical = canonicalize_lenient(&joined);
        if self.root.contains(&canonical) {
            debug!(?canonical, "PathSandbox::resolve: within root");
            return Ok(ResolvedPath(canonical));
        }

        if let Some(coerced) = self.coerce_into_root(&canonical) {
            warn!(%candidate, ?coerced, "PathSandbox::resolve: re-anchored path under root");
            return Ok(ResolvedPath(coerced));
        }

        debug!(?canonical, "PathSandbox::resolve: outside root");
        Err(ToolError::OutsideRoot {
            path: canonical,
            root: self.root.path.clone(),
        })
    }

    /// Rebuild `path` under the root from the components after the last
    /// component matching the root's name (case-insensitive)
    fn coerce_into_root(&self, path: &Path) -> Option<PathBuf> {
        let root_name = self.root.name.as_deref()?;
        let parts: Vec<Component<'_>> = path.components().collect();

        let last_idx = parts.iter().rposition(|c| match c {
            Component::Normal(name) => name.to_string_lossy().to_lowercase() == root_name,
            _ => false,
        })?;

        let mut rebuilt = self.root.path.clone();
        for part in &parts[last_idx + 1..] {
            rebuilt.push(part.as_os_str());
        }
        let canonical = canonicalize_lenient(&rebuilt);
        self.root.contains(&canonical).then_some(canonical)
    }

    /// Root-relative display form: `"."` for the root, `a/b` for descendants
    pub fn display(&self, path: &ResolvedPath) -> String {
        self.relative(&path.0)
    }

    /// Root-relative form of a path found while walking below a resolved path
    pub fn relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root.path) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.display().to_string(),
        }
    }
}

/// Canonicalize without requiring the full path to exist
///
/// Each existing prefix is canonicalized (resolving symlinks); once a
/// component is missing, the remainder is normalized lexically since nothing
/// below it can be a symlink. A `..` steps back onto a canonical prefix, so
/// canonicalization resumes after it.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    let mut exists = true;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
                exists = true;
            }
            Component::Normal(name) => {
                resolved.push(name);
                if exists {
                    match resolved.canonicalize() {
                        Ok(c) => resolved = c,
                        Err(e) if e.kind() == io::ErrorKind::NotFound => exists = false,
                        Err(_) => {}
                    }
                }
            }
        }
    }

    resolved
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|h| h.join(rest)).unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

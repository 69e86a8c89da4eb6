//! Tool error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during tool execution
///
/// The `Display` text is what the model sees as the tool result, so each
/// message names the offending path or argument.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("The path {path} is outside the managed directory {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("No such file or directory: '{path}'")]
    NotFound { path: String },

    #[error("Expected a {expected} but '{path}' is not one")]
    WrongKind { path: String, expected: EntryKind },

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Tool not found: {name}")]
    UnknownTool { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kind of filesystem entry an operation expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_root_message() {
        let err = ToolError::OutsideRoot {
            path: PathBuf::from("/etc/passwd"),
            root: PathBuf::from("/srv/admin"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/etc/passwd"));
        assert!(msg.contains("/srv/admin"));
    }

    #[test]
    fn test_wrong_kind_message() {
        let err = ToolError::WrongKind {
            path: "notes.txt".to_string(),
            expected: EntryKind::Directory,
        };

        assert_eq!(err.to_string(), "Expected a directory but 'notes.txt' is not one");
    }

    #[test]
    fn test_entry_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(EntryKind::File).unwrap(), "file");
        assert_eq!(serde_json::to_value(EntryKind::Directory).unwrap(), "directory");
    }
}

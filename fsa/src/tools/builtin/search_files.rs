//! search_files tool - find files and folders matching a glob pattern

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use serde_json::Value;
use tracing::debug;

use super::walk::scan;
use super::{dir_path_schema, require_dir};
use crate::sandbox::{PathSandbox, ResolvedPath};
use crate::tools::args::{required_str, str_or};
use crate::tools::{OperationResult, ResultData, Tool, ToolError};

/// `*` and `?` may cross `/`, like fnmatch
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Find files matching a glob pattern
pub struct SearchFilesTool;

#[async_trait]
impl Tool for SearchFilesTool {
    fn name(&self) -> &'static str {
        "search_files"
    }

    fn description(&self) -> &'static str {
        "Search recursively for files or folders whose root-relative path matches a glob pattern (e.g. *.txt)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Shell-style glob matched against root-relative paths"
                },
                "dir_path": dir_path_schema()
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError> {
        debug!(?input, "SearchFilesTool::execute: called");
        let pattern = required_str(&input, "pattern")?;
        let base = sandbox.resolve(str_or(&input, "dir_path", "."))?;
        search_files(sandbox, pattern, &base).await
    }
}

/// Root-relative paths below `base` matching `pattern`, sorted
pub async fn search_files(
    sandbox: &PathSandbox,
    pattern: &str,
    base: &ResolvedPath,
) -> Result<OperationResult, ToolError> {
    debug!(%pattern, %base, "search_files: called");
    require_dir(sandbox, base).await?;

    let matcher = Pattern::new(pattern).map_err(|e| ToolError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let entries = scan(base).await?;

    let mut matches: Vec<String> = entries
        .iter()
        .filter_map(|entry| {
            let rel = sandbox.relative(&entry.path);
            matcher.matches_with(&rel, MATCH_OPTIONS).then(|| {
                if entry.metadata.is_dir() {
                    format!("{}/", rel)
                } else {
                    rel
                }
            })
        })
        .collect();
    matches.sort();

    let rel_base = sandbox.display(base);
    debug!(count = matches.len(), "search_files: matches found");

    let summary = if matches.is_empty() {
        format!("No matches for '{}' inside '{}'.", pattern, rel_base)
    } else {
        format!("Found {} match(es) for '{}' inside '{}'.", matches.len(), pattern, rel_base)
    };

    Ok(OperationResult::new(
        summary,
        ResultData::SearchMatches {
            base_path: rel_base,
            pattern: pattern.to_string(),
            matches,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testutil;
    use std::fs;

    fn matches_of(result: &OperationResult) -> Vec<String> {
        match &result.data {
            ResultData::SearchMatches { matches, .. } => matches.clone(),
            other => panic!("Expected search matches, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_basic() {
        let (temp, sandbox) = testutil::fixture();
        fs::write(temp.path().join("file1.rs"), "").unwrap();
        fs::write(temp.path().join("file2.rs"), "").unwrap();

        let result = SearchFilesTool
            .execute(serde_json::json!({"pattern": "*.rs"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(result.summary, "Found 2 match(es) for '*.rs' inside '.'.");
        assert_eq!(matches_of(&result), vec!["file1.rs", "file2.rs"]);
    }

    #[tokio::test]
    async fn test_search_star_crosses_directories() {
        let (temp, sandbox) = testutil::fixture();
        fs::create_dir_all(temp.path().join("src/nested")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), "").unwrap();
        fs::write(temp.path().join("src/nested/mod.rs"), "").unwrap();
        fs::write(temp.path().join("main.rs"), "").unwrap();

        let result = SearchFilesTool
            .execute(serde_json::json!({"pattern": "*.rs"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(
            matches_of(&result),
            vec!["main.rs", "src/lib.rs", "src/nested/mod.rs"]
        );
    }

    #[tokio::test]
    async fn test_search_matches_root_relative_paths_from_subdir() {
        let (temp, sandbox) = testutil::fixture();
        fs::write(temp.path().join("sub/a.txt"), "").unwrap();

        let relative_to_base = SearchFilesTool
            .execute(serde_json::json!({"pattern": "a.txt", "dir_path": "sub"}), &sandbox)
            .await
            .unwrap();
        assert!(matches_of(&relative_to_base).is_empty());

        let relative_to_root = SearchFilesTool
            .execute(serde_json::json!({"pattern": "sub/*.txt", "dir_path": "sub"}), &sandbox)
            .await
            .unwrap();
        assert_eq!(matches_of(&relative_to_root), vec!["sub/a.txt"]);
    }

    #[tokio::test]
    async fn test_search_marks_directories() {
        let (_temp, sandbox) = testutil::fixture();

        let result = SearchFilesTool
            .execute(serde_json::json!({"pattern": "s*"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(matches_of(&result), vec!["sub/"]);
    }

    #[tokio::test]
    async fn test_search_no_matches() {
        let (_temp, sandbox) = testutil::fixture();

        let result = SearchFilesTool
            .execute(serde_json::json!({"pattern": "*.nonexistent"}), &sandbox)
            .await
            .unwrap();

        assert_eq!(result.summary, "No matches for '*.nonexistent' inside '.'.");
    }

    #[tokio::test]
    async fn test_search_invalid_pattern() {
        let (_temp, sandbox) = testutil::fixture();

        let err = SearchFilesTool
            .execute(serde_json::json!({"pattern": "[unclosed"}), &sandbox)
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidPattern { .. }));
    }

    #[tokio::test]
    async fn test_search_missing_pattern() {
        let (_temp, sandbox) = testutil::fixture();

        let err = SearchFilesTool.execute(serde_json::json!({}), &sandbox).await.unwrap_err();

        assert!(matches!(err, ToolError::MissingArgument("pattern")));
    }
}

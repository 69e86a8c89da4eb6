//! ToolExecutor - tool catalog and invocation boundary over one sandbox

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::builtin::{
    DiskUsageTool, ExtensionCountsTool, FileInfoTool, LargeFilesTool, ListDirectoryTool, ReadFileTool, SearchFilesTool,
    TreeTool,
};
use super::{OperationResult, Tool, ToolError, ToolInvoker, ToolResult};
use crate::format;
use crate::llm::{ToolCall, ToolDefinition};
use crate::sandbox::PathSandbox;

/// Runs tools by name against a shared sandbox
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
    sandbox: Arc<PathSandbox>,
    catalog: OnceLock<Vec<ToolDefinition>>,
}

impl ToolExecutor {
    /// Executor with the eight read-only filesystem tools
    pub fn standard(sandbox: Arc<PathSandbox>) -> Self {
        debug!(root = %sandbox.root().path().display(), "ToolExecutor::standard: called");
        let mut executor = Self::empty(sandbox);
        executor.add_tool(Box::new(ListDirectoryTool));
        executor.add_tool(Box::new(ReadFileTool));
        executor.add_tool(Box::new(FileInfoTool));
        executor.add_tool(Box::new(SearchFilesTool));
        executor.add_tool(Box::new(TreeTool));
        executor.add_tool(Box::new(DiskUsageTool));
        executor.add_tool(Box::new(LargeFilesTool));
        executor.add_tool(Box::new(ExtensionCountsTool));
        info!(tool_count = executor.tools.len(), "ToolExecutor::standard: tools registered");
        executor
    }

    /// Executor with no tools (for testing)
    pub fn empty(sandbox: Arc<PathSandbox>) -> Self {
        Self {
            tools: HashMap::new(),
            sandbox,
            catalog: OnceLock::new(),
        }
    }

    /// Register a tool; only effective before the catalog is first read
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.catalog = OnceLock::new();
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    /// Run one tool and return its typed result
    pub async fn execute(&self, name: &str, input: Value) -> Result<OperationResult, ToolError> {
        debug!(%name, ?input, "ToolExecutor::execute: called");
        let tool = self.tools.get(name).ok_or_else(|| {
            debug!(%name, "ToolExecutor::execute: unknown tool");
            ToolError::UnknownTool { name: name.to_string() }
        })?;
        tool.execute(input, &self.sandbox).await
    }
}

#[async_trait]
impl ToolInvoker for ToolExecutor {
    fn catalog(&self) -> &[ToolDefinition] {
        self.catalog.get_or_init(|| {
            debug!("ToolExecutor::catalog: building");
            let mut defs: Vec<ToolDefinition> = self
                .tools
                .values()
                .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
                .collect();
            defs.sort_by(|a, b| a.name.cmp(&b.name));
            defs
        })
    }

    async fn invoke(&self, call: &ToolCall) -> ToolResult {
        debug!(tool_name = %call.name, tool_id = %call.id, "ToolExecutor::invoke: called");
        match self.execute(&call.name, call.arguments.clone()).await {
            Ok(result) => {
                let (text, structured) = format::render(&result);
                ToolResult::success(text, structured)
            }
            Err(e) => {
                info!(tool_name = %call.name, error = %e, "ToolExecutor::invoke: tool failed");
                ToolResult::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testutil;

    fn executor() -> (tempfile::TempDir, ToolExecutor) {
        let (temp, sandbox) = testutil::fixture();
        (temp, ToolExecutor::standard(Arc::new(sandbox)))
    }

    #[test]
    fn test_standard_executor_has_all_tools() {
        let (_temp, executor) = executor();

        assert_eq!(
            executor.tool_names(),
            vec![
                "count_files_by_extension",
                "find_large_files",
                "get_directory_tree",
                "get_disk_usage",
                "get_file_content",
                "get_file_info",
                "list_directory",
                "search_files",
            ]
        );
    }

    #[test]
    fn test_catalog_sorted_and_memoized() {
        let (_temp, executor) = executor();

        let first = executor.catalog();
        let second = executor.catalog();

        assert_eq!(first.len(), 8);
        assert!(std::ptr::eq(first, second));
        let names: Vec<&str> = first.iter().map(|d| d.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_catalog_defaults_match_tool_surface() {
        let (_temp, executor) = executor();
        let find = |name: &str| {
            executor
                .catalog()
                .iter()
                .find(|d| d.name == name)
                .map(|d| d.parameters.clone())
                .unwrap()
        };

        assert_eq!(find("list_directory")["properties"]["dir_path"]["default"], ".");
        assert_eq!(find("get_directory_tree")["properties"]["max_depth"]["default"], 3);
        assert_eq!(find("find_large_files")["properties"]["min_size_mb"]["default"], 1.0);
        assert_eq!(find("find_large_files")["properties"]["limit"]["default"], 10);
        assert_eq!(find("search_files")["required"], serde_json::json!(["pattern"]));
    }

    #[tokio::test]
    async fn test_invoke_success_has_both_channels() {
        let (_temp, executor) = executor();
        let call = ToolCall::new("call_1", "list_directory", serde_json::json!({"dir_path": "."}));

        let result = executor.invoke(&call).await;

        assert!(!result.is_error);
        assert!(result.text().starts_with("Directory '.' contains 2 item(s)."));
        let structured = result.structured.unwrap();
        assert_eq!(structured["data"]["entries"], serde_json::json!(["notes.txt", "sub/"]));
    }

    #[tokio::test]
    async fn test_invoke_error_becomes_text() {
        let (_temp, executor) = executor();
        let call = ToolCall::new("call_1", "get_file_content", serde_json::json!({"file_path": "missing.txt"}));

        let result = executor.invoke(&call).await;

        assert!(result.is_error);
        assert_eq!(result.text(), "No such file or directory: 'missing.txt'");
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let (_temp, executor) = executor();
        let call = ToolCall::new("call_1", "delete_everything", serde_json::json!({}));

        let result = executor.invoke(&call).await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Tool not found: delete_everything");
    }

    #[tokio::test]
    async fn test_execute_returns_typed_result() {
        let (_temp, executor) = executor();

        let result = executor
            .execute("get_file_info", serde_json::json!({"file_path": "notes.txt"}))
            .await
            .unwrap();

        assert_eq!(result.kind(), crate::tools::ResultKind::Metadata);
    }
}

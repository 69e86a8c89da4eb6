//! fsadmin - a read-only filesystem administrator for tool-calling models
//!
//! A language model inspects one administered directory through a fixed set
//! of read-only tools and answers questions about it in plain language.
//!
//! # Core Concepts
//!
//! - **One root**: every path is resolved through a [`sandbox::PathSandbox`]
//!   and can never leave the administered root
//! - **Two channels**: each tool result is a summary text for the model plus
//!   a structured payload carrying the full data
//! - **One tool round per turn**: the model may request tools once, then must
//!   answer
//!
//! # Modules
//!
//! - [`sandbox`] - administered root and path resolution
//! - [`tools`] - tool trait, the eight filesystem tools, executor
//! - [`format`] - text and structured rendering of tool results
//! - [`llm`] - completion client trait and OpenAI-compatible implementation
//! - [`agent`] - tool orchestration loop and system prompt
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//! - [`repl`] - interactive chat session

pub mod agent;
pub mod cli;
pub mod config;
pub mod format;
pub mod llm;
pub mod repl;
pub mod sandbox;
pub mod tools;

pub use agent::{ToolOrchestrator, Turn};
pub use config::Config;
pub use llm::{LlmClient, LlmError};
pub use sandbox::{AdministeredRoot, PathSandbox, ResolvedPath, RootError};
pub use tools::{OperationResult, ResultData, ToolError, ToolExecutor, ToolInvoker, ToolResult};

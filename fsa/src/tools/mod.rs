//! Tool system
//!
//! Every tool resolves its path arguments through the executor's
//! [`PathSandbox`](crate::sandbox::PathSandbox), so no tool can reach outside
//! the administered root. Tools are read-only.

pub(crate) mod args;
mod error;
mod executor;
pub mod result;
mod traits;

pub mod builtin;

pub use error::{EntryKind, ToolError};
pub use executor::ToolExecutor;
pub use result::{LargeFile, OperationResult, ResultData, ResultKind};
pub use traits::{ContentPart, Tool, ToolInvoker, ToolResult};

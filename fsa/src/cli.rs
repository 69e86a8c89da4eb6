//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::ROOT_ENV;

/// fsa - read-only filesystem administrator
#[derive(Parser)]
#[command(
    name = "fsa",
    about = "Ask a language model questions about a directory it can inspect but never modify",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Administered root directory (overrides FILESYSTEM_ADMIN_ROOT)
    #[arg(short, long, global = true, help = "Administered root directory")]
    pub root: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask one question and print the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Interactive session; every line is an independent turn
    Chat,

    /// Print the tool catalog as JSON
    Tools,

    /// Invoke one tool directly
    Call {
        /// Tool name, e.g. list_directory
        tool: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,

        /// Also print the structured payload
        #[arg(short, long)]
        structured: bool,
    },
}

/// Location of the log file written by the binary
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fsadmin")
        .join("logs")
        .join("fsadmin.log")
}

/// Help footer naming the root variable and the log file
pub fn generate_after_help() -> String {
    let root = std::env::var(ROOT_ENV).unwrap_or_else(|_| "(unset)".to_string());
    format!(
        "Environment:\n  {}={}\n\nLogs are written to: {}",
        ROOT_ENV,
        root,
        get_log_path().display()
    )
}

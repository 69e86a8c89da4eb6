use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::info;

use fsadmin::agent::{ToolOrchestrator, render_system_prompt};
use fsadmin::cli::{Cli, Command, generate_after_help};
use fsadmin::config::Config;
use fsadmin::llm::{ToolCall, create_client};
use fsadmin::repl::ChatSession;
use fsadmin::sandbox::PathSandbox;
use fsadmin::tools::{ToolExecutor, ToolInvoker};

fn setup_logging(log_level: Option<&str>, verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fsadmin")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to a file so stdout carries only answers
    let level = match log_level {
        Some(level) => level
            .parse::<tracing::Level>()
            .map_err(|e| eyre!("Invalid log level '{}': {}", level, e))?,
        None if verbose => tracing::Level::DEBUG,
        None => tracing::Level::INFO,
    };
    let log_file = fs::File::create(log_dir.join("fsadmin.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    setup_logging(cli.log_level.as_deref(), cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // The root is validated once, before any request is served
    let root = config
        .administered_root(cli.root.as_deref())
        .context("Failed to establish the administered root")?;
    info!(
        "fsa starting: root={}, model={}, base_url={}",
        root.path().display(),
        config.llm.model,
        config.llm.base_url
    );

    let executor = Arc::new(ToolExecutor::standard(Arc::new(PathSandbox::new(root))));

    match cli.command {
        Command::Tools => cmd_tools(&executor),
        Command::Call { tool, args, structured } => cmd_call(&executor, &tool, &args, structured).await,
        Command::Ask { question } => cmd_ask(&config, executor, &question.join(" ")).await,
        Command::Chat => cmd_chat(&config, executor).await,
    }
}

/// Print the tool catalog
fn cmd_tools(executor: &ToolExecutor) -> Result<()> {
    let catalog = serde_json::to_string_pretty(executor.catalog()).context("Failed to serialize tool catalog")?;
    println!("{}", catalog);
    Ok(())
}

/// Invoke one tool directly
async fn cmd_call(executor: &ToolExecutor, tool: &str, args: &str, structured: bool) -> Result<()> {
    let arguments: serde_json::Value = serde_json::from_str(args).context("Tool arguments must be valid JSON")?;
    if !arguments.is_object() {
        return Err(eyre!("Tool arguments must be a JSON object, got: {}", arguments));
    }

    let result = executor.invoke(&ToolCall::new("cli", tool, arguments)).await;
    if result.is_error {
        return Err(eyre!("{}", result.text()));
    }

    println!("{}", result.text());
    if structured && let Some(payload) = &result.structured {
        println!();
        println!("{}", serde_json::to_string_pretty(payload)?);
    }
    Ok(())
}

/// Answer one question
async fn cmd_ask(config: &Config, executor: Arc<ToolExecutor>, question: &str) -> Result<()> {
    let orchestrator = build_orchestrator(config, executor)?;
    let turn = orchestrator.run_turn(question).await.context("Completion request failed")?;

    info!(
        input_tokens = turn.usage.input_tokens,
        output_tokens = turn.usage.output_tokens,
        tool_calls = turn.tool_calls.len(),
        "cmd_ask: turn complete"
    );

    for call in &turn.tool_calls {
        eprintln!("{} {}({})", "tool:".dimmed(), call.name.cyan(), call.arguments);
    }
    println!("{}", turn.answer);
    if turn.truncated {
        eprintln!("{}", "(answer cut off at the max-tokens limit)".yellow());
    }
    Ok(())
}

/// Interactive session
async fn cmd_chat(config: &Config, executor: Arc<ToolExecutor>) -> Result<()> {
    let root_display = executor.sandbox().root().path().display().to_string();
    let orchestrator = build_orchestrator(config, executor)?;
    ChatSession::new(orchestrator, root_display).run().await
}

fn build_orchestrator(config: &Config, executor: Arc<ToolExecutor>) -> Result<ToolOrchestrator> {
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let system_prompt = render_system_prompt(
        config.agent.system_prompt.as_deref(),
        executor.sandbox().root().path(),
        executor.catalog(),
    )?;

    Ok(ToolOrchestrator::new(llm, executor, system_prompt).with_max_tokens(config.llm.max_tokens))
}

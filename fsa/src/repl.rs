//! Interactive chat session
//!
//! Each line is its own turn. Nothing carries over between turns, so a
//! failed turn leaves the session usable.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::agent::ToolOrchestrator;

/// Commands that end the session
const EXIT_WORDS: &[&str] = &["exit", "quit", "/exit", "/quit"];

pub struct ChatSession {
    orchestrator: ToolOrchestrator,
    root_display: String,
}

impl ChatSession {
    pub fn new(orchestrator: ToolOrchestrator, root_display: impl Into<String>) -> Self {
        Self {
            orchestrator,
            root_display: root_display.into(),
        }
    }

    /// Run the read-eval-print loop until exit or EOF
    pub async fn run(&self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            match rl.readline(&format!("{} ", ">".bright_green())) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    if is_exit(input) {
                        break;
                    }
                    self.process_user_input(input).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "fsa - filesystem administrator".bright_cyan().bold());
        println!("Managed folder: {}", self.root_display);
        println!("Type {} or {} to leave", "exit".yellow(), "quit".yellow());
        println!();
    }

    async fn process_user_input(&self, input: &str) {
        debug!(input_len = input.len(), "ChatSession::process_user_input: called");
        match self.orchestrator.run_turn(input).await {
            Ok(turn) => {
                for call in &turn.tool_calls {
                    println!("{} {}({})", "tool:".dimmed(), call.name.cyan(), call.arguments);
                }
                println!("{}", turn.answer);
                if turn.truncated {
                    println!("{}", "(answer cut off at the max-tokens limit)".yellow());
                }
                debug!(usage = ?turn.usage, "ChatSession::process_user_input: turn complete");
                println!();
            }
            Err(e) => {
                warn!(error = %e, "ChatSession::process_user_input: turn failed");
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
    }
}

fn is_exit(input: &str) -> bool {
    EXIT_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w))
}

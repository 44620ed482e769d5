//! Chat command handler.
//!
//! Interactive loop over stdin; the conversation lives in memory only.

use crate::commands::setup::{answer_turn, build_pipeline};
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tutor_core::{config::AppConfig, AppResult};
use tutor_knowledge::{Pipeline, SessionState};

/// Chat with the tutor interactively
#[derive(Args, Debug)]
pub struct ChatCommand {}

/// Whether a line ends the chat.
fn is_exit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let pipeline = build_pipeline(config)?;
        let mut session = SessionState::new();

        println!(
            "Ask about the course. Prefix with \"m:\" for a practice question, \
             \"a:\" to check an answer. Type \"exit\" to stop."
        );

        run_chat(
            &pipeline,
            BufReader::new(tokio::io::stdin()),
            &mut session,
            config.timeout_secs,
        )
        .await
    }
}

/// Answer lines from `input` until EOF or an exit word.
///
/// A failed turn is reported and skipped; the session keeps its previous
/// context and the chat goes on.
async fn run_chat<R>(
    pipeline: &Pipeline,
    input: R,
    session: &mut SessionState,
    timeout_secs: u64,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_exit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match answer_turn(pipeline, &line, session, timeout_secs).await {
            Ok(result) => {
                tracing::debug!("Turn finished: {:?}", result.outcome);
                println!("\n{}\n", result.text);
            }
            Err(e) => {
                tracing::error!("Turn failed: {}", e);
                eprintln!("\nCould not answer that: {}\n", e);
            }
        }
    }

    Ok(())
}

//! Ask command handler.
//!
//! Answers one question, carrying the conversation across runs in
//! `.tutor/session.json`.

use crate::commands::setup::{answer_turn, build_pipeline, session_path};
use clap::Args;
use tutor_core::{config::AppConfig, AppResult};
use tutor_knowledge::{AnswerResult, SessionState};

/// Ask a course question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question; prefix with "m:" for a practice multiple-choice
    /// question or "a:" to check an answer against the last context
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Ignore the saved conversation and start a new one
    #[arg(long)]
    pub fresh: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let pipeline = build_pipeline(config)?;

        let path = session_path(config);
        let mut session = if self.fresh {
            SessionState::new()
        } else {
            SessionState::load(&path)?
        };

        let result = answer_turn(&pipeline, &self.question, &mut session, config.timeout_secs).await?;
        session.save(&path)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&to_json(&result))?);
        } else {
            println!("{}", result.text);
        }

        Ok(())
    }
}

fn to_json(result: &AnswerResult) -> serde_json::Value {
    serde_json::json!({
        "answer": result.text,
        "category": result.category,
        "outcome": result.outcome,
        "effectiveQuestion": result.effective_question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_knowledge::AnswerOutcome;
    use tutor_prompt::Category;

    #[test]
    fn test_json_shape() {
        let result = AnswerResult {
            text: "Late work loses 10%.".to_string(),
            category: Category::Normal,
            effective_question: "What is the late policy?".to_string(),
            outcome: AnswerOutcome::RetryVerified,
        };

        let json = to_json(&result);
        assert_eq!(json["answer"], "Late work loses 10%.");
        assert_eq!(json["category"], "normal");
        assert_eq!(json["outcome"], "retry_verified");
        assert_eq!(json["effectiveQuestion"], "What is the late policy?");
    }
}

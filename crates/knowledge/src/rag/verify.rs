//! Answer verification.

use tutor_core::AppResult;
use tutor_llm::{ChatMessage, Judge};

const VERIFY_INSTRUCTIONS: &str = "Just say 'Yes' or 'No'. Do not give any other answer.";

/// Asks the model whether an answer addresses the question.
#[derive(Clone)]
pub struct AnswerVerifier {
    judge: Judge,
}

impl AnswerVerifier {
    pub fn new(judge: Judge) -> Self {
        Self { judge }
    }

    /// Service failures propagate; there is no fallback verdict.
    pub async fn verify(&self, question: &str, answer: &str) -> AppResult<bool> {
        let messages = vec![
            ChatMessage::system(VERIFY_INSTRUCTIONS),
            ChatMessage::user(format!(
                "User: {}\nAttendant: {}\nWas the Attendant able to answer the user's question?",
                question, answer
            )),
        ];
        self.judge.ask(messages).await
    }
}

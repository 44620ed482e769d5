//! Types for the question-answering pipeline.

use serde::{Deserialize, Serialize};
use tutor_prompt::Category;

/// Passages retrieved for the first generation.
pub const PRIMARY_K: usize = 3;

/// Passages retrieved for the expanded-context retry.
pub const RETRY_K: usize = 5;

/// Reply given when neither the first answer nor the retry could be verified.
pub const REFUSAL: &str =
    "I'm sorry but I cannot answer that question. Can you rephrase or ask an alternative?";

/// How the final answer was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Returned without verification (multiple-choice generation)
    Unverified,
    /// First answer passed verification
    Verified,
    /// Answer check whose reply failed verification; returned as is
    AcceptedUnverified,
    /// First answer failed, expanded-context retry passed
    RetryVerified,
    /// Both attempts failed verification; the fixed refusal was returned
    Refused,
}

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Text shown to the student
    pub text: String,

    /// Category parsed from the question prefix
    pub category: Category,

    /// Question text used for retrieval and generation
    pub effective_question: String,

    pub outcome: AnswerOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serialization() {
        let result = AnswerResult {
            text: REFUSAL.to_string(),
            category: Category::Normal,
            effective_question: "What is the late policy?".to_string(),
            outcome: AnswerOutcome::Refused,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "normal");
        assert_eq!(json["outcome"], "refused");
        assert_eq!(json["text"], REFUSAL);
    }
}

//! Retrieval-augmented answering of course questions.
//!
//! A question is classified by its prefix, optionally rewritten, answered
//! from retrieved course passages, then checked; unverified plain answers
//! get one retry with a wider context before the tutor declines.

pub mod classify;
pub mod pipeline;
pub mod session;
pub mod types;
pub mod verify;

pub use classify::{parse_question, QuestionClassifier};
pub use pipeline::Pipeline;
pub use session::{SessionState, MAX_SESSION_CHARS};
pub use types::{AnswerOutcome, AnswerResult, PRIMARY_K, REFUSAL, RETRY_K};
pub use verify::AnswerVerifier;

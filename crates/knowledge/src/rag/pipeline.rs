//! Question-answering orchestration.
//!
//! One call to [`Pipeline::answer`] runs a single turn:
//! classify, rewrite (normal questions only), retrieve, generate, remember
//! the context, verify, and for normal questions at most one retry with a
//! wider context. Every step runs strictly after the previous one.

use crate::rag::classify::{parse_question, QuestionClassifier};
use crate::rag::session::SessionState;
use crate::rag::types::{AnswerOutcome, AnswerResult, PRIMARY_K, REFUSAL, RETRY_K};
use crate::rag::verify::AnswerVerifier;
use crate::retriever::Retriever;
use std::sync::Arc;
use tracing::Instrument;
use tutor_core::{AppError, AppResult, CourseInfo};
use tutor_llm::{ChatMessage, Judge, LlmClient, LlmRequest};
use tutor_prompt::{Category, PromptBuilder, PromptSpec};

/// Answers course questions from retrieved passages.
pub struct Pipeline {
    client: Arc<dyn LlmClient>,
    model: String,
    retriever: Retriever,
    prompts: PromptBuilder,
    course: CourseInfo,
    classifier: QuestionClassifier,
    verifier: AnswerVerifier,
}

impl Pipeline {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        retriever: Retriever,
        prompts: PromptBuilder,
        course: CourseInfo,
    ) -> Self {
        let model = model.into();
        let judge = Judge::new(client.clone(), model.clone());

        Self {
            classifier: QuestionClassifier::new(judge.clone(), course.clone()),
            verifier: AnswerVerifier::new(judge),
            client,
            model,
            retriever,
            prompts,
            course,
        }
    }

    /// Answer one raw question, reading and updating `session`.
    ///
    /// Empty questions are rejected before any service call. Failures of
    /// the rewrite judgments are treated as "no"; every other service
    /// failure is returned to the caller.
    pub async fn answer(&self, raw: &str, session: &mut SessionState) -> AppResult<AnswerResult> {
        let (category, body) = parse_question(raw);
        if body.is_empty() {
            return Err(AppError::InvalidInput("Question is empty".to_string()));
        }

        let span = tracing::info_span!("answer", category = %category);
        self.run(category, body, session).instrument(span).await
    }

    async fn run(
        &self,
        category: Category,
        body: String,
        session: &mut SessionState,
    ) -> AppResult<AnswerResult> {
        tracing::info!("Classified question");

        let effective = match category {
            Category::Normal => {
                let previous = session.last_context().map(str::to_string);
                self.classifier.rewrite(&body, previous.as_deref()).await
            }
            _ => body,
        };

        let context = match category {
            Category::AnswerCheck => match session.last_context() {
                Some(previous) => previous.to_string(),
                None => {
                    tracing::info!("No previous context for answer check");
                    String::new()
                }
            },
            _ => {
                let context = self.retriever.retrieve(&effective, PRIMARY_K).await?;
                tracing::info!("Retrieved context ({} chars)", context.len());
                context
            }
        };

        let prompt = self
            .prompts
            .build(category, &self.course, &effective, &context)?;
        let reply = self.generate(&prompt).await?;

        if category != Category::AnswerCheck {
            session.remember(&context);
        }

        if category == Category::MultipleChoice {
            return Ok(finish(reply, category, effective, AnswerOutcome::Unverified));
        }

        let verified = self.verifier.verify(&effective, &reply).await?;
        tracing::info!("Answer verification: {}", if verified { "Yes" } else { "No" });

        if verified {
            return Ok(finish(reply, category, effective, AnswerOutcome::Verified));
        }
        if category == Category::AnswerCheck {
            return Ok(finish(reply, category, effective, AnswerOutcome::AcceptedUnverified));
        }

        tracing::info!("Retrying with extended context");
        let alt_query = format!("{} {}", effective, context);
        let alt_context = self.retriever.retrieve(&alt_query, RETRY_K).await?;
        let alt_prompt = self
            .prompts
            .build(category, &self.course, &effective, &alt_context)?;
        let retry_reply = self.generate(&alt_prompt).await?;

        if self.verifier.verify(&effective, &retry_reply).await? {
            tracing::info!("Retry answer verified");
            Ok(finish(retry_reply, category, effective, AnswerOutcome::RetryVerified))
        } else {
            tracing::info!("Retry answer not verified; declining");
            Ok(finish(REFUSAL.to_string(), category, effective, AnswerOutcome::Refused))
        }
    }

    async fn generate(&self, prompt: &PromptSpec) -> AppResult<String> {
        let request = LlmRequest::new(
            &self.model,
            vec![
                ChatMessage::system(&prompt.system),
                ChatMessage::user(&prompt.user),
            ],
        );

        let response = self.client.complete(&request).await?;
        tracing::debug!("Generated {} chars", response.content.len());
        Ok(response.content)
    }
}

fn finish(
    text: String,
    category: Category,
    effective_question: String,
    outcome: AnswerOutcome,
) -> AnswerResult {
    AnswerResult {
        text,
        category,
        effective_question,
        outcome,
    }
}

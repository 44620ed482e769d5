//! Offline pipeline pieces for command tests.

use std::sync::Arc;
use std::time::Duration;
use tutor_core::{course::CourseInfo, AppResult};
use tutor_knowledge::embeddings::providers::MockProvider;
use tutor_knowledge::{EmbeddingProvider, FlatIndex, Passage, PassageStore, Pipeline, Retriever};
use tutor_llm::{LlmClient, LlmRequest, LlmResponse};
use tutor_prompt::PromptBuilder;

const DIMENSIONS: usize = 16;

pub const PASSAGE: &str = "Recursion is a function calling itself on a smaller input.";

/// Replies with a fixed answer after `delay`.
pub struct SlowLlm {
    pub delay: Duration,
}

#[async_trait::async_trait]
impl LlmClient for SlowLlm {
    fn provider_name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tokio::time::sleep(self.delay).await;
        Ok(LlmResponse {
            content: "Which of these is recursive? A) ... B) ...".to_string(),
            model: request.model.clone(),
            usage: Default::default(),
        })
    }
}

/// A pipeline over a one-passage corpus whose model answers after `delay`.
pub async fn pipeline_with_delay(delay: Duration) -> Pipeline {
    let embedder = Arc::new(MockProvider::new(DIMENSIONS));
    let mut index = FlatIndex::new(DIMENSIONS);
    index.add(embedder.embed(PASSAGE).await.unwrap()).unwrap();
    let passages = PassageStore::new(vec![Passage {
        filename: "lecture3.pdf".to_string(),
        chunk_index: 0,
        chunk_text: PASSAGE.to_string(),
    }]);

    let retriever = Retriever::new(embedder, Arc::new(index), Arc::new(passages));
    Pipeline::new(
        Arc::new(SlowLlm { delay }),
        "test-model",
        retriever,
        PromptBuilder::with_defaults().unwrap(),
        CourseInfo::default(),
    )
}

//! Scripted services for driving the pipeline without a network.

use crate::embeddings::providers::MockProvider;
use crate::embeddings::EmbeddingProvider;
use crate::rag::Pipeline;
use crate::retriever::{PassageStore, Retriever};
use crate::types::Passage;
use crate::vector_index::{FlatIndex, Neighbor, VectorIndex};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tutor_core::{AppError, AppResult, CourseInfo};
use tutor_llm::{LlmClient, LlmRequest, LlmResponse};
use tutor_prompt::PromptBuilder;

pub const DIMENSIONS: usize = 64;

pub const PASSAGES: &[&str] = &[
    "Late work loses ten percent per day.",
    "Recursion is when a function calls itself; every recursion needs a base case.",
    "Merge sort runs in O(n log n) time.",
    "Office hours are Tuesdays at 3pm in room 204.",
    "The final exam is cumulative.",
    "Homework is due every Friday before midnight.",
];

/// Language model that replays a fixed script of replies in order.
///
/// `None` entries fail the call. Running past the end of the script fails too.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn new(script: &[Option<&str>]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(script.iter().map(|r| r.map(str::to_string)).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests that were full generations rather than yes/no judgments.
    pub fn generations(&self) -> Vec<LlmRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.max_tokens.is_none())
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(content)) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: Default::default(),
            }),
            Some(None) => Err(AppError::Llm("scripted failure".to_string())),
            None => Err(AppError::Llm("script exhausted".to_string())),
        }
    }
}

/// Mock embedder that records every text it is asked to embed.
#[derive(Debug)]
pub struct RecordingEmbedder {
    inner: MockProvider,
    texts: Mutex<Vec<String>>,
}

impl RecordingEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MockProvider::new(DIMENSIONS),
            texts: Mutex::new(Vec::new()),
        })
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for RecordingEmbedder {
    fn provider_name(&self) -> &str {
        "recording"
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.texts.lock().unwrap().extend_from_slice(texts);
        self.inner.embed_batch(texts).await
    }
}

/// Flat index that records the `k` of every search.
pub struct RecordingIndex {
    inner: FlatIndex,
    searches: Mutex<Vec<usize>>,
}

impl RecordingIndex {
    pub fn new(inner: FlatIndex) -> Arc<Self> {
        Arc::new(Self {
            inner,
            searches: Mutex::new(Vec::new()),
        })
    }

    pub fn searches(&self) -> Vec<usize> {
        self.searches.lock().unwrap().clone()
    }
}

impl VectorIndex for RecordingIndex {
    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<Neighbor>> {
        self.searches.lock().unwrap().push(k);
        self.inner.search(query, k)
    }
}

pub fn course() -> CourseInfo {
    CourseInfo {
        class_name: "CS 101".to_string(),
        professor: "Dr. Rivera".to_string(),
        assistants: "Ana and Ben".to_string(),
        class_description: "Introduction to programming".to_string(),
        instructions: String::new(),
        assistant_name: "Ada".to_string(),
    }
}

/// Embed `texts` into a flat index and matching passage store.
pub async fn build_corpus(texts: &[&str]) -> (FlatIndex, PassageStore) {
    let embedder = MockProvider::new(DIMENSIONS);
    let mut index = FlatIndex::new(DIMENSIONS);
    let mut passages = Vec::new();

    for (i, text) in texts.iter().enumerate() {
        index.add(embedder.embed(text).await.unwrap()).unwrap();
        passages.push(Passage {
            filename: "course.pdf".to_string(),
            chunk_index: i as u32,
            chunk_text: text.to_string(),
        });
    }

    (index, PassageStore::new(passages))
}

pub struct Harness {
    pub llm: Arc<ScriptedLlm>,
    pub embedder: Arc<RecordingEmbedder>,
    pub index: Arc<RecordingIndex>,
    pub retriever: Retriever,
    pub pipeline: Pipeline,
}

impl Harness {
    pub async fn new(script: &[Option<&str>]) -> Self {
        Self::with_corpus(PASSAGES, script).await
    }

    pub async fn with_corpus(texts: &[&str], script: &[Option<&str>]) -> Self {
        let (flat, passages) = build_corpus(texts).await;

        let llm = ScriptedLlm::new(script);
        let embedder = RecordingEmbedder::new();
        let index = RecordingIndex::new(flat);
        let retriever = Retriever::new(embedder.clone(), index.clone(), Arc::new(passages));

        let pipeline = Pipeline::new(
            llm.clone(),
            "gpt-4o-mini",
            retriever.clone(),
            PromptBuilder::with_defaults().unwrap(),
            course(),
        );

        Self {
            llm,
            embedder,
            index,
            retriever,
            pipeline,
        }
    }
}

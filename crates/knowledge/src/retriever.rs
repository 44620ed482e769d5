//! Context retrieval: question text in, joined passage text out.

use crate::embeddings::EmbeddingProvider;
use crate::types::Passage;
use crate::vector_index::VectorIndex;
use std::sync::Arc;
use tutor_core::AppResult;

/// Separator between passages in a context block.
pub const PASSAGE_SEPARATOR: &str = "\n\n";

/// Position-addressed passage metadata.
#[derive(Debug, Clone, Default)]
pub struct PassageStore {
    passages: Vec<Passage>,
}

impl PassageStore {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    /// Look up a passage by index position. Negative or out-of-range
    /// positions yield `None`.
    pub fn get(&self, position: i64) -> Option<&Passage> {
        usize::try_from(position)
            .ok()
            .and_then(|p| self.passages.get(p))
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// Turns text into a context block via embedding and nearest-neighbor search.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    passages: Arc<PassageStore>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("embedder", &self.embedder.provider_name())
            .field("indexed", &self.index.len())
            .field("passages", &self.passages.len())
            .finish()
    }
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        passages: Arc<PassageStore>,
    ) -> Self {
        Self {
            embedder,
            index,
            passages,
        }
    }

    /// Nearest passages to `text`, in index order, skipping positions that
    /// have no stored passage.
    pub async fn nearest(&self, text: &str, k: usize) -> AppResult<Vec<(Passage, f32)>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query = self.embedder.embed(text).await?;
        let neighbors = self.index.search(&query, k)?;

        let mut found = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            match self.passages.get(neighbor.position) {
                Some(passage) => found.push((passage.clone(), neighbor.distance)),
                None => tracing::debug!(
                    "Skipping index position {} with no stored passage",
                    neighbor.position
                ),
            }
        }
        Ok(found)
    }

    /// Context block for `text`: up to `k` passage texts joined by a blank line.
    pub async fn retrieve(&self, text: &str, k: usize) -> AppResult<String> {
        let found = self.nearest(text, k).await?;

        tracing::debug!("Retrieved {} passages (requested {})", found.len(), k);

        Ok(found
            .iter()
            .map(|(passage, _)| passage.chunk_text.as_str())
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR))
    }
}

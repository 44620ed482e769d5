//! Course knowledge and question answering.
//!
//! Holds embedded course passages in a local SQLite store, serves them
//! through an in-memory flat vector index, and answers questions over
//! them with the `rag` pipeline.

pub mod config;
pub mod embeddings;
pub mod rag;
pub mod retriever;
pub mod store;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use rag::{AnswerOutcome, AnswerResult, Pipeline, SessionState, REFUSAL};
pub use retriever::{PassageStore, Retriever};
pub use types::{EmbeddedRecord, ImportStats, KnowledgeStats, Passage};
pub use vector_index::{FlatIndex, Neighbor, VectorIndex, NO_MATCH};

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tutor_core::{AppError, AppResult};

/// Import already-embedded passages from a JSON array of records.
///
/// Every record must share the store's embedding dimension (or, for an
/// empty or reset store, the first record's). Nothing is written, and
/// nothing is reset, if any record is rejected.
pub fn import_records(workspace: &Path, records_path: &Path, reset: bool) -> AppResult<ImportStats> {
    let start = Instant::now();

    tracing::info!("Importing passages from {:?}", records_path);

    let content = std::fs::read_to_string(records_path)?;
    let records: Vec<EmbeddedRecord> = serde_json::from_str(&content)?;

    let index_path = config::get_index_path(workspace);
    let mut conn = store::init_store(&index_path)?;

    let stored = if reset {
        None
    } else {
        store::stored_dimensions(&conn)?
    };
    let expected = stored.or_else(|| records.first().map(|r| r.embedding.len()));

    if let Some(expected) = expected {
        if expected == 0 {
            return Err(AppError::Knowledge("Records have empty embeddings".to_string()));
        }
        if let Some((i, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.embedding.len() != expected)
        {
            return Err(AppError::Knowledge(format!(
                "Record {} ({} #{}) has {} dimensions, expected {}",
                i,
                record.filename,
                record.chunk_index,
                record.embedding.len(),
                expected
            )));
        }
    }

    let tx = conn
        .transaction()
        .map_err(|e| AppError::Knowledge(format!("Failed to start transaction: {}", e)))?;

    if reset {
        tracing::info!("Resetting knowledge base");
        store::reset_store(&tx)?;
    }

    let mut passages_imported = 0u32;
    for record in records {
        let (passage, embedding) = record.into_parts();
        store::insert_passage(&tx, &passage, &embedding)?;
        passages_imported += 1;
    }

    tx.commit()
        .map_err(|e| AppError::Knowledge(format!("Failed to commit import: {}", e)))?;

    let passages_total = store::count_passages(&conn)?;
    let duration = start.elapsed();

    tracing::info!(
        "Import completed: {} passages ({} total) in {:.2}s",
        passages_imported,
        passages_total,
        duration.as_secs_f64()
    );

    Ok(ImportStats {
        passages_imported,
        passages_total,
        dimensions: expected.unwrap_or(0),
        duration_secs: duration.as_secs_f64(),
    })
}

/// Get statistics for the workspace's knowledge base.
pub fn get_stats(workspace: &Path) -> AppResult<KnowledgeStats> {
    let index_path = config::get_index_path(workspace);

    if !index_path.exists() {
        return Ok(KnowledgeStats {
            passages_count: 0,
            files_count: 0,
            dimensions: None,
            db_size_bytes: 0,
        });
    }

    let conn = store::init_store(&index_path)?;
    store::get_stats(&conn, &index_path)
}

/// Passages and vectors loaded from the workspace store.
#[derive(Debug)]
pub struct KnowledgeBase {
    index: Option<FlatIndex>,
    passages: PassageStore,
}

impl KnowledgeBase {
    /// Load the store into memory. A missing store is an empty knowledge base.
    pub fn open(workspace: &Path) -> AppResult<Self> {
        let index_path = config::get_index_path(workspace);
        if !index_path.exists() {
            tracing::warn!("No knowledge base at {:?}; answers will have no context", index_path);
            return Ok(Self {
                index: None,
                passages: PassageStore::default(),
            });
        }

        let conn = store::init_store(&index_path)?;
        let rows = store::load_all(&conn)?;

        let mut index: Option<FlatIndex> = None;
        let mut passages = Vec::with_capacity(rows.len());
        for (passage, embedding) in rows {
            index
                .get_or_insert_with(|| FlatIndex::new(embedding.len()))
                .add(embedding)?;
            passages.push(passage);
        }

        tracing::debug!("Loaded {} passages from {:?}", passages.len(), index_path);

        Ok(Self {
            index,
            passages: PassageStore::new(passages),
        })
    }

    /// Embedding dimension of the stored passages, if any.
    pub fn dimensions(&self) -> Option<usize> {
        self.index.as_ref().map(|i| i.dimensions())
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Build a retriever that embeds queries with `embedder`.
    pub fn into_retriever(self, embedder: Arc<dyn EmbeddingProvider>) -> AppResult<Retriever> {
        let index = match self.index {
            Some(index) => {
                if index.dimensions() != embedder.dimensions() {
                    return Err(AppError::Config(format!(
                        "Embedding provider '{}' produces {} dimensions but the knowledge base has {}",
                        embedder.provider_name(),
                        embedder.dimensions(),
                        index.dimensions()
                    )));
                }
                index
            }
            None => FlatIndex::new(embedder.dimensions()),
        };

        Ok(Retriever::new(
            embedder,
            Arc::new(index),
            Arc::new(self.passages),
        ))
    }
}

//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};

/// A slice of course material with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Source document file name
    pub filename: String,

    /// Position of this chunk within its document
    pub chunk_index: u32,

    /// Text content
    pub chunk_text: String,
}

/// A passage together with its embedding, as produced by the ingestion scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    pub filename: String,
    pub chunk_index: u32,
    pub chunk_text: String,
    pub embedding: Vec<f32>,
}

impl EmbeddedRecord {
    /// Split into the stored passage and its vector.
    pub fn into_parts(self) -> (Passage, Vec<f32>) {
        (
            Passage {
                filename: self.filename,
                chunk_index: self.chunk_index,
                chunk_text: self.chunk_text,
            },
            self.embedding,
        )
    }
}

/// Statistics from an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStats {
    /// Records written
    pub passages_imported: u32,

    /// Total passages in the store afterwards
    pub passages_total: u32,

    /// Embedding dimension of the store
    pub dimensions: usize,

    /// Duration in seconds
    pub duration_secs: f64,
}

/// Statistics for the passage store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
    /// Number of passages
    pub passages_count: u32,

    /// Number of distinct source files
    pub files_count: u32,

    /// Embedding dimension, if any passage is stored
    pub dimensions: Option<usize>,

    /// Database size in bytes
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let json = r#"{"filename": "syllabus.pdf", "chunk_index": 2, "chunk_text": "Late work", "embedding": [0.1, 0.2]}"#;
        let record: EmbeddedRecord = serde_json::from_str(json).unwrap();
        let (passage, embedding) = record.into_parts();

        assert_eq!(passage.filename, "syllabus.pdf");
        assert_eq!(passage.chunk_index, 2);
        assert_eq!(passage.chunk_text, "Late work");
        assert_eq!(embedding, vec![0.1, 0.2]);
    }
}

//! Embedding service boundary.
//!
//! Converts text into fixed-length vectors comparable with the stored
//! passage embeddings.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};

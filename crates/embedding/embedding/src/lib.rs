//! # Text Embeddings
//!
//! Defines the embedding capability consumed by the memory repository. An embedding
//! service turns a text into a fixed-length `f32` vector; every vector produced by one
//! service has the same dimension, which must match the vector store collection.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig, DEFAULT_EMBEDDING_MODEL};

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;
}

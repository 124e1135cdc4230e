//! Shared test utilities for memory integration tests.
//!
//! Provides deterministic embedding services and a vector store that always fails,
//! so repository and assembler behaviour can be tested without external APIs.

use async_trait::async_trait;
use embedding::EmbeddingService;
use memory::MemoryRepository;
use memory_core::{MemoryRecord, ScoredRecord, VectorStore};
use memory_inmemory::InMemoryVectorStore;
use std::sync::Arc;

pub const DIMENSION: usize = 32;

/// Bag-of-words embedding: each lowercase word adds 1.0 to a hashed bucket.
/// Identical texts get identical vectors; texts sharing words are closer.
pub struct KeywordEmbeddingService;

pub fn keyword_embedding(text: &str) -> Vec<f32> {
    let mut v = vec![0.0; DIMENSION];
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let hash = word
            .to_lowercase()
            .bytes()
            .fold(0xcbf29ce484222325u64, |h, b| (h ^ b as u64).wrapping_mul(0x100000001b3));
        v[(hash % DIMENSION as u64) as usize] += 1.0;
    }
    v
}

#[async_trait]
impl EmbeddingService for KeywordEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Ok(keyword_embedding(text))
    }
}

/// Embedding service whose every call fails.
#[allow(dead_code)]
pub struct FailingEmbeddingService;

#[async_trait]
impl EmbeddingService for FailingEmbeddingService {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
        anyhow::bail!("embedding endpoint unavailable")
    }
}

/// Vector store whose every operation fails.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl VectorStore for FailingStore {
    fn collection(&self) -> &str {
        "broken"
    }

    async fn add(&self, _record: MemoryRecord) -> Result<(), anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn upsert(&self, _record: MemoryRecord) -> Result<(), anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn get(&self, _id: &str) -> Result<Option<MemoryRecord>, anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn delete(&self, _ids: &[String]) -> Result<usize, anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn ids(&self) -> Result<Vec<String>, anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        anyhow::bail!("store offline")
    }

    async fn query(
        &self,
        _embedding: &[f32],
        _k: usize,
    ) -> Result<Vec<ScoredRecord>, anyhow::Error> {
        anyhow::bail!("store offline")
    }
}

/// Repository over a fresh in-memory store and the keyword embedder.
pub fn repository() -> MemoryRepository {
    MemoryRepository::new(
        Arc::new(InMemoryVectorStore::new("memory_store")),
        Arc::new(KeywordEmbeddingService),
    )
}

//! # Vector Storage
//!
//! The `VectorStore` trait is implemented by the storage backends (in-memory, SQLite).
//! A store holds one named collection of [`MemoryRecord`]s searched by cosine distance.
//!
//! Every backend keeps these invariants:
//! - ids are unique within the collection; `add` on an existing id fails with
//!   [`VectorStoreError::DuplicateId`](crate::VectorStoreError::DuplicateId)
//! - the first record fixes the embedding dimension; writes or queries with another
//!   length fail with [`VectorStoreError::DimensionMismatch`](crate::VectorStoreError::DimensionMismatch)
//! - a query against an empty collection returns an empty result

use async_trait::async_trait;

use crate::types::{MemoryRecord, ScoredRecord};

/// Trait for storing and searching memory records.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of the collection this store serves.
    fn collection(&self) -> &str;

    /// Inserts a new record. Fails if the id already exists.
    async fn add(&self, record: MemoryRecord) -> Result<(), anyhow::Error>;

    /// Inserts the record, or replaces the one stored under the same id.
    async fn upsert(&self, record: MemoryRecord) -> Result<(), anyhow::Error>;

    /// Retrieves a record by id. Returns `None` if not found.
    async fn get(&self, id: &str) -> Result<Option<MemoryRecord>, anyhow::Error>;

    /// Removes the given ids. Missing ids are ignored; returns how many records were removed.
    async fn delete(&self, ids: &[String]) -> Result<usize, anyhow::Error>;

    /// All ids in the collection.
    async fn ids(&self) -> Result<Vec<String>, anyhow::Error>;

    async fn count(&self) -> Result<usize, anyhow::Error>;

    /// Returns up to `k` records closest to `embedding`, most similar first.
    async fn query(&self, embedding: &[f32], k: usize)
        -> Result<Vec<ScoredRecord>, anyhow::Error>;
}

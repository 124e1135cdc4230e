//! # In-Memory Vector Store
//!
//! Volatile implementation of [`VectorStore`] for testing and development
//! (`MEMORY_STORE_TYPE=memory`). Data is lost on restart.
//!
//! ## Example
//!
//! ```rust
//! use memory_core::{MemoryMetadata, MemoryRecord, VectorStore};
//! use memory_inmemory::InMemoryVectorStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = InMemoryVectorStore::new("memory_store");
//!     let record = MemoryRecord::new(
//!         "journal_1",
//!         vec![0.1, 0.2, 0.3],
//!         "Long walk by the lake",
//!         MemoryMetadata::journal(),
//!     );
//!     store.add(record).await?;
//!
//!     let hits = store.query(&[0.1, 0.2, 0.3], 1).await?;
//!     assert_eq!(hits[0].record.id, "journal_1");
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use memory_core::{
    check_dimension, rank_by_distance, MemoryRecord, ScoredRecord, VectorStore, VectorStoreError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Collection {
    records: HashMap<String, MemoryRecord>,
    /// Fixed by the first stored record; reset when the collection becomes empty.
    dimension: Option<usize>,
}

impl Collection {
    fn insert(&mut self, record: MemoryRecord) {
        self.dimension.get_or_insert(record.dimension());
        self.records.insert(record.id.clone(), record);
    }
}

/// In-memory vector store. Cloning shares the underlying collection.
#[derive(Debug, Clone)]
pub struct InMemoryVectorStore {
    name: String,
    inner: Arc<RwLock<Collection>>,
}

impl InMemoryVectorStore {
    /// Creates a new empty store serving `collection`.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            name: collection.into(),
            inner: Arc::new(RwLock::new(Collection::default())),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Embedding dimension of the collection, if any record was stored.
    pub async fn dimension(&self) -> Option<usize> {
        self.inner.read().await.dimension
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn collection(&self) -> &str {
        &self.name
    }

    async fn add(&self, record: MemoryRecord) -> Result<(), anyhow::Error> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&record.id) {
            return Err(VectorStoreError::DuplicateId(record.id).into());
        }
        check_dimension(inner.dimension, record.dimension())?;
        debug!(id = %record.id, collection = %self.name, "add record");
        inner.insert(record);
        Ok(())
    }

    async fn upsert(&self, record: MemoryRecord) -> Result<(), anyhow::Error> {
        let mut inner = self.inner.write().await;
        check_dimension(inner.dimension, record.dimension())?;
        debug!(id = %record.id, collection = %self.name, "upsert record");
        inner.insert(record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<MemoryRecord>, anyhow::Error> {
        Ok(self.inner.read().await.records.get(id).cloned())
    }

    async fn delete(&self, ids: &[String]) -> Result<usize, anyhow::Error> {
        let mut inner = self.inner.write().await;
        let removed = ids
            .iter()
            .filter(|id| inner.records.remove(id.as_str()).is_some())
            .count();
        if inner.records.is_empty() {
            inner.dimension = None;
        }
        Ok(removed)
    }

    async fn ids(&self) -> Result<Vec<String>, anyhow::Error> {
        let mut ids: Vec<String> = self.inner.read().await.records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        Ok(self.len().await)
    }

    async fn query(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredRecord>, anyhow::Error> {
        let inner = self.inner.read().await;
        if inner.records.is_empty() {
            return Ok(Vec::new());
        }
        check_dimension(inner.dimension, embedding.len())?;
        Ok(rank_by_distance(
            embedding,
            inner.records.values().cloned(),
            k,
        ))
    }
}

//! # Memory Repository
//!
//! Adapter between the application and the vector store. Owns the id scheme, the
//! timestamps and the metadata layout of every stored memory.
//!
//! Writes (`add_*`) propagate embedding and store errors. Reads and deletes are
//! best-effort: failures are logged and turned into an empty result or `false`.

use chrono::{DateTime, FixedOffset};
use embedding::EmbeddingService;
use memory_core::{
    interaction_memory_id, journal_memory_id, MemoryKind, MemoryMetadata, MemoryRecord,
    VectorStore,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Default number of memories retrieved for a message.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 3;

/// A memory returned by [`MemoryRepository::query_relevant`].
#[derive(Debug, Clone, PartialEq)]
pub struct RelevantMemory {
    pub id: String,
    pub text: String,
    /// ISO-8601 creation time
    pub timestamp: String,
    pub kind: MemoryKind,
    /// Cosine distance to the query; smaller is more similar
    pub distance: f32,
}

/// Stores and retrieves memories through an embedding service and a vector store.
#[derive(Clone)]
pub struct MemoryRepository {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingService>,
}

impl MemoryRepository {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn EmbeddingService>) -> Self {
        Self { store, embedder }
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Embeds `text` and stores it as an interaction of `chat_id`. Returns the new id.
    ///
    /// Ids never collide: see [`memory_core::interaction_memory_id`]. Should one exist
    /// anyway, the store rejects it instead of overwriting.
    #[instrument(skip(self, text), fields(chat_id = %chat_id, text_len = text.len()))]
    pub async fn add_interaction_memory(
        &self,
        text: &str,
        chat_id: &str,
    ) -> Result<String, anyhow::Error> {
        let embedding = self.embedder.embed(text).await?;
        let metadata = MemoryMetadata::interaction(chat_id);
        let id = interaction_memory_id(chat_id, &metadata.timestamp);

        self.store
            .add(MemoryRecord::new(id.clone(), embedding, text, metadata))
            .await?;
        info!(memory_id = %id, "stored interaction memory");
        Ok(id)
    }

    /// Embeds `text` and stores it as a journal memory.
    ///
    /// With `entry_id` the record is upserted under that id, so editing a journal entry
    /// replaces its embedding instead of adding a second one. Without it a fresh
    /// `journal_{uuid}` id is allocated. Returns the id and the stored timestamp.
    #[instrument(skip(self, text), fields(entry_id = ?entry_id, text_len = text.len()))]
    pub async fn add_journal_memory(
        &self,
        text: &str,
        entry_id: Option<&str>,
    ) -> Result<(String, DateTime<FixedOffset>), anyhow::Error> {
        let embedding = self.embedder.embed(text).await?;
        let metadata = MemoryMetadata::journal();
        let timestamp = metadata.timestamp;
        let id = entry_id.map(str::to_string).unwrap_or_else(journal_memory_id);

        self.store
            .upsert(MemoryRecord::new(id.clone(), embedding, text, metadata))
            .await?;
        info!(memory_id = %id, "stored journal memory");
        Ok((id, timestamp))
    }

    /// Returns up to `k` memories most similar to `text`, most similar first.
    ///
    /// Searches the whole collection; `chat_id` is only logged. Never fails: an empty
    /// store, an embedding error or a store error all yield an empty sequence.
    #[instrument(skip(self, text), fields(chat_id = %chat_id, k = k))]
    pub async fn query_relevant(&self, text: &str, chat_id: &str, k: usize) -> Vec<RelevantMemory> {
        if k == 0 {
            return Vec::new();
        }

        let embedding = match self.embedder.embed(text).await {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "query embedding failed, continuing without memories");
                return Vec::new();
            }
        };

        match self.store.query(&embedding, k).await {
            Ok(hits) => {
                debug!(hits = hits.len(), "memory query done");
                hits.into_iter()
                    .map(|hit| RelevantMemory {
                        timestamp: hit.record.metadata.timestamp_iso(),
                        kind: hit.record.metadata.kind,
                        id: hit.record.id,
                        text: hit.record.document,
                        distance: hit.distance,
                    })
                    .collect()
            }
            Err(e) => {
                warn!(error = %e, "memory query failed, continuing without memories");
                Vec::new()
            }
        }
    }

    /// Removes one memory. A missing id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> bool {
        match self.store.delete(&[id.to_string()]).await {
            Ok(removed) => {
                debug!(removed, "delete memory");
                true
            }
            Err(e) => {
                error!(error = %e, "Error deleting memory");
                false
            }
        }
    }

    /// Removes every memory in the collection. An empty store succeeds.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> bool {
        let ids = match self.store.ids().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Error listing memories");
                return false;
            }
        };
        if ids.is_empty() {
            return true;
        }

        match self.store.delete(&ids).await {
            Ok(removed) => {
                info!(removed, collection = %self.store.collection(), "deleted all memories");
                true
            }
            Err(e) => {
                error!(error = %e, "Error deleting all memories");
                false
            }
        }
    }

    /// Number of stored memories; 0 when the store cannot be read.
    pub async fn count(&self) -> usize {
        self.store.count().await.unwrap_or_else(|e| {
            warn!(error = %e, "memory count failed");
            0
        })
    }

    pub async fn get(&self, id: &str) -> Result<Option<MemoryRecord>, anyhow::Error> {
        self.store.get(id).await
    }
}

//! Repository trait and its JSON list implementation.
//!
//! A [`JsonRepository`] keeps a `Vec<T>` in one JSON file. Every operation loads the
//! file, applies the change and saves it back, holding an async lock so two operations
//! in the same process never interleave. List order is insertion order; `save` on an
//! existing id replaces the element in place.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;
use crate::json_file::JsonFile;
use crate::models::{Conversation, JournalEntry, Record};

#[async_trait]
pub trait Repository<T> {
    /// Inserts the entity or replaces the one with the same id.
    async fn save(&self, entity: &T) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StorageError>;
    async fn find_all(&self) -> Result<Vec<T>, StorageError>;
    /// Returns whether an entity was removed.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;
}

/// A list of records persisted as one JSON array.
#[derive(Debug, Clone)]
pub struct JsonRepository<T> {
    file: JsonFile<Vec<T>>,
    lock: Arc<Mutex<()>>,
}

pub type ConversationRepository = JsonRepository<Conversation>;
pub type JournalRepository = JsonRepository<JournalEntry>;

impl<T> JsonRepository<T>
where
    T: Record + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Replaces the whole list with an empty one.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.file.save(&Vec::new()).await
    }

    /// Applies `f` to the record with `id` and persists the list. Returns the updated record.
    pub async fn update<F>(&self, id: &str, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut T) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.file.load().await;
        let item = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        f(item);
        let updated = item.clone();
        self.file.save(&items).await?;
        Ok(updated)
    }
}

#[async_trait]
impl<T> Repository<T> for JsonRepository<T>
where
    T: Record + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    async fn save(&self, entity: &T) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.file.load().await;
        match items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(existing) => *existing = entity.clone(),
            None => items.push(entity.clone()),
        }
        self.file.save(&items).await?;
        debug!(id = %entity.id(), path = %self.file.path().display(), "saved record");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StorageError> {
        let items = self.file.load().await;
        Ok(items.into_iter().find(|item| item.id() == id))
    }

    async fn find_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.file.load().await)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.file.load().await;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.file.save(&items).await?;
        Ok(true)
    }
}

impl JsonRepository<JournalEntry> {
    /// Replaces an entry's content and stamps `last_edited`.
    pub async fn update_content(
        &self,
        id: &str,
        content: &str,
        edited_at: &str,
    ) -> Result<JournalEntry, StorageError> {
        let content = content.to_string();
        let edited_at = edited_at.to_string();
        self.update(id, move |entry| {
            entry.content = content;
            entry.last_edited = Some(edited_at);
        })
        .await
    }

    /// Stores (or clears, with `None`) an entry's emotion analysis.
    pub async fn set_analysis(
        &self,
        id: &str,
        analysis: Option<String>,
    ) -> Result<JournalEntry, StorageError> {
        self.update(id, move |entry| entry.emotion_analysis = analysis)
            .await
    }
}

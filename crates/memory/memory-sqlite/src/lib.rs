//! # SQLite Vector Store
//!
//! Persistent implementation of [`VectorStore`]: memory records and their embeddings live in
//! one SQLite file and survive restarts. Several collections can share a file.
//!
//! Nearest-neighbor queries load the collection and rank in process, which is fine for a
//! single user's memories but not for large datasets.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memory_core::{MemoryMetadata, MemoryRecord, VectorStore};
//! use memory_sqlite::SqliteVectorStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = SqliteVectorStore::open("data/memory_db.sqlite", "memory_store").await?;
//!     let record = MemoryRecord::new(
//!         "journal_1",
//!         vec![0.1, 0.2, 0.3],
//!         "Long walk by the lake",
//!         MemoryMetadata::journal(),
//!     );
//!     store.upsert(record).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Database Schema
//!
//! ```sql
//! CREATE TABLE memory_records (
//!     collection TEXT NOT NULL,
//!     id TEXT NOT NULL,
//!     document TEXT NOT NULL,
//!     timestamp TEXT NOT NULL,
//!     chat_id TEXT,
//!     kind TEXT NOT NULL,
//!     dimension INTEGER NOT NULL,
//!     embedding BLOB NOT NULL,
//!     PRIMARY KEY (collection, id)
//! );
//! ```

use async_trait::async_trait;
use chrono::DateTime;
use memory_core::{
    check_dimension, rank_by_distance, MemoryKind, MemoryMetadata, MemoryRecord, ScoredRecord,
    VectorStore, VectorStoreError,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS memory_records (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        document TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        chat_id TEXT,
        kind TEXT NOT NULL,
        dimension INTEGER NOT NULL,
        embedding BLOB NOT NULL,
        PRIMARY KEY (collection, id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_memory_records_timestamp ON memory_records(collection, timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_memory_records_chat_id ON memory_records(collection, chat_id)",
];

/// SQLite-based vector store for one collection.
#[derive(Debug, Clone)]
pub struct SqliteVectorStore {
    pool: SqlitePool,
    collection: String,
}

impl SqliteVectorStore {
    /// Opens (creating if missing) the database at `path` and serves `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or if the database
    /// connection or schema initialization fails.
    pub async fn open(path: impl AsRef<Path>, collection: &str) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        info!(path = %path.display(), collection = %collection, "opened sqlite vector store");
        Self::with_pool(pool, collection).await
    }

    /// Private in-memory database, mainly for tests. A single connection is kept
    /// open for the lifetime of the pool so the data is not dropped.
    pub async fn in_memory(collection: &str) -> Result<Self, anyhow::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool, collection).await
    }

    async fn with_pool(pool: SqlitePool, collection: &str) -> Result<Self, anyhow::Error> {
        let store = Self {
            pool,
            collection: collection.to_string(),
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), anyhow::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Dimension fixed by the records already in the collection.
    async fn stored_dimension(&self) -> Result<Option<usize>, anyhow::Error> {
        let dimension: Option<i64> =
            sqlx::query_scalar("SELECT dimension FROM memory_records WHERE collection = ?1 LIMIT 1")
                .bind(&self.collection)
                .fetch_optional(&self.pool)
                .await?;
        Ok(dimension.map(|d| d as usize))
    }

    fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Converts a `memory_records` row into a [`MemoryRecord`].
    ///
    /// The embedding BLOB holds little-endian f32 values; a length that is not a multiple
    /// of 4 or disagrees with the `dimension` column is reported as `Corrupt`.
    fn row_to_record(row: &SqliteRow) -> Result<MemoryRecord, anyhow::Error> {
        let id: String = row.try_get("id")?;
        let document: String = row.try_get("document")?;
        let timestamp_str: String = row.try_get("timestamp")?;
        let chat_id: Option<String> = row.try_get("chat_id")?;
        let kind_str: String = row.try_get("kind")?;
        let dimension: i64 = row.try_get("dimension")?;
        let blob: Vec<u8> = row.try_get("embedding")?;

        let corrupt = |reason: String| VectorStoreError::Corrupt {
            id: id.clone(),
            reason,
        };

        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|e| corrupt(format!("invalid timestamp {:?}: {}", timestamp_str, e)))?;
        let kind = MemoryKind::from_str(&kind_str).map_err(corrupt)?;

        if blob.len() % 4 != 0 || blob.len() / 4 != dimension as usize {
            return Err(corrupt(format!(
                "embedding blob of {} bytes does not hold {} floats",
                blob.len(),
                dimension
            ))
            .into());
        }
        let embedding = blob
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(MemoryRecord {
            id,
            embedding,
            document,
            metadata: MemoryMetadata {
                timestamp,
                chat_id,
                kind,
            },
        })
    }

    async fn write(&self, record: &MemoryRecord, replace: bool) -> Result<u64, anyhow::Error> {
        let sql = if replace {
            r#"
            INSERT INTO memory_records (
                collection, id, document, timestamp, chat_id, kind, dimension, embedding
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(collection, id) DO UPDATE SET
                document = excluded.document,
                timestamp = excluded.timestamp,
                chat_id = excluded.chat_id,
                kind = excluded.kind,
                dimension = excluded.dimension,
                embedding = excluded.embedding
            "#
        } else {
            r#"
            INSERT INTO memory_records (
                collection, id, document, timestamp, chat_id, kind, dimension, embedding
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(collection, id) DO NOTHING
            "#
        };

        let result = sqlx::query(sql)
            .bind(&self.collection)
            .bind(&record.id)
            .bind(&record.document)
            .bind(record.metadata.timestamp_iso())
            .bind(&record.metadata.chat_id)
            .bind(record.metadata.kind.as_str())
            .bind(record.dimension() as i64)
            .bind(Self::encode_embedding(&record.embedding))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn add(&self, record: MemoryRecord) -> Result<(), anyhow::Error> {
        check_dimension(self.stored_dimension().await?, record.dimension())?;
        if self.write(&record, false).await? == 0 {
            return Err(VectorStoreError::DuplicateId(record.id).into());
        }
        debug!(id = %record.id, collection = %self.collection, "add record");
        Ok(())
    }

    async fn upsert(&self, record: MemoryRecord) -> Result<(), anyhow::Error> {
        check_dimension(self.stored_dimension().await?, record.dimension())?;
        self.write(&record, true).await?;
        debug!(id = %record.id, collection = %self.collection, "upsert record");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<MemoryRecord>, anyhow::Error> {
        let row = sqlx::query("SELECT * FROM memory_records WHERE collection = ?1 AND id = ?2")
            .bind(&self.collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, ids: &[String]) -> Result<usize, anyhow::Error> {
        let mut tx = self.pool.begin().await?;
        let mut removed = 0u64;
        for id in ids {
            let result = sqlx::query("DELETE FROM memory_records WHERE collection = ?1 AND id = ?2")
                .bind(&self.collection)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            removed += result.rows_affected();
        }
        tx.commit().await?;
        Ok(removed as usize)
    }

    async fn ids(&self) -> Result<Vec<String>, anyhow::Error> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM memory_records WHERE collection = ?1 ORDER BY id")
                .bind(&self.collection)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memory_records WHERE collection = ?1")
                .bind(&self.collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(count as usize)
    }

    async fn query(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredRecord>, anyhow::Error> {
        let rows = sqlx::query("SELECT * FROM memory_records WHERE collection = ?1")
            .bind(&self.collection)
            .fetch_all(&self.pool)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        check_dimension(records.first().map(MemoryRecord::dimension), embedding.len())?;

        Ok(rank_by_distance(embedding, records, k))
    }
}

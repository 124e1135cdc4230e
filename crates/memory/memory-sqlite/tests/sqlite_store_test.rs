//! Integration tests for [`memory_sqlite::SqliteVectorStore`].

use memory_core::{MemoryKind, MemoryMetadata, MemoryRecord, VectorStore, VectorStoreError};
use memory_sqlite::SqliteVectorStore;
use tempfile::TempDir;

fn interaction(id: &str, embedding: Vec<f32>, text: &str) -> MemoryRecord {
    MemoryRecord::new(id, embedding, text, MemoryMetadata::interaction("chat-1"))
}

fn journal(id: &str, embedding: Vec<f32>, text: &str) -> MemoryRecord {
    MemoryRecord::new(id, embedding, text, MemoryMetadata::journal())
}

#[tokio::test]
async fn test_empty_collection_query() {
    let store = SqliteVectorStore::in_memory("memory_store").await.unwrap();
    assert!(store.query(&[1.0, 0.0], 3).await.unwrap().is_empty());
    assert_eq!(store.count().await.unwrap(), 0);
}

/// **Test:** records survive reopening the database file.
///
/// **Setup:** add one interaction and one journal record, drop the store.
/// **Action:** reopen the same path.
/// **Expected:** both records round-trip with metadata intact.
#[tokio::test]
async fn test_persistence_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("memory_db.sqlite");

    {
        let store = SqliteVectorStore::open(&path, "memory_store").await.unwrap();
        store
            .add(interaction("mem_1", vec![0.5, -0.25, 1.0], "User: hi\nAssistant: hello"))
            .await
            .unwrap();
        store.add(journal("entry-1", vec![1.0, 0.0, 0.0], "Rainy day")).await.unwrap();
    }

    let store = SqliteVectorStore::open(&path, "memory_store").await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);

    let record = store.get("mem_1").await.unwrap().unwrap();
    assert_eq!(record.embedding, vec![0.5, -0.25, 1.0]);
    assert_eq!(record.document, "User: hi\nAssistant: hello");
    assert_eq!(record.metadata.chat_id.as_deref(), Some("chat-1"));
    assert_eq!(record.metadata.kind, MemoryKind::Interaction);

    let journal = store.get("entry-1").await.unwrap().unwrap();
    assert_eq!(journal.metadata.kind, MemoryKind::Journal);
    assert!(journal.metadata.chat_id.is_none());
}

#[tokio::test]
async fn test_add_duplicate_rejected_upsert_replaces() {
    let store = SqliteVectorStore::in_memory("memory_store").await.unwrap();
    store.add(journal("E", vec![1.0, 0.0], "text")).await.unwrap();

    let err = store.add(journal("E", vec![1.0, 0.0], "dup")).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VectorStoreError>(),
        Some(VectorStoreError::DuplicateId(id)) if id == "E"
    ));

    store.upsert(journal("E", vec![0.0, 1.0], "text2")).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
    let record = store.get("E").await.unwrap().unwrap();
    assert_eq!(record.document, "text2");
    assert_eq!(record.embedding, vec![0.0, 1.0]);
}

#[tokio::test]
async fn test_dimension_mismatch() {
    let store = SqliteVectorStore::in_memory("memory_store").await.unwrap();
    store.add(journal("a", vec![1.0, 0.0], "x")).await.unwrap();

    let err = store.upsert(journal("b", vec![1.0], "y")).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VectorStoreError>(),
        Some(VectorStoreError::DimensionMismatch { expected: 2, actual: 1 })
    ));
    assert!(store.query(&[1.0, 0.0, 0.0], 1).await.is_err());
}

#[tokio::test]
async fn test_query_ranking_and_delete() {
    let store = SqliteVectorStore::in_memory("memory_store").await.unwrap();
    store.add(interaction("far", vec![0.0, 1.0], "far")).await.unwrap();
    store.add(interaction("near", vec![1.0, 0.2], "near")).await.unwrap();
    store.add(interaction("exact", vec![3.0, 0.0], "exact")).await.unwrap();

    let hits = store.query(&[1.0, 0.0], 2).await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
    assert_eq!(ids, vec!["exact", "near"]);

    let removed = store
        .delete(&["exact".to_string(), "missing".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(store.ids().await.unwrap(), vec!["far".to_string(), "near".to_string()]);

    store.delete(&store.ids().await.unwrap()).await.unwrap();
    assert!(store.query(&[1.0, 0.0], 3).await.unwrap().is_empty());
}

/// **Test:** two collections in one file do not see each other's records.
#[tokio::test]
async fn test_collections_are_isolated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory_db.sqlite");
    let a = SqliteVectorStore::open(&path, "a").await.unwrap();
    let b = SqliteVectorStore::open(&path, "b").await.unwrap();

    a.add(journal("x", vec![1.0, 0.0], "only in a")).await.unwrap();
    b.add(journal("x", vec![1.0, 0.0, 0.0], "only in b")).await.unwrap();

    assert_eq!(a.count().await.unwrap(), 1);
    assert_eq!(b.get("x").await.unwrap().unwrap().document, "only in b");
}

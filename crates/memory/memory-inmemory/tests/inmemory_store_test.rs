//! Integration tests for [`memory_inmemory::InMemoryVectorStore`].

use memory_core::{MemoryKind, MemoryMetadata, MemoryRecord, VectorStore, VectorStoreError};
use memory_inmemory::InMemoryVectorStore;

fn journal(id: &str, embedding: Vec<f32>, text: &str) -> MemoryRecord {
    MemoryRecord::new(id, embedding, text, MemoryMetadata::journal())
}

#[tokio::test]
async fn test_query_empty_store_returns_empty() {
    let store = InMemoryVectorStore::new("memory_store");
    let hits = store.query(&[1.0, 0.0, 0.0], 3).await.unwrap();
    assert!(hits.is_empty());
    assert_eq!(store.collection(), "memory_store");
}

/// **Test:** adding an existing id fails with DuplicateId and keeps the first record.
#[tokio::test]
async fn test_add_duplicate_id_rejected() {
    let store = InMemoryVectorStore::new("memory_store");
    store.add(journal("a", vec![1.0, 0.0], "first")).await.unwrap();

    let err = store
        .add(journal("a", vec![0.0, 1.0], "second"))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<VectorStoreError>(),
        Some(&VectorStoreError::DuplicateId("a".to_string()))
    );
    assert_eq!(store.get("a").await.unwrap().unwrap().document, "first");
}

/// **Test:** upsert under the same id leaves exactly one record with the new document.
#[tokio::test]
async fn test_upsert_replaces_in_place() {
    let store = InMemoryVectorStore::new("memory_store");
    store.upsert(journal("E", vec![1.0, 0.0], "text")).await.unwrap();
    store.upsert(journal("E", vec![0.0, 1.0], "text2")).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let record = store.get("E").await.unwrap().unwrap();
    assert_eq!(record.document, "text2");
    assert_eq!(record.metadata.kind, MemoryKind::Journal);
}

/// **Test:** the first record fixes the dimension for writes and queries.
#[tokio::test]
async fn test_dimension_invariant() {
    let store = InMemoryVectorStore::new("memory_store");
    store.add(journal("a", vec![1.0, 0.0], "x")).await.unwrap();
    assert_eq!(store.dimension().await, Some(2));

    let err = store
        .add(journal("b", vec![1.0, 0.0, 0.0], "y"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VectorStoreError>(),
        Some(VectorStoreError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert!(store.query(&[1.0, 0.0, 0.0], 1).await.is_err());
}

#[tokio::test]
async fn test_query_orders_by_similarity() {
    let store = InMemoryVectorStore::new("memory_store");
    store.add(journal("far", vec![0.0, 1.0], "far")).await.unwrap();
    store.add(journal("near", vec![1.0, 0.1], "near")).await.unwrap();
    store.add(journal("exact", vec![1.0, 0.0], "exact")).await.unwrap();

    let hits = store.query(&[1.0, 0.0], 2).await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
    assert_eq!(ids, vec!["exact", "near"]);
}

/// **Test:** delete ignores missing ids; emptying the store frees the dimension.
#[tokio::test]
async fn test_delete_and_reset() {
    let store = InMemoryVectorStore::new("memory_store");
    store.add(journal("a", vec![1.0, 0.0], "x")).await.unwrap();
    store.add(journal("b", vec![0.0, 1.0], "y")).await.unwrap();

    let removed = store
        .delete(&["a".to_string(), "missing".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(store.ids().await.unwrap(), vec!["b".to_string()]);

    store.delete(&store.ids().await.unwrap()).await.unwrap();
    assert!(store.is_empty().await);
    assert_eq!(store.dimension().await, None);
    store.add(journal("c", vec![1.0, 0.0, 0.0], "z")).await.unwrap();
}

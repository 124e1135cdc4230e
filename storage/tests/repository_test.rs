//! Integration tests for the JSON list repositories.

use storage::{
    Conversation, ConversationRepository, JournalEntry, JournalRepository, Repository,
    StorageError,
};
use tempfile::TempDir;

fn entry(id: &str, content: &str) -> JournalEntry {
    JournalEntry {
        id: id.to_string(),
        content: content.to_string(),
        date: "June 01, 2024".to_string(),
        time: "09:15 AM".to_string(),
        timestamp: "2024-06-01T09:15:00+00:00".to_string(),
        emotion_analysis: None,
        last_edited: None,
    }
}

/// **Test: save inserts new records and replaces existing ones in place.**
///
/// **Setup:** two conversations saved.
/// **Action:** save the first again with one more message.
/// **Expected:** still two records, original order, first one updated.
#[tokio::test]
async fn test_conversation_save_upserts_in_place() {
    let dir = TempDir::new().unwrap();
    let repo = ConversationRepository::new(dir.path().join("conversations.json"));

    let mut first = Conversation::new("c1", "2024-06-01T10:00:00+00:00");
    repo.save(&first).await.unwrap();
    repo.save(&Conversation::new("c2", "2024-06-02T10:00:00+00:00"))
        .await
        .unwrap();

    first.messages.push(("Hi".to_string(), "Hello!".to_string()));
    repo.save(&first).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "c1");
    assert_eq!(all[0].messages.len(), 1);
    assert_eq!(repo.find_by_id("c2").await.unwrap().unwrap().id, "c2");
    assert!(repo.find_by_id("c3").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_and_clear() {
    let dir = TempDir::new().unwrap();
    let repo = JournalRepository::new(dir.path().join("journal_entries.json"));
    repo.save(&entry("e1", "one")).await.unwrap();
    repo.save(&entry("e2", "two")).await.unwrap();

    assert!(repo.delete("e1").await.unwrap());
    assert!(!repo.delete("e1").await.unwrap());
    assert_eq!(repo.find_all().await.unwrap().len(), 1);

    repo.clear().await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
    let raw = std::fs::read_to_string(repo.path()).unwrap();
    assert_eq!(raw.trim(), "[]");
}

#[tokio::test]
async fn test_journal_update_content_and_analysis() {
    let dir = TempDir::new().unwrap();
    let repo = JournalRepository::new(dir.path().join("journal_entries.json"));
    repo.save(&entry("e1", "Walked the dog")).await.unwrap();

    let updated = repo
        .update_content("e1", "Walked the dog with Lee", "2024-06-01T12:00:00+00:00")
        .await
        .unwrap();
    assert_eq!(updated.content, "Walked the dog with Lee");
    assert_eq!(updated.last_edited.as_deref(), Some("2024-06-01T12:00:00+00:00"));

    repo.set_analysis("e1", Some("Lee seems content.".to_string()))
        .await
        .unwrap();
    let stored = repo.find_by_id("e1").await.unwrap().unwrap();
    assert_eq!(stored.emotion_analysis.as_deref(), Some("Lee seems content."));
    assert_eq!(stored.content, "Walked the dog with Lee");
}

#[tokio::test]
async fn test_update_missing_entry_is_not_found() {
    let dir = TempDir::new().unwrap();
    let repo = JournalRepository::new(dir.path().join("journal_entries.json"));
    let err = repo.set_analysis("nope", None).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(id) if id == "nope"));
}

/// **Test: Journal files without the optional fields still load.**
#[tokio::test]
async fn test_reads_entries_without_optional_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal_entries.json");
    std::fs::write(
        &path,
        r#"[{"id": "e1", "content": "x", "date": "June 01, 2024", "time": "09:15 AM", "timestamp": "2024-06-01T09:15:00.123456"}]"#,
    )
    .unwrap();
    let entries = JournalRepository::new(&path).find_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].emotion_analysis.is_none());
}

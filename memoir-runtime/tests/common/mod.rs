//! Shared fixtures for runtime tests: a mocked chat model, a deterministic embedder and an
//! assistant wired over an in-memory store and a temporary data directory.

use async_trait::async_trait;
use embedding::EmbeddingService;
use llm_client::{ImageInput, LlmClient};
use memoir_core::{AppConfig, MemoryStoreType};
use memoir_runtime::{build_assistant, Assistant};
use memory_core::VectorStore;
use memory_inmemory::InMemoryVectorStore;
use mockall::mock;
use std::sync::Arc;
use tempfile::TempDir;

mock! {
    pub Llm {}

    #[async_trait]
    impl LlmClient for Llm {
        async fn respond(&self, prompt: &str) -> anyhow::Result<String>;
        async fn describe_image(&self, image: &ImageInput) -> anyhow::Result<String>;
    }
}

const DIMENSION: usize = 32;

/// Bag-of-words embedding over hashed buckets; no network.
pub struct KeywordEmbeddingService;

#[async_trait]
impl EmbeddingService for KeywordEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
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
        Ok(v)
    }
}

pub struct Fixture {
    pub assistant: Assistant,
    pub store: Arc<InMemoryVectorStore>,
    pub config: AppConfig,
    // Keeps the data directory alive for the test's duration.
    _dir: TempDir,
}

pub fn config_in(dir: &TempDir) -> AppConfig {
    let data_dir = dir.path().to_path_buf();
    AppConfig {
        conversations_file: data_dir.join("conversations.json"),
        journal_file: data_dir.join("journal_entries.json"),
        settings_file: data_dir.join("settings.json"),
        log_file: data_dir.join("memoir.log").display().to_string(),
        memory_store_type: MemoryStoreType::Memory,
        memory_sqlite_path: data_dir.join("memory_db.sqlite"),
        memory_collection: "memory_store".to_string(),
        memory_retrieval_limit: 3,
        journal_context_limit: 3,
        data_dir,
    }
}

pub fn fixture(llm: MockLlm) -> Fixture {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let store = Arc::new(InMemoryVectorStore::new("memory_store"));
    let assistant = build_assistant(
        &config,
        store.clone() as Arc<dyn VectorStore>,
        Arc::new(KeywordEmbeddingService),
        Arc::new(llm),
    );
    Fixture {
        assistant,
        store,
        config,
        _dir: dir,
    }
}

/// Fixture whose model must not be called.
#[allow(dead_code)]
pub fn offline_fixture() -> Fixture {
    fixture(MockLlm::new())
}

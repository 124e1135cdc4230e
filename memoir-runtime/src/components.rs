//! Component factory: builds the [`Assistant`] and its capabilities from config.

use anyhow::Result;
use embedding::{EmbeddingService, EnvEmbeddingConfig};
use llm_client::{EnvLlmConfig, LlmClient, OpenAILlmClient};
use memoir_core::{AppConfig, MemoryStoreType};
use memory::{ContextAssembler, MemoryRepository};
use memory_core::VectorStore;
use memory_inmemory::InMemoryVectorStore;
use memory_sqlite::SqliteVectorStore;
use openai_embedding::OpenAIEmbedding;
use std::sync::Arc;
use storage::{ConversationRepository, JournalRepository, SettingsRepository};
use tracing::{error, info, instrument};

use crate::assistant::Assistant;

/// Opens the memory vector store selected by `MEMORY_STORE_TYPE`.
#[instrument(skip(config))]
pub async fn create_vector_store(config: &AppConfig) -> Result<Arc<dyn VectorStore>> {
    let store: Arc<dyn VectorStore> = match config.memory_store_type {
        MemoryStoreType::Sqlite => {
            info!(
                db_path = %config.memory_sqlite_path.display(),
                collection = %config.memory_collection,
                "Using SQLite vector store"
            );
            Arc::new(
                SqliteVectorStore::open(&config.memory_sqlite_path, &config.memory_collection)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Failed to initialize SQLite store");
                        anyhow::anyhow!("Failed to initialize SQLite store: {}", e)
                    })?,
            )
        }
        MemoryStoreType::Memory => {
            info!(collection = %config.memory_collection, "Using in-memory vector store");
            Arc::new(InMemoryVectorStore::new(config.memory_collection.clone()))
        }
    };
    Ok(store)
}

/// OpenAI-compatible embeddings from `EMBEDDING_*` / `OPENAI_*` variables.
pub fn create_embedding_service() -> Result<Arc<dyn EmbeddingService>> {
    let config = EnvEmbeddingConfig::from_env()?;
    config.validate()?;
    info!(model = %config.model, "Using OpenAI-compatible embeddings");
    Ok(Arc::new(OpenAIEmbedding::from_config(&config)))
}

/// OpenAI-compatible chat model from `OPENAI_*` / `MODEL` variables.
pub fn create_llm_client() -> Result<Arc<dyn LlmClient>> {
    let config = EnvLlmConfig::from_env()?;
    info!(model = %config.llm_model, base_url = %config.openai_base_url, "Using chat model");
    Ok(Arc::new(OpenAILlmClient::from_config(&config)))
}

/// Wires an [`Assistant`] from already created capabilities.
pub fn build_assistant(
    config: &AppConfig,
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmClient>,
) -> Assistant {
    let assembler = ContextAssembler::new(MemoryRepository::new(store, embedder))
        .with_memory_limit(config.memory_retrieval_limit)
        .with_journal_limit(config.journal_context_limit);

    Assistant::new(
        llm,
        assembler,
        ConversationRepository::new(config.conversations_file.clone()),
        JournalRepository::new(config.journal_file.clone()),
        SettingsRepository::new(config.settings_file.clone()),
    )
}

/// Creates every capability from config and the environment, then builds the [`Assistant`].
#[instrument(skip(config))]
pub async fn initialize_assistant(config: &AppConfig) -> Result<Assistant> {
    let store = create_vector_store(config).await?;
    let embedder = create_embedding_service()?;
    let llm = create_llm_client()?;
    Ok(build_assistant(config, store, embedder, llm))
}

//! # OpenAI Embedding Service
//!
//! [`EmbeddingService`] implementation over any OpenAI-compatible `/embeddings` endpoint.
//! The memory repository uses it to embed interactions, journal entries and queries.
//!
//! ```rust,no_run
//! use embedding::EmbeddingService;
//! use openai_embedding::OpenAIEmbedding;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     let service = OpenAIEmbedding::with_api_key("sk-...".to_string());
//!     let vector = service.embed("I walked by the river today").await?;
//!     println!("dimension: {}", vector.len());
//!     Ok(())
//! }
//! ```
//!
//! All vectors produced by one model share a dimension (1536 for `text-embedding-3-small`),
//! which must match the vector store collection they are written to.

use async_openai::{config::OpenAIConfig, types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingService, DEFAULT_EMBEDDING_MODEL};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI embedding service. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a service for `model` against the default OpenAI endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a service against an OpenAI-compatible endpoint when `base_url` is set.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            config = config.with_api_base(url);
        }
        Self {
            client: Client::with_config(config),
            model,
        }
    }

    /// Creates a service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Creates a service from an [`EmbeddingConfig`].
    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        Self::new_with_base_url(
            config.api_key().to_string(),
            config.model().to_string(),
            config.base_url(),
        )
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        debug!("embedding request");

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![text])
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(EMBED_TIMEOUT, embeddings.create(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "embedding request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = EMBED_TIMEOUT.as_secs(), "embedding request timed out");
                anyhow::bail!(
                    "embedding request timed out after {} seconds",
                    EMBED_TIMEOUT.as_secs()
                );
            }
        };

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| anyhow::anyhow!("No embedding in response"))?;

        info!(dimension = embedding.len(), "embedding done");
        Ok(embedding)
    }
}

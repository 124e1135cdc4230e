//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// API key for the OpenAI-compatible embeddings endpoint.
    fn api_key(&self) -> &str;
    /// Optional base URL; `None` means the provider default.
    fn base_url(&self) -> Option<&str>;
    fn model(&self) -> &str;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.model
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    ///
    /// `EMBEDDING_API_KEY` / `EMBEDDING_BASE_URL` take precedence over the shared
    /// `OPENAI_API_KEY` / `OPENAI_BASE_URL`, so chat and embeddings can use different endpoints.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("EMBEDDING_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        let base_url = env::var("EMBEDDING_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }

    /// Fails when no API key is configured.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("embedding requires EMBEDDING_API_KEY or OPENAI_API_KEY to be set");
        }
        Ok(())
    }
}

//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model; must accept image input for the image-description path.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
}

impl EnvLlmConfig {
    /// Load from environment variables: `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, `MODEL`.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("OPENAI_BASE_URL");
        env::remove_var("MODEL");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        env::set_var("OPENAI_API_KEY", "sk-test");
        let config = EnvLlmConfig::from_env().unwrap();
        assert_eq!(config.api_key(), "sk-test");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key() {
        clear();
        let err = EnvLlmConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear();
        env::set_var("OPENAI_API_KEY", "key");
        env::set_var(
            "OPENAI_BASE_URL",
            "https://generativelanguage.googleapis.com/v1beta/openai",
        );
        env::set_var("MODEL", "gemini-1.5-flash");
        let config = EnvLlmConfig::from_env().unwrap();
        assert_eq!(config.model(), "gemini-1.5-flash");
        assert!(config.base_url().contains("googleapis"));
        clear();
    }
}

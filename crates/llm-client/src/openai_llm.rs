//! [`LlmClient`] over an OpenAI-compatible chat completions endpoint.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::OpenAIClient;
use prompt::IMAGE_DESCRIPTION_PROMPT;
use tracing::{info, instrument};

use super::{config::DEFAULT_MODEL, ImageInput, LlmClient, LlmConfig};

/// LlmClient implementation based on openai-client. Prompts are sent as one user message.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn respond(&self, prompt: &str) -> Result<String> {
        let reply = self.client.complete_text(&self.model, prompt).await?;
        info!(reply_len = reply.len(), "llm respond done");
        Ok(reply)
    }

    #[instrument(
        skip(self, image),
        fields(model = %self.model, mime_type = %image.mime_type, image_bytes = image.bytes.len())
    )]
    async fn describe_image(&self, image: &ImageInput) -> Result<String> {
        let description = self
            .client
            .complete_with_image(&self.model, IMAGE_DESCRIPTION_PROMPT, &image.to_data_url())
            .await?;
        info!(description_len = description.len(), "image description done");
        Ok(description)
    }
}

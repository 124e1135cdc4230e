//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completions against OpenAI or any
//! OpenAI-compatible endpoint. Supports plain text prompts and a single user message
//! carrying text plus one image (multi-modal input).
//! Provides token masking for safe logging.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrlArgs,
    },
    Client,
};
use std::sync::Arc;
use tracing::info;

pub use async_openai::types::ChatCompletionRequestMessage;

/// Masks an API key for logging: first 7 characters + `***` + last 4 characters.
/// Keys of 11 characters or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// One user message holding `text`.
pub fn text_message(text: &str) -> anyhow::Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()?
        .into())
}

/// One user message holding `instruction` followed by the image at `image_url`
/// (an `https:` or `data:` URL).
pub fn image_message(
    instruction: &str,
    image_url: &str,
) -> anyhow::Result<ChatCompletionRequestMessage> {
    let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
        .text(instruction)
        .build()?;
    let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
        .image_url(
            ImageUrlArgs::default()
                .url(image_url)
                .detail(ImageDetail::Auto)
                .build()?,
        )
        .build()?;

    let content = ChatCompletionRequestUserMessageContent::Array(vec![
        ChatCompletionRequestUserMessageContentPart::Text(text_part),
        ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
    ]);
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(content)
        .build()?
        .into())
}

/// OpenAI chat client. Wraps the async-openai client and keeps the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and the default API base URL.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a client for an OpenAI-compatible endpoint.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the first choice's text.
    ///
    /// Logs the masked API key and token usage.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => anyhow::bail!("No response from OpenAI"),
        }
    }

    /// Sends `prompt` as a single user message.
    pub async fn complete_text(&self, model: &str, prompt: &str) -> anyhow::Result<String> {
        self.chat_completion(model, vec![text_message(prompt)?]).await
    }

    /// Sends `instruction` together with one image and returns the model's answer.
    pub async fn complete_with_image(
        &self,
        model: &str,
        instruction: &str,
        image_url: &str,
    ) -> anyhow::Result<String> {
        self.chat_completion(model, vec![image_message(instruction, image_url)?])
            .await
    }
}

//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait for the generative capability and an OpenAI-compatible
//! implementation. Used by the runtime's responder and emotion analyzer.
//!
//! The trait is object safe so components hold an `Arc<dyn LlmClient>`.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod image;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use image::ImageInput;
pub use openai_llm::OpenAILlmClient;

/// Generative model interface: text in, text out, with an optional image path.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model's reply to a fully assembled prompt.
    async fn respond(&self, prompt: &str) -> Result<String>;

    /// Returns a textual description of `image`.
    async fn describe_image(&self, image: &ImageInput) -> Result<String>;
}

//! Generative responder: one chat turn from message to stored memory.

use llm_client::{ImageInput, LlmClient};
use memory::{ContextAssembler, JournalContext};
use prompt::interaction_memory_text;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Prefix of the text used in place of an image description when describing fails.
pub const IMAGE_ERROR_PREFIX: &str = "Error processing image";

#[derive(Clone)]
pub struct GenerativeResponder {
    llm: Arc<dyn LlmClient>,
    assembler: ContextAssembler,
}

impl GenerativeResponder {
    pub fn new(llm: Arc<dyn LlmClient>, assembler: ContextAssembler) -> Self {
        Self { llm, assembler }
    }

    pub fn llm(&self) -> &Arc<dyn LlmClient> {
        &self.llm
    }

    pub fn assembler(&self) -> &ContextAssembler {
        &self.assembler
    }

    /// Describes `image`. A failure becomes `Error processing image: {err}` so the turn
    /// can go on with that text in the prompt.
    #[instrument(skip(self, image), fields(mime = %image.mime_type, bytes = image.bytes.len()))]
    pub async fn describe_image(&self, image: &ImageInput) -> String {
        match self.llm.describe_image(image).await {
            Ok(description) => description,
            Err(e) => {
                warn!(error = %e, "image description failed");
                format!("{}: {}", IMAGE_ERROR_PREFIX, e)
            }
        }
    }

    /// Runs one chat turn and returns the model's answer.
    ///
    /// Errors from the model abort the turn. Once an answer exists, the round-trip
    /// `User: ..\nAssistant: ..` is stored as an interaction memory of `chat_id`; if that
    /// write fails the answer is still returned.
    #[instrument(
        skip(self, message, journal, system_prompt, image),
        fields(chat_id = %chat_id, has_image = image.is_some())
    )]
    pub async fn generate_response(
        &self,
        message: &str,
        chat_id: &str,
        journal: &[JournalContext<'_>],
        system_prompt: &str,
        image: Option<&ImageInput>,
    ) -> anyhow::Result<String> {
        let image_description = match image {
            Some(image) => Some(self.describe_image(image).await),
            None => None,
        };

        let prompt = self
            .assembler
            .build_prompt(
                message,
                chat_id,
                journal,
                system_prompt,
                image_description.as_deref(),
            )
            .await;

        let response = self.llm.respond(&prompt).await?;

        let memory_text = interaction_memory_text(message, &response);
        match self
            .assembler
            .repository()
            .add_interaction_memory(&memory_text, chat_id)
            .await
        {
            Ok(id) => info!(memory_id = %id, "chat turn stored as memory"),
            Err(e) => warn!(error = %e, "failed to store chat turn as memory"),
        }

        Ok(response)
    }
}

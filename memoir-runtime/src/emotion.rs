//! Emotion analysis of journal text.

use llm_client::LlmClient;
use prompt::emotion_analysis_prompt;
use std::sync::Arc;
use tracing::instrument;

/// Summarises the writer's mood in a few sentences. Never writes memories.
#[derive(Clone)]
pub struct EmotionAnalyzer {
    llm: Arc<dyn LlmClient>,
}

impl EmotionAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    #[instrument(skip(self, journal_text), fields(text_len = journal_text.len()))]
    pub async fn analyze(&self, journal_text: &str) -> anyhow::Result<String> {
        self.llm.respond(&emotion_analysis_prompt(journal_text)).await
    }
}

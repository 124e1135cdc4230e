//! # Context Assembler
//!
//! Builds the assistant prompt for one chat turn: retrieves the most relevant memories,
//! takes the caller's most recent journal entries, and renders both around the system
//! prompt and the user's message with [`prompt::format_assistant_prompt`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let assembler = ContextAssembler::new(repository);
//! let journal = [JournalContext::new("June 01, 2024", "Went swimming")];
//! let prompt = assembler
//!     .build_prompt("How was my week?", "chat-1", &journal, "You are helpful.", None)
//!     .await;
//! ```

use crate::repository::{MemoryRepository, DEFAULT_RETRIEVAL_LIMIT};
use prompt::{format_assistant_prompt, journal_line, past_interaction_line, PromptSections};
use tracing::{debug, instrument};

/// Default number of trailing journal entries included in the prompt.
pub const DEFAULT_JOURNAL_LIMIT: usize = 3;

/// A journal entry as shown to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalContext<'a> {
    /// Display date, e.g. `June 01, 2024`
    pub date: &'a str,
    pub content: &'a str,
}

impl<'a> JournalContext<'a> {
    pub fn new(date: &'a str, content: &'a str) -> Self {
        Self { date, content }
    }
}

/// Assembles prompts from memories and journal entries.
#[derive(Clone)]
pub struct ContextAssembler {
    repository: MemoryRepository,
    memory_limit: usize,
    journal_limit: usize,
}

impl ContextAssembler {
    pub fn new(repository: MemoryRepository) -> Self {
        Self {
            repository,
            memory_limit: DEFAULT_RETRIEVAL_LIMIT,
            journal_limit: DEFAULT_JOURNAL_LIMIT,
        }
    }

    /// Sets how many memories are retrieved per message.
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Sets how many of the latest journal entries are included.
    pub fn with_journal_limit(mut self, limit: usize) -> Self {
        self.journal_limit = limit;
        self
    }

    pub fn repository(&self) -> &MemoryRepository {
        &self.repository
    }

    /// Builds the prompt for `user_message`.
    ///
    /// `journal` is the caller's entry list in insertion order; only its last
    /// `journal_limit` entries are used, in that same order. Retrieved memories keep
    /// similarity order.
    #[instrument(
        skip(self, user_message, journal, system_prompt, image_description),
        fields(chat_id = %chat_id, journal_total = journal.len(), has_image = image_description.is_some())
    )]
    pub async fn build_prompt(
        &self,
        user_message: &str,
        chat_id: &str,
        journal: &[JournalContext<'_>],
        system_prompt: &str,
        image_description: Option<&str>,
    ) -> String {
        let memories = self
            .repository
            .query_relevant(user_message, chat_id, self.memory_limit)
            .await;

        let start = journal.len().saturating_sub(self.journal_limit);
        let recent = &journal[start..];

        debug!(
            memories = memories.len(),
            journal_entries = recent.len(),
            "assembling prompt"
        );

        let sections = PromptSections {
            system_prompt: system_prompt.to_string(),
            image_description: image_description.map(str::to_string),
            past_interactions: memories
                .iter()
                .map(|m| past_interaction_line(&m.timestamp, &m.text))
                .collect(),
            journal_entries: recent
                .iter()
                .map(|e| journal_line(e.date, e.content))
                .collect(),
            user_message: user_message.to_string(),
        };
        format_assistant_prompt(&sections)
    }
}

//! # Assistant
//!
//! The application service behind every user action: chat turns, journal management,
//! settings and memory maintenance. Each operation reads what it needs from the JSON
//! repositories, so the journal list shown to the user is always a fresh projection of
//! the journal file instead of a second copy kept in sync by hand.
//!
//! Session state lives in [`AppState`] and is passed in by the caller.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use llm_client::LlmClient;
use memoir_core::{JournalError, MemoirError, Result};
use memory::{ContextAssembler, JournalContext, MemoryRepository, RelevantMemory};
use std::cmp::Reverse;
use std::sync::Arc;
use storage::{
    Conversation, ConversationRepository, DisabilityType, JournalEntry, JournalRepository,
    Repository, Settings, SettingsRepository, StorageError, UserType,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::emotion::EmotionAnalyzer;
use crate::responder::GenerativeResponder;
use crate::state::AppState;

/// Display format of a journal entry's date.
pub const JOURNAL_DATE_FORMAT: &str = "%B %d, %Y";
/// Display format of a journal entry's time.
pub const JOURNAL_TIME_FORMAT: &str = "%I:%M %p";

/// A conversation as listed in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub message_count: usize,
}

/// Journal entries sharing one display date, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalDay {
    pub date: String,
    /// The day is today; shown expanded
    pub is_today: bool,
    pub entries: Vec<JournalEntry>,
}

pub struct Assistant {
    responder: GenerativeResponder,
    analyzer: EmotionAnalyzer,
    memory: MemoryRepository,
    conversations: ConversationRepository,
    journal: JournalRepository,
    settings: SettingsRepository,
}

impl Assistant {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        assembler: ContextAssembler,
        conversations: ConversationRepository,
        journal: JournalRepository,
        settings: SettingsRepository,
    ) -> Self {
        let memory = assembler.repository().clone();
        Self {
            responder: GenerativeResponder::new(llm.clone(), assembler),
            analyzer: EmotionAnalyzer::new(llm),
            memory,
            conversations,
            journal,
            settings,
        }
    }

    pub fn memory(&self) -> &MemoryRepository {
        &self.memory
    }

    // ---- chat ----

    /// Starts an empty conversation, persists it and makes it current. Returns its id.
    #[instrument(skip(self, state))]
    pub async fn new_chat(&self, state: &mut AppState) -> Result<String> {
        let chat_id = Uuid::new_v4().to_string();
        self.conversations
            .save(&Conversation::new(chat_id.clone(), now_iso()))
            .await?;
        state.start_chat(chat_id.clone());
        info!(chat_id = %chat_id, "new conversation");
        Ok(chat_id)
    }

    /// Makes a stored conversation current.
    #[instrument(skip(self, state))]
    pub async fn load_chat(&self, state: &mut AppState, chat_id: &str) -> Result<Conversation> {
        let conversation = self
            .conversations
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(chat_id.to_string()))?;
        state.load_conversation(&conversation);
        Ok(conversation)
    }

    /// Runs one chat turn in the current conversation, starting one if there is none.
    ///
    /// Uses the pending image, if any, and clears it once the turn succeeds. The first
    /// message of a conversation becomes its title. The conversation is saved after
    /// every turn.
    #[instrument(skip(self, state, message), fields(chat_id = ?state.current_chat_id))]
    pub async fn send_message(&self, state: &mut AppState, message: &str) -> Result<String> {
        let chat_id = match state.current_chat_id.clone() {
            Some(id) => id,
            None => self.new_chat(state).await?,
        };

        let journal = self.journal.find_all().await?;
        let journal_context: Vec<JournalContext<'_>> = journal
            .iter()
            .map(|entry| JournalContext::new(&entry.date, &entry.content))
            .collect();
        let settings = self.settings.load().await;

        let response = self
            .responder
            .generate_response(
                message,
                &chat_id,
                &journal_context,
                &settings.system_prompt,
                state.pending_image.as_ref(),
            )
            .await
            .map_err(MemoirError::Llm)?;

        state
            .chat_messages
            .push((message.to_string(), response.clone()));
        if state.chat_messages.len() == 1 {
            state.chat_title = Conversation::title_from_message(message);
        }
        state.pending_image = None;

        self.save_current_chat(state).await?;
        Ok(response)
    }

    /// Writes the current conversation from `state`, inserting it if it is not stored yet.
    pub async fn save_current_chat(&self, state: &AppState) -> Result<()> {
        let Some(chat_id) = state.current_chat_id.clone() else {
            return Ok(());
        };
        let conversation = Conversation {
            id: chat_id,
            title: state.chat_title.clone(),
            messages: state.chat_messages.clone(),
            timestamp: now_iso(),
        };
        self.conversations.save(&conversation).await?;
        Ok(())
    }

    /// Stored conversations, most recently touched first.
    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>> {
        let mut conversations = self.conversations.find_all().await?;
        conversations.sort_by_cached_key(|c| Reverse(instant(&c.timestamp)));
        Ok(conversations
            .into_iter()
            .map(|c| ConversationSummary {
                title: c.display_title(),
                message_count: c.messages.len(),
                id: c.id,
                timestamp: c.timestamp,
            })
            .collect())
    }

    // ---- journal ----

    /// Embeds and stores a new journal entry, optionally with an emotion analysis.
    ///
    /// The entry's timestamp is the one recorded with its memory. Should writing the
    /// journal file fail, the memory is removed again.
    #[instrument(skip(self, content, analysis), fields(content_len = content.len()))]
    pub async fn save_journal_entry(
        &self,
        content: &str,
        analysis: Option<String>,
    ) -> Result<JournalEntry> {
        if content.trim().is_empty() {
            return Err(JournalError::EmptyContent.into());
        }

        let entry_id = Uuid::new_v4().to_string();
        let (_, timestamp) = self
            .memory
            .add_journal_memory(content, Some(&entry_id))
            .await
            .map_err(MemoirError::Memory)?;

        let entry = journal_entry(entry_id, content, timestamp, analysis);
        if let Err(e) = self.journal.save(&entry).await {
            warn!(error = %e, entry_id = %entry.id, "journal write failed, removing memory");
            self.memory.delete(&entry.id).await;
            return Err(e.into());
        }

        info!(entry_id = %entry.id, "journal entry saved");
        Ok(entry)
    }

    /// Replaces an entry's content and re-embeds it under the same id.
    ///
    /// Unchanged content is a no-op that returns the stored entry.
    #[instrument(skip(self, content))]
    pub async fn update_journal_entry(&self, entry_id: &str, content: &str) -> Result<JournalEntry> {
        let existing = self.find_journal_entry(entry_id).await?;
        if existing.content == content {
            return Ok(existing);
        }
        if content.trim().is_empty() {
            return Err(JournalError::EmptyContent.into());
        }

        self.memory
            .add_journal_memory(content, Some(entry_id))
            .await
            .map_err(MemoirError::Memory)?;
        let updated = self
            .journal
            .update_content(entry_id, content, &now_iso())
            .await
            .map_err(journal_not_found)?;
        info!(entry_id = %entry_id, "journal entry updated");
        Ok(updated)
    }

    /// Stores or clears the saved emotion analysis of an entry.
    pub async fn set_emotion_analysis(
        &self,
        entry_id: &str,
        analysis: Option<String>,
    ) -> Result<JournalEntry> {
        self.journal
            .set_analysis(entry_id, analysis)
            .await
            .map_err(journal_not_found)
    }

    /// Saves the unsaved analysis held in `state` for `entry_id`. `None` when there is none.
    pub async fn save_pending_analysis(
        &self,
        state: &mut AppState,
        entry_id: &str,
    ) -> Result<Option<JournalEntry>> {
        let Some(analysis) = state.pending_analysis.get(entry_id).cloned() else {
            return Ok(None);
        };
        let entry = self.set_emotion_analysis(entry_id, Some(analysis)).await?;
        state.pending_analysis.remove(entry_id);
        Ok(Some(entry))
    }

    /// Removes an entry from the memory store, the journal file and the session state.
    /// Returns whether the journal file held the entry.
    #[instrument(skip(self, state))]
    pub async fn delete_journal_entry(&self, state: &mut AppState, entry_id: &str) -> Result<bool> {
        if !self.memory.delete(entry_id).await {
            warn!(entry_id = %entry_id, "journal memory could not be deleted");
        }
        let removed = self.journal.delete(entry_id).await?;
        state.expanded_entries.remove(entry_id);
        state.pending_analysis.remove(entry_id);
        Ok(removed)
    }

    /// Emotion analysis of arbitrary text. Nothing is stored.
    pub async fn analyze_emotion(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(JournalError::EmptyContent.into());
        }
        self.analyzer.analyze(text).await.map_err(MemoirError::Llm)
    }

    /// Analyses a stored entry and keeps the result in `state` as unsaved.
    pub async fn analyze_journal_entry(&self, state: &mut AppState, entry_id: &str) -> Result<String> {
        let entry = self.find_journal_entry(entry_id).await?;
        let analysis = self.analyze_emotion(&entry.content).await?;
        state
            .pending_analysis
            .insert(entry_id.to_string(), analysis.clone());
        Ok(analysis)
    }

    /// All journal entries in insertion order.
    pub async fn journal_entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.journal.find_all().await?)
    }

    /// Journal entries grouped by display date, the day with the newest entry first.
    pub async fn journal_by_day(&self) -> Result<Vec<JournalDay>> {
        let today = Local::now().format(JOURNAL_DATE_FORMAT).to_string();
        Ok(group_by_day(self.journal.find_all().await?, &today))
    }

    async fn find_journal_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        self.journal
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| JournalError::NotFound(entry_id.to_string()).into())
    }

    // ---- settings ----

    pub async fn settings(&self) -> Settings {
        self.settings.load().await
    }

    /// Changes the user type. Leaving Specially Abled drops the disability focus;
    /// the system prompt is kept.
    #[instrument(skip(self))]
    pub async fn set_user_type(&self, user_type: UserType) -> Result<Settings> {
        let mut settings = self.settings.load().await;
        if settings.user_type == user_type {
            return Ok(settings);
        }
        settings.user_type = user_type;
        if user_type != UserType::SpeciallyAbled {
            settings.disability_type = None;
        }
        self.settings.save(&settings).await?;
        Ok(settings)
    }

    /// Focuses on a disability: switches to Specially Abled and loads its prompt template.
    #[instrument(skip(self))]
    pub async fn set_disability_type(&self, disability: DisabilityType) -> Result<Settings> {
        let mut settings = self.settings.load().await;
        if settings.user_type == UserType::SpeciallyAbled
            && settings.disability_type == Some(disability)
        {
            return Ok(settings);
        }
        settings.user_type = UserType::SpeciallyAbled;
        settings.disability_type = Some(disability);
        settings.system_prompt = disability.template().to_string();
        self.settings.save(&settings).await?;
        Ok(settings)
    }

    /// Replaces the system prompt. Only Personalized and Specially Abled users may do so.
    #[instrument(skip(self, prompt))]
    pub async fn set_system_prompt(&self, prompt: &str) -> Result<Settings> {
        let mut settings = self.settings.load().await;
        if !settings.user_type.allows_custom_prompt() {
            return Err(MemoirError::Settings(format!(
                "the system prompt cannot be edited for {} users",
                settings.user_type
            )));
        }
        settings.system_prompt = prompt.to_string();
        self.settings.save(&settings).await?;
        Ok(settings)
    }

    // ---- memory ----

    /// Wipes the memory store. When that succeeds, the conversation and journal files are
    /// emptied too and the current chat is closed. Returns whether anything was wiped.
    #[instrument(skip(self, state))]
    pub async fn delete_all_memory(&self, state: &mut AppState) -> Result<bool> {
        if !self.memory.delete_all().await {
            return Ok(false);
        }
        self.conversations.clear().await?;
        self.journal.clear().await?;
        state.clear_chat();
        state.expanded_entries.clear();
        state.pending_analysis.clear();
        info!("all memory deleted");
        Ok(true)
    }

    /// Memories most similar to `query`, across all chats and the journal.
    pub async fn search_memories(&self, query: &str, k: usize) -> Vec<RelevantMemory> {
        self.memory.query_relevant(query, "search", k).await
    }
}

fn iso(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn now_iso() -> String {
    iso(&memory_core::now())
}

/// Stored timestamps carry their local offset, so they are ordered as instants.
/// Unparsable values sort as the oldest.
fn instant(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp).ok()
}

fn journal_entry(
    id: String,
    content: &str,
    timestamp: DateTime<FixedOffset>,
    analysis: Option<String>,
) -> JournalEntry {
    JournalEntry {
        id,
        content: content.to_string(),
        date: timestamp.format(JOURNAL_DATE_FORMAT).to_string(),
        time: timestamp.format(JOURNAL_TIME_FORMAT).to_string(),
        timestamp: iso(&timestamp),
        emotion_analysis: analysis,
        last_edited: None,
    }
}

fn journal_not_found(e: StorageError) -> MemoirError {
    match e {
        StorageError::NotFound(id) => JournalError::NotFound(id).into(),
        other => other.into(),
    }
}

/// Groups entries by `date`. Days are ordered by their newest timestamp, latest first;
/// entries keep insertion order within a day.
fn group_by_day(entries: Vec<JournalEntry>, today: &str) -> Vec<JournalDay> {
    let mut days: Vec<(Option<DateTime<FixedOffset>>, JournalDay)> = Vec::new();
    for entry in entries {
        match days.iter_mut().find(|(_, day)| day.date == entry.date) {
            Some((newest, day)) => {
                let at = instant(&entry.timestamp);
                if at > *newest {
                    *newest = at;
                }
                day.entries.push(entry);
            }
            None => days.push((
                instant(&entry.timestamp),
                JournalDay {
                    is_today: entry.date == today,
                    date: entry.date.clone(),
                    entries: vec![entry],
                },
            )),
        }
    }
    days.sort_by(|a, b| b.0.cmp(&a.0));
    days.into_iter().map(|(_, day)| day).collect()
}

//! Per-session UI state, passed explicitly into every [`crate::Assistant`] operation.

use llm_client::ImageInput;
use std::collections::{HashMap, HashSet};
use storage::{Conversation, NEW_CONVERSATION_TITLE};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Conversation receiving new messages; `None` until a chat is started or loaded
    pub current_chat_id: Option<String>,
    pub chat_title: String,
    /// (user, assistant) pairs of the current conversation
    pub chat_messages: Vec<(String, String)>,
    /// Image attached to the next message; consumed by it
    pub pending_image: Option<ImageInput>,
    /// Journal entry ids shown expanded
    pub expanded_entries: HashSet<String>,
    /// Unsaved emotion analyses by journal entry id
    pub pending_analysis: HashMap<String, String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `chat_id` the current conversation with no messages.
    pub fn start_chat(&mut self, chat_id: impl Into<String>) {
        self.current_chat_id = Some(chat_id.into());
        self.chat_title = NEW_CONVERSATION_TITLE.to_string();
        self.chat_messages.clear();
        self.pending_image = None;
    }

    /// Makes `conversation` current.
    pub fn load_conversation(&mut self, conversation: &Conversation) {
        self.current_chat_id = Some(conversation.id.clone());
        self.chat_title = conversation.title.clone();
        self.chat_messages = conversation.messages.clone();
    }

    pub fn clear_chat(&mut self) {
        self.current_chat_id = None;
        self.chat_title.clear();
        self.chat_messages.clear();
        self.pending_image = None;
    }

    pub fn is_expanded(&self, entry_id: &str) -> bool {
        self.expanded_entries.contains(entry_id)
    }

    /// Flips one entry between expanded and collapsed. Returns whether it is now expanded.
    pub fn toggle_entry(&mut self, entry_id: &str) -> bool {
        if self.expanded_entries.remove(entry_id) {
            false
        } else {
            self.expanded_entries.insert(entry_id.to_string());
            true
        }
    }

    /// Collapses everything when any entry is expanded, otherwise expands all of `entry_ids`.
    pub fn toggle_all<I, S>(&mut self, entry_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.expanded_entries.is_empty() {
            self.expanded_entries = entry_ids.into_iter().map(Into::into).collect();
        } else {
            self.expanded_entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_entry_flips() {
        let mut state = AppState::new();
        assert!(state.toggle_entry("a"));
        assert!(state.is_expanded("a"));
        assert!(!state.toggle_entry("a"));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn test_toggle_all_collapses_when_any_expanded() {
        let mut state = AppState::new();
        state.toggle_entry("a");
        state.toggle_all(["a", "b", "c"]);
        assert!(state.expanded_entries.is_empty());
    }

    #[test]
    fn test_toggle_all_expands_when_none_expanded() {
        let mut state = AppState::new();
        state.toggle_all(["a", "b"]);
        assert!(state.is_expanded("a"));
        assert!(state.is_expanded("b"));
        assert_eq!(state.expanded_entries.len(), 2);
    }

    #[test]
    fn test_start_chat_resets_messages_and_image() {
        let mut state = AppState::new();
        state.chat_messages.push(("q".into(), "a".into()));
        state.pending_image = Some(ImageInput::new("image/png", vec![1, 2, 3]));

        state.start_chat("c1");

        assert_eq!(state.current_chat_id.as_deref(), Some("c1"));
        assert_eq!(state.chat_title, NEW_CONVERSATION_TITLE);
        assert!(state.chat_messages.is_empty());
        assert!(state.pending_image.is_none());
    }
}

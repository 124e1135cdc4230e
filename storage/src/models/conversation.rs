//! Conversation model.

use serde::{Deserialize, Serialize};

pub const NEW_CONVERSATION_TITLE: &str = "New Conversation";
pub const EMPTY_CONVERSATION_TITLE: &str = "Empty Conversation";

const TITLE_CHARS: usize = 30;

/// A chat: ordered (user, assistant) message pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<(String, String)>,
    /// ISO-8601, last touched
    pub timestamp: String,
}

impl Conversation {
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: NEW_CONVERSATION_TITLE.to_string(),
            messages: Vec::new(),
            timestamp: timestamp.into(),
        }
    }

    /// Title derived from a message: its first 30 characters followed by `...`.
    pub fn title_from_message(message: &str) -> String {
        let head: String = message.chars().take(TITLE_CHARS).collect();
        format!("{}...", head)
    }

    /// Title shown in listings: [`EMPTY_CONVERSATION_TITLE`] while there are no messages,
    /// else the stored title, else one derived from the first user message.
    pub fn display_title(&self) -> String {
        match self.messages.first() {
            None => EMPTY_CONVERSATION_TITLE.to_string(),
            Some(_) if !self.title.trim().is_empty() => self.title.clone(),
            Some((user, _)) => Self::title_from_message(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_message_truncates() {
        let title = Conversation::title_from_message("Can you help me plan a birthday party for Sam?");
        assert_eq!(title, "Can you help me plan a birthda...");
        assert_eq!(Conversation::title_from_message("Hi"), "Hi...");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut c = Conversation::new("c1", "2024-06-01T10:00:00+00:00");
        assert_eq!(c.display_title(), EMPTY_CONVERSATION_TITLE);

        c.messages.push(("Hello there".to_string(), "Hi!".to_string()));
        assert_eq!(c.display_title(), NEW_CONVERSATION_TITLE);

        c.title = String::new();
        assert_eq!(c.display_title(), "Hello there...");
    }

    #[test]
    fn test_messages_serialize_as_pairs() {
        let mut c = Conversation::new("c1", "2024-06-01T10:00:00");
        c.messages.push(("q".to_string(), "a".to_string()));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["messages"], serde_json::json!([["q", "a"]]));
    }
}

//! Journal entry model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    /// Display date, `%B %d, %Y`
    pub date: String,
    /// Display time, `%I:%M %p`
    pub time: String,
    /// ISO-8601; ordering key
    pub timestamp: String,
    #[serde(default)]
    pub emotion_analysis: Option<String>,
    #[serde(default)]
    pub last_edited: Option<String>,
}

const PREVIEW_CHARS: usize = 100;

impl JournalEntry {
    /// First 100 characters of the content, with `...` when truncated.
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

//! Persisted models. Field names and enum spellings match the JSON files on disk.

mod conversation;
mod journal_entry;
mod settings;

pub use conversation::{Conversation, EMPTY_CONVERSATION_TITLE, NEW_CONVERSATION_TITLE};
pub use journal_entry::JournalEntry;
pub use settings::{DisabilityType, Settings, UserType};

/// A list element addressed by a string id.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Conversation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for JournalEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

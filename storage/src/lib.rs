//! Storage crate: flat-file JSON persistence for the assistant's local state.
//!
//! Three documents live in the data directory: the conversation list, the journal entry
//! list and the settings object. Each is read whole and rewritten whole on every mutation,
//! through a temp file and a rename so a crash never leaves a half-written file.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Conversation, JournalEntry, Settings, UserType, DisabilityType
//! - [`json_file`] – JsonFile: tolerant load, atomic save
//! - [`repository`] – Repository trait and the JSON list repository
//! - [`settings_repo`] – SettingsRepository

mod error;
mod json_file;
mod models;
mod repository;
mod settings_repo;

pub use error::StorageError;
pub use json_file::JsonFile;
pub use models::{
    Conversation, DisabilityType, JournalEntry, Record, Settings, UserType, EMPTY_CONVERSATION_TITLE,
    NEW_CONVERSATION_TITLE,
};
pub use repository::{ConversationRepository, JournalRepository, JsonRepository, Repository};
pub use settings_repo::SettingsRepository;

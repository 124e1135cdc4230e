use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoirError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Memory error: {0}")]
    Memory(#[source] anyhow::Error),

    #[error("LLM error: {0}")]
    Llm(#[source] anyhow::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Settings error: {0}")]
    Settings(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JournalError {
    #[error("Journal entry is empty")]
    EmptyContent,

    #[error("Journal entry not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, MemoirError>;

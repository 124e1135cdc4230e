//! Application configuration loaded from environment variables.

use crate::error::{MemoirError, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_FILE: &str = "logs/memoir.log";
pub const DEFAULT_COLLECTION: &str = "memory_store";

/// Vector store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStoreType {
    /// Persistent SQLite file
    Sqlite,
    /// Volatile, lost on exit
    Memory,
}

impl FromStr for MemoryStoreType {
    type Err = MemoirError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(MemoryStoreType::Sqlite),
            "memory" => Ok(MemoryStoreType::Memory),
            other => Err(MemoirError::Config(format!(
                "MEMORY_STORE_TYPE must be sqlite or memory, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for MemoryStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryStoreType::Sqlite => f.write_str("sqlite"),
            MemoryStoreType::Memory => f.write_str("memory"),
        }
    }
}

/// memoir configuration. File names are resolved inside `data_dir`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub conversations_file: PathBuf,
    pub journal_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: String,
    pub memory_store_type: MemoryStoreType,
    pub memory_sqlite_path: PathBuf,
    pub memory_collection: String,
    pub memory_retrieval_limit: usize,
    pub journal_context_limit: usize,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn usize_var(name: &str, default: usize) -> Result<usize> {
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            MemoirError::Config(format!("{} must be a non-negative integer, got {:?}", name, raw))
        }),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Loads from environment variables; `data_dir` overrides `MEMOIR_DATA_DIR`.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir
            .or_else(|| var("MEMOIR_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let in_data_dir = |name: &str, default: &str| {
            data_dir.join(var(name).unwrap_or_else(|| default.to_string()))
        };

        let conversations_file = in_data_dir("CONVERSATIONS_FILE", "conversations.json");
        let journal_file = in_data_dir("JOURNAL_FILE", "journal_entries.json");
        let settings_file = in_data_dir("SETTINGS_FILE", "settings.json");
        let memory_sqlite_path = var("MEMORY_SQLITE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("memory_db.sqlite"));

        let log_file = var("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let memory_store_type = match var("MEMORY_STORE_TYPE") {
            Some(raw) => raw.parse()?,
            None => MemoryStoreType::Sqlite,
        };
        let memory_collection =
            var("MEMORY_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let memory_retrieval_limit = usize_var("MEMORY_RETRIEVAL_LIMIT", 3)?;
        let journal_context_limit = usize_var("JOURNAL_CONTEXT_LIMIT", 3)?;

        Ok(Self {
            data_dir,
            conversations_file,
            journal_file,
            settings_file,
            log_file,
            memory_store_type,
            memory_sqlite_path,
            memory_collection,
            memory_retrieval_limit,
            journal_context_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 10] = [
        "MEMOIR_DATA_DIR",
        "CONVERSATIONS_FILE",
        "JOURNAL_FILE",
        "SETTINGS_FILE",
        "LOG_FILE",
        "MEMORY_STORE_TYPE",
        "MEMORY_SQLITE_PATH",
        "MEMORY_COLLECTION",
        "MEMORY_RETRIEVAL_LIMIT",
        "JOURNAL_CONTEXT_LIMIT",
    ];

    fn clear_env() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.conversations_file, PathBuf::from("./data/conversations.json"));
        assert_eq!(config.journal_file, PathBuf::from("./data/journal_entries.json"));
        assert_eq!(config.settings_file, PathBuf::from("./data/settings.json"));
        assert_eq!(config.memory_sqlite_path, PathBuf::from("./data/memory_db.sqlite"));
        assert_eq!(config.log_file, "logs/memoir.log");
        assert_eq!(config.memory_store_type, MemoryStoreType::Sqlite);
        assert_eq!(config.memory_collection, "memory_store");
        assert_eq!(config.memory_retrieval_limit, 3);
        assert_eq!(config.journal_context_limit, 3);
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("MEMOIR_DATA_DIR", "/tmp/memoir");
        env::set_var("JOURNAL_FILE", "diary.json");
        env::set_var("MEMORY_STORE_TYPE", "Memory");
        env::set_var("MEMORY_RETRIEVAL_LIMIT", "5");
        env::set_var("MEMORY_COLLECTION", "test_memories");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.journal_file, PathBuf::from("/tmp/memoir/diary.json"));
        assert_eq!(config.memory_sqlite_path, PathBuf::from("/tmp/memoir/memory_db.sqlite"));
        assert_eq!(config.memory_store_type, MemoryStoreType::Memory);
        assert_eq!(config.memory_retrieval_limit, 5);
        assert_eq!(config.memory_collection, "test_memories");

        let overridden = AppConfig::load(Some(PathBuf::from("/srv/memoir"))).unwrap();
        assert_eq!(overridden.settings_file, PathBuf::from("/srv/memoir/settings.json"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_config_errors() {
        clear_env();
        env::set_var("JOURNAL_CONTEXT_LIMIT", "three");
        assert!(matches!(AppConfig::from_env(), Err(MemoirError::Config(_))));

        clear_env();
        env::set_var("MEMORY_STORE_TYPE", "lance");
        assert!(matches!(AppConfig::from_env(), Err(MemoirError::Config(_))));
        clear_env();
    }
}

//! # Core Types
//!
//! ## MemoryKind
//!
//! Origin of a memory: a chat round-trip (`Interaction`) or a journal entry (`Journal`).
//!
//! ## MemoryMetadata
//!
//! Metadata stored next to every embedding. `timestamp` is the indexed creation time,
//! `chat_id` is set for interactions only.
//!
//! ## MemoryRecord
//!
//! A stored (embedding, document, metadata) triple keyed by a string id.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origin of a memory record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Interaction,
    Journal,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::Interaction => "interaction",
            MemoryKind::Journal => "journal",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interaction" => Ok(MemoryKind::Interaction),
            "journal" => Ok(MemoryKind::Journal),
            other => Err(format!("unknown memory kind: {}", other)),
        }
    }
}

/// Metadata associated with a memory record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryMetadata {
    /// When the memory was written (local time with its offset)
    pub timestamp: DateTime<FixedOffset>,
    /// Chat the interaction belongs to; `None` for journal memories
    pub chat_id: Option<String>,
    pub kind: MemoryKind,
}

impl MemoryMetadata {
    /// Metadata for a chat round-trip stored now.
    pub fn interaction(chat_id: impl Into<String>) -> Self {
        Self {
            timestamp: now(),
            chat_id: Some(chat_id.into()),
            kind: MemoryKind::Interaction,
        }
    }

    /// Metadata for a journal entry stored now.
    pub fn journal() -> Self {
        Self {
            timestamp: now(),
            chat_id: None,
            kind: MemoryKind::Journal,
        }
    }

    /// Creation time as an ISO-8601 / RFC 3339 string.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}

/// Current local time with its UTC offset.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// A single stored memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Unique identifier within the collection
    pub id: String,
    /// Vector embedding of `document`
    pub embedding: Vec<f32>,
    /// Raw text the embedding was computed from
    pub document: String,
    pub metadata: MemoryMetadata,
}

impl MemoryRecord {
    pub fn new(
        id: impl Into<String>,
        embedding: Vec<f32>,
        document: impl Into<String>,
        metadata: MemoryMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            embedding,
            document: document.into(),
            metadata,
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// A record returned by a nearest-neighbor query with its cosine distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: MemoryRecord,
    /// `1 - cosine_similarity`; 0.0 is identical direction
    pub distance: f32,
}

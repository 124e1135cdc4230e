//! Memory id construction.
//!
//! Interaction ids read `mem_{chat_id}_{timestamp}_{uuid}`. The timestamp keeps ids
//! human-sortable; the random suffix keeps two writes in the same clock tick apart.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

const ID_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6f";

/// Id for a chat round-trip memory written at `timestamp`.
pub fn interaction_memory_id(chat_id: &str, timestamp: &DateTime<FixedOffset>) -> String {
    format!(
        "mem_{}_{}_{}",
        chat_id,
        timestamp.format(ID_TIMESTAMP_FORMAT),
        Uuid::new_v4().simple()
    )
}

/// Id for a journal memory when the caller does not supply the entry id.
pub fn journal_memory_id() -> String {
    format!("journal_{}", Uuid::new_v4().simple())
}

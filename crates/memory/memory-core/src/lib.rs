//! # Memory Core
//!
//! Core types and traits for semantic memory storage.
//! Used by the `memory` crate and the vector store backends (`memory-inmemory`, `memory-sqlite`).
//!
//! ## Modules
//!
//! - [`types`] - MemoryRecord, MemoryMetadata, MemoryKind, ScoredRecord
//! - [`store`] - VectorStore trait
//! - [`error`] - VectorStoreError
//! - [`similarity`] - cosine similarity / distance and ranking
//! - [`ids`] - memory id construction

pub mod error;
pub mod ids;
pub mod similarity;
pub mod store;
pub mod types;

pub use error::*;
pub use ids::*;
pub use similarity::*;
pub use store::*;
pub use types::*;

//! # Memory Crate
//!
//! Long-term semantic memory for the assistant: turns chat round-trips and journal entries
//! into embedded records, retrieves the most relevant ones for a message, and assembles
//! them with recent journal entries and instructions into one prompt.
//!
//! ## Modules
//!
//! - [`repository`] - `MemoryRepository`: ids, timestamps, metadata; add / query / delete
//! - [`context`] - `ContextAssembler`: retrieval + journal context + prompt rendering
//!
//! ## External Interactions
//!
//! - **Embedding services**: any `embedding::EmbeddingService`
//! - **Vector stores**: any `memory_core::VectorStore` (in-memory or SQLite)
//!
//! ## Retrieval scope
//!
//! Retrieval is global: a query searches every chat and every journal entry, so journal
//! context can surface inside any chat. The chat id is recorded on interaction memories
//! and logged on queries but never filters results.

pub mod context;
pub mod repository;

pub use context::{ContextAssembler, JournalContext};
pub use repository::{MemoryRepository, RelevantMemory};

pub use memory_core::{MemoryKind, MemoryMetadata, MemoryRecord, VectorStore, VectorStoreError};

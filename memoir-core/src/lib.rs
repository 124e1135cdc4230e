//! # memoir-core
//!
//! Shared foundations of the memoir workspace: the error taxonomy ([`MemoirError`],
//! [`JournalError`]), the environment-driven [`AppConfig`], and tracing initialization.

pub mod config;
pub mod error;
pub mod logger;

pub use config::{AppConfig, MemoryStoreType};
pub use error::{JournalError, MemoirError, Result};
pub use logger::init_tracing;

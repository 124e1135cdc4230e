//! Errors raised by vector store backends.
//!
//! Stores return `anyhow::Error`; callers that need to branch on the cause
//! use `err.downcast_ref::<VectorStoreError>()`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorStoreError {
    #[error("Record already exists: {0}")]
    DuplicateId(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Checks `actual` against the dimension already fixed for a collection, if any.
pub fn check_dimension(expected: Option<usize>, actual: usize) -> Result<(), VectorStoreError> {
    match expected {
        Some(expected) if expected != actual => {
            Err(VectorStoreError::DimensionMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}

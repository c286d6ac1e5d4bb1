// In: src/error.rs

//! This module defines the single, unified error type for the entire sift library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! The three caller-contract variants (`InvalidColumn`, `SizeMismatch`,
//! `TypeError`) render fixed message strings so calling code and tests can tell
//! failure causes apart without inspecting internal state.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    // =========================================================================
    // === Caller-Contract Violations (raised by the validation layer)
    // =========================================================================
    /// A column is structurally inconsistent, e.g. it reports rows but lacks
    /// the buffers needed to hold them.
    #[error("{0}")]
    InvalidColumn(&'static str),

    /// A source column and its paired mask disagree on row count.
    #[error("Column size mismatch")]
    SizeMismatch,

    /// A column has the wrong element type for its role.
    #[error("{0}")]
    TypeError(&'static str),

    // =========================================================================
    // === High-Level, Semantic Errors
    // =========================================================================
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Failed to allocate output buffer of {0} bytes")]
    AllocationFailed(usize),

    #[error("Invalid compaction configuration: {0}")]
    Config(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically while reading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for SiftError {
    fn from(err: bytemuck::PodCastError) -> Self {
        SiftError::PodCast(err.to_string())
    }
}

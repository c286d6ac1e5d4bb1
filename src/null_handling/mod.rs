//! This module serves as the public API for all null-handling logic within the
//! sift core.
//!
//! Validity is modelled as an optional Arrow `BooleanBuffer`; the bit-level
//! layout (test, set, popcount) is Arrow's, and this module only composes it.
//!
//! This module is PURE RUST and independent of the compaction pipeline.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Accessors over optional validity bitmaps.
pub mod bitmap;

//==================================================================================
// 2. Unit Tests (Module-level integration tests)
//==================================================================================

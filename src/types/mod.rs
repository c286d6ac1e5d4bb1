//! This module defines the core, strongly-typed data representations used
//! throughout the sift compaction engine.
//!
//! It currently includes the canonical `SiftDataType` enum, the closed set of
//! element representations the type dispatcher knows how to compact.

pub mod sift_data_type;

// Re-export the main type(s) for easier access.
pub use sift_data_type::SiftDataType;

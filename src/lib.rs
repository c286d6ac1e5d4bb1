//! This file is the root of the `sift` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`compaction`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the small surface most callers need: the `Column` descriptor,
//!     the two compaction operations and their configuration.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod column;
pub mod compaction;
pub mod config;
pub mod kernels;
pub mod null_handling;
pub mod types;

mod error;
mod traits;
mod utils;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use column::Column;
pub use compaction::{
    apply_boolean_mask, apply_boolean_mask_with_config, drop_nulls, drop_nulls_with_config,
};
pub use config::CompactionConfig;
pub use error::SiftError;
pub use observability::enable_verbose_logging;
pub use traits::SiftNative;
pub use types::SiftDataType;

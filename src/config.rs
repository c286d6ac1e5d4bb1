// In: src/config.rs

//! The single source of truth for compaction tuning.
//!
//! `CompactionConfig` is created once at the application boundary (from code or
//! from a JSON document) and then passed by reference into every call. It only
//! shapes *how* the work is scheduled; results are identical for every valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::SiftError;

/// Number of survivor flags packed into one word of the survivor map.
pub const SURVIVOR_WORD_BITS: usize = 64;

/// Tuning knobs for the block-parallel compaction pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CompactionConfig {
    /// **Rows per parallel block.**
    /// Each block is predicated, counted, scanned and gathered as one unit of
    /// work. Must be a non-zero multiple of 64 so blocks never share a word of
    /// the survivor map.
    #[serde(default = "default_block_rows")]
    pub block_rows: usize,

    /// Inputs with fewer rows than this run the same block pipeline on the
    /// calling thread instead of the rayon pool.
    #[serde(default = "default_parallel_threshold_rows")]
    pub parallel_threshold_rows: usize,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            block_rows: default_block_rows(),
            parallel_threshold_rows: default_parallel_threshold_rows(),
        }
    }
}

impl CompactionConfig {
    /// Parses a JSON document into a validated configuration. Missing fields
    /// take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SiftError> {
        let config: CompactionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), SiftError> {
        if self.block_rows == 0 || self.block_rows % SURVIVOR_WORD_BITS != 0 {
            return Err(SiftError::Config(format!(
                "block_rows must be a non-zero multiple of {}, got {}",
                SURVIVOR_WORD_BITS, self.block_rows
            )));
        }
        Ok(())
    }

    /// Whether an input of `num_rows` rows should be spread over the rayon pool.
    pub fn run_parallel(&self, num_rows: usize) -> bool {
        num_rows >= self.parallel_threshold_rows
    }
}

/// Helper for `serde` to provide a default for `block_rows`.
fn default_block_rows() -> usize {
    65_536
}

/// Helper for `serde` to provide a default for `parallel_threshold_rows`.
fn default_parallel_threshold_rows() -> usize {
    16_384
}

//! This module collects the pure, stateless kernels of the compaction pipeline.
//!
//! The pipeline is the standard parallel stream-compaction pattern, kept as
//! three separately testable stages:
//!
//! 1. [`predicate`]: decide which rows survive and their output validity;
//! 2. [`scan`]: turn survival flags into output positions;
//! 3. [`gather`]: copy surviving rows to their positions.
//!
//! None of the kernels know about column types; the typed instantiation lives
//! in `compaction::dispatch`.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Stage 1: Survival
pub mod predicate;

/// Stage 2: Position Scan
pub mod scan;

/// Stage 3: Gather/Pack
pub mod gather;

//==================================================================================
// 2. Re-exports
//==================================================================================

pub use gather::{gather_values, gather_with};
pub use predicate::{evaluate_survivors, Predicate, SurvivorMap};
pub use scan::{scan_survivors, DestinationIndexMap};

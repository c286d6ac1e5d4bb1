// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` connects Arrow arrays to the Arrow-agnostic compaction engine. The
// engine only understands `Column` descriptors; the bridge is the one place that
// knows how Arrow lays out primitive, boolean and dictionary arrays.
//
// Data Flow:
//
//   1. [Stateless API (apply_boolean_mask_arrow / drop_nulls_arrow)] -> Receives `&dyn Array`
//         |
//         `-> a. Calls `arrow_impl` to wrap `&dyn Array` -> `Column` (zero-copy where possible)
//         |
//         `-> b. Calls the pure engine with the `Column`s
//
//   2. [Compaction Engine (compaction::orchestrator)] -> Returns `Result<Column>`
//         |
//         `-> c. Calls `arrow_impl` to wrap the output `Column` -> `ArrayRef`
//
// ====================================================================================
pub mod arrow_impl;
pub mod stateless_api;

pub use arrow_impl::{array_to_column, column_to_array};
pub use stateless_api::{apply_boolean_mask_arrow, drop_nulls_arrow};

#[cfg(test)]
mod tests;

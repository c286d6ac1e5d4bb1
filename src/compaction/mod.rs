// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Compaction Layer
// ====================================================================================
//
// The compaction layer turns the three stateless kernels into the two public
// operations. Every call flows through the same stages:
//
//   1. [Validation]   -> rejects ill-formed inputs; nothing has been scheduled yet
//         |
//   2. [Predicate]    -> survivor map (one bit per input row)
//         |
//   3. [Scan]         -> destination index map + total survivor count
//         |
//   4. [Dispatch]     -> typed gather of the data buffer into a new allocation
//         |
//   5. [Pack]         -> gather of output validity, dropped if all rows are valid
//
// The survivor and destination maps are scratch owned by one call and dropped
// before it returns. The layer holds no state between calls.
//
// ====================================================================================
pub(crate) mod dispatch;
pub mod orchestrator;
pub(crate) mod validation;

pub use orchestrator::{
    apply_boolean_mask, apply_boolean_mask_with_config, drop_nulls, drop_nulls_with_config,
};

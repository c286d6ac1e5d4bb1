// In: src/bridge/stateless_api.rs

use arrow::array::{Array, ArrayRef};

use crate::bridge::arrow_impl;
use crate::compaction;
use crate::error::SiftError;

/// Keeps the rows of `array` where `mask` is valid and true.
///
/// `mask` must be a `BooleanArray` of the same length. Nulls in `array` are
/// kept as nulls; null mask entries drop their row.
pub fn apply_boolean_mask_arrow(
    array: &dyn Array,
    mask: &dyn Array,
) -> Result<ArrayRef, SiftError> {
    // 1. Marshall both arrays into the engine's descriptor.
    let source = arrow_impl::array_to_column(array)?;
    let mask = arrow_impl::array_to_column(mask)?;

    // 2. Call the pure compaction engine.
    let output = compaction::apply_boolean_mask(&source, &mask)?;

    // 3. The bridge finishes the job.
    arrow_impl::column_to_array(&output)
}

/// Keeps the valid rows of `array`; the result has no null buffer.
pub fn drop_nulls_arrow(array: &dyn Array) -> Result<ArrayRef, SiftError> {
    let source = arrow_impl::array_to_column(array)?;
    let output = compaction::drop_nulls(&source)?;
    arrow_impl::column_to_array(&output)
}

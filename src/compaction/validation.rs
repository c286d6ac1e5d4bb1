//! Host-side validation of compaction inputs.
//!
//! Every check here runs before any parallel work is scheduled, so a rejected
//! call never produces partial output. Zero-row inputs are only checked as far
//! as the entry point's contract requires; their other fields may look
//! malformed without consequence.

use crate::column::Column;
use crate::error::SiftError;
use crate::types::SiftDataType;

pub const NULL_BOOLEAN_MASK: &str = "Null boolean_mask";
pub const NULL_INPUT_DATA: &str = "Null input data";
pub const MASK_NOT_BOOLEAN: &str = "Mask must be Boolean type";
pub const NULL_COUNT_EXCEEDS_ROWS: &str = "Null count exceeds row count";
pub const MISSING_VALIDITY: &str = "Missing validity bitmask";
pub const VALIDITY_TOO_SHORT: &str = "Validity bitmask too short";
pub const DATA_TOO_SMALL: &str = "Data buffer too small";

/// A column that claims rows but has nowhere to keep them.
fn lacks_data(column: &Column) -> bool {
    column.size > 0 && column.data.is_none()
}

/// Checks the buffer-level invariants of a non-empty column.
fn check_structure(column: &Column) -> Result<(), SiftError> {
    if column.null_count > column.size {
        return Err(SiftError::InvalidColumn(NULL_COUNT_EXCEEDS_ROWS));
    }
    match &column.validity {
        None if column.null_count > 0 => {
            return Err(SiftError::InvalidColumn(MISSING_VALIDITY));
        }
        Some(bits) if bits.len() < column.size => {
            return Err(SiftError::InvalidColumn(VALIDITY_TOO_SHORT));
        }
        _ => {}
    }
    if let Some(data) = &column.data {
        let required = column
            .size
            .checked_mul(column.dtype.byte_width())
            .ok_or(SiftError::InvalidColumn(DATA_TOO_SMALL))?;
        if data.len() < required {
            return Err(SiftError::InvalidColumn(DATA_TOO_SMALL));
        }
    }
    Ok(())
}

/// Validates the inputs of `apply_boolean_mask`.
///
/// Order matters: buffer presence of the mask, then of the source, then row
/// counts, then the mask type. Structural checks only run for non-empty input.
pub fn validate_boolean_mask(source: &Column, mask: &Column) -> Result<(), SiftError> {
    if lacks_data(mask) {
        return Err(SiftError::InvalidColumn(NULL_BOOLEAN_MASK));
    }
    if lacks_data(source) {
        return Err(SiftError::InvalidColumn(NULL_INPUT_DATA));
    }
    if source.size != mask.size {
        log::debug!(
            "apply_boolean_mask: source has {} rows, mask has {}",
            source.size,
            mask.size
        );
        return Err(SiftError::SizeMismatch);
    }
    if mask.dtype != SiftDataType::Boolean {
        log::debug!("apply_boolean_mask: mask has type {}", mask.dtype);
        return Err(SiftError::TypeError(MASK_NOT_BOOLEAN));
    }
    if source.size > 0 {
        check_structure(mask)?;
        check_structure(source)?;
    }
    Ok(())
}

/// Validates the input of `drop_nulls`. Zero-row columns always pass.
pub fn validate_drop_nulls(source: &Column) -> Result<(), SiftError> {
    validate_column(source)
}

/// Checks that a single column is safe to read row by row.
pub fn validate_column(column: &Column) -> Result<(), SiftError> {
    if column.size == 0 {
        return Ok(());
    }
    if lacks_data(column) {
        return Err(SiftError::InvalidColumn(NULL_INPUT_DATA));
    }
    check_structure(column)
}

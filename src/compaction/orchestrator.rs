// src/compaction/orchestrator.rs

use crate::column::Column;
use crate::compaction::{dispatch, validation};
use crate::config::CompactionConfig;
use crate::error::SiftError;
use crate::kernels::{self, Predicate};
use crate::null_handling::bitmap;

//==================================================================================
// 1. Public Entry Points
//==================================================================================

/// Keeps the rows of `source` where `mask` is both valid and true.
///
/// The output inherits each kept row's validity from `source`; a null mask
/// entry drops its row instead of producing a null. Neither input is modified.
///
/// # Errors
/// * `InvalidColumn("Null boolean_mask")` / `InvalidColumn("Null input data")`
///   if a non-empty column has no data buffer.
/// * `SizeMismatch` if the columns disagree on row count.
/// * `TypeError("Mask must be Boolean type")` if `mask` is not `Boolean`.
pub fn apply_boolean_mask(source: &Column, mask: &Column) -> Result<Column, SiftError> {
    apply_boolean_mask_with_config(source, mask, &CompactionConfig::default())
}

/// [`apply_boolean_mask`] with explicit scheduling parameters.
pub fn apply_boolean_mask_with_config(
    source: &Column,
    mask: &Column,
    config: &CompactionConfig,
) -> Result<Column, SiftError> {
    validation::validate_boolean_mask(source, mask)?;
    if source.is_empty() {
        return Ok(Column::empty_like(source));
    }

    let mask_values = mask.values::<u8>()?;
    let predicate = Predicate::boolean_mask(
        mask_values,
        mask.validity.as_ref(),
        source.validity.as_ref(),
    );
    compact(source, &predicate, config, "apply_boolean_mask")
}

/// Keeps the valid rows of `source`. The output never contains nulls.
///
/// # Errors
/// * `InvalidColumn("Null input data")` if a non-empty column has no data buffer.
pub fn drop_nulls(source: &Column) -> Result<Column, SiftError> {
    drop_nulls_with_config(source, &CompactionConfig::default())
}

/// [`drop_nulls`] with explicit scheduling parameters.
pub fn drop_nulls_with_config(
    source: &Column,
    config: &CompactionConfig,
) -> Result<Column, SiftError> {
    if source.is_empty() {
        return Ok(Column::empty_like(source));
    }
    validation::validate_drop_nulls(source)?;

    let predicate = Predicate::drop_nulls(source.validity.as_ref());
    compact(source, &predicate, config, "drop_nulls")
}

//==================================================================================
// 2. Pipeline
//==================================================================================

/// Runs predicate -> scan -> gather over a validated, non-empty source.
fn compact(
    source: &Column,
    predicate: &Predicate<'_>,
    config: &CompactionConfig,
    operation: &'static str,
) -> Result<Column, SiftError> {
    config.validate()?;
    let parallel = config.run_parallel(source.size);

    let survivors = kernels::evaluate_survivors(predicate, source.size, config, parallel)?;
    let map = kernels::scan_survivors(&survivors, config, parallel)?;
    drop(survivors);

    log::debug!(
        "{}: {} of {} {} rows survive ({} blocks, parallel={})",
        operation,
        map.survivor_count,
        source.size,
        source.dtype,
        map.num_blocks(),
        parallel
    );
    log_metric!(
        "event" = operation,
        "dtype" = source.dtype,
        "rows" = source.size,
        "survivors" = map.survivor_count
    );

    if map.survivor_count == 0 {
        return Ok(Column::empty_like(source));
    }

    let data = dispatch::gather_column_data(source, &map, parallel)?;

    let (validity, null_count) = if predicate.produces_nulls() {
        let flags = kernels::gather_with(&map, true, parallel, |i| predicate.output_valid(i))?;
        bitmap::pack_validity(&flags)
    } else {
        (None, 0)
    };

    Ok(Column {
        dtype: source.dtype,
        size: map.survivor_count,
        null_count,
        data,
        validity,
        dictionary: source.dictionary.clone(),
    })
}

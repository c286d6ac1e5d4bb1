// --- IN: src/null_handling/bitmap.rs ---

//! Validity-bitmap accessors built on Arrow's `BooleanBuffer`.
//!
//! A column's validity is an `Option<BooleanBuffer>`: bit set means valid, and
//! an absent buffer means every row is valid. Every accessor here takes the
//! optional form and defaults to "valid" when it is empty, so callers never
//! need to materialise a bitmap for the common no-nulls case.

use arrow::array::BooleanBufferBuilder;
use arrow::buffer::{BooleanBuffer, NullBuffer};

//==================================================================================
// 1. Bit Access
//==================================================================================

/// Tests the validity of row `i`. Absent bitmaps report every row as valid.
#[inline]
pub fn is_valid(validity: Option<&BooleanBuffer>, i: usize) -> bool {
    validity.map_or(true, |bits| bits.value(i))
}

/// Counts the unset bits among the first `len` rows.
pub fn count_nulls(validity: Option<&BooleanBuffer>, len: usize) -> usize {
    match validity {
        Some(bits) => len - bits.slice(0, len).count_set_bits(),
        None => 0,
    }
}

/// Builds a validity bitmap from one flag per row.
pub fn from_flags(flags: &[bool]) -> BooleanBuffer {
    let mut builder = BooleanBufferBuilder::new(flags.len());
    builder.append_slice(flags);
    builder.finish()
}

/// Packs one flag per output row into a bitmap, dropping the bitmap entirely
/// when every row is valid. Returns the bitmap (if any) and the null count.
pub fn pack_validity(flags: &[bool]) -> (Option<BooleanBuffer>, usize) {
    let null_count = flags.iter().filter(|&&valid| !valid).count();
    if null_count == 0 {
        (None, 0)
    } else {
        (Some(from_flags(flags)), null_count)
    }
}

//==================================================================================
// 2. Arrow NullBuffer Interop
//==================================================================================

/// Converts a column validity bitmap into an Arrow `NullBuffer` of exactly `len` rows.
///
/// Returns `None` when there is no bitmap or when no row in range is null,
/// matching Arrow's convention of omitting all-valid null buffers.
pub fn to_null_buffer(validity: Option<&BooleanBuffer>, len: usize) -> Option<NullBuffer> {
    validity
        .map(|bits| NullBuffer::new(bits.slice(0, len)))
        .filter(|nulls| nulls.null_count() > 0)
}

/// Extracts the validity bitmap carried by an Arrow `NullBuffer`.
pub fn from_null_buffer(nulls: Option<&NullBuffer>) -> Option<BooleanBuffer> {
    nulls.map(|nb| nb.inner().clone())
}

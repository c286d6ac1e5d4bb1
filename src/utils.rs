//! This module provides a set of shared, low-level utility functions used
//! throughout the sift core.
//!
//! Its primary responsibilities include:
//! 1.  Providing safe, validated conversions between raw byte slices and typed slices.
//! 2.  Allocating output buffers fallibly, so an out-of-memory condition is
//!     surfaced to the caller as an error instead of aborting the process.

use crate::error::SiftError;

//==================================================================================
// 1. Core Utility Functions
//==================================================================================

/// Safely reinterprets a byte slice as a slice of a primitive type.
///
/// This is the gateway from a column's untyped `Buffer` to a workable, typed
/// slice. `bytemuck` checks both length and alignment; Arrow buffers are
/// 64-byte aligned so the alignment check only fails for foreign slices.
///
/// # Errors
/// Returns a `SiftError::PodCast` if the byte slice length is not a multiple of
/// the size of `T` or the slice is misaligned for `T`.
pub fn safe_bytes_to_typed_slice<T>(bytes: &[u8]) -> Result<&[T], SiftError>
where
    T: bytemuck::Pod,
{
    bytemuck::try_cast_slice(bytes).map_err(SiftError::from)
}

/// Allocates a vector of `len` copies of `fill`, reporting allocation failure
/// as `SiftError::AllocationFailed` instead of aborting.
pub fn try_alloc_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, SiftError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| SiftError::AllocationFailed(len.saturating_mul(std::mem::size_of::<T>())))?;
    buf.resize(len, fill);
    Ok(buf)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_bytes_to_typed_slice_success() {
        let original_vec: Vec<i32> = vec![1, -2, 1_000_000];
        let bytes = arrow::buffer::Buffer::from_vec(original_vec.clone());

        let typed_slice = safe_bytes_to_typed_slice::<i32>(bytes.as_slice()).unwrap();
        assert_eq!(typed_slice, original_vec.as_slice());
    }

    #[test]
    fn test_safe_bytes_to_typed_slice_mismatch_error() {
        // 5 bytes is not divisible by size_of::<i32>(4) or size_of::<i16>(2).
        let bytes = arrow::buffer::Buffer::from_vec(vec![0u8, 1, 2, 3, 4]);

        let result_i32 = safe_bytes_to_typed_slice::<i32>(bytes.as_slice());
        assert!(matches!(result_i32, Err(SiftError::PodCast(_))));

        let result_i16 = safe_bytes_to_typed_slice::<i16>(bytes.as_slice());
        assert!(matches!(result_i16, Err(SiftError::PodCast(_))));
    }

    #[test]
    fn test_try_alloc_filled() {
        let buf = try_alloc_filled(4, 7u16).unwrap();
        assert_eq!(buf, vec![7, 7, 7, 7]);
        assert!(try_alloc_filled(0, 0u8).unwrap().is_empty());
    }

    #[test]
    fn test_try_alloc_filled_reports_failure() {
        let result = try_alloc_filled::<u64>(usize::MAX / 4, 0);
        assert!(matches!(result, Err(SiftError::AllocationFailed(_))));
    }
}

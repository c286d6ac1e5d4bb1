//! This module defines shared traits used across the column model and kernels.

use arrow::datatypes::ArrowNativeType;

use crate::types::SiftDataType;

/// A Rust primitive that can back a column's data buffer.
///
/// The associated `DATA_TYPE` is the logical type a column built from this
/// native type carries by default. `u8` maps to `UInt8` and `i32` to `Int32`;
/// booleans and category codes have dedicated constructors on `Column`.
pub trait SiftNative:
    bytemuck::Pod + ArrowNativeType + PartialEq + std::fmt::Debug + Send + Sync
{
    const DATA_TYPE: SiftDataType;
}

// Implement the trait for every fixed-width native type the dispatcher knows.
macro_rules! impl_sift_native {
    ($T:ty, $variant:ident) => {
        impl SiftNative for $T {
            const DATA_TYPE: SiftDataType = SiftDataType::$variant;
        }
    };
}

impl_sift_native!(i8, Int8);
impl_sift_native!(i16, Int16);
impl_sift_native!(i32, Int32);
impl_sift_native!(i64, Int64);
impl_sift_native!(u8, UInt8);
impl_sift_native!(u16, UInt16);
impl_sift_native!(u32, UInt32);
impl_sift_native!(u64, UInt64);
impl_sift_native!(f32, Float32);
impl_sift_native!(f64, Float64);

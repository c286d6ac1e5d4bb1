//! This module defines the canonical, type-safe representation of the element
//! types a column can carry.

use crate::error::SiftError;
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, internal representation of a column's element type.
///
/// The set is closed: every variant maps onto exactly one physical storage type,
/// and the compaction dispatcher instantiates one generic kernel per physical
/// type. `Boolean` is stored one byte per row and `Category` stores `i32` codes
/// into a separate string dictionary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiftDataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Boolean,
    Category,
}

impl SiftDataType {
    /// Converts an Arrow `DataType` into a `SiftDataType`.
    ///
    /// Only `Dictionary(Int32, Utf8)` is accepted as a category type.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, SiftError> {
        match arrow_type {
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Float32 => Ok(Self::Float32),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Dictionary(key, value)
                if **key == ArrowDataType::Int32 && **value == ArrowDataType::Utf8 =>
            {
                Ok(Self::Category)
            }
            dt => Err(SiftError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to SiftDataType",
                dt
            ))),
        }
    }

    /// Converts a `SiftDataType` back into an Arrow `DataType`.
    pub fn to_arrow_type(&self) -> ArrowDataType {
        match self {
            Self::Int8 => ArrowDataType::Int8,
            Self::Int16 => ArrowDataType::Int16,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            Self::UInt8 => ArrowDataType::UInt8,
            Self::UInt16 => ArrowDataType::UInt16,
            Self::UInt32 => ArrowDataType::UInt32,
            Self::UInt64 => ArrowDataType::UInt64,
            Self::Float32 => ArrowDataType::Float32,
            Self::Float64 => ArrowDataType::Float64,
            Self::Boolean => ArrowDataType::Boolean,
            Self::Category => ArrowDataType::Dictionary(
                Box::new(ArrowDataType::Int32),
                Box::new(ArrowDataType::Utf8),
            ),
        }
    }

    /// Size in bytes of one element in the column's data buffer.
    pub fn byte_width(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 | Self::Boolean => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 | Self::Category => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Every variant, in declaration order.
    pub const ALL: [SiftDataType; 12] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::Boolean,
        Self::Category,
    ];
}

/// Provides the canonical string representation for a `SiftDataType`.
impl fmt::Display for SiftDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

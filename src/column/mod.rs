//! The column descriptor consumed and produced by the compaction engine.
//!
//! A `Column` is a typed, possibly nullable sequence of rows:
//!
//! * `data` holds `size` elements of `dtype`'s physical width in an aligned
//!   Arrow `Buffer`;
//! * `validity` is an optional bitmap (bit set = valid); `None` means every row
//!   is valid;
//! * `dictionary` carries the string table of a `Category` column. Compaction
//!   selects codes and never touches it.
//!
//! The fields are public on purpose: a descriptor handed over by an external
//! allocator can be internally inconsistent, and the validation layer is what
//! rejects it.

use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::buffer::{BooleanBuffer, Buffer};

use crate::error::SiftError;
use crate::null_handling::bitmap;
use crate::traits::SiftNative;
use crate::types::SiftDataType;
use crate::utils::safe_bytes_to_typed_slice;

#[derive(Debug, Clone)]
pub struct Column {
    /// Element type tag.
    pub dtype: SiftDataType,
    /// Number of rows.
    pub size: usize,
    /// Number of rows whose validity bit is unset.
    pub null_count: usize,
    /// Element storage; absent iff the column has no rows.
    pub data: Option<Buffer>,
    /// Validity bitmap; absent means all rows are valid.
    pub validity: Option<BooleanBuffer>,
    /// String table for `Category` columns.
    pub dictionary: Option<Arc<StringArray>>,
}

//==================================================================================
// 1. Construction
//==================================================================================

impl Column {
    /// A column with no rows and no buffers.
    pub fn empty(dtype: SiftDataType) -> Self {
        Self {
            dtype,
            size: 0,
            null_count: 0,
            data: None,
            validity: None,
            dictionary: None,
        }
    }

    /// A column with no rows that keeps `source`'s type and dictionary.
    pub fn empty_like(source: &Column) -> Self {
        Self {
            dictionary: source.dictionary.clone(),
            ..Self::empty(source.dtype)
        }
    }

    /// Builds a column from values and an optional per-row validity flag list.
    ///
    /// A bitmap is kept whenever one is supplied, even if every flag is set.
    pub fn from_values<T: SiftNative>(values: Vec<T>, validity: Option<Vec<bool>>) -> Self {
        Self::from_parts(T::DATA_TYPE, values, validity, None)
    }

    /// Builds a column from optional values; a bitmap is only attached when at
    /// least one value is `None`. Null slots hold `T::default()`.
    pub fn from_options<T: SiftNative + Default>(values: &[Option<T>]) -> Self {
        let data: Vec<T> = values.iter().map(|v| v.unwrap_or_default()).collect();
        let flags: Vec<bool> = values.iter().map(Option::is_some).collect();
        let (validity, null_count) = bitmap::pack_validity(&flags);
        let mut column = Self::from_parts(T::DATA_TYPE, data, None, None);
        column.validity = validity;
        column.null_count = null_count;
        column
    }

    /// Builds a `Boolean` column, stored one byte per row.
    pub fn from_bools(values: Vec<bool>, validity: Option<Vec<bool>>) -> Self {
        let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        Self::from_parts(SiftDataType::Boolean, bytes, validity, None)
    }

    /// Builds a `Category` column from dictionary codes.
    pub fn category(
        codes: Vec<i32>,
        validity: Option<Vec<bool>>,
        dictionary: Arc<StringArray>,
    ) -> Self {
        Self::from_parts(SiftDataType::Category, codes, validity, Some(dictionary))
    }

    /// Attaches a validity bitmap, replacing any existing one, and recomputes
    /// the null count.
    pub fn with_validity(mut self, flags: Vec<bool>) -> Self {
        let bits = bitmap::from_flags(&flags);
        self.null_count = bitmap::count_nulls(Some(&bits), self.size.min(bits.len()));
        self.validity = Some(bits);
        self
    }

    fn from_parts<T: SiftNative>(
        dtype: SiftDataType,
        values: Vec<T>,
        validity: Option<Vec<bool>>,
        dictionary: Option<Arc<StringArray>>,
    ) -> Self {
        let size = values.len();
        let data = (size > 0).then(|| Buffer::from_vec(values));
        let column = Self {
            dtype,
            size,
            null_count: 0,
            data,
            validity: None,
            dictionary,
        };
        match validity {
            Some(flags) => column.with_validity(flags),
            None => column,
        }
    }
}

//==================================================================================
// 2. Accessors
//==================================================================================

impl Column {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn null_count(&self) -> usize {
        self.null_count
    }

    pub fn has_nulls(&self) -> bool {
        self.null_count > 0
    }

    /// Validity of row `i`; rows of a column without a bitmap are always valid.
    pub fn is_valid(&self, i: usize) -> bool {
        bitmap::is_valid(self.validity.as_ref(), i)
    }

    /// Typed view of the first `size` elements of the data buffer.
    ///
    /// # Errors
    /// * `UnsupportedType` if `T` does not have the column's physical width.
    /// * `InvalidColumn` if the column has rows but no (or too small a) buffer.
    pub fn values<T: bytemuck::Pod>(&self) -> Result<&[T], SiftError> {
        if std::mem::size_of::<T>() != self.dtype.byte_width() {
            return Err(SiftError::UnsupportedType(format!(
                "cannot view a {} column as {}",
                self.dtype,
                std::any::type_name::<T>()
            )));
        }
        let Some(data) = &self.data else {
            return if self.size == 0 {
                Ok(&[])
            } else {
                Err(SiftError::InvalidColumn("Null input data"))
            };
        };
        let typed = safe_bytes_to_typed_slice::<T>(data.as_slice())?;
        typed
            .get(..self.size)
            .ok_or(SiftError::InvalidColumn("Data buffer too small"))
    }

    /// Value of row `i`, or `None` if the row is null or out of range.
    pub fn value<T: bytemuck::Pod>(&self, i: usize) -> Option<T> {
        if i >= self.size || !self.is_valid(i) {
            return None;
        }
        self.values::<T>().ok().and_then(|v| v.get(i).copied())
    }

    /// Value of row `i` of a `Boolean` column.
    pub fn bool_value(&self, i: usize) -> Option<bool> {
        self.value::<u8>(i).map(|b| b != 0)
    }

    /// Decoded string of row `i` of a `Category` column.
    pub fn category_value(&self, i: usize) -> Option<&str> {
        let code = self.value::<i32>(i)?;
        let dictionary = self.dictionary.as_ref()?;
        let code = usize::try_from(code).ok()?;
        (code < dictionary.len() && dictionary.is_valid(code)).then(|| dictionary.value(code))
    }

    /// All rows as optional values.
    pub fn to_options<T: bytemuck::Pod>(&self) -> Result<Vec<Option<T>>, SiftError> {
        let values = self.values::<T>()?;
        Ok(values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.is_valid(i).then_some(v))
            .collect())
    }

    /// Raw bytes of row `i`, assuming the buffer has already been validated.
    fn element_bytes(&self, i: usize) -> Option<&[u8]> {
        let width = self.dtype.byte_width();
        self.data
            .as_ref()
            .and_then(|d| d.as_slice().get(i * width..(i + 1) * width))
    }
}

//==================================================================================
// 3. Logical Equality
//==================================================================================

/// Two columns are equal when they hold the same logical rows.
///
/// An absent bitmap equals an all-set bitmap, values behind null rows are
/// ignored, and booleans compare by truthiness rather than by byte. A
/// dictionary only matters once there are rows that can reference it.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        if self.dtype != other.dtype
            || self.size != other.size
            || self.null_count != other.null_count
        {
            return false;
        }
        if self.size > 0 && self.dictionary != other.dictionary {
            return false;
        }
        (0..self.size).all(|i| {
            let valid = self.is_valid(i);
            if valid != other.is_valid(i) {
                return false;
            }
            if !valid {
                return true;
            }
            match (self.element_bytes(i), other.element_bytes(i)) {
                (Some(a), Some(b)) if self.dtype == SiftDataType::Boolean => {
                    (a[0] != 0) == (b[0] != 0)
                }
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        })
    }
}

// In: src/bridge/arrow_impl.rs

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, DictionaryArray, PrimitiveArray, StringArray,
};
use arrow::buffer::{BooleanBuffer, Buffer, ScalarBuffer};
use arrow::datatypes::*;

use crate::column::Column;
use crate::compaction::validation;
use crate::error::SiftError;
use crate::null_handling::bitmap;
use crate::types::SiftDataType;

/// DATA MARSHALLING
/// Wraps an Arrow array in a `Column` descriptor.
///
/// Primitive arrays and dictionary keys are shared with the source array, not
/// copied; only `BooleanArray`, whose values are bit-packed, is expanded into
/// one byte per row. The validity bitmap is taken from the array's null buffer.
///
/// # Errors
/// * `UnsupportedType` for any Arrow type without a `SiftDataType` mapping.
pub fn array_to_column(array: &dyn Array) -> Result<Column, SiftError> {
    let dtype = SiftDataType::from_arrow_type(array.data_type())?;
    let size = array.len();
    let validity = bitmap::from_null_buffer(array.nulls());

    macro_rules! share_values {
        ($T:ty) => {{
            let primitive = array
                .as_primitive_opt::<$T>()
                .ok_or_else(|| downcast_error(array))?;
            primitive.values().inner().clone()
        }};
    }

    let mut dictionary = None;
    let data: Buffer = match dtype {
        SiftDataType::Int8 => share_values!(Int8Type),
        SiftDataType::Int16 => share_values!(Int16Type),
        SiftDataType::Int32 => share_values!(Int32Type),
        SiftDataType::Int64 => share_values!(Int64Type),
        SiftDataType::UInt8 => share_values!(UInt8Type),
        SiftDataType::UInt16 => share_values!(UInt16Type),
        SiftDataType::UInt32 => share_values!(UInt32Type),
        SiftDataType::UInt64 => share_values!(UInt64Type),
        SiftDataType::Float32 => share_values!(Float32Type),
        SiftDataType::Float64 => share_values!(Float64Type),
        SiftDataType::Boolean => {
            let bools = array
                .as_boolean_opt()
                .ok_or_else(|| downcast_error(array))?;
            let bytes: Vec<u8> = bools.values().iter().map(|b| b as u8).collect();
            Buffer::from_vec(bytes)
        }
        SiftDataType::Category => {
            let dict = array
                .as_dictionary_opt::<Int32Type>()
                .ok_or_else(|| downcast_error(array))?;
            let strings = dict
                .values()
                .as_string_opt::<i32>()
                .ok_or_else(|| downcast_error(array))?;
            dictionary = Some(Arc::new(strings.clone()));
            dict.keys().values().inner().clone()
        }
    };

    Ok(Column {
        dtype,
        size,
        null_count: array.null_count(),
        data: (size > 0).then_some(data),
        validity,
        dictionary,
    })
}

/// Builds an Arrow array over a column's buffers.
///
/// The column is validated first, so a malformed descriptor is reported as an
/// error rather than a panic inside Arrow. An all-set validity bitmap is
/// dropped, as Arrow does not keep null buffers without nulls.
pub fn column_to_array(column: &Column) -> Result<ArrayRef, SiftError> {
    validation::validate_column(column)?;
    let size = column.size;
    let nulls = bitmap::to_null_buffer(column.validity.as_ref(), size);

    macro_rules! build_primitive {
        ($T:ty) => {{
            // Checks the buffer's width and alignment for the native type.
            column.values::<<$T as ArrowPrimitiveType>::Native>()?;
            let values = scalar_values::<<$T as ArrowPrimitiveType>::Native>(column);
            Arc::new(PrimitiveArray::<$T>::new(values, nulls)) as ArrayRef
        }};
    }

    let array = match column.dtype {
        SiftDataType::Int8 => build_primitive!(Int8Type),
        SiftDataType::Int16 => build_primitive!(Int16Type),
        SiftDataType::Int32 => build_primitive!(Int32Type),
        SiftDataType::Int64 => build_primitive!(Int64Type),
        SiftDataType::UInt8 => build_primitive!(UInt8Type),
        SiftDataType::UInt16 => build_primitive!(UInt16Type),
        SiftDataType::UInt32 => build_primitive!(UInt32Type),
        SiftDataType::UInt64 => build_primitive!(UInt64Type),
        SiftDataType::Float32 => build_primitive!(Float32Type),
        SiftDataType::Float64 => build_primitive!(Float64Type),
        SiftDataType::Boolean => {
            let bytes = column.values::<u8>()?;
            let values = BooleanBuffer::from_iter(bytes.iter().map(|&b| b != 0));
            Arc::new(BooleanArray::new(values, nulls)) as ArrayRef
        }
        SiftDataType::Category => {
            column.values::<i32>()?;
            let keys = PrimitiveArray::<Int32Type>::new(scalar_values::<i32>(column), nulls);
            let values: ArrayRef = match &column.dictionary {
                Some(dictionary) => Arc::new(dictionary.as_ref().clone()),
                None if size == 0 => Arc::new(StringArray::from(Vec::<&str>::new())),
                None => {
                    return Err(SiftError::InvalidColumn(
                        "Category column without a dictionary",
                    ))
                }
            };
            Arc::new(DictionaryArray::<Int32Type>::try_new(keys, values)?) as ArrayRef
        }
    };
    Ok(array)
}

/// The first `size` elements of an already validated column's data buffer.
fn scalar_values<T: ArrowNativeType>(column: &Column) -> ScalarBuffer<T> {
    match &column.data {
        Some(data) => ScalarBuffer::new(data.clone(), 0, column.size),
        None => ScalarBuffer::from(Vec::<T>::new()),
    }
}

fn downcast_error(array: &dyn Array) -> SiftError {
    SiftError::InternalError(format!(
        "array reporting type {} could not be downcast",
        array.data_type()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float32Array, Int32Array, StringArray, UInt16Array};

    #[test]
    fn test_array_to_column_shares_primitive_values() {
        let array = Int32Array::from(vec![Some(10), None, Some(30)]);
        let column = array_to_column(&array).unwrap();

        assert_eq!(column.dtype, SiftDataType::Int32);
        assert_eq!(column.len(), 3);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.to_options::<i32>().unwrap(), vec![Some(10), None, Some(30)]);
        assert_eq!(
            column.data.as_ref().unwrap().as_ptr(),
            array.values().inner().as_ptr()
        );
    }

    #[test]
    fn test_array_to_column_expands_booleans() {
        let array = BooleanArray::from(vec![Some(true), Some(false), None]);
        let column = array_to_column(&array).unwrap();
        assert_eq!(column.dtype, SiftDataType::Boolean);
        assert_eq!(column.values::<u8>().unwrap(), &[1, 0, 0]);
        assert_eq!(column.bool_value(0), Some(true));
        assert_eq!(column.bool_value(2), None);
    }

    #[test]
    fn test_array_to_column_respects_slice_offset() {
        let array = UInt16Array::from(vec![1, 2, 3, 4, 5]);
        let sliced = array.slice(2, 2);
        let column = array_to_column(&sliced).unwrap();
        assert_eq!(column.values::<u16>().unwrap(), &[3, 4]);
    }

    #[test]
    fn test_array_to_column_rejects_strings() {
        let array = StringArray::from(vec!["a"]);
        assert!(matches!(
            array_to_column(&array),
            Err(SiftError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_column_to_array_drops_all_set_bitmap() {
        let column = Column::from_values(vec![1.5f32, 2.5], Some(vec![true, true]));
        let array = column_to_array(&column).unwrap();
        assert!(array.nulls().is_none());
        assert_eq!(
            array.as_primitive::<Float32Type>(),
            &Float32Array::from(vec![1.5, 2.5])
        );
    }

    #[test]
    fn test_category_round_trip_keeps_dictionary() {
        let keys = Int32Array::from(vec![Some(1), None, Some(0)]);
        let values = Arc::new(StringArray::from(vec!["low", "high"]));
        let array = DictionaryArray::<Int32Type>::try_new(keys, values).unwrap();

        let column = array_to_column(&array).unwrap();
        assert_eq!(column.dtype, SiftDataType::Category);
        assert_eq!(column.category_value(0), Some("high"));
        assert_eq!(column.category_value(1), None);

        let rebuilt = column_to_array(&column).unwrap();
        let dict = rebuilt.as_dictionary::<Int32Type>();
        assert_eq!(dict.keys(), array.keys());
        assert_eq!(dict.values().as_string::<i32>(), array.values().as_string::<i32>());
    }

    #[test]
    fn test_column_to_array_rejects_malformed_column() {
        let mut column = Column::from_values(vec![1i64, 2], None);
        column.data = None;
        let err = column_to_array(&column).unwrap_err();
        assert_eq!(err.to_string(), "Null input data");
    }

    #[test]
    fn test_empty_column_to_array() {
        let array = column_to_array(&Column::empty(SiftDataType::Category)).unwrap();
        assert_eq!(array.len(), 0);
        assert_eq!(array.data_type(), &SiftDataType::Category.to_arrow_type());
    }
}

use super::*;
use crate::error::SiftError;
use arrow::array::{
    Array, AsArray, BooleanArray, DictionaryArray, Float64Array, Int32Array, Int64Array,
    StringArray, UInt8Array,
};
use arrow::datatypes::{Float64Type, Int32Type, Int64Type, UInt8Type};
use std::sync::Arc;

fn every_other(len: usize) -> BooleanArray {
    BooleanArray::from((0..len).map(|i| i % 2 == 0).collect::<Vec<bool>>())
}

#[test]
fn test_mask_primitive_arrays_of_several_widths() {
    let bytes = UInt8Array::from(vec![1, 2, 3, 4, 5]);
    let out = apply_boolean_mask_arrow(&bytes, &every_other(5)).unwrap();
    assert_eq!(out.as_primitive::<UInt8Type>(), &UInt8Array::from(vec![1, 3, 5]));

    let wide = Int64Array::from(vec![Some(-1), None, Some(i64::MAX), Some(7)]);
    let out = apply_boolean_mask_arrow(&wide, &every_other(4)).unwrap();
    assert_eq!(
        out.as_primitive::<Int64Type>(),
        &Int64Array::from(vec![Some(-1), Some(i64::MAX)])
    );
}

#[test]
fn test_mask_keeps_nulls_of_source() {
    let array = Float64Array::from(vec![Some(0.5), None, Some(2.5), None]);
    let mask = BooleanArray::from(vec![true, true, false, true]);
    let out = apply_boolean_mask_arrow(&array, &mask).unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out.null_count(), 2);
    assert_eq!(
        out.as_primitive::<Float64Type>(),
        &Float64Array::from(vec![Some(0.5), None, None])
    );
}

#[test]
fn test_null_mask_entries_drop_rows() {
    let array = Int32Array::from(vec![1, 2, 3, 4]);
    let mask = BooleanArray::from(vec![Some(true), None, Some(true), None]);
    let out = apply_boolean_mask_arrow(&array, &mask).unwrap();
    assert_eq!(out.as_primitive::<Int32Type>(), &Int32Array::from(vec![1, 3]));
    assert!(out.nulls().is_none());
}

#[test]
fn test_mask_boolean_array() {
    let array = BooleanArray::from(vec![Some(true), Some(false), None, Some(true)]);
    let mask = BooleanArray::from(vec![false, true, true, true]);
    let out = apply_boolean_mask_arrow(&array, &mask).unwrap();
    assert_eq!(
        out.as_boolean(),
        &BooleanArray::from(vec![Some(false), None, Some(true)])
    );
}

#[test]
fn test_mask_dictionary_array() {
    let keys = Int32Array::from(vec![Some(0), Some(2), None, Some(1), Some(2)]);
    let values = Arc::new(StringArray::from(vec!["cat", "dog", "owl"]));
    let array = DictionaryArray::<Int32Type>::try_new(keys, values).unwrap();

    let out = apply_boolean_mask_arrow(&array, &every_other(5)).unwrap();
    let dict = out.as_dictionary::<Int32Type>();

    assert_eq!(dict.keys(), &Int32Array::from(vec![Some(0), None, Some(2)]));
    assert_eq!(
        dict.values().as_string::<i32>(),
        &StringArray::from(vec!["cat", "dog", "owl"])
    );
}

#[test]
fn test_drop_nulls_on_sliced_array() {
    let array = Int32Array::from(vec![Some(1), None, Some(3), None, Some(5), Some(6)]);
    let sliced = array.slice(1, 4);
    let out = drop_nulls_arrow(&sliced).unwrap();
    assert_eq!(out.as_primitive::<Int32Type>(), &Int32Array::from(vec![3, 5]));
    assert!(out.nulls().is_none());
}

#[test]
fn test_drop_nulls_on_all_null_array() {
    let array = Int32Array::from(vec![None, None, None]);
    let out = drop_nulls_arrow(&array).unwrap();
    assert_eq!(out.len(), 0);
    assert_eq!(out.data_type(), array.data_type());
}

#[test]
fn test_empty_arrays() {
    let array = Float64Array::from(Vec::<f64>::new());
    let mask = BooleanArray::from(Vec::<bool>::new());
    assert_eq!(apply_boolean_mask_arrow(&array, &mask).unwrap().len(), 0);
    assert_eq!(drop_nulls_arrow(&array).unwrap().len(), 0);
}

#[test]
fn test_bridge_errors() {
    let array = Int32Array::from(vec![1, 2, 3]);

    let err = apply_boolean_mask_arrow(&array, &every_other(2)).unwrap_err();
    assert!(matches!(err, SiftError::SizeMismatch));

    let err = apply_boolean_mask_arrow(&array, &Int32Array::from(vec![1, 0, 1])).unwrap_err();
    assert_eq!(err.to_string(), "Mask must be Boolean type");

    let strings = StringArray::from(vec!["a", "b", "c"]);
    let err = drop_nulls_arrow(&strings).unwrap_err();
    assert!(matches!(err, SiftError::UnsupportedType(_)));
}

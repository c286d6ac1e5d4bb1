//! The type dispatcher: one generic gather, instantiated per physical type.
//!
//! `SiftDataType` is a closed enum, so dispatch is a single `match` with one
//! arm per variant, resolved once per call rather than once per row. Booleans
//! compact as `u8` and categories compact their `i32` codes; the category
//! dictionary is carried by the caller and never reaches this module.
//! Supporting a new fixed-width type means adding its variant and one arm here.

use arrow::buffer::Buffer;

use crate::column::Column;
use crate::error::SiftError;
use crate::kernels::gather;
use crate::kernels::scan::DestinationIndexMap;
use crate::types::SiftDataType;

/// Gathers the surviving elements of `source` into a freshly allocated buffer.
///
/// Returns `None` when nothing survives, so empty outputs carry no data buffer.
pub fn gather_column_data(
    source: &Column,
    map: &DestinationIndexMap,
    parallel: bool,
) -> Result<Option<Buffer>, SiftError> {
    if map.survivor_count == 0 {
        return Ok(None);
    }

    macro_rules! gather_as {
        ($T:ty) => {{
            let values = source.values::<$T>()?;
            Buffer::from_vec(gather::gather_values::<$T>(values, map, parallel)?)
        }};
    }

    let buffer = match source.dtype {
        SiftDataType::Int8 => gather_as!(i8),
        SiftDataType::Int16 => gather_as!(i16),
        SiftDataType::Int32 => gather_as!(i32),
        SiftDataType::Int64 => gather_as!(i64),
        SiftDataType::UInt8 => gather_as!(u8),
        SiftDataType::UInt16 => gather_as!(u16),
        SiftDataType::UInt32 => gather_as!(u32),
        SiftDataType::UInt64 => gather_as!(u64),
        SiftDataType::Float32 => gather_as!(f32),
        SiftDataType::Float64 => gather_as!(f64),
        SiftDataType::Boolean => gather_as!(u8),
        SiftDataType::Category => gather_as!(i32),
    };
    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompactionConfig;
    use crate::kernels::predicate::SurvivorMap;
    use crate::kernels::scan::scan_survivors;
    use arrow::array::StringArray;
    use std::sync::Arc;

    fn map_for(flags: &[bool]) -> DestinationIndexMap {
        let survivors: SurvivorMap = flags.iter().copied().collect();
        scan_survivors(&survivors, &CompactionConfig::default(), false).unwrap()
    }

    #[test]
    fn test_dispatch_respects_element_width() {
        let map = map_for(&[true, false, true]);

        let narrow = Column::from_values(vec![1i8, 2, 3], None);
        let buffer = gather_column_data(&narrow, &map, false).unwrap().unwrap();
        assert_eq!(buffer.as_slice(), &[1u8, 3]);

        let wide = Column::from_values(vec![1.0f64, 2.0, 3.0], None);
        let buffer = gather_column_data(&wide, &map, false).unwrap().unwrap();
        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.typed_data::<f64>(), &[1.0, 3.0]);
    }

    #[test]
    fn test_dispatch_category_gathers_codes_only() {
        let dictionary = Arc::new(StringArray::from(vec!["a", "b", "c"]));
        let column = Column::category(vec![2, 0, 1], None, dictionary);
        let map = map_for(&[false, true, true]);
        let buffer = gather_column_data(&column, &map, false).unwrap().unwrap();
        assert_eq!(buffer.typed_data::<i32>(), &[0, 1]);
    }

    #[test]
    fn test_dispatch_no_survivors_yields_no_buffer() {
        let column = Column::from_bools(vec![true, true], None);
        let map = map_for(&[false, false]);
        assert!(gather_column_data(&column, &map, true).unwrap().is_none());
    }
}

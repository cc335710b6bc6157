//! Helpers for converting Arrow integer arrays into cluster labels.
use arrow_array::{Array, Int32Array, Int64Array, UInt32Array, UInt64Array};
use arrow_schema::{DataType, Field};

use crate::errors::ParquetClusteringsError;

pub(crate) fn validate_label_field(
    field: &Field,
    column: &str,
) -> Result<(), ParquetClusteringsError> {
    match field.data_type() {
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => Ok(()),
        other => Err(ParquetClusteringsError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

/// Appends the labels held by `array` to `out`.
///
/// `start_row` offsets reported row numbers so errors point at the row
/// across all batches rather than within this one.
pub(crate) fn append_labels(
    column: &str,
    array: &dyn Array,
    start_row: usize,
    out: &mut Vec<u64>,
) -> Result<(), ParquetClusteringsError> {
    if let Some(row) = first_null(array) {
        return Err(ParquetClusteringsError::NullValue {
            column: column.to_owned(),
            row: start_row + row,
        });
    }
    out.reserve(array.len());
    match array.data_type() {
        DataType::Int32 => {
            let values = downcast::<Int32Array>(column, array)?.values();
            extend_signed(column, values.iter().map(|&value| i64::from(value)), start_row, out)
        }
        DataType::Int64 => {
            let values = downcast::<Int64Array>(column, array)?.values();
            extend_signed(column, values.iter().copied(), start_row, out)
        }
        DataType::UInt32 => {
            let values = downcast::<UInt32Array>(column, array)?.values();
            out.extend(values.iter().map(|&value| u64::from(value)));
            Ok(())
        }
        DataType::UInt64 => {
            let values = downcast::<UInt64Array>(column, array)?.values();
            out.extend_from_slice(values);
            Ok(())
        }
        other => Err(ParquetClusteringsError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

fn first_null(array: &dyn Array) -> Option<usize> {
    if array.null_count() == 0 {
        return None;
    }
    (0..array.len()).find(|&index| array.is_null(index))
}

fn downcast<'a, T>(column: &str, array: &'a dyn Array) -> Result<&'a T, ParquetClusteringsError>
where
    T: Array + 'static,
{
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ParquetClusteringsError::InvalidColumnType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}

fn extend_signed(
    column: &str,
    values: impl Iterator<Item = i64>,
    start_row: usize,
    out: &mut Vec<u64>,
) -> Result<(), ParquetClusteringsError> {
    for (offset, value) in values.enumerate() {
        let label =
            u64::try_from(value).map_err(|_| ParquetClusteringsError::NegativeLabel {
                column: column.to_owned(),
                row: start_row + offset,
                value,
            })?;
        out.push(label);
    }
    Ok(())
}

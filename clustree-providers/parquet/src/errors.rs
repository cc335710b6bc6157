use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

/// Errors raised while reading label columns.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParquetClusteringsError {
    /// No label columns were requested.
    #[error("at least one label column is required")]
    NoColumns,
    /// A requested column is absent from the schema.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
    },
    /// A requested column does not hold integers.
    #[error("column `{column}` must be Int32, Int64, UInt32 or UInt64 but found {actual:?}")]
    InvalidColumnType {
        /// Requested column name.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// A row has no label.
    #[error("column `{column}` is null at row {row}")]
    NullValue {
        /// Column holding the null.
        column: String,
        /// Zero-based row across all batches.
        row: usize,
    },
    /// A signed column holds a negative label.
    #[error("column `{column}` has negative label {value} at row {row}")]
    NegativeLabel {
        /// Column holding the label.
        column: String,
        /// Zero-based row across all batches.
        row: usize,
        /// Offending value.
        value: i64,
    },
    /// Arrow decoding failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet decoding failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

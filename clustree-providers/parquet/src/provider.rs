//! Clustering provider backed by Parquet label columns.
use std::{fs::File, path::Path};

use arrow_array::RecordBatch;
use arrow_schema::ArrowError;
use clustree_core::Clustering;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;

use crate::errors::ParquetClusteringsError;
use crate::ingest::{append_labels, validate_label_field};

/// Clusterings read from named integer columns, one layer per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParquetClusterings {
    name: String,
    columns: Vec<String>,
    clusterings: Vec<Clustering>,
}

impl ParquetClusterings {
    /// Loads `columns` from the Parquet file at `path`.
    ///
    /// # Errors
    /// Returns [`ParquetClusteringsError::Io`] when the file cannot be opened
    /// and any error [`Self::try_from_parquet_reader`] reports.
    pub fn try_from_parquet_path<S>(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        columns: &[S],
    ) -> Result<Self, ParquetClusteringsError>
    where
        S: AsRef<str>,
    {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, columns)
    }

    /// Loads `columns` from a Parquet reader.
    ///
    /// # Errors
    /// Returns [`ParquetClusteringsError::NoColumns`] when `columns` is
    /// empty, [`ParquetClusteringsError::ColumnNotFound`] or
    /// [`ParquetClusteringsError::InvalidColumnType`] when the schema does
    /// not hold an integer column of that name, and the null or negative
    /// label errors when a row has no usable label.
    pub fn try_from_parquet_reader<R, S>(
        name: impl Into<String>,
        reader: R,
        columns: &[S],
    ) -> Result<Self, ParquetClusteringsError>
    where
        R: ChunkReader + Send + 'static,
        S: AsRef<str>,
    {
        let columns = column_names(columns)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        for column in &columns {
            let field = builder.schema().field_with_name(column).map_err(|_| {
                ParquetClusteringsError::ColumnNotFound {
                    column: column.clone(),
                }
            })?;
            validate_label_field(field, column)?;
        }
        let mask = ProjectionMask::columns(
            builder.parquet_schema(),
            columns.iter().map(String::as_str),
        );
        let batches = builder.with_projection(mask).build()?;
        Self::ingest(name.into(), columns, batches)
    }

    /// Loads `columns` from in-memory record batches.
    ///
    /// # Errors
    /// Reports the same column and label errors as
    /// [`Self::try_from_parquet_reader`].
    pub fn try_from_record_batches<S>(
        name: impl Into<String>,
        columns: &[S],
        batches: impl IntoIterator<Item = RecordBatch>,
    ) -> Result<Self, ParquetClusteringsError>
    where
        S: AsRef<str>,
    {
        let columns = column_names(columns)?;
        Self::ingest(
            name.into(),
            columns,
            batches.into_iter().map(Ok::<_, ArrowError>),
        )
    }

    /// Name given at load time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in layer order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// One clustering per column.
    #[must_use]
    pub fn clusterings(&self) -> &[Clustering] {
        &self.clusterings
    }

    /// Consumes the provider and returns its clusterings.
    #[must_use]
    pub fn into_clusterings(self) -> Vec<Clustering> {
        self.clusterings
    }

    fn ingest<I>(
        name: String,
        columns: Vec<String>,
        batches: I,
    ) -> Result<Self, ParquetClusteringsError>
    where
        I: IntoIterator<Item = Result<RecordBatch, ArrowError>>,
    {
        let mut labels: Vec<Vec<u64>> = vec![Vec::new(); columns.len()];
        let mut rows = 0_usize;
        for batch in batches {
            let batch = batch?;
            let schema = batch.schema();
            for (column, out) in columns.iter().zip(labels.iter_mut()) {
                let index = schema.index_of(column).map_err(|_| {
                    ParquetClusteringsError::ColumnNotFound {
                        column: column.clone(),
                    }
                })?;
                validate_label_field(schema.field(index), column)?;
                append_labels(column, batch.column(index).as_ref(), rows, out)?;
            }
            rows += batch.num_rows();
        }
        let clusterings = labels.into_iter().map(Clustering::from).collect();
        Ok(Self {
            name,
            columns,
            clusterings,
        })
    }
}

fn column_names<S: AsRef<str>>(columns: &[S]) -> Result<Vec<String>, ParquetClusteringsError> {
    if columns.is_empty() {
        return Err(ParquetClusteringsError::NoColumns);
    }
    Ok(columns
        .iter()
        .map(|column| column.as_ref().to_owned())
        .collect())
}

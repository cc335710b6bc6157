use super::{ParquetClusterings, ParquetClusteringsError, support::*};
use arrow_array::{ArrayRef, Float64Array, Int32Array, Int64Array, UInt32Array, UInt64Array};
use clustree_core::{ClusterId, Clustering};
use rstest::rstest;
use std::sync::Arc;

fn ids(clustering: &Clustering) -> Vec<u64> {
    clustering.labels().iter().map(|id| id.get()).collect()
}

#[rstest]
fn reads_columns_in_requested_order() {
    let bytes = write_parquet(&[batch(vec![
        ("coarse", Arc::new(Int32Array::from(vec![0, 0, 1, 1, 1])) as ArrayRef),
        ("fine", Arc::new(UInt64Array::from(vec![0, 1, 2, 2, 3])) as ArrayRef),
    ])]);
    let provider =
        ParquetClusterings::try_from_parquet_reader("demo", bytes, &["fine", "coarse"])
            .expect("parquet load");
    assert_eq!(provider.name(), "demo");
    assert_eq!(provider.columns().to_vec(), vec!["fine".to_owned(), "coarse".to_owned()]);
    let clusterings = provider.into_clusterings();
    assert_eq!(ids(&clusterings[0]), vec![0, 1, 2, 2, 3]);
    assert_eq!(ids(&clusterings[1]), vec![0, 0, 1, 1, 1]);
}

#[rstest]
fn concatenates_row_groups() {
    let bytes = write_parquet(&[
        batch(vec![("k", Arc::new(Int64Array::from(vec![0, 1, 1])) as ArrayRef)]),
        batch(vec![("k", Arc::new(Int64Array::from(vec![2, 0])) as ArrayRef)]),
    ]);
    let provider = ParquetClusterings::try_from_parquet_reader("demo", bytes, &["k"])
        .expect("parquet load");
    assert_eq!(ids(&provider.clusterings()[0]), vec![0, 1, 1, 2, 0]);
    assert_eq!(provider.clusterings()[0].size_of(ClusterId::new(1)), 2);
}

#[rstest]
fn record_batches_report_rows_across_batches() {
    let first = batch(vec![("k", Arc::new(Int32Array::from(vec![0, 1])) as ArrayRef)]);
    let second = batch(vec![("k", Arc::new(Int32Array::from(vec![1, -4])) as ArrayRef)]);
    let err = ParquetClusterings::try_from_record_batches("demo", &["k"], vec![first, second])
        .expect_err("negative label must fail");
    assert!(matches!(
        err,
        ParquetClusteringsError::NegativeLabel { column, row: 3, value: -4 } if column == "k"
    ));
}

#[rstest]
fn rejects_missing_column() {
    let bytes = write_parquet(&[batch(vec![(
        "k",
        Arc::new(UInt32Array::from(vec![0, 1])) as ArrayRef,
    )])]);
    let err = ParquetClusterings::try_from_parquet_reader("demo", bytes, &["k", "unknown"])
        .expect_err("missing column");
    assert!(matches!(
        err,
        ParquetClusteringsError::ColumnNotFound { column } if column == "unknown"
    ));
}

#[rstest]
fn rejects_float_columns() {
    let bytes = write_parquet(&[batch(vec![(
        "k",
        Arc::new(Float64Array::from(vec![0.0, 1.0])) as ArrayRef,
    )])]);
    let err = ParquetClusterings::try_from_parquet_reader("demo", bytes, &["k"])
        .expect_err("float column must fail");
    assert!(matches!(
        err,
        ParquetClusteringsError::InvalidColumnType { column, .. } if column == "k"
    ));
}

#[rstest]
fn rejects_nulls() {
    let bytes = write_parquet(&[batch(vec![(
        "k",
        Arc::new(Int64Array::from(vec![Some(0), None, Some(1)])) as ArrayRef,
    )])]);
    let err = ParquetClusterings::try_from_parquet_reader("demo", bytes, &["k"])
        .expect_err("null label must fail");
    assert!(matches!(
        err,
        ParquetClusteringsError::NullValue { column, row: 1 } if column == "k"
    ));
}

#[rstest]
fn rejects_empty_column_list() {
    let columns: [&str; 0] = [];
    let err = ParquetClusterings::try_from_record_batches("demo", &columns, Vec::new())
        .expect_err("no columns must fail");
    assert!(matches!(err, ParquetClusteringsError::NoColumns));
}

#[rstest]
fn missing_file_reports_io_error() {
    let err = ParquetClusterings::try_from_parquet_path(
        "demo",
        "/nonexistent/clustree/labels.parquet",
        &["k"],
    )
    .expect_err("missing file must fail");
    assert!(matches!(err, ParquetClusteringsError::Io(_)));
}

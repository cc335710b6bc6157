//! Input builders shared by the CLI unit tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{ArrayRef, Int64Array, RecordBatch, UInt32Array};
use arrow_schema::{Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use super::{DrawCommand, DrawSource, TextArgs};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Writes `coarse` (Int64) and `fine` (UInt32) label columns.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let coarse: ArrayRef = Arc::new(Int64Array::from(vec![0, 0, 0, 1, 1, 1]));
    let fine: ArrayRef = Arc::new(UInt32Array::from(vec![0, 1, 1, 2, 2, 3]));
    let schema = Arc::new(Schema::new(vec![
        Field::new("coarse", coarse.data_type().clone(), false),
        Field::new("fine", fine.data_type().clone(), false),
    ]));
    let batch = RecordBatch::try_new(schema.clone(), vec![coarse, fine])?;
    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

/// A `draw` command over a text file with default canvas and no output.
pub(super) fn text_command(path: &Path) -> DrawCommand {
    DrawCommand {
        output: None,
        show: false,
        first_layer_only: false,
        width: 960,
        height: 720,
        source: DrawSource::Text(TextArgs {
            path: path.to_path_buf(),
            name: None,
        }),
    }
}

//! Command-line interface for drawing cluster trees.
//!
//! The `draw` command loads clusterings from a text file or Parquet label
//! columns, builds the tree, renders it as SVG, and summarises the result.

mod commands;

pub use commands::{
    Cli, CliError, Command, DrawCommand, DrawSource, ExecutionSummary, ParquetArgs, TextArgs,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;

//! Command implementations and argument parsing for the clustree CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use clustree_core::{
    ClusterTreeBuilder, Clustering, DisplayMode, DrawError, LayerAgreement, LayerValidation,
    RenderStyle, SvgSurface,
};
use clustree_providers_parquet::{ParquetClusterings, ParquetClusteringsError};
use clustree_providers_text::{TextClusterings, TextClusteringsError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_HEIGHT: u32 = 720;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "clustree", about = "Draw how clusterings at successive resolutions relate.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a cluster tree and render it as SVG.
    Draw(DrawCommand),
}

/// Options accepted by the `draw` command.
#[derive(Debug, Args, Clone)]
pub struct DrawCommand {
    /// Write the SVG figure to this path.
    #[arg(long, conflicts_with = "show")]
    pub output: Option<PathBuf>,

    /// Open the figure in a viewer and wait for it to close.
    #[arg(long)]
    pub show: bool,

    /// Only require layer 0 to use cluster ids `0..k`.
    #[arg(long = "first-layer-only")]
    pub first_layer_only: bool,

    /// Canvas width in pixels.
    #[arg(
        long,
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub width: u32,

    /// Canvas height in pixels.
    #[arg(
        long,
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub height: u32,

    /// Input clusterings.
    #[command(subcommand)]
    pub source: DrawSource,
}

impl DrawCommand {
    fn display_mode(&self) -> DisplayMode {
        match (&self.output, self.show) {
            (Some(path), _) => DisplayMode::SaveToPath(path.clone()),
            (None, true) => DisplayMode::Interactive,
            (None, false) => DisplayMode::ReturnOnly,
        }
    }

    fn validation(&self) -> LayerValidation {
        if self.first_layer_only {
            LayerValidation::FirstLayerOnly
        } else {
            LayerValidation::AllLayers
        }
    }
}

/// Input formats accepted by `draw`.
#[derive(Debug, Subcommand, Clone)]
pub enum DrawSource {
    /// Read a text file holding one clustering per line.
    Text(TextArgs),
    /// Read integer label columns from a Parquet file, one layer per column.
    Parquet(ParquetArgs),
}

/// Text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// Path to a file with comma- or whitespace-separated labels per line.
    pub path: PathBuf,

    /// Override name for the input (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file holding label columns.
    pub path: PathBuf,

    /// Label column; repeat in layer order.
    #[arg(long = "column", required = true)]
    pub columns: Vec<String>,

    /// Override name for the input (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening an input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Text parsing failed.
    #[error(transparent)]
    Text(#[from] TextClusteringsError),
    /// Parquet ingestion failed.
    #[error(transparent)]
    Parquet(#[from] ParquetClusteringsError),
    /// Building, drawing, or presenting the tree failed.
    #[error(transparent)]
    Draw(#[from] DrawError),
}

impl CliError {
    /// Stable code of the underlying core error, when there is one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Draw(err) => Some(err.code_str()),
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the input.
    pub data_source: String,
    /// Number of layers.
    pub layers: usize,
    /// Number of points per layer.
    pub points: usize,
    /// Number of graph nodes.
    pub nodes: usize,
    /// Number of graph edges.
    pub edges: usize,
    /// Where the figure was written, if anywhere.
    pub figure: Option<PathBuf>,
    /// Agreement between each pair of consecutive layers.
    pub agreement: Vec<LayerAgreement>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, building, or presenting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clustree_cli::cli::{Cli, Command, DrawCommand, DrawSource, TextArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0,1,1\n0,1,1,1\n")?;
/// let cli = Cli {
///     command: Command::Draw(DrawCommand {
///         output: None,
///         show: false,
///         first_layer_only: false,
///         width: 640,
///         height: 480,
///         source: DrawSource::Text(TextArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edges, 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Draw(draw) => {
            Span::current().record("command", field::display("draw"));
            run_draw(draw)
        }
    }
}

#[instrument(
    name = "cli.draw",
    err,
    skip(command),
    fields(source = field::Empty, display = field::Empty, validation = field::Empty),
)]
pub(super) fn run_draw(command: DrawCommand) -> Result<ExecutionSummary, CliError> {
    let display = command.display_mode();
    let validation = command.validation();
    let span = Span::current();
    span.record("display", field::display(&display));
    span.record("validation", field::display(validation));

    let (data_source, clusterings) = match &command.source {
        DrawSource::Text(args) => {
            span.record("source", field::display("text"));
            load_text(args)?
        }
        DrawSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            load_parquet(args)?
        }
    };

    let figure = match &display {
        DisplayMode::SaveToPath(path) => Some(path.clone()),
        DisplayMode::Interactive | DisplayMode::ReturnOnly => None,
    };
    let builder = ClusterTreeBuilder::new()
        .with_validation(validation)
        .with_style(RenderStyle::default().with_canvas(command.width, command.height))
        .with_display(display);
    let mut surface = SvgSurface::from_style(builder.style());
    let tree = builder.draw(&clusterings, &mut surface)?;

    let summary = ExecutionSummary {
        data_source,
        layers: tree.layer_count(),
        points: tree.n_points(),
        nodes: tree.graph().node_count(),
        edges: tree.graph().edge_count(),
        figure,
        agreement: tree.agreement(),
    };
    info!(
        data_source = summary.data_source.as_str(),
        layers = summary.layers,
        nodes = summary.nodes,
        edges = summary.edges,
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.load_text",
    err,
    skip(args),
    fields(path = %args.path.display()),
)]
fn load_text(args: &TextArgs) -> Result<(String, Vec<Clustering>), CliError> {
    let name = derive_data_source_name(&args.path, args.name.as_deref());
    let reader = open_text_reader(&args.path)?;
    let parsed = TextClusterings::try_from_reader(name, reader)?;
    Ok((parsed.name().to_owned(), parsed.into_clusterings()))
}

#[instrument(
    name = "cli.load_parquet",
    err,
    skip(args),
    fields(path = %args.path.display(), columns = args.columns.len()),
)]
fn load_parquet(args: &ParquetArgs) -> Result<(String, Vec<Clustering>), CliError> {
    let name = derive_data_source_name(&args.path, args.name.as_deref());
    let parsed =
        ParquetClusterings::try_from_parquet_path(name, &args.path, args.columns.as_slice())?;
    Ok((parsed.name().to_owned(), parsed.into_clusterings()))
}

pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "clusterings".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clustree_cli::cli::{ExecutionSummary, render_summary};
/// # use clustree_core::LayerAgreement;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     layers: 2,
///     points: 4,
///     nodes: 4,
///     edges: 3,
///     figure: None,
///     agreement: vec![LayerAgreement { from_layer: 0, ari: 0.0, nmi: 0.5 }],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.ends_with("0 -> 1\tari=0.0000\tnmi=0.5000\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "layers: {}", summary.layers)?;
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    if let Some(path) = &summary.figure {
        writeln!(writer, "figure: {}", path.display())?;
    }
    for score in &summary.agreement {
        writeln!(
            writer,
            "{} -> {}\tari={:.4}\tnmi={:.4}",
            score.from_layer,
            score.from_layer + 1,
            score.ari,
            score.nmi
        )?;
    }
    Ok(())
}

//! Unit tests for the CLI commands and input loading.

use super::commands::{derive_data_source_name, open_text_reader, run_draw};
use super::test_helpers::{create_parquet_file, create_text_file, temp_dir, text_command};
use super::{
    Cli, CliError, Command, DrawSource, ExecutionSummary, ParquetArgs, render_summary, run_cli,
};

use std::path::Path;

use clap::Parser;
use clustree_core::{ClustreeError, DrawError, LayerAgreement, NonContiguousClusterIds};
use clustree_providers_parquet::ParquetClusteringsError;
use clustree_providers_text::TextClusteringsError;
use rstest::rstest;

use clustree_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::override_name("/tmp/labels.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/labels.parquet", None, "labels")]
#[case::stem_without_extension("/tmp/labels", None, "labels")]
#[case::missing_stem("", None, "clusterings")]
fn derive_data_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    let name = derive_data_source_name(Path::new(raw_path), override_name);
    assert_eq!(name, expected);
}

#[rstest]
fn draw_text_summarises_tree() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "labels.txt", "0,0,1,1\n0,1,1,1\n")?;
    let summary = run_cli(Cli {
        command: Command::Draw(text_command(&path)),
    })?;
    assert_eq!(summary.data_source, "labels");
    assert_eq!(
        (summary.layers, summary.points, summary.nodes, summary.edges),
        (2, 4, 4, 3)
    );
    assert_eq!(summary.figure, None);
    assert_eq!(summary.agreement.len(), 1);
    assert_eq!(summary.agreement[0].from_layer, 0);
    Ok(())
}

#[rstest]
fn draw_writes_svg_to_output() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "labels.txt", "0 0 1\n0 1 2\n0 0 0\n")?;
    let output = dir.path().join("tree.svg");
    let mut command = text_command(&path);
    command.output = Some(output.clone());
    command.width = 400;
    command.height = 300;

    let summary = run_draw(command)?;
    assert_eq!(summary.figure.as_deref(), Some(output.as_path()));
    let svg = std::fs::read_to_string(&output)?;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"400\" height=\"300\""));
    assert_eq!(svg.matches("<circle").count(), summary.nodes);
    assert_eq!(svg.matches("<polyline").count(), summary.edges);
    Ok(())
}

#[rstest]
fn draw_rejects_sparse_layers_unless_relaxed() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "labels.txt", "0,0,1\n3,3,8\n")?;

    let err = run_draw(text_command(&path)).expect_err("sparse layer 1 must fail");
    assert!(matches!(
        err,
        CliError::Draw(DrawError::Build(ClustreeError::NonContiguousLayer {
            layer: 1,
            reason: NonContiguousClusterIds::MissingZero,
        }))
    ));
    assert_eq!(err.code(), Some("CLUSTREE_NON_CONTIGUOUS_LAYER"));

    let mut relaxed = text_command(&path);
    relaxed.first_layer_only = true;
    let summary = run_draw(relaxed)?;
    assert_eq!(summary.nodes, 4);
    Ok(())
}

#[rstest]
fn draw_reports_length_mismatch_code() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "labels.txt", "0,0,1\n0,1\n")?;
    let err = run_draw(text_command(&path)).expect_err("ragged layers must fail");
    assert_eq!(err.code(), Some("CLUSTREE_LENGTH_MISMATCH"));
    Ok(())
}

#[rstest]
fn draw_rejects_empty_text() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "empty.txt", "# no layers\n")?;
    let err = run_draw(text_command(&path)).expect_err("empty input must fail");
    assert!(matches!(err, CliError::Text(TextClusteringsError::EmptyInput)));
    assert_eq!(err.code(), None);
    Ok(())
}

#[rstest]
fn open_text_reader_reports_path() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.txt");
    let err = open_text_reader(&missing).expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { path, .. } if path == missing));
}

#[rstest]
fn draw_parquet_columns_in_order() -> TestResult {
    let dir = temp_dir();
    let path = create_parquet_file(&dir, "labels.parquet")?;
    let mut command = text_command(&path);
    command.source = DrawSource::Parquet(ParquetArgs {
        path,
        columns: vec!["coarse".into(), "fine".into()],
        name: Some("resolutions".into()),
    });
    let summary = run_draw(command)?;
    assert_eq!(summary.data_source, "resolutions");
    assert_eq!(
        (summary.layers, summary.points, summary.nodes, summary.edges),
        (2, 6, 6, 4)
    );
    Ok(())
}

#[rstest]
fn draw_parquet_rejects_missing_column() -> TestResult {
    let dir = temp_dir();
    let path = create_parquet_file(&dir, "labels.parquet")?;
    let mut command = text_command(&path);
    command.source = DrawSource::Parquet(ParquetArgs {
        path,
        columns: vec!["unknown".into()],
        name: None,
    });
    let err = run_draw(command).expect_err("unknown column must fail");
    assert!(matches!(
        err,
        CliError::Parquet(ParquetClusteringsError::ColumnNotFound { .. })
    ));
    Ok(())
}

#[rstest]
fn draw_records_span_fields() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "labels.txt", "0,1\n0,0\n")?;
    let mut command = text_command(&path);
    command.first_layer_only = true;

    let (result, layer) = RecordingLayer::capture(|| run_draw(command));
    result?;

    let draw = layer.span("cli.draw").expect("cli.draw span must exist");
    assert_eq!(draw.fields.get("source"), Some(&"text".to_owned()));
    assert_eq!(draw.fields.get("display"), Some(&"return-only".to_owned()));
    assert_eq!(
        draw.fields.get("validation"),
        Some(&"first-layer-only".to_owned())
    );
    let load = layer
        .span("cli.load_text")
        .expect("cli.load_text span must exist");
    assert!(
        load.fields
            .get("path")
            .is_some_and(|value| value.ends_with("labels.txt"))
    );
    assert!(layer.span("core.draw").is_some());
    Ok(())
}

#[rstest]
fn render_summary_lists_counts_and_scores() -> TestResult {
    let summary = ExecutionSummary {
        data_source: "demo".into(),
        layers: 3,
        points: 10,
        nodes: 7,
        edges: 9,
        figure: Some("out/tree.svg".into()),
        agreement: vec![
            LayerAgreement {
                from_layer: 0,
                ari: 1.0,
                nmi: 1.0,
            },
            LayerAgreement {
                from_layer: 1,
                ari: -0.125,
                nmi: 0.25,
            },
        ],
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "data source: demo\nlayers: 3\npoints: 10\nnodes: 7\nedges: 9\n\
         figure: out/tree.svg\n\
         0 -> 1\tari=1.0000\tnmi=1.0000\n\
         1 -> 2\tari=-0.1250\tnmi=0.2500\n"
    );
    Ok(())
}

#[rstest]
fn clap_parses_full_draw_invocation() {
    let cli = Cli::try_parse_from([
        "clustree",
        "draw",
        "--output",
        "tree.svg",
        "--first-layer-only",
        "--width",
        "640",
        "parquet",
        "labels.parquet",
        "--column",
        "k2",
        "--column",
        "k3",
    ])
    .expect("arguments must parse");
    let Command::Draw(draw) = cli.command;
    assert_eq!(draw.output.as_deref(), Some(Path::new("tree.svg")));
    assert!(draw.first_layer_only);
    assert_eq!((draw.width, draw.height), (640, 720));
    assert!(matches!(
        draw.source,
        DrawSource::Parquet(ParquetArgs { ref columns, .. }) if columns == &["k2", "k3"]
    ));
}

#[rstest]
#[case::output_and_show(&["clustree", "draw", "--output", "a.svg", "--show", "text", "l.txt"])]
#[case::zero_width(&["clustree", "draw", "--width", "0", "text", "l.txt"])]
#[case::parquet_without_column(&["clustree", "draw", "parquet", "l.parquet"])]
#[case::missing_source(&["clustree", "draw"])]
fn clap_rejects_invalid_invocations(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

//! Presentation of rendered figures.
//!
//! A figure can stay on its surface ([`DisplayMode::ReturnOnly`]), be written
//! to a file ([`DisplayMode::SaveToPath`]), or be opened in an external
//! viewer that the caller blocks on ([`DisplayMode::Interactive`]).

use std::{
    env, fmt, fs,
    io::Write as _,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::info;

use crate::error::DisplayError;

/// Environment variable overriding the interactive viewer command.
///
/// The value is split on whitespace; the first word is the program and the
/// rest are leading arguments. The figure path is appended last.
pub const VIEWER_ENV: &str = "CLUSTREE_VIEWER";

/// What happens to a figure once it has been drawn.
///
/// # Examples
/// ```
/// use clustree_core::DisplayMode;
///
/// assert_eq!(DisplayMode::default(), DisplayMode::ReturnOnly);
/// assert_eq!(DisplayMode::SaveToPath("tree.svg".into()).to_string(), "save-to-path");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Write the figure to a temporary file and block until a viewer exits.
    ///
    /// Blocking lasts as long as the launched command does. On Linux the
    /// default launcher is `xdg-open`, which hands the file to the desktop's
    /// viewer and returns at once; set [`VIEWER_ENV`] to a program that stays
    /// in the foreground, such as `inkview`, to wait for the window to close.
    Interactive,
    /// Leave the figure on the surface.
    #[default]
    ReturnOnly,
    /// Write the figure to the given path.
    SaveToPath(PathBuf),
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interactive => "interactive",
            Self::ReturnOnly => "return-only",
            Self::SaveToPath(_) => "save-to-path",
        })
    }
}

/// Presents `document` according to `mode`.
///
/// `extension` names the document format, without a leading dot, and is used
/// for the temporary file handed to the viewer.
///
/// # Errors
/// Returns [`DisplayError`] when writing the document fails, or when the
/// viewer cannot be started or exits unsuccessfully.
pub fn present(document: &str, extension: &str, mode: &DisplayMode) -> Result<(), DisplayError> {
    match mode {
        DisplayMode::ReturnOnly => Ok(()),
        DisplayMode::SaveToPath(path) => save(document, path),
        DisplayMode::Interactive => show(document, extension),
    }
}

fn save(document: &str, path: &Path) -> Result<(), DisplayError> {
    fs::write(path, document).map_err(|source| DisplayError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = document.len(), "figure saved");
    Ok(())
}

fn show(document: &str, extension: &str) -> Result<(), DisplayError> {
    let viewer = ViewerCommand::from_env()?;
    let suffix = format!(".{extension}");
    let mut file = tempfile::Builder::new()
        .prefix("clustree-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|source| DisplayError::TempFile { source })?;
    file.write_all(document.as_bytes())
        .map_err(|source| DisplayError::TempFile { source })?;
    // Persisted: launchers such as xdg-open return before the viewer reads it.
    let (_, path) = file
        .keep()
        .map_err(|err| DisplayError::TempFile { source: err.error })?;
    info!(path = %path.display(), viewer = %viewer.program, "showing figure");
    viewer.run(&path)
}

/// Program and leading arguments used to open a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewerCommand {
    program: String,
    args: Vec<String>,
}

impl ViewerCommand {
    fn from_env() -> Result<Self, DisplayError> {
        match env::var(VIEWER_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::platform_default()),
        }
    }

    fn parse(raw: &str) -> Result<Self, DisplayError> {
        let mut words = raw.split_whitespace().map(ToOwned::to_owned);
        let program = words.next().ok_or(DisplayError::EmptyViewerCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    fn platform_default() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &["-W"])
        } else if cfg!(windows) {
            ("cmd", &["/C", "start", "/WAIT", ""])
        } else {
            ("xdg-open", &[])
        };
        Self {
            program: program.to_owned(),
            args: args.iter().map(|&arg| arg.to_owned()).collect(),
        }
    }

    fn run(&self, path: &Path) -> Result<(), DisplayError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| DisplayError::ViewerLaunch {
                command: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(DisplayError::ViewerFailed {
                command: self.program.clone(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("feh", "feh", &[])]
    #[case("  inkview --fullscreen ", "inkview", &["--fullscreen"])]
    fn viewer_command_parses_program_and_args(
        #[case] raw: &str,
        #[case] program: &str,
        #[case] args: &[&str],
    ) {
        let viewer = ViewerCommand::parse(raw).expect("command must parse");
        assert_eq!(viewer.program, program);
        assert_eq!(viewer.args, args);
    }

    #[test]
    fn viewer_command_rejects_blank_override() {
        let err = ViewerCommand::parse("   ").expect_err("blank command must fail");
        assert!(matches!(err, DisplayError::EmptyViewerCommand));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_default_viewer_is_xdg_open() {
        let viewer = ViewerCommand::platform_default();
        assert_eq!(viewer.program, "xdg-open");
        assert!(viewer.args.is_empty());
    }

    #[test]
    fn return_only_writes_nothing() {
        present("<svg/>", "svg", &DisplayMode::ReturnOnly).expect("return-only never fails");
    }

    #[test]
    fn save_to_path_writes_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tree.svg");
        present("<svg/>", "svg", &DisplayMode::SaveToPath(path.clone())).expect("save must work");
        let written = fs::read_to_string(&path).expect("figure must exist");
        assert_eq!(written, "<svg/>");
    }

    #[test]
    fn save_to_missing_directory_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("tree.svg");
        let err = present("<svg/>", "svg", &DisplayMode::SaveToPath(path.clone()))
            .expect_err("missing parent directory must fail");
        match err {
            DisplayError::Write { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn viewer_exit_status_is_reported() {
        let viewer = ViewerCommand::parse("false").expect("command must parse");
        let err = viewer
            .run(Path::new("/nonexistent.svg"))
            .expect_err("`false` exits unsuccessfully");
        assert!(matches!(err, DisplayError::ViewerFailed { .. }));
    }

    #[test]
    fn missing_viewer_is_reported() {
        let viewer = ViewerCommand::parse("clustree-no-such-viewer-binary").expect("parse");
        let err = viewer
            .run(Path::new("tree.svg"))
            .expect_err("missing binary must fail to launch");
        assert!(matches!(err, DisplayError::ViewerLaunch { .. }));
    }
}

//! Text provider reading one clustering per line.
//!
//! Labels on a line are separated by commas, whitespace, or both. Blank lines
//! and lines starting with `#` are skipped.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use clustree_core::Clustering;
use thiserror::Error;

/// Errors raised while parsing label lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextClusteringsError {
    /// The input held no label lines.
    #[error("input contains no clusterings")]
    EmptyInput,
    /// A token is not a non-negative integer.
    #[error("line {line}: `{token}` is not a non-negative integer label")]
    InvalidLabel {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clusterings parsed from text, one layer per non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextClusterings {
    name: String,
    clusterings: Vec<Clustering>,
}

impl TextClusterings {
    /// Parses clusterings from `reader`.
    ///
    /// Lines are not required to agree in length; the tree builder reports
    /// mismatches.
    ///
    /// # Errors
    /// Returns [`TextClusteringsError::EmptyInput`] when no label lines are
    /// present, [`TextClusteringsError::InvalidLabel`] for a malformed token,
    /// and [`TextClusteringsError::Io`] when reading fails.
    ///
    /// # Examples
    /// ```
    /// use clustree_providers_text::TextClusterings;
    ///
    /// let input = "# coarse then fine\n0,0,1,1\n0 1 2 2\n";
    /// let parsed = TextClusterings::try_from_reader("demo", input.as_bytes())?;
    /// assert_eq!(parsed.clusterings().len(), 2);
    /// assert_eq!(parsed.clusterings()[1].cluster_count(), 3);
    /// # Ok::<(), clustree_providers_text::TextClusteringsError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextClusteringsError> {
        let mut clusterings = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            clusterings.push(parse_line(index + 1, trimmed)?);
        }
        if clusterings.is_empty() {
            return Err(TextClusteringsError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            clusterings,
        })
    }

    /// Parses clusterings from the file at `path`.
    ///
    /// # Errors
    /// Returns [`TextClusteringsError::Io`] when the file cannot be opened
    /// and any error [`Self::try_from_reader`] reports.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextClusteringsError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Name given at load time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed clusterings in line order.
    #[must_use]
    pub fn clusterings(&self) -> &[Clustering] {
        &self.clusterings
    }

    /// Consumes the provider and returns its clusterings.
    #[must_use]
    pub fn into_clusterings(self) -> Vec<Clustering> {
        self.clusterings
    }
}

fn parse_line(line: usize, text: &str) -> Result<Clustering, TextClusteringsError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| TextClusteringsError::InvalidLabel {
                    line,
                    token: token.to_owned(),
                })
        })
        .collect::<Result<Vec<u64>, _>>()
        .map(Clustering::from)
}

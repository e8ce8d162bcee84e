//! The analysis pipeline: load → extract → count → render.
//!
//! Every call is independent and stateless. Failures are returned as
//! `AnalysisError` and turned into `ERROR: ...` text only at the boundary
//! (console output or the form's results area), see `error_text` and
//! `analyze_to_text`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::fasta::{extract_sequence, read_text_file};
use crate::model::{FrequencyTable, Sequence};
use crate::report::{build_report, Report};

/// Display name used for standard input.
pub const STDIN_NAME: &str = "stdin";

/// Errors that can occur during an analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File '{}' not found.", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("No sequence found in file '{origin}'.")]
    EmptySequence { origin: String },

    #[error("Cannot build a report for an empty sequence.")]
    EmptyInput,

    #[error("Failed to read '{origin}': {source}")]
    Io {
        origin: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Where the text to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file on disk
    Path(PathBuf),
    /// Standard input, read to the end
    Stdin,
    /// In-memory text with a display name
    Text { name: String, content: String },
}

impl InputSource {
    /// Creates a file source.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        InputSource::Path(path.into())
    }

    /// Creates an in-memory source.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        InputSource::Text {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Name shown in the report header.
    ///
    /// For files this is the last path component, not the full path.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Stdin => STDIN_NAME.to_string(),
            InputSource::Text { name, .. } => name.clone(),
        }
    }

    /// Name used in error messages (the full path for files).
    fn origin(&self) -> String {
        match self {
            InputSource::Path(path) => path.display().to_string(),
            _ => self.display_name(),
        }
    }

    /// Loads the raw text of the source.
    pub fn load(&self) -> AnalysisResult<String> {
        match self {
            InputSource::Path(path) => load_file(path),
            InputSource::Stdin => {
                let mut content = String::new();
                io::stdin()
                    .lock()
                    .read_to_string(&mut content)
                    .map_err(|source| AnalysisError::Io {
                        origin: STDIN_NAME.to_string(),
                        source,
                    })?;
                Ok(content)
            }
            InputSource::Text { content, .. } => Ok(content.clone()),
        }
    }
}

fn load_file(path: &Path) -> AnalysisResult<String> {
    if !path.exists() {
        return Err(AnalysisError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    read_text_file(path).map_err(|source| match source.kind() {
        // Removed between the existence check and the read
        io::ErrorKind::NotFound => AnalysisError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io {
            origin: path.display().to_string(),
            source,
        },
    })
}

/// Counts the occurrences of every character of `sequence`.
///
/// The counts sum to the sequence length. An empty sequence gives an
/// empty table.
pub fn count_characters(sequence: &Sequence) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for c in sequence.chars() {
        table.record(c);
    }
    table
}

/// Analyzes a source and returns its report.
///
/// # Errors
///
/// - `SourceNotFound` if a file source does not exist
/// - `EmptySequence` if the text holds no sequence data
/// - `Io` if the source cannot be read as UTF-8 text
///
/// # Examples
///
/// ```
/// use seqfreq::analysis::{analyze, AnalysisError, InputSource};
///
/// let report = analyze(&InputSource::text("demo", "ababbcbcbcbdbabcbb")).unwrap();
/// assert_eq!(report.alphabet(), vec!['A', 'B', 'C', 'D']);
///
/// let err = analyze(&InputSource::text("demo", ">only a header")).unwrap_err();
/// assert!(matches!(err, AnalysisError::EmptySequence { .. }));
/// ```
pub fn analyze(source: &InputSource) -> AnalysisResult<Report> {
    let raw = source.load()?;
    let sequence = extract_sequence(&raw);

    if sequence.is_empty() {
        return Err(AnalysisError::EmptySequence {
            origin: source.origin(),
        });
    }

    let table = count_characters(&sequence);
    debug!(
        source = %source.origin(),
        length = sequence.len(),
        alphabet_size = table.alphabet_size(),
        "counted characters"
    );
    build_report(source.display_name(), &sequence, &table)
}

/// Analyzes a file.
///
/// Convenience wrapper around `analyze`.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Report> {
    analyze(&InputSource::path(path.as_ref()))
}

/// Formats an error the way it is shown to the user.
pub fn error_text(err: &AnalysisError) -> String {
    format!("ERROR: {}", err)
}

/// Analyzes a source and returns the text to show: the report, or an
/// `ERROR: ...` line.
pub fn analyze_to_text(source: &InputSource) -> String {
    match analyze(source) {
        Ok(report) => report.to_string(),
        Err(err) => {
            warn!(source = %source.origin(), "{}", err);
            error_text(&err)
        }
    }
}

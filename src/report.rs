//! Frequency report construction and rendering.
//!
//! A `Report` is built from a sequence and its frequency table and renders
//! as plain text:
//!
//! ```text
//! Analysis for file: sample.fasta
//! Sequence length: 8 characters
//! -------------------------------------------
//!
//! Sequence alphabet (4 unique characters):
//! A, C, G, T
//!
//! Relative character frequency:
//! A -> 2 occurrences (25.00%)
//! ...
//! ```

use std::fmt;

use crate::analysis::AnalysisError;
use crate::model::{FrequencyTable, Sequence};

/// Separator line under the report header.
const SEPARATOR: &str = "-------------------------------------------";

/// Count and relative frequency of one character.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub symbol: char,
    pub count: usize,
    /// Percentage of the sequence length, in `0.0..=100.0`
    pub percentage: f64,
    /// Percentage in hundredths, rounded half-up
    pub hundredths: u64,
}

impl FrequencyRow {
    /// Returns the percentage with exactly two decimals, rounded half-up
    /// (`1/160` gives `0.63`, not the ties-to-even `0.62`).
    pub fn percentage_text(&self) -> String {
        format!("{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

/// Computes `count / length * 100` in hundredths, rounding half-up.
fn percent_hundredths(count: usize, length: usize) -> u64 {
    let (count, length) = (count as u128, length as u128);
    ((count * 20_000 + length) / (2 * length)) as u64
}

/// Rendered summary of a sequence's character statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Name shown in the first line (usually a file name)
    pub source_name: String,
    /// Sequence length in characters
    pub length: usize,
    /// One row per alphabet character, sorted by character code
    pub rows: Vec<FrequencyRow>,
}

impl Report {
    /// Returns the sorted alphabet.
    pub fn alphabet(&self) -> Vec<char> {
        self.rows.iter().map(|row| row.symbol).collect()
    }

    /// Returns the number of distinct characters.
    pub fn alphabet_size(&self) -> usize {
        self.rows.len()
    }
}

/// Builds the report for `sequence` from its frequency table.
///
/// `table` must have been computed from `sequence`. An empty sequence is
/// refused before any percentage is computed.
pub fn build_report(
    source_name: impl Into<String>,
    sequence: &Sequence,
    table: &FrequencyTable,
) -> Result<Report, AnalysisError> {
    let length = sequence.len();
    if length == 0 {
        return Err(AnalysisError::EmptyInput);
    }
    debug_assert_eq!(table.total(), length, "frequency table does not match sequence");

    let rows = table
        .iter()
        .map(|(symbol, count)| FrequencyRow {
            symbol,
            count,
            percentage: count as f64 / length as f64 * 100.0,
            hundredths: percent_hundredths(count, length),
        })
        .collect();

    Ok(Report {
        source_name: source_name.into(),
        length,
        rows,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis for file: {}", self.source_name)?;
        writeln!(f, "Sequence length: {} characters", self.length)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f)?;

        let alphabet: Vec<String> = self.rows.iter().map(|row| row.symbol.to_string()).collect();
        writeln!(
            f,
            "Sequence alphabet ({} unique characters):",
            self.alphabet_size()
        )?;
        writeln!(f, "{}", alphabet.join(", "))?;
        writeln!(f)?;

        writeln!(f, "Relative character frequency:")?;
        for row in &self.rows {
            writeln!(
                f,
                "{} -> {} occurrences ({}%)",
                row.symbol,
                row.count,
                row.percentage_text()
            )?;
        }
        Ok(())
    }
}

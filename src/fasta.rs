//! FASTA text handling.
//!
//! This module turns FASTA-style text into a single `Sequence`.
//! Header lines are dropped and every other line is treated as sequence
//! data, so multi-line and multi-record files collapse into one sequence.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! ACGT...
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::model::Sequence;

/// First character of a FASTA header line.
pub const HEADER_MARKER: char = '>';

/// Demo FASTA content written by `write_sample_fasta`.
///
/// Contains letters outside the nucleotide alphabet on purpose: the analyzer
/// counts whatever characters it is given.
pub const SAMPLE_FASTA: &str =
    ">Sample Sequence\nACGTACGTACGAFSINOFT\nACGTAFSAFASOJFSAPNFSA\nDNSAODNASIDASD";

/// Extracts the sequence data from FASTA-style text.
///
/// Every line whose first character is `>` is discarded. The remaining lines
/// are trimmed, concatenated and upper-cased. The result may be empty.
///
/// Extracting an already extracted sequence gives it back unchanged, with
/// one exception: a data line indented before a `>` (such as ` >x`) is
/// trimmed to `>X`, and that line reads as a header on a second pass.
///
/// # Examples
///
/// ```
/// use seqfreq::fasta::extract_sequence;
///
/// let seq = extract_sequence(">Sample\nacgt\n  ACGT  \n");
/// assert_eq!(seq.as_str(), "ACGTACGT");
/// ```
pub fn extract_sequence(raw: &str) -> Sequence {
    let mut data = String::with_capacity(raw.len());
    let mut header_lines = 0usize;

    for line in raw.lines() {
        if line.starts_with(HEADER_MARKER) {
            header_lines += 1;
            continue;
        }
        data.push_str(line.trim());
    }

    let sequence = Sequence::new(data);
    debug!(
        header_lines,
        length = sequence.len(),
        "extracted sequence data"
    );
    sequence
}

/// Reads a whole text file into memory.
///
/// Inputs are expected to be small, so there is no streaming.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(&path)?;
    let file_size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = BufReader::new(file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// Writes the demo FASTA file to `path`, replacing any existing file.
pub fn write_sample_fasta<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let mut file = File::create(&path)?;
    file.write_all(SAMPLE_FASTA.as_bytes())?;
    debug!(path = %path.as_ref().display(), "wrote sample FASTA file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_simple_fasta() {
        let seq = extract_sequence(">Sample\nACGT\nACGT");
        assert_eq!(seq.as_str(), "ACGTACGT");
        assert_eq!(seq.len(), 8);
    }

    #[test]
    fn test_extract_drops_every_header() {
        let seq = extract_sequence(">seq1\nAC\n>seq2 with description\nGT\n");
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_extract_trims_and_uppercases() {
        let seq = extract_sequence("  acg \n\tTtc\n\n");
        assert_eq!(seq.as_str(), "ACGTTC");
    }

    #[test]
    fn test_extract_crlf_line_endings() {
        let seq = extract_sequence(">h\r\nAC\r\nGT\r\n");
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_extract_keeps_inner_whitespace() {
        // Only the ends of a line are trimmed
        let seq = extract_sequence("AC GT");
        assert_eq!(seq.as_str(), "AC GT");
    }

    #[test]
    fn test_indented_marker_is_data() {
        // A header must start at the first column
        let seq = extract_sequence(" >x\nAC");
        assert_eq!(seq.as_str(), ">XAC");
    }

    #[test]
    fn test_only_headers_is_empty() {
        assert!(extract_sequence(">only a header").is_empty());
        assert!(extract_sequence(">a\n>b\n").is_empty());
        assert!(extract_sequence("").is_empty());
    }

    #[test]
    fn test_extract_is_idempotent_on_clean_input() {
        for text in ["ACGT", "acgt\nttaa", "ababbcbcbcbdbabcbb", "  x y \n z", ""] {
            let once = extract_sequence(text);
            let twice = extract_sequence(once.as_str());
            assert_eq!(once, twice, "not idempotent for {:?}", text);
        }

        // Trimming exposes the marker, so the second pass drops the line
        let once = extract_sequence(" >x\nAC");
        assert_eq!(once.as_str(), ">XAC");
        assert!(extract_sequence(once.as_str()).is_empty());
    }

    #[test]
    fn test_sample_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sequence.fasta");

        write_sample_fasta(&path).unwrap();
        let content = read_text_file(&path).unwrap();

        assert_eq!(content, SAMPLE_FASTA);
        let seq = extract_sequence(&content);
        assert_eq!(seq.len(), 19 + 21 + 14);
        assert!(seq.as_str().starts_with("ACGTACGTACGAFSINOFT"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_text_file(dir.path().join("missing.fasta")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

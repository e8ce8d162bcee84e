//! Data model for the analyzer.
//!
//! This module contains all data structures for representing:
//! - Sequences and their character frequency tables
//! - The state of the interactive form
//!
//! The form state is plain data; event handlers receive it explicitly and
//! the renderer only reads it.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::analysis::{analyze, error_text, InputSource};

/// Text shown in the results area before the first analysis.
pub const INITIAL_RESULTS: &str = "Please select a FASTA file and press 'Analyze'.";

/// Message shown when Analyze is pressed with an empty path field.
pub const NO_FILE_SELECTED: &str = "ERROR: No file selected.";

/// Cleaned sequence data: header lines removed, lines trimmed, upper-cased.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    data: String,
    /// Number of characters (not bytes)
    len: usize,
}

impl Sequence {
    /// Creates a sequence from already concatenated data, upper-casing it.
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into().to_uppercase();
        let len = data.chars().count();
        Self { data, len }
    }

    /// Returns the number of characters in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the sequence data.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Iterates over the characters in order.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.data.chars()
    }
}

/// Occurrence count of every character of a sequence.
///
/// Keys are kept in character-code order, so iteration yields the sorted
/// alphabet. Every key has a count of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<char, usize>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `c`, starting from zero on first sight.
    pub fn record(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
    }

    /// Returns the count for `c` (zero if absent).
    pub fn get(&self, c: char) -> usize {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns the number of distinct characters.
    pub fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    /// Returns the distinct characters, sorted by character code.
    pub fn alphabet(&self) -> Vec<char> {
        self.counts.keys().copied().collect()
    }

    /// Returns true if no character was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(character, count)` pairs in character-code order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

/// Which part of the form receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing edits the file path
    #[default]
    Input,
    /// Keys scroll the results area
    Results,
}

/// Visible size of the results area, in wrapped lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultsViewport {
    pub rows: usize,
    pub cols: usize,
}

/// The complete state of the interactive form.
#[derive(Debug)]
pub struct AppState {
    /// Contents of the file path field
    pub path_input: String,
    /// Text shown in the results area (report or error)
    pub results: String,
    /// Index of the first visible wrapped line of `results`
    pub scroll: usize,
    /// Size of the results area
    pub viewport: ResultsViewport,
    /// Which widget has the focus
    pub focus: Focus,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self {
            path_input: String::new(),
            results: INITIAL_RESULTS.to_string(),
            scroll: 0,
            viewport: ResultsViewport::default(),
            focus: Focus::Input,
            should_quit: false,
            status_message: None,
        }
    }

    /// Creates a form with the path field pre-filled.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        let mut state = Self::new();
        state.path_input = path.as_ref().display().to_string();
        state
    }

    /// Updates the results area size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport = ResultsViewport { rows, cols };
        self.clamp_scroll();
    }

    /// Runs the analysis for the current path and shows the outcome.
    pub fn analyze(&mut self) {
        let path = self.path_input.trim();
        if path.is_empty() {
            self.results = NO_FILE_SELECTED.to_string();
            self.status_message = None;
        } else {
            match analyze(&InputSource::path(path)) {
                Ok(report) => {
                    self.results = report.to_string();
                    self.status_message = Some(format!("Analyzed {}", path));
                }
                Err(err) => {
                    warn!(path, "{}", err);
                    self.results = error_text(&err);
                    self.status_message = Some("Analysis failed".to_string());
                }
            }
        }
        self.scroll = 0;
    }

    /// Appends a character to the path field.
    pub fn input_char(&mut self, c: char) {
        self.path_input.push(c);
    }

    /// Deletes the last character of the path field.
    pub fn input_backspace(&mut self) {
        self.path_input.pop();
    }

    /// Clears the path field.
    pub fn clear_input(&mut self) {
        self.path_input.clear();
    }

    /// Switches the focus between the path field and the results area.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Results,
            Focus::Results => Focus::Input,
        };
    }

    /// Returns `results` wrapped to the width of the results area.
    ///
    /// Before the first resize (zero width) lines are returned unwrapped.
    pub fn wrapped_results(&self) -> Vec<String> {
        let width = self.viewport.cols;
        self.results
            .lines()
            .flat_map(|line| {
                if width == 0 || line.is_empty() {
                    vec![line.to_string()]
                } else {
                    textwrap::wrap(line, width)
                        .into_iter()
                        .map(|part| part.into_owned())
                        .collect()
                }
            })
            .collect()
    }

    /// Returns the largest useful scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.wrapped_results()
            .len()
            .saturating_sub(self.viewport.rows.max(1))
    }

    /// Scrolls the results up by `lines`.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scrolls the results down by `lines`.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    /// Scrolls up by one page.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.rows.max(1));
    }

    /// Scrolls down by one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.rows.max(1));
    }

    /// Jumps to the first line of the results.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jumps to the last page of the results.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("acGT");
        assert_eq!(seq.as_str(), "ACGT");
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
        assert!(Sequence::new("").is_empty());
    }

    #[test]
    fn test_sequence_len_counts_chars() {
        let seq = Sequence::new("aé");
        assert_eq!(seq.as_str(), "AÉ");
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_frequency_table_record() {
        let mut table = FrequencyTable::new();
        for c in "BAB".chars() {
            table.record(c);
        }
        assert_eq!(table.get('A'), 1);
        assert_eq!(table.get('B'), 2);
        assert_eq!(table.get('Z'), 0);
        assert_eq!(table.total(), 3);
        assert_eq!(table.alphabet(), vec!['A', 'B']);
    }

    #[test]
    fn test_frequency_table_iterates_sorted() {
        let mut table = FrequencyTable::new();
        for c in "tgca-".chars() {
            table.record(c);
        }
        let keys: Vec<char> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, vec!['-', 'a', 'c', 'g', 't']);
    }

    #[test]
    fn test_initial_form_state() {
        let state = AppState::new();
        assert_eq!(state.results, INITIAL_RESULTS);
        assert_eq!(state.focus, Focus::Input);
        assert!(state.path_input.is_empty());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_analyze_blank_path() {
        let mut state = AppState::new();
        state.path_input = "   ".to_string();
        state.analyze();
        assert_eq!(state.results, NO_FILE_SELECTED);
    }

    #[test]
    fn test_analyze_valid_file_resets_scroll() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seq.fasta");
        fs::write(&path, ">Sample\nACGT\nACGT\n").unwrap();

        let mut state = AppState::with_path(&path);
        state.update_viewport_size(2, 80);
        state.scroll = 1;
        state.analyze();

        assert_eq!(state.scroll, 0);
        assert!(state.results.starts_with("Analysis for file: seq.fasta\n"));
        assert!(state.results.contains("G -> 2 occurrences (25.00%)"));
        assert_eq!(
            state.status_message,
            Some(format!("Analyzed {}", path.display()))
        );
    }

    #[test]
    fn test_analyze_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::with_path(dir.path().join("nope.fasta"));
        state.analyze();
        assert!(state.results.starts_with("ERROR: File '"));
        assert!(state.results.ends_with("' not found."));
        assert_eq!(state.status_message.as_deref(), Some("Analysis failed"));
    }

    #[test]
    fn test_path_editing() {
        let mut state = AppState::new();
        for c in "ab.fa".chars() {
            state.input_char(c);
        }
        assert_eq!(state.path_input, "ab.fa");
        state.input_backspace();
        assert_eq!(state.path_input, "ab.f");
        state.clear_input();
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn test_toggle_focus() {
        let mut state = AppState::new();
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Results);
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_wrapped_results() {
        let mut state = AppState::new();
        state.results = "aaaa bbbb cccc\n\nshort".to_string();
        state.update_viewport_size(10, 9);
        assert_eq!(
            state.wrapped_results(),
            vec!["aaaa bbbb", "cccc", "", "short"]
        );
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut state = AppState::new();
        state.results = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        state.update_viewport_size(4, 20);

        assert_eq!(state.max_scroll(), 6);
        state.scroll_down(100);
        assert_eq!(state.scroll, 6);
        state.page_up();
        assert_eq!(state.scroll, 2);
        state.scroll_up(5);
        assert_eq!(state.scroll, 0);
        state.scroll_to_bottom();
        assert_eq!(state.scroll, 6);
        state.scroll_to_top();
        assert_eq!(state.scroll, 0);
    }
}

//! # seqfreq - Sequence Character Frequency Analyzer
//!
//! Computes character-frequency statistics over short sequence strings,
//! optionally read from a FASTA file, and shows the report on the console
//! or in a small terminal form built with ratatui.
//!
//! ## Architecture
//!
//! The analysis core has no UI dependency:
//! - `fasta`: sequence extraction from FASTA-style text, file loading, demo file
//! - `model`: `Sequence`, `FrequencyTable` and the form's `AppState`
//! - `report`: report construction and rendering
//! - `analysis`: the load → extract → count → render pipeline and its errors
//!
//! The terminal form is a thin caller of `analysis`:
//! - `event`: keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: terminal setup and the main loop
//!
//! ## Example
//!
//! ```
//! use seqfreq::analysis::{analyze, InputSource};
//!
//! let source = InputSource::text("sample", ">Sample\nACGT\nACGT");
//! let report = analyze(&source).unwrap();
//! assert_eq!(report.length, 8);
//! assert!(report.to_string().contains("A -> 2 occurrences (25.00%)"));
//! ```

pub mod analysis;
pub mod controller;
pub mod event;
pub mod fasta;
pub mod model;
pub mod report;
pub mod ui;

//! seqfreq - Sequence Character Frequency Analyzer
//!
//! Counts the characters of a FASTA sequence and reports their relative
//! frequencies.
//!
//! ## Usage
//!
//! ```bash
//! seqfreq                              # open the form
//! seqfreq sequence.fasta               # open the form and analyze the file
//! seqfreq sequence.fasta -o -          # print the report to stdout
//! seqfreq - -o report.txt < seq.fa     # read stdin, write the report to a file
//! seqfreq -t ACGGGCATATGCGC            # analyze an inline string
//! seqfreq --write-sample sequence.fasta
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seqfreq::analysis::{analyze, error_text, InputSource};
use seqfreq::controller::run_app;
use seqfreq::fasta::write_sample_fasta;
use seqfreq::model::AppState;

/// Runs CLI mode: analyze the source and write the report to `output`.
///
/// Analysis failures are reported as `ERROR: ...` on stderr with a
/// failing exit code; output failures are returned as errors.
fn run_cli_mode(source: &InputSource, output: &str) -> Result<ExitCode> {
    let report = match analyze(source) {
        Ok(report) => report,
        Err(err) => {
            tracing::debug!("analysis failed: {}", err);
            eprintln!("{}", error_text(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", report)?;
    } else {
        let mut file = File::create(output)
            .with_context(|| format!("Cannot create output file '{}'", output))?;
        write!(file, "{}", report)?;
        eprintln!("Wrote report for {} to {}", report.source_name, output);
    }

    Ok(ExitCode::SUCCESS)
}

/// seqfreq - character frequency statistics for FASTA sequences
///
/// When run without -o/--output, opens an interactive form.
/// With -o/--output, --text or --write-sample, runs in CLI mode.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file to analyze ("-" reads standard input in CLI mode)
    file: Option<PathBuf>,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Analyze this text instead of a file (CLI mode)
    #[arg(short = 't', long = "text", conflicts_with_all = ["file", "write_sample"])]
    text: Option<String>,

    /// Display name for --text in the report [default: inline]
    #[arg(long = "name", requires = "text")]
    name: Option<String>,

    /// Write a demo FASTA file to this path, then analyze it (CLI mode)
    #[arg(long = "write-sample", value_name = "PATH", conflicts_with = "file")]
    write_sample: Option<PathBuf>,

    /// Enable debug logging (to stderr in CLI mode, to a temp file in the form)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn is_cli_mode(&self) -> bool {
        self.output.is_some() || self.text.is_some() || self.write_sample.is_some()
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("seqfreq=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seqfreq=warn"))
    }
}

/// Initializes logging to stderr.
fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Initializes logging to a fresh file in the temp directory.
///
/// The terminal belongs to the form, so nothing may be written to stderr.
fn init_file_logging() -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("seqfreq-{:08x}.log", rand::random::<u32>()));
    let file = File::create(&path)
        .with_context(|| format!("Cannot create log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(true))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn source_for(file: &Path) -> InputSource {
    if file.as_os_str() == "-" {
        InputSource::Stdin
    } else {
        InputSource::path(file)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.is_cli_mode() {
        init_stderr_logging(args.verbose);
        let output = args.output.as_deref().unwrap_or("-");

        if let Some(path) = &args.write_sample {
            write_sample_fasta(path)
                .with_context(|| format!("Cannot write sample file '{}'", path.display()))?;
            eprintln!("Wrote sample FASTA to {}", path.display());
            return run_cli_mode(&InputSource::path(path), output);
        }

        if let Some(text) = &args.text {
            let name = args.name.as_deref().unwrap_or("inline");
            return run_cli_mode(&InputSource::text(name, text), output);
        }

        let Some(file) = &args.file else {
            anyhow::bail!("CLI mode needs an input file (or --text / --write-sample)");
        };
        return run_cli_mode(&source_for(file), output);
    }

    // Form mode
    let log_path = if args.verbose {
        Some(init_file_logging()?)
    } else {
        None
    };

    let state = match &args.file {
        Some(file) if file.as_os_str() == "-" => {
            anyhow::bail!("Standard input is only supported in CLI mode (use -o -)");
        }
        Some(file) => AppState::with_path(file),
        None => AppState::new(),
    };
    run_app(state)?;

    if let Some(path) = log_path {
        eprintln!("Log written to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

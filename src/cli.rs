//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Source`] - Supported export sources
//! - [`OutputFormat`] - Output format options
//!
//! # Using Source and OutputFormat in Libraries
//!
//! Both convert into their library counterparts:
//!
//! ```rust
//! use commpack::cli::{OutputFormat, Source};
//! use commpack::config::ParserConfig;
//! use commpack::parser::create_parser;
//!
//! let parser = create_parser(Source::Report.into(), &ParserConfig::default());
//! assert_eq!(parser.name(), "Message report");
//!
//! let format: commpack::format::OutputFormat = OutputFormat::ThreadsCsv.into();
//! assert_eq!(format.extension(), "csv");
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_INACTIVITY_DAYS;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "commpack_report.csv";

/// Largest `--inactivity-days` value accepted (100 years).
pub const MAX_INACTIVITY_DAYS: i64 = 36_500;

/// Rebuild message reports and chat exports into threads and
/// per-week communication statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "commpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    commpack report messages.txt
    commpack ofw messages.txt -f threads-csv -o threads.csv
    commpack report messages.txt -f md --exclude Mediator
    commpack im chat.txt --after 2024-01-01 --inactivity-days 7
    RUST_LOG=debug commpack report messages.txt -f json")]
pub struct Args {
    /// Export source type
    #[arg(value_enum)]
    pub source: Source,

    /// Path to the extracted export text
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Days of silence after which a reused subject starts a new thread
    #[arg(
        long,
        value_name = "DAYS",
        default_value_t = DEFAULT_INACTIVITY_DAYS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_INACTIVITY_DAYS)
    )]
    pub inactivity_days: i64,

    /// Hide people whose name contains NAME from statistics tables (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Keep messages sent on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages sent on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level filter implied by `--verbose`.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Supported export sources.
///
/// - [`Report`](Source::Report) - text extracted from a co-parenting platform message report
/// - [`Im`](Source::Im) - plain-text instant-messaging export
///
/// # Example
///
/// ```rust
/// use commpack::cli::Source;
///
/// let source: Source = "ofw".parse().unwrap();
/// assert_eq!(source, Source::Report);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Message report text
    #[value(alias = "ofw")]
    #[serde(alias = "ofw")]
    Report,

    /// Instant-messaging text export
    #[value(alias = "text")]
    #[serde(alias = "text")]
    Im,
}

impl Source {
    /// Returns all supported source names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &["report", "ofw", "im", "text"]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Report => write!(f, "Message report"),
            Source::Im => write!(f, "Instant messages"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" | "ofw" => Ok(Source::Report),
            "im" | "text" => Ok(Source::Im),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                Source::all_names().join(", ")
            )),
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - weekly per-person statistics
/// - [`ThreadsCsv`](OutputFormat::ThreadsCsv) - one row per thread
/// - [`Json`](OutputFormat::Json) - the complete analysis
/// - [`Markdown`](OutputFormat::Markdown) - readable report with thread trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Weekly statistics CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// Thread summary CSV with semicolon delimiter
    #[value(alias = "threads")]
    ThreadsCsv,

    /// Pretty-printed JSON
    Json,

    /// Markdown report
    #[value(alias = "md")]
    #[serde(alias = "md")]
    Markdown,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::ThreadsCsv => crate::format::OutputFormat::ThreadsCsv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Markdown => crate::format::OutputFormat::Markdown,
        }
    }
}

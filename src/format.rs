//! Output format types for the commpack library.
//!
//! Library-first format types with no CLI framework dependencies.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> commpack::Result<()> {
//! use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
//! use commpack::format::{OutputFormat, write_to_format};
//! use commpack::metrics::Scorer;
//! use commpack::pipeline::{analyze, process_messages};
//!
//! let text = std::fs::read_to_string("report.txt")?;
//! let analysis = analyze(
//!     process_messages(&text, &Scorer::new(), &ParserConfig::default()),
//!     &ThreadConfig::default(),
//! );
//!
//! // Write using format enum
//! write_to_format(&analysis, "weekly.csv", OutputFormat::Csv, &RenderConfig::new())?;
//!
//! // Or use format detection from the file name
//! let format = OutputFormat::from_path("report_threads.csv")?;
//! assert_eq!(format, OutputFormat::ThreadsCsv);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::error::CommpackError;
use crate::pipeline::Analysis;

/// Output format for an analysis.
///
/// - [`Csv`](OutputFormat::Csv) - one row per week and person
/// - [`ThreadsCsv`](OutputFormat::ThreadsCsv) - one row per thread
/// - [`Json`](OutputFormat::Json) - the complete analysis
/// - [`Markdown`](OutputFormat::Markdown) - a readable report
///
/// # Example
///
/// ```rust
/// use commpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("md").unwrap();
/// assert_eq!(format, OutputFormat::Markdown);
/// assert_eq!(format.extension(), "md");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Weekly statistics as CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// Thread summaries as CSV with semicolon delimiter
    ThreadsCsv,

    /// Pretty-printed JSON of messages, statistics and threads
    Json,

    /// Markdown report with tables, thread trees and message sections
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv | OutputFormat::ThreadsCsv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "threads-csv", "json", "markdown", "md"]
    }

    /// Detects format from a file path.
    ///
    /// A `.csv` file whose stem ends in `threads` selects
    /// [`ThreadsCsv`](OutputFormat::ThreadsCsv).
    ///
    /// # Example
    ///
    /// ```rust
    /// use commpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/weekly.csv").unwrap(), OutputFormat::Csv);
    /// assert_eq!(OutputFormat::from_path("out/threads.csv").unwrap(), OutputFormat::ThreadsCsv);
    /// ```
    pub fn from_path(path: &str) -> Result<Self, CommpackError> {
        let (stem, ext) = path.rsplit_once('.').unwrap_or((path, ""));
        let ext = ext.to_lowercase();

        match ext.as_str() {
            "csv" if stem.to_lowercase().ends_with("threads") => Ok(OutputFormat::ThreadsCsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(CommpackError::InvalidFormat {
                format: "output",
                message: format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, md"),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::ThreadsCsv => write!(f, "Threads CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "threads-csv" | "threads" => Ok(OutputFormat::ThreadsCsv),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes an analysis to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    analysis: &Analysis,
    path: &str,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<(), CommpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_weekly_csv(analysis, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::ThreadsCsv => crate::core::output::write_threads_csv(analysis, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(analysis, path, config),
        OutputFormat::Markdown => crate::core::output::write_markdown(analysis, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Renders an analysis to a string in the specified format.
///
/// # Example
///
/// ```rust
/// use commpack::config::{RenderConfig, ThreadConfig};
/// use commpack::format::{OutputFormat, to_format_string};
/// use commpack::pipeline::analyze;
///
/// let analysis = analyze(vec![], &ThreadConfig::default());
/// let md = to_format_string(&analysis, OutputFormat::Markdown, &RenderConfig::new())?;
/// assert!(md.starts_with("# Communication Report"));
/// # Ok::<(), commpack::CommpackError>(())
/// ```
#[allow(unused_variables)]
pub fn to_format_string(
    analysis: &Analysis,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<String, CommpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_weekly_csv(analysis, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::ThreadsCsv => crate::core::output::to_threads_csv(analysis),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(analysis, config),
        OutputFormat::Markdown => Ok(crate::core::output::to_markdown(analysis, config)),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[allow(dead_code)]
fn missing_feature(format: OutputFormat) -> CommpackError {
    CommpackError::InvalidFormat {
        format: "output",
        message: format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            match format {
                OutputFormat::Json => "json-output",
                _ => "csv-output",
            }
        ),
    }
}

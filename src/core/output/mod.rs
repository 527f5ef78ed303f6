//! Report renderers.
//!
//! - [`write_weekly_csv`] / [`to_weekly_csv`] - one row per week and person - requires `csv-output` feature
//! - [`write_threads_csv`] / [`to_threads_csv`] - one row per thread - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole analysis - requires `json-output` feature
//! - [`write_markdown`] / [`to_markdown`] - human-readable report
//!
//! Every renderer that lists people honors
//! [`RenderConfig::exclude_names`](crate::config::RenderConfig::exclude_names).
//! Exclusion only hides person rows; messages and threads are never dropped.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> commpack::Result<()> {
//! use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
//! use commpack::core::output::{to_markdown, write_json, write_weekly_csv};
//! use commpack::metrics::Scorer;
//! use commpack::pipeline::{analyze, process_messages};
//!
//! let text = std::fs::read_to_string("report.txt")?;
//! let messages = process_messages(&text, &Scorer::new(), &ParserConfig::default());
//! let analysis = analyze(messages, &ThreadConfig::default());
//!
//! let render = RenderConfig::new().with_excluded_name("Mediator");
//! write_weekly_csv(&analysis, "weekly.csv", &render)?;
//! write_json(&analysis, "analysis.json", &render)?;
//! let markdown = to_markdown(&analysis, &render);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod markdown_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_threads_csv, to_weekly_csv, write_threads_csv, write_weekly_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use markdown_writer::{to_markdown, write_markdown};

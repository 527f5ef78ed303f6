//! Aggregation and rendering.
//!
//! This module contains:
//! - [`filter`] - date range selection before analysis
//! - [`stats`] - per-person and per-week statistics
//! - [`threads`] - per-thread summaries
//! - [`output`] - CSV, JSON and Markdown renderers
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use commpack::core::{
//!     FilterConfig, PersonStats, ThreadSummary,
//!     aggregate, apply_filters, summarize_threads,
//!     to_markdown, write_json, write_threads_csv, write_weekly_csv,
//! };
//! # }
//! ```

pub mod filter;
pub mod output;
pub mod stats;
pub mod threads;

pub use filter::{FilterConfig, apply_filters};
pub use stats::{PersonStats, Statistics, aggregate, week_label};
pub use threads::{ThreadSummary, summarize_threads};

#[cfg(feature = "csv-output")]
pub use output::{to_threads_csv, to_weekly_csv, write_threads_csv, write_weekly_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
pub use output::{to_markdown, write_markdown};

//! # Commpack
//!
//! A Rust library for rebuilding co-parenting message reports and
//! instant-messaging exports into structured messages, conversational
//! threads and per-week communication statistics.
//!
//! ## Overview
//!
//! The input is text that was already extracted from an export:
//! - **Message report**: a paginated report split into `Message <n> of <m>`
//!   blocks, with `Sent`/`From`/`To`/`Subject` fields in one of two layouts
//! - **Instant messages**: one timestamped line per message
//!
//! Every message is scored (word count, two sentiment scores, tone),
//! assigned to a thread by normalized subject and participant set, and
//! aggregated per person and per Sunday-to-Saturday week.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = create_parser(Platform::Report, &ParserConfig::default());
//!     let messages = parse_and_score(
//!         parser.as_ref(),
//!         &std::fs::read_to_string("message_report.txt")?,
//!         &Scorer::new(),
//!     )?;
//!
//!     let analysis = analyze(messages, &ThreadConfig::default());
//!     for thread in &analysis.threads {
//!         println!("{}: {} messages", thread.subject, thread.message_count);
//!     }
//!
//!     write_markdown(&analysis, "report.md", &RenderConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`Platform`](parser::Platform), [`create_parser`](parser::create_parser)
//! - [`parsers`] - [`ReportParser`](parsers::ReportParser), [`InstantParser`](parsers::InstantParser)
//! - [`parsing`] - shared line normalization, labels and timestamp parsing
//! - [`metrics`] - [`Scorer`](metrics::Scorer) and per-message [`MessageMetrics`](metrics::MessageMetrics)
//! - [`threading`] - subject normalization and [`assign_threads`](threading::assign_threads)
//! - [`core`] - date filtering, statistics, thread summaries and writers
//! - [`pipeline`] - [`analyze`](pipeline::analyze) and the [`Analysis`](pipeline::Analysis) result
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`ThreadConfig`](config::ThreadConfig), [`RenderConfig`](config::RenderConfig)
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - [`CommpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod metrics;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod pipeline;
pub mod threading;

// Re-export the main types at the crate root for convenience
pub use error::{CommpackError, Result};
pub use message::{Message, ReadTime};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use commpack::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::{Message, ReadTime};

    // Error types
    pub use crate::error::{CommpackError, Result};

    // Parsers
    pub use crate::parser::{Parser, Platform, create_parser};
    pub use crate::parsers::{InstantParser, ReportParser};

    // Configuration
    pub use crate::config::{ParserConfig, RenderConfig, ThreadConfig};

    // Scoring and threading
    pub use crate::metrics::{MessageMetrics, Scorer};
    pub use crate::threading::{ThreadRef, ThreadedMessage, assign_threads, normalize_subject};

    // Filtering and aggregation
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::stats::{PersonStats, Statistics, aggregate, week_label};
    pub use crate::core::threads::{ThreadSummary, summarize_threads};

    // Pipeline
    pub use crate::pipeline::{Analysis, analyze, parse_and_score, process_messages};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::core::output::{to_markdown, write_markdown};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_threads_csv, to_weekly_csv, write_threads_csv, write_weekly_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
}

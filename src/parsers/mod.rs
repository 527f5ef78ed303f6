//! Export parsers.
//!
//! - [`ReportParser`] - co-parenting platform message reports
//! - [`InstantParser`] - plain-text instant-messaging exports
//!
//! Both implement [`Parser`](crate::parser::Parser). Parsers only rebuild
//! records; scoring is left to [`Message::scored`](crate::Message::scored).

mod instant;
mod report;

pub use instant::InstantParser;
pub use report::ReportParser;

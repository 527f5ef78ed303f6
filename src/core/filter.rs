//! Filter messages by send date.
//!
//! Filtering runs before thread assignment, so threads and statistics only
//! see the selected period.
//!
//! # Example
//!
//! ```
//! use commpack::core::filter::{FilterConfig, apply_filters};
//! use commpack::Message;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> commpack::Result<()> {
//! let messages = vec![
//!     Message::new("Alice", "Old").with_sent_date(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
//!     Message::new("Alice", "New").with_sent_date(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Both bounds are inclusive; `with_date_to` covers the whole day
//! - Real messages without a send date are **excluded** when a bound is set
//! - Non-message placeholders always pass, so they are still counted

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::CommpackError;

/// Date range applied to messages before analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only messages sent on or after this instant.
    pub after: Option<DateTime<Utc>>,

    /// Include only messages sent on or before this instant.
    pub before: Option<DateTime<Utc>>,
}

impl FilterConfig {
    /// Creates a filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive, `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`CommpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, CommpackError> {
        self.after = Some(parse_day(date_str)?.and_time(NaiveTime::MIN).and_utc());
        Ok(self)
    }

    /// Sets the end date (inclusive, `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`CommpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, CommpackError> {
        let day = parse_day(date_str)?;
        let end = day
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| CommpackError::invalid_date(date_str))?;
        self.before = Some(end.and_utc());
        Ok(self)
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` falls inside the range.
    pub fn matches(&self, msg: &Message) -> bool {
        if !self.is_active() || !msg.is_message() {
            return true;
        }
        msg.sent_date.is_some_and(|ts| {
            self.after.is_none_or(|after| ts >= after) && self.before.is_none_or(|before| ts <= before)
        })
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate, CommpackError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| CommpackError::invalid_date(date_str))
}

/// Keeps the messages matching `config`, in order.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    let before = messages.len();
    let kept: Vec<Message> = messages.into_iter().filter(|m| config.matches(m)).collect();
    log::info!("date filter kept {} of {} messages", kept.len(), before);
    kept
}

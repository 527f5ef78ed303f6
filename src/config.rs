//! Configuration types for parsing, threading and rendering.
//!
//! Plain builder-style structs with no CLI framework dependencies.
//!
//! - [`ParserConfig`] - report noise filtering and placeholder handling
//! - [`ThreadConfig`] - inactivity threshold for thread segmentation
//! - [`RenderConfig`] - names hidden from rendered person rows
//!
//! # Example
//!
//! ```rust
//! use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
//! use chrono::Duration;
//!
//! let parser = ParserConfig::new().with_banner_fragment("Printed by");
//! let threads = ThreadConfig::new().with_inactivity_threshold(Duration::days(14));
//! let render = RenderConfig::new().with_excluded_name("Mediator");
//!
//! assert_eq!(threads.inactivity_threshold, Duration::days(14));
//! assert!(render.is_excluded("Court Mediator"));
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CommpackError;

/// Default gap after which a reused subject starts a new thread.
pub const DEFAULT_INACTIVITY_DAYS: i64 = 30;

/// Configuration for message report parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Case-insensitive fragments marking report banner lines
    /// (default: "Message Report", "OurFamilyWizard")
    pub banner_fragments: Vec<String>,

    /// Keep blocks without field labels as non-message placeholders
    /// (default: true)
    pub keep_placeholders: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            banner_fragments: vec!["Message Report".to_string(), "OurFamilyWizard".to_string()],
            keep_placeholders: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a banner fragment.
    #[must_use]
    pub fn with_banner_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.banner_fragments.push(fragment.into());
        self
    }

    /// Replaces all banner fragments.
    #[must_use]
    pub fn with_banner_fragments(mut self, fragments: Vec<String>) -> Self {
        self.banner_fragments = fragments;
        self
    }

    /// Sets whether placeholder blocks are kept.
    #[must_use]
    pub fn with_keep_placeholders(mut self, keep: bool) -> Self {
        self.keep_placeholders = keep;
        self
    }
}

/// Configuration for thread assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// A gap strictly larger than this between consecutive messages with
    /// the same thread key starts a new thread (default: 30 days)
    #[serde(with = "duration_seconds")]
    pub inactivity_threshold: Duration,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold: Duration::days(DEFAULT_INACTIVITY_DAYS),
        }
    }
}

impl ThreadConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inactivity threshold.
    #[must_use]
    pub fn with_inactivity_threshold(mut self, threshold: Duration) -> Self {
        self.inactivity_threshold = threshold;
        self
    }

    /// Sets the inactivity threshold in whole days.
    ///
    /// # Errors
    ///
    /// Returns [`CommpackError::InvalidFormat`] if `days` is negative or
    /// too large to represent as a duration.
    pub fn with_inactivity_days(self, days: i64) -> Result<Self, CommpackError> {
        let threshold = Duration::try_days(days)
            .filter(|d| *d >= Duration::zero())
            .ok_or_else(|| {
                CommpackError::invalid_format(
                    "inactivity threshold",
                    format!("{days} days is out of range"),
                )
            })?;
        Ok(self.with_inactivity_threshold(threshold))
    }
}

/// Configuration for report rendering.
///
/// The analysis never drops data by name. Exclusions only hide person rows
/// in rendered output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Case-insensitive name substrings to hide.
    pub exclude_names: Vec<String>,
}

impl RenderConfig {
    /// Creates a new configuration with no exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name substring to hide.
    #[must_use]
    pub fn with_excluded_name(mut self, name: impl Into<String>) -> Self {
        self.exclude_names.push(name.into());
        self
    }

    /// Returns `true` if `person` contains any excluded substring.
    pub fn is_excluded(&self, person: &str) -> bool {
        let lower = person.to_lowercase();
        self.exclude_names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .any(|name| lower.contains(&name.trim().to_lowercase()))
    }
}

mod duration_seconds {
    use chrono::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| D::Error::custom(format!("{seconds} seconds is out of range")))
    }
}

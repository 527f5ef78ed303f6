//! Unified parser trait for message exports.
//!
//! # Example
//!
//! ```rust,no_run
//! use commpack::config::ParserConfig;
//! use commpack::parser::{Parser, Platform, create_parser};
//! use std::path::Path;
//!
//! # fn main() -> commpack::Result<()> {
//! let parser = create_parser(Platform::Report, &ParserConfig::default());
//! let messages = parser.parse(Path::new("message_report.txt"))?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::ParserConfig;
use crate::error::CommpackError;

/// Supported export sources.
///
/// # Example
///
/// ```rust
/// use commpack::parser::Platform;
/// use std::str::FromStr;
///
/// assert_eq!(Platform::from_str("ofw").unwrap(), Platform::Report);
/// assert_eq!(Platform::from_str("im").unwrap(), Platform::InstantMessage);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Platform {
    /// Co-parenting platform message report (text extracted from the PDF)
    #[serde(alias = "ofw")]
    Report,

    /// Plain-text instant-messaging export
    #[serde(rename = "im", alias = "text")]
    InstantMessage,
}

impl Platform {
    /// Returns all platform names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["report", "ofw", "im", "text"]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Report => write!(f, "Message report"),
            Platform::InstantMessage => write!(f, "Instant messages"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" | "ofw" => Ok(Platform::Report),
            "im" | "text" => Ok(Platform::InstantMessage),
            _ => Err(format!(
                "Unknown platform: '{}'. Expected one of: {}",
                s,
                Platform::all_names().join(", ")
            )),
        }
    }
}

#[cfg(feature = "cli")]
impl From<crate::cli::Source> for Platform {
    fn from(source: crate::cli::Source) -> Self {
        match source {
            crate::cli::Source::Report => Platform::Report,
            crate::cli::Source::Im => Platform::InstantMessage,
        }
    }
}

/// Trait for turning already-extracted export text into messages.
///
/// Implementors must provide [`parse_str`](Parser::parse_str); reading from
/// disk is a default method on top of it.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the platform this parser handles.
    fn platform(&self) -> Platform;

    /// Parses export text into messages, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`CommpackError`] only when the text as a whole is
    /// unrecognizable. Damaged individual messages degrade to sentinel
    /// values or placeholders instead.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>, CommpackError>;

    /// Reads a text file and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`CommpackError::Io`] if the file cannot be read,
    /// [`CommpackError::Utf8`] if it is not UTF-8 text, plus anything
    /// [`parse_str`](Parser::parse_str) returns.
    fn parse(&self, path: &Path) -> Result<Vec<Message>, CommpackError> {
        let content = read_export(path)?;
        self.parse_str(&content)
    }

    /// Parses a file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Vec<Message>, CommpackError> {
        self.parse(Path::new(path))
    }
}

/// Reads an export file as UTF-8 text.
pub(crate) fn read_export(path: &Path) -> Result<String, CommpackError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|source| CommpackError::Utf8 {
        context: format!("export {}", path.display()),
        source,
    })
}

/// Creates a parser for the specified platform.
///
/// # Example
///
/// ```rust
/// use commpack::config::ParserConfig;
/// use commpack::parser::{Platform, create_parser};
///
/// let parser = create_parser(Platform::InstantMessage, &ParserConfig::default());
/// assert_eq!(parser.name(), "Instant messages");
/// ```
pub fn create_parser(platform: Platform, config: &ParserConfig) -> Box<dyn Parser> {
    match platform {
        Platform::Report => Box::new(crate::parsers::ReportParser::with_config(config.clone())),
        Platform::InstantMessage => Box::new(crate::parsers::InstantParser::new()),
    }
}

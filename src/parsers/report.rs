//! Message report parser.

use std::path::Path;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::CommpackError;
use crate::message::{NEVER, ReadTime};
use crate::parser::{Parser, Platform, read_export};
use crate::parsing::parse_timestamp;
use crate::parsing::report::{BlockFields, RawRecipient, extract_fields, placeholder_body, split_blocks};

/// Parser for co-parenting platform message reports.
///
/// One [`Message`] is produced per `Message <n> of <m>` boundary. Blocks
/// without any field label become non-message placeholders unless
/// [`ParserConfig::keep_placeholders`] is off.
///
/// # Example
///
/// ```rust
/// use commpack::parser::Parser;
/// use commpack::parsers::ReportParser;
///
/// let text = "Message 1 of 1\nSent: 01/15/2024 at 09:30 AM\nFrom: Alice\n\
///             To: Bob (First Viewed: Never)\nSubject: Pickup\nFive o'clock works.";
/// let messages = ReportParser::new().parse_str(text)?;
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].sender, "Alice");
/// # Ok::<(), commpack::CommpackError>(())
/// ```
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses report text. Never fails: text without boundaries yields no
    /// messages.
    pub fn parse_blocks(&self, content: &str) -> Vec<Message> {
        let blocks = split_blocks(content);
        let total = blocks.len();
        let banners = &self.config.banner_fragments;
        let mut messages = Vec::with_capacity(blocks.len());
        let mut placeholders = 0usize;

        for block in blocks {
            match extract_fields(&block.lines, banners) {
                Some(fields) => messages.push(Self::build_message(fields)),
                None => {
                    placeholders += 1;
                    log::debug!("block {} of {} has no field labels", block.index, block.total);
                    if self.config.keep_placeholders {
                        messages.push(Message::placeholder(placeholder_body(&block.lines, banners)));
                    }
                }
            }
        }

        log::info!(
            "parsed {} report blocks ({} without field labels)",
            total,
            placeholders
        );

        messages
    }

    fn build_message(fields: BlockFields) -> Message {
        let mut msg = Message::new(fields.from.unwrap_or_default(), fields.body)
            .with_subject(fields.subject.unwrap_or_default());

        if let Some(sent) = fields.sent.as_deref().and_then(parse_timestamp) {
            msg = msg.with_sent_date(sent);
        }

        for RawRecipient { name, viewed } in fields.to {
            if name.is_empty() {
                continue;
            }
            let read = read_time(&name, viewed.as_deref());
            msg = msg.with_recipient(name, read);
        }

        msg
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a raw first-viewed value. Unparsable values count as unread.
fn read_time(name: &str, viewed: Option<&str>) -> ReadTime {
    match viewed {
        None => ReadTime::Never,
        Some(value) if value.trim().eq_ignore_ascii_case(NEVER) => ReadTime::Never,
        Some(value) => parse_timestamp(value).map_or_else(
            || {
                log::warn!("recipient {} has unparsable first-viewed `{}`", name, value);
                ReadTime::Never
            },
            ReadTime::Viewed,
        ),
    }
}

impl Parser for ReportParser {
    fn name(&self) -> &'static str {
        "Message report"
    }

    fn platform(&self) -> Platform {
        Platform::Report
    }

    /// Reads and parses a report file.
    ///
    /// Unlike [`parse_str`](Parser::parse_str), a file with text but not a
    /// single boundary line is rejected.
    fn parse(&self, path: &Path) -> Result<Vec<Message>, CommpackError> {
        let content = read_export(path)?;
        if !content.trim().is_empty() && split_blocks(&content).is_empty() {
            return Err(CommpackError::report_parse(
                "no `Message <n> of <m>` boundary line found",
                Some(path.to_path_buf()),
            ));
        }
        self.parse_str(&content)
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>, CommpackError> {
        Ok(self.parse_blocks(content))
    }
}

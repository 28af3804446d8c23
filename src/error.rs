//! Crate error types.
//!
//! Every failure a resolution call can produce is a distinct variant with
//! enough context for the content author to fix the reference in place.

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing references, looking up verse tables,
/// or applying highlight spans.
///
/// All variants are fatal to the single resolution call that produced
/// them. A missing verse inside an otherwise valid range is *not* an
/// error; it renders as an inline placeholder (see
/// [`crate::resolver::VerseResolver::format_range`]).
#[derive(Debug, Error)]
pub enum Error {
    /// Reference string is not of the form `chapter:verse[-verse]`
    #[error("invalid verse reference {raw:?}: expected \"chapter:verse\" or \"chapter:start-end\"")]
    InvalidFormat {
        /// The reference string as supplied by the author.
        raw: String,
    },

    /// Verse range did not split into exactly two integers
    #[error("invalid verse range {raw:?}: expected \"start-end\" with two integers")]
    InvalidRange {
        /// The verse part of the reference.
        raw: String,
    },

    /// Verse numbers start at 1
    #[error("verse numbers start at 1, got {start}")]
    NonPositiveStart {
        /// The offending start verse.
        start: i64,
    },

    /// Range end precedes its start
    #[error("range end {end} is before start {start}")]
    EndBeforeStart {
        /// First verse of the range.
        start: u32,
        /// Last verse of the range.
        end: u32,
    },

    /// Translation or chapter absent from the loaded table
    #[error("chapter {chapter:?} not found in translation {translation:?}")]
    ChapterNotFound {
        /// Translation identifier that was searched.
        translation: String,
        /// Chapter identifier that was missing.
        chapter: String,
    },

    /// Highlight spec is not `start-end`
    #[error("invalid highlight {raw:?}: expected \"start-end\" with two integers")]
    InvalidHighlightFormat {
        /// The highlight spec as supplied.
        raw: String,
    },

    /// Highlight offsets are 1-indexed
    #[error("highlight offsets start at 1, got {start}")]
    NonPositiveHighlightStart {
        /// The offending start offset.
        start: i64,
    },

    /// Highlight end precedes its start
    #[error("highlight end {end} is before start {start}")]
    HighlightEndBeforeStart {
        /// Start offset of the span.
        start: usize,
        /// End offset of the span.
        end: usize,
    },

    /// Highlight span runs past the end of the verse text
    #[error("highlight end {end} exceeds verse length {len}")]
    EndExceedsLength {
        /// Requested end offset (1-indexed, inclusive).
        end: usize,
        /// Character length of the verse text.
        len: usize,
    },

    /// Highlight supplied together with a multi-verse range
    #[error("highlight spans index a single verse, but {reference} is a range")]
    HighlightOnRange {
        /// Display form of the offending reference.
        reference: String,
    },

    /// IO error with path context (table loading, data conversion)
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// A chapter JSON document failed to deserialize
    #[error("malformed verse table {path:?}: {source}")]
    Json {
        /// The underlying deserialization error.
        source: serde_json::Error,
        /// The chapter document that failed to parse.
        path: std::path::PathBuf,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn chapter_not_found_names_both_levels() {
        let err = Error::ChapterNotFound {
            translation: "sahih".to_string(),
            chapter: "1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sahih"));
        assert!(msg.contains('1'));
    }

    #[test]
    fn end_exceeds_length_carries_both_offsets() {
        let msg = Error::EndExceedsLength { end: 60, len: 50 }.to_string();
        assert!(msg.contains("60"));
        assert!(msg.contains("50"));
    }
}

//! Verse reference and highlight span parsing.
//!
//! References arrive from content markup as literal strings like `"2:255"`
//! or `"2:1-5"`; highlight specs as `"1-20"`. Both are authoring-time
//! input, so parse failures carry the offending string verbatim.

use crate::error::{Error, Result};

/// A parsed verse reference: one chapter plus an inclusive verse range.
///
/// A single verse is the degenerate range `start_verse == end_verse`.
/// The chapter identifier is opaque; whether it exists is only decided
/// at table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    /// Chapter identifier, taken verbatim from the reference string.
    pub chapter: String,
    /// First verse of the range (>= 1).
    pub start_verse: u32,
    /// Last verse of the range (>= `start_verse`).
    pub end_verse: u32,
}

impl VerseReference {
    /// Create a reference for a single verse.
    pub fn single(chapter: impl Into<String>, verse: u32) -> Self {
        Self {
            chapter: chapter.into(),
            start_verse: verse,
            end_verse: verse,
        }
    }

    /// Create a reference for a verse range.
    pub fn range(chapter: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            chapter: chapter.into(),
            start_verse: start,
            end_verse: end,
        }
    }

    /// Whether this reference covers more than one verse.
    pub const fn is_range(&self) -> bool {
        self.start_verse != self.end_verse
    }

    /// Format as a display string (e.g. `"2:255"` or `"2:1-5"`).
    pub fn display(&self) -> String {
        if self.is_range() {
            format!("{}:{}-{}", self.chapter, self.start_verse, self.end_verse)
        } else {
            format!("{}:{}", self.chapter, self.start_verse)
        }
    }
}

/// A 1-indexed, inclusive character span within a single verse's text.
///
/// Offsets count Unicode scalar values, not bytes. The upper bound
/// (`end <= verse length`) can only be checked once the verse text is
/// resolved; see [`crate::resolver::apply_highlight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// First highlighted character (1-indexed).
    pub start: usize,
    /// Last highlighted character (inclusive).
    pub end: usize,
}

/// Parse a verse reference string like `"2:255"` or `"2:1-5"`.
///
/// The chapter part is accepted verbatim; verse numbers must be positive
/// integers with the range end no smaller than its start.
pub fn parse_reference(raw: &str) -> Result<VerseReference> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split(':').collect();
    let [chapter, verse_spec] = parts[..] else {
        return Err(Error::InvalidFormat { raw: raw.to_string() });
    };

    let (start, end) = if verse_spec.contains('-') {
        let range_parts: Vec<&str> = verse_spec.split('-').collect();
        let [start_str, end_str] = range_parts[..] else {
            return Err(Error::InvalidRange { raw: verse_spec.to_string() });
        };
        let start = parse_verse_number(start_str, verse_spec)?;
        let end = parse_verse_number(end_str, verse_spec)?;
        (start, end)
    } else {
        let verse = verse_spec
            .parse::<i64>()
            .map_err(|_| Error::InvalidFormat { raw: raw.to_string() })?;
        (verse, verse)
    };

    if start <= 0 {
        return Err(Error::NonPositiveStart { start });
    }
    // start is known positive and verse numbers are far below u32::MAX
    let start = u32::try_from(start).map_err(|_| Error::InvalidRange {
        raw: verse_spec.to_string(),
    })?;
    let end = u32::try_from(end).map_err(|_| Error::InvalidRange {
        raw: verse_spec.to_string(),
    })?;
    if end < start {
        return Err(Error::EndBeforeStart { start, end });
    }

    Ok(VerseReference::range(chapter, start, end))
}

fn parse_verse_number(part: &str, spec: &str) -> Result<i64> {
    part.parse::<i64>()
        .map_err(|_| Error::InvalidRange { raw: spec.to_string() })
}

/// Parse an optional highlight spec like `"1-20"`.
///
/// `None` or an empty string means no highlighting was requested and is
/// not an error. A non-empty spec must be two `-`-separated integers
/// with `1 <= start <= end`.
pub fn parse_highlight_spec(raw: Option<&str>) -> Result<Option<HighlightSpan>> {
    let Some(raw) = raw else { return Ok(None) };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = raw.split('-').collect();
    let [start_str, end_str] = parts[..] else {
        return Err(Error::InvalidHighlightFormat { raw: raw.to_string() });
    };
    let start = start_str
        .parse::<i64>()
        .map_err(|_| Error::InvalidHighlightFormat { raw: raw.to_string() })?;
    let end = end_str
        .parse::<i64>()
        .map_err(|_| Error::InvalidHighlightFormat { raw: raw.to_string() })?;

    if start < 1 {
        return Err(Error::NonPositiveHighlightStart { start });
    }
    let start = usize::try_from(start)
        .map_err(|_| Error::InvalidHighlightFormat { raw: raw.to_string() })?;
    let end = usize::try_from(end)
        .map_err(|_| Error::InvalidHighlightFormat { raw: raw.to_string() })?;
    if end < start {
        return Err(Error::HighlightEndBeforeStart { start, end });
    }

    Ok(Some(HighlightSpan { start, end }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_single_verse() {
        let reference = parse_reference("1:1").unwrap();
        assert_eq!(reference, VerseReference::single("1", 1));
        assert!(!reference.is_range());
    }

    #[test]
    fn single_verse_collapses_to_degenerate_range() {
        let reference = parse_reference("36:12").unwrap();
        assert_eq!(reference.start_verse, 12);
        assert_eq!(reference.end_verse, 12);
    }

    #[test]
    fn parses_verse_range() {
        let reference = parse_reference("2:1-5").unwrap();
        assert_eq!(reference, VerseReference::range("2", 1, 5));
        assert!(reference.is_range());
    }

    #[test]
    fn chapter_is_taken_verbatim() {
        // Chapter identifiers need not be numeric
        let reference = parse_reference("al-fatiha:3").unwrap();
        assert_eq!(reference.chapter, "al-fatiha");
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(matches!(
            parse_reference("255"),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_extra_colon() {
        assert!(matches!(
            parse_reference("2:255:3"),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_verse() {
        assert!(matches!(
            parse_reference("2:two"),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_three_part_range() {
        assert!(matches!(
            parse_reference("2:1-3-5"),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_start() {
        assert!(matches!(
            parse_reference("2:0"),
            Err(Error::NonPositiveStart { start: 0 })
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            parse_reference("2:5-1"),
            Err(Error::EndBeforeStart { start: 5, end: 1 })
        ));
    }

    #[test]
    fn range_display_round_trips() {
        assert_eq!(parse_reference("2:1-5").unwrap().display(), "2:1-5");
        assert_eq!(parse_reference("1:7").unwrap().display(), "1:7");
    }

    #[test]
    fn absent_highlight_is_none() {
        assert_eq!(parse_highlight_spec(None).unwrap(), None);
        assert_eq!(parse_highlight_spec(Some("")).unwrap(), None);
        assert_eq!(parse_highlight_spec(Some("  ")).unwrap(), None);
    }

    #[test]
    fn parses_highlight_span() {
        let span = parse_highlight_spec(Some("1-20")).unwrap().unwrap();
        assert_eq!(span, HighlightSpan { start: 1, end: 20 });
    }

    #[test]
    fn single_character_span() {
        let span = parse_highlight_spec(Some("7-7")).unwrap().unwrap();
        assert_eq!(span.start, 7);
        assert_eq!(span.end, 7);
    }

    #[test]
    fn rejects_single_integer_highlight() {
        assert!(matches!(
            parse_highlight_spec(Some("20")),
            Err(Error::InvalidHighlightFormat { .. })
        ));
    }

    #[test]
    fn rejects_zero_highlight_start() {
        assert!(matches!(
            parse_highlight_spec(Some("0-5")),
            Err(Error::NonPositiveHighlightStart { start: 0 })
        ));
    }

    #[test]
    fn rejects_inverted_highlight() {
        assert!(matches!(
            parse_highlight_spec(Some("9-3")),
            Err(Error::HighlightEndBeforeStart { start: 9, end: 3 })
        ));
    }
}

//! Verse resolution and fragment rendering.
//!
//! One parameterized entry point replaces the four near-identical
//! shortcode variants of the old theme: the output mode picks the verse
//! separator and whether the fragment is a numbered block or a bare
//! inline quote. Resolution is a pure function of the request and the
//! injected table; nothing here holds state between calls.

use crate::error::{Error, Result};
use crate::reference::{parse_highlight_spec, parse_reference, HighlightSpan, VerseReference};
use crate::table::{ChapterVerses, TranslationTable};

/// How the resolved fragment is rendered.
///
/// The mode is pure presentation: it never changes which verses are
/// visited or in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Block quote; verses separated by `<br>`.
    #[default]
    Quote,
    /// Tooltip body; verses separated by the HTML newline entity so the
    /// fragment stays attribute-safe.
    Tooltip,
    /// Inline quote; a range is comma-joined, a single verse is bare text.
    InlinePlain,
    /// Inline quote with the highlight span wrapped in `<mark>`.
    InlineHighlighted,
}

impl RenderMode {
    /// Separator inserted between consecutive verses of a range.
    const fn separator(self) -> &'static str {
        match self {
            Self::Quote => "<br>",
            Self::Tooltip => "&#10;",
            Self::InlinePlain | Self::InlineHighlighted => ", ",
        }
    }
}

/// The shortcode parameter surface: `v`, `trans`, `hl`.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Verse reference string (`"chapter:verse"` or `"chapter:start-end"`).
    pub verse: &'a str,
    /// Translation identifier; `None` selects the default.
    pub translation: Option<&'a str>,
    /// Optional highlight spec (`"start-end"`, 1-indexed inclusive).
    pub highlight: Option<&'a str>,
    /// Output mode.
    pub mode: RenderMode,
}

impl<'a> RenderRequest<'a> {
    /// Request a plain quote render of a reference under the default
    /// translation.
    pub const fn quote(verse: &'a str) -> Self {
        Self {
            verse,
            translation: None,
            highlight: None,
            mode: RenderMode::Quote,
        }
    }
}

/// Three contiguous segments of a verse's text around a highlight span.
///
/// Concatenated in order they reconstruct the original text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegments {
    /// Text before the span; empty when the span starts at 1.
    pub before: String,
    /// The highlighted characters.
    pub highlighted: String,
    /// Text after the span; empty when the span ends at the last character.
    pub after: String,
}

impl HighlightSegments {
    /// Assemble the fragment, wrapping the highlighted segment in `<mark>`.
    ///
    /// Verse text is trusted markup from the build data store, so the
    /// surrounding segments pass through unescaped.
    pub fn into_fragment(self) -> String {
        format!("{}<mark>{}</mark>{}", self.before, self.highlighted, self.after)
    }
}

/// Split verse text into before/highlighted/after segments.
///
/// Offsets are 1-indexed, inclusive, and count characters so that
/// multi-byte Arabic text cannot be split mid-code-point. The bounds
/// checked at parse time are re-checked here since this is the last
/// point before slicing.
pub fn apply_highlight(text: &str, span: HighlightSpan) -> Result<HighlightSegments> {
    if span.start < 1 {
        return Err(Error::NonPositiveHighlightStart {
            start: i64::try_from(span.start).unwrap_or(0),
        });
    }
    if span.end < span.start {
        return Err(Error::HighlightEndBeforeStart {
            start: span.start,
            end: span.end,
        });
    }
    let len = text.chars().count();
    if span.end > len {
        return Err(Error::EndExceedsLength { end: span.end, len });
    }

    let before: String = text.chars().take(span.start - 1).collect();
    let highlighted: String = text
        .chars()
        .skip(span.start - 1)
        .take(span.end - span.start + 1)
        .collect();
    let after: String = text.chars().skip(span.end).collect();

    Ok(HighlightSegments { before, highlighted, after })
}

/// Placeholder emitted in place of a verse absent from its chapter.
fn missing_verse(chapter: &str, number: u32) -> String {
    format!("Verse {chapter}:{number} not found.")
}

/// Resolves verse references against a borrowed, immutable table.
#[derive(Debug, Clone, Copy)]
pub struct VerseResolver<'a> {
    table: &'a TranslationTable,
}

impl<'a> VerseResolver<'a> {
    /// Create a resolver over an already-loaded table.
    pub const fn new(table: &'a TranslationTable) -> Self {
        Self { table }
    }

    /// Resolve and render one request.
    ///
    /// Fatal errors abort this call only; a verse missing from an
    /// otherwise valid range renders as an inline placeholder and the
    /// rest of the range still renders.
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<String> {
        let reference = parse_reference(request.verse)?;
        let span = parse_highlight_spec(request.highlight)?;
        let chapter = self.table.chapter(request.translation, &reference.chapter)?;

        if let Some(span) = span {
            if reference.is_range() {
                return Err(Error::HighlightOnRange { reference: reference.display() });
            }
            return match chapter.verse(reference.start_verse) {
                Some(text) => Ok(apply_highlight(text, span)?.into_fragment()),
                // Nothing to highlight in a placeholder
                None => Ok(missing_verse(&reference.chapter, reference.start_verse)),
            };
        }

        match request.mode {
            RenderMode::InlinePlain | RenderMode::InlineHighlighted if !reference.is_range() => {
                Ok(chapter
                    .verse(reference.start_verse)
                    .map_or_else(
                        || missing_verse(&reference.chapter, reference.start_verse),
                        ToString::to_string,
                    ))
            }
            mode => Ok(Self::format_range(&reference, chapter, mode.separator())),
        }
    }

    /// Render an inclusive verse range, ascending, one numbered entry per
    /// verse, with the separator between consecutive entries only.
    ///
    /// A degenerate range (`start == end`) emits a single entry and no
    /// separator.
    pub fn format_range(
        reference: &VerseReference,
        chapter: &ChapterVerses,
        separator: &str,
    ) -> String {
        let mut out = String::new();
        for number in reference.start_verse..=reference.end_verse {
            if number > reference.start_verse {
                out.push_str(separator);
            }
            match chapter.verse(number) {
                Some(text) => {
                    out.push_str(&number.to_string());
                    out.push_str(". ");
                    out.push_str(text);
                }
                None => out.push_str(&missing_verse(&reference.chapter, number)),
            }
        }
        out
    }
}

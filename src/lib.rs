//! `ayat` - Quran verse resolution and fragment rendering for static-site builds.
//!
//! Given a `chapter:verse` or `chapter:start-end` reference, a translation
//! identifier, and an optional highlight span, resolves verse text from a
//! preloaded per-translation table and renders a formatted fragment. Also
//! ships the data-pipeline converters that produce the on-disk table layout.

pub mod config;
pub mod convert;
pub mod error;
pub mod reference;
pub mod resolver;
pub mod table;

pub use error::{Error, Result};
pub use reference::{parse_highlight_spec, parse_reference, HighlightSpan, VerseReference};
pub use resolver::{apply_highlight, RenderMode, RenderRequest, VerseResolver};
pub use table::{ChapterVerses, TranslationTable, DEFAULT_TRANSLATION};

//! Verse table storage and lookup.
//!
//! The table is a two-level read-only dictionary: translation identifier
//! to chapter identifier to verse map. It is loaded once before any
//! resolution call and never mutated afterwards; the resolver borrows it.
//!
//! On-disk layout mirrors the build data store: one directory per
//! translation, one JSON document per chapter
//! (`{data_dir}/{translation}/{chapter}.json`), with verse numbers as
//! string keys.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Translation used when the caller supplies none.
pub const DEFAULT_TRANSLATION: &str = "clearquran";

lazy_static! {
    /// Display names for the translation identifiers the data pipeline ships
    static ref TRANSLATION_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("clearquran", "The Clear Quran");
        m.insert("sahih", "Sahih International");
        m.insert("pickthall", "Pickthall");
        m.insert("yusufali", "Yusuf Ali");
        m.insert("arabic", "Arabic");
        m.insert("transliteration", "Transliteration");
        m
    };
}

/// Human-readable name for a translation identifier, if it is a known one.
///
/// Unknown identifiers are still valid table keys; this is display sugar
/// only.
pub fn translation_name(id: &str) -> Option<&'static str> {
    TRANSLATION_NAMES.get(id).copied()
}

/// Listing label for a translation: `"id (Display Name)"` when the
/// identifier is known, the bare identifier otherwise.
pub fn translation_label(id: &str) -> String {
    translation_name(id).map_or_else(|| id.to_string(), |name| format!("{id} ({name})"))
}

/// The verses of one chapter, keyed by verse number as a string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ChapterVerses {
    verses: HashMap<String, String>,
}

impl ChapterVerses {
    /// Build a chapter from (verse number, text) pairs. Test and
    /// converter convenience; build-time loading goes through
    /// [`TranslationTable::load_dir`].
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            verses: pairs
                .into_iter()
                .map(|(n, text)| (n.to_string(), text))
                .collect(),
        }
    }

    /// Look up a single verse's text.
    ///
    /// A miss is not an error: a range render substitutes a placeholder
    /// for the missing verse and keeps going.
    pub fn verse(&self, number: u32) -> Option<&str> {
        self.verses.get(&number.to_string()).map(String::as_str)
    }

    /// Number of verses present in this chapter.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether the chapter holds no verses at all.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// Immutable translation -> chapter -> verses table.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    translations: HashMap<String, HashMap<String, ChapterVerses>>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one chapter under a translation. Used while building the
    /// table; after handing the table to a resolver nothing mutates it.
    pub fn insert_chapter(
        &mut self,
        translation: impl Into<String>,
        chapter: impl Into<String>,
        verses: ChapterVerses,
    ) {
        self.translations
            .entry(translation.into())
            .or_default()
            .insert(chapter.into(), verses);
    }

    /// Typed nested lookup: translation then chapter.
    ///
    /// `translation` defaults to [`DEFAULT_TRANSLATION`] when absent.
    /// A miss at either level fails with [`Error::ChapterNotFound`]
    /// carrying both identifiers.
    pub fn chapter(&self, translation: Option<&str>, chapter: &str) -> Result<&ChapterVerses> {
        let translation = translation.unwrap_or(DEFAULT_TRANSLATION);
        self.translations
            .get(translation)
            .and_then(|chapters| chapters.get(chapter))
            .ok_or_else(|| Error::ChapterNotFound {
                translation: translation.to_string(),
                chapter: chapter.to_string(),
            })
    }

    /// Identifiers of the translations present in the table.
    pub fn translations(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Whether the table holds no translations.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Load a table from the on-disk layout
    /// `{data_dir}/{translation}/{chapter}.json`.
    ///
    /// Every `.json` file two levels down is one chapter document; the
    /// file stem is the chapter identifier and the parent directory name
    /// the translation identifier. Non-JSON files are ignored.
    pub fn load_dir(data_dir: &Path) -> Result<Self> {
        let mut table = Self::new();
        let mut chapters = 0usize;

        for entry in WalkDir::new(data_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(chapter) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(translation) = path
                .parent()
                .and_then(Path::file_name)
                .and_then(|s| s.to_str())
            else {
                continue;
            };

            let content = fs_err::read_to_string(path)
                .map_err(|e| Error::io(e, Some(path.to_path_buf())))?;
            let verses: ChapterVerses = serde_json::from_str(&content).map_err(|e| {
                Error::Json { source: e, path: path.to_path_buf() }
            })?;

            debug!(translation, chapter, verses = verses.len(), "loaded chapter");
            table.insert_chapter(translation, chapter, verses);
            chapters += 1;
        }

        if table.is_empty() {
            return Err(Error::config(
                format!("no verse data found under {}", data_dir.display()),
                "Expected {data_dir}/{translation}/{chapter}.json documents",
            ));
        }

        info!(
            translations = table.translations.len(),
            chapters, "verse table loaded"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn sample_table() -> TranslationTable {
        let mut table = TranslationTable::new();
        table.insert_chapter(
            DEFAULT_TRANSLATION,
            "1",
            ChapterVerses::from_pairs([
                (1, "In the name of God.".to_string()),
                (2, "Praise be to God.".to_string()),
            ]),
        );
        table
    }

    #[test]
    fn chapter_lookup_defaults_translation() {
        let table = sample_table();
        let chapter = table.chapter(None, "1").unwrap();
        assert_eq!(chapter.verse(1), Some("In the name of God."));
    }

    #[test]
    fn unknown_chapter_under_known_translation() {
        let table = sample_table();
        let err = table.chapter(Some(DEFAULT_TRANSLATION), "99").unwrap_err();
        match err {
            Error::ChapterNotFound { translation, chapter } => {
                assert_eq!(translation, DEFAULT_TRANSLATION);
                assert_eq!(chapter, "99");
            }
            other => panic!("expected ChapterNotFound, got {other}"),
        }
    }

    #[test]
    fn known_chapter_under_unknown_translation() {
        let table = sample_table();
        let err = table.chapter(Some("sahih"), "1").unwrap_err();
        assert!(matches!(err, Error::ChapterNotFound { .. }));
    }

    #[test]
    fn missing_verse_is_not_an_error() {
        let table = sample_table();
        let chapter = table.chapter(None, "1").unwrap();
        assert_eq!(chapter.verse(5), None);
    }

    #[test]
    fn loads_data_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        let translation_dir = dir.path().join("clearquran");
        std::fs::create_dir_all(&translation_dir).unwrap();
        std::fs::write(
            translation_dir.join("1.json"),
            r#"{"1": "First verse.", "2": "Second verse."}"#,
        )
        .unwrap();

        let table = TranslationTable::load_dir(dir.path()).unwrap();
        let chapter = table.chapter(None, "1").unwrap();
        assert_eq!(chapter.verse(2), Some("Second verse."));
    }

    #[test]
    fn empty_data_directory_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TranslationTable::load_dir(dir.path()),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn translation_names_cover_default() {
        assert_eq!(translation_name(DEFAULT_TRANSLATION), Some("The Clear Quran"));
        assert_eq!(translation_name("nope"), None);
    }

    #[test]
    fn translation_labels_fall_back_to_bare_id() {
        assert_eq!(translation_label("sahih"), "sahih (Sahih International)");
        assert_eq!(translation_label("custom"), "custom");
    }
}

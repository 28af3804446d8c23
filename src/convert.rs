//! Data pipeline converters.
//!
//! Turns raw verse dumps into the on-disk table layout the loader reads,
//! surah lists into per-surah markdown index pages, and individual verses
//! into per-verse markdown pages with extracted topic tags. All tools are
//! line-oriented: malformed lines are logged and skipped, never fatal.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{Error, Result};

/// Regex matching surah list lines like `1 - Al-Fatiha (The opener)`.
#[allow(clippy::expect_used)]
static RE_SURAH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*-\s*([^(]+)\s*\(([^)]+)\)$").expect("valid regex: RE_SURAH_LINE")
});

/// Regex matching words for tag extraction.
#[allow(clippy::expect_used)]
static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("valid regex: RE_WORD"));

/// Function words and common verbs excluded from verse tags.
static EXCLUDED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Personal pronouns
        "he", "she", "it", "him", "her", "his", "hers", "its", "they", "them", "their",
        "theirs", "i", "me", "my", "mine", "you", "your", "yours", "we", "us", "our", "ours",
        // Demonstratives
        "this", "that", "these", "those", "here", "there", "now", "then",
        // Interrogatives
        "who", "whom", "whose", "what", "which", "when", "where", "why", "how", "whether", "if",
        // Conjunctions
        "and", "but", "or", "for", "nor", "so", "yet", "because", "since", "as", "although",
        "though", "while", "before", "after", "unless", "until", "wherever", "whenever",
        // Prepositions
        "in", "on", "at", "by", "with", "to", "from", "of", "up", "down", "over", "under",
        "through", "across", "between", "during", "within", "without",
        // Articles and determiners
        "the", "a", "an", "some", "any", "many", "each", "every", "all", "few", "several",
        "most",
        // Adverbs
        "soon", "today", "tomorrow", "yesterday", "already", "still", "always", "never",
        "sometimes", "often", "rarely", "usually", "everywhere", "above", "below", "inside",
        "outside", "nearby", "far", "left", "right", "forward", "back", "well", "badly",
        "quickly", "slowly", "carefully", "easily", "hard", "fast", "loud", "quiet",
        // Modal verbs
        "can", "could", "may", "might", "will", "would", "shall", "should", "must",
        // Linking words
        "also", "too", "either", "however", "therefore", "thus", "moreover", "furthermore",
        "nevertheless", "nonetheless", "indeed", "certainly", "perhaps",
        // Auxiliary and common verbs
        "be", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
        "did", "ought", "need", "dare", "used",
    ]
    .into_iter()
    .collect()
});

/// Semantic tag groups: a group tag is added once when any trigger word
/// appears in the verse.
static TAG_GROUPS: &[(&str, &[&str])] = &[
    ("prophet", &[
        "musa", "moses", "abraham", "ibrahim", "jesus", "isa", "muhammad", "noah", "nuh",
        "joseph", "yusuf", "david", "dawud", "solomon", "sulaiman", "adam", "lot", "lut",
    ]),
    ("angel", &["gabriel", "jibril", "michael", "mikail", "israfil", "azrael"]),
    ("book", &["torah", "injil", "gospel", "zabur", "psalms", "quran", "koran"]),
    ("place", &["mecca", "makkah", "medina", "madinah", "jerusalem", "baitul", "kaaba", "kabah"]),
    ("prayer", &["salah", "namaz", "dua", "dhikr", "worship"]),
    ("paradise", &["jannah", "garden", "gardens"]),
    ("hell", &["jahannam", "fire", "hellfire"]),
    ("faith", &["iman", "belief", "believe"]),
];

/// Outcome counters for a converter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Files written to the output directory.
    pub written: usize,
    /// Input lines skipped as malformed.
    pub skipped: usize,
}

/// One entry of a surah list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurahEntry {
    /// Surah number, used as page weight and directory name.
    pub number: u32,
    /// Transliterated surah name.
    pub name: String,
    /// English translation of the name.
    pub translation: String,
}

/// Parse one surah list line of the form `{number} - {name} ({translation})`.
pub fn parse_surah_line(line: &str) -> Option<SurahEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let captures = RE_SURAH_LINE.captures(line)?;
    let number = captures.get(1)?.as_str().parse().ok()?;
    Some(SurahEntry {
        number,
        name: captures.get(2)?.as_str().trim().to_string(),
        translation: captures.get(3)?.as_str().trim().to_string(),
    })
}

impl SurahEntry {
    /// Render the `_index.md` content with TOML front matter.
    pub fn to_markdown(&self) -> String {
        format!(
            "+++\nweight = {}\ntitle = \"{}\"\nen = \"{}\"\n+++\n",
            self.number, self.name, self.translation
        )
    }
}

/// Parse one pipe-delimited dump line of the form `{chapter}|{verse}|{text}`.
///
/// Pipes inside the text are preserved; only the first two delimit.
fn parse_verse_line(line: &str) -> Option<(u32, u32, &str)> {
    let parts: Vec<&str> = line.splitn(3, '|').collect();
    let [chapter_str, verse_str, text] = parts[..] else {
        return None;
    };
    let chapter = chapter_str.parse().ok()?;
    let verse = verse_str.parse().ok()?;
    Some((chapter, verse, text))
}

/// Read a pipe-delimited verse dump into an ordered chapter -> verse ->
/// text map, counting skipped lines into `summary`.
fn read_verse_dump(
    input: &Path,
    summary: &mut ConvertSummary,
) -> Result<BTreeMap<u32, BTreeMap<u32, String>>> {
    let content = fs_err::read_to_string(input)
        .map_err(|e| Error::io(e, Some(input.to_path_buf())))?;

    let mut chapters: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((chapter, verse, text)) = parse_verse_line(line) else {
            warn!(line = line_number + 1, "skipping malformed line");
            summary.skipped += 1;
            continue;
        };
        chapters
            .entry(chapter)
            .or_default()
            .insert(verse, text.to_string());
    }
    Ok(chapters)
}

/// Convert a pipe-delimited verse dump into per-chapter JSON documents.
///
/// Input lines have the form `{chapter}|{verse}|{text}`. Double quotes
/// are stripped from the text, matching the source dumps which quote
/// inconsistently. Output is `{out_dir}/{chapter}.json`, each a map of
/// verse-number-as-string to text.
pub fn verses_to_json(input: &Path, out_dir: &Path) -> Result<ConvertSummary> {
    let mut summary = ConvertSummary::default();
    let chapters = read_verse_dump(input, &mut summary)?;

    fs_err::create_dir_all(out_dir)?;
    for (chapter, verses) in &chapters {
        let keyed: BTreeMap<String, String> = verses
            .iter()
            .map(|(n, text)| (n.to_string(), text.replace('"', "")))
            .collect();
        let out_path = out_dir.join(format!("{chapter}.json"));
        let json = serde_json::to_string_pretty(&keyed)
            .map_err(|e| Error::Json { source: e, path: out_path.clone() })?;
        fs_err::write(&out_path, json)?;
        summary.written += 1;
    }

    Ok(summary)
}

/// Extract topic tags from a verse's text.
///
/// Every word survives except function words; words longer than three
/// characters ending in `s` also contribute their singular. A semantic
/// group tag (`prophet`, `angel`, ...) is added when any of its trigger
/// words appears. Tags come back sorted.
pub fn extract_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: HashSet<&str> = RE_WORD.find_iter(&lower).map(|m| m.as_str()).collect();

    let mut tags: BTreeSet<String> = BTreeSet::new();
    for word in &words {
        if EXCLUDED_WORDS.contains(word) {
            continue;
        }
        if word.len() > 2 {
            tags.insert((*word).to_string());
        }
        if word.len() > 3 {
            if let Some(singular) = word.strip_suffix('s') {
                if !EXCLUDED_WORDS.contains(singular) {
                    tags.insert(singular.to_string());
                }
            }
        }
    }
    for (group, triggers) in TAG_GROUPS {
        if triggers.iter().any(|t| words.contains(t)) {
            tags.insert((*group).to_string());
        }
    }

    tags.into_iter().collect()
}

/// Render one verse page with Hugo front matter.
///
/// `weight` is the verse's 1-based position across the whole dump so
/// pages list in canonical order.
fn verse_page_markdown(chapter: u32, verse: u32, text: &str, date: &str, weight: usize) -> String {
    let tags = extract_tags(text);
    let tags_str = tags
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "+++\ntitle = 'Surah {chapter}, Verses {verse}'\ndate = '{date}'\nweight = {weight}\nsurah = {chapter}\nayah = {verse}\ntags = [{tags_str}]\n+++\n\n{text}"
    )
}

/// Export every verse of a pipe-delimited dump as its own markdown page.
///
/// Output is `{out_dir}/{chapter}/{verse}.md`, front matter carrying the
/// verse coordinates, page weight, publication date, and extracted tags;
/// the verse text follows as the page body. Verses are visited in
/// chapter-then-verse order.
pub fn verse_pages(input: &Path, out_dir: &Path, date: &str) -> Result<ConvertSummary> {
    let mut summary = ConvertSummary::default();
    let chapters = read_verse_dump(input, &mut summary)?;

    let mut weight = 0usize;
    for (chapter, verses) in &chapters {
        let chapter_dir = out_dir.join(chapter.to_string());
        fs_err::create_dir_all(&chapter_dir)?;
        for (verse, text) in verses {
            weight += 1;
            let page = verse_page_markdown(*chapter, *verse, text, date, weight);
            fs_err::write(chapter_dir.join(format!("{verse}.md")), page)?;
            summary.written += 1;
        }
    }

    Ok(summary)
}

/// Generate per-surah `_index.md` pages from a surah list file.
///
/// Each valid line produces `{out_dir}/{number}/_index.md` carrying the
/// surah's weight, title, and English name as TOML front matter.
pub fn surah_index(input: &Path, out_dir: &Path) -> Result<ConvertSummary> {
    let content = fs_err::read_to_string(input)
        .map_err(|e| Error::io(e, Some(input.to_path_buf())))?;

    let mut summary = ConvertSummary::default();
    for (line_number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(entry) = parse_surah_line(line) else {
            warn!(line = line_number + 1, "skipping unrecognized surah line");
            summary.skipped += 1;
            continue;
        };
        let surah_dir = out_dir.join(entry.number.to_string());
        fs_err::create_dir_all(&surah_dir)?;
        fs_err::write(surah_dir.join("_index.md"), entry.to_markdown())?;
        summary.written += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_surah_line() {
        let entry = parse_surah_line("1 - Al-Fatiha (The opener)").unwrap();
        assert_eq!(
            entry,
            SurahEntry {
                number: 1,
                name: "Al-Fatiha".to_string(),
                translation: "The opener".to_string(),
            }
        );
    }

    #[test]
    fn rejects_lines_without_translation() {
        assert_eq!(parse_surah_line("1 - Al-Fatiha"), None);
        assert_eq!(parse_surah_line(""), None);
        assert_eq!(parse_surah_line("x - y (z)"), None);
    }

    #[test]
    fn surah_markdown_front_matter() {
        let entry = parse_surah_line("2 - Al-Baqara (The cow)").unwrap();
        let md = entry.to_markdown();
        assert!(md.starts_with("+++\n"));
        assert!(md.contains("weight = 2"));
        assert!(md.contains("title = \"Al-Baqara\""));
        assert!(md.contains("en = \"The cow\""));
    }

    #[test]
    fn converts_pipe_delimited_verses() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verses.txt");
        std::fs::write(
            &input,
            "1|1|In the name of God.\n1|2|\"Praise\" be to God.\nbad line\n2|1|Alif.\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let summary = verses_to_json(&input, &out).unwrap();
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);

        let chapter1 = std::fs::read_to_string(out.join("1.json")).unwrap();
        let verses: std::collections::HashMap<String, String> =
            serde_json::from_str(&chapter1).unwrap();
        // Double quotes stripped from the text
        assert_eq!(verses.get("2").map(String::as_str), Some("Praise be to God."));
    }

    #[test]
    fn pipes_inside_text_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verses.txt");
        std::fs::write(&input, "1|1|first | second\n").unwrap();
        let out = dir.path().join("out");

        verses_to_json(&input, &out).unwrap();
        let chapter1 = std::fs::read_to_string(out.join("1.json")).unwrap();
        assert!(chapter1.contains("first | second"));
    }

    #[test]
    fn tags_drop_function_words() {
        let tags = extract_tags("Praise be to God, the Lord of the Worlds");
        assert!(tags.contains(&"praise".to_string()));
        assert!(tags.contains(&"lord".to_string()));
        assert!(!tags.contains(&"the".to_string()));
        assert!(!tags.contains(&"be".to_string()));
        assert!(!tags.contains(&"to".to_string()));
    }

    #[test]
    fn tags_include_singulars_of_plurals() {
        let tags = extract_tags("the worlds");
        assert!(tags.contains(&"worlds".to_string()));
        assert!(tags.contains(&"world".to_string()));
    }

    #[test]
    fn tags_add_semantic_groups() {
        let tags = extract_tags("And We gave Moses the Book");
        assert!(tags.contains(&"prophet".to_string()));
        assert!(tags.contains(&"moses".to_string()));
        // "gardens" triggers paradise and contributes its singular
        let tags = extract_tags("gardens beneath which rivers flow");
        assert!(tags.contains(&"paradise".to_string()));
        assert!(tags.contains(&"garden".to_string()));
    }

    #[test]
    fn tags_are_sorted_and_unique() {
        let tags = extract_tags("light upon light");
        assert_eq!(tags, vec!["light".to_string(), "upon".to_string()]);
    }

    #[test]
    fn writes_per_verse_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verses.txt");
        std::fs::write(
            &input,
            "1|1|In the name of God.\n1|2|Praise be to God.\n2|1|Alif, Lam, Meem.\nbad line\n",
        )
        .unwrap();
        let out = dir.path().join("content");

        let summary = verse_pages(&input, &out, "2026-08-30").unwrap();
        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 1);

        let page = std::fs::read_to_string(out.join("1").join("2.md")).unwrap();
        assert!(page.starts_with("+++\n"));
        assert!(page.contains("title = 'Surah 1, Verses 2'"));
        assert!(page.contains("date = '2026-08-30'"));
        assert!(page.contains("surah = 1"));
        assert!(page.contains("ayah = 2"));
        assert!(page.contains("tags = ["));
        assert!(page.contains("\"praise\""));
        assert!(page.ends_with("Praise be to God."));
    }

    #[test]
    fn verse_page_weights_follow_canonical_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verses.txt");
        // Dump order is shuffled; weights must still follow chapter:verse order
        std::fs::write(&input, "2|1|Second chapter.\n1|2|Verse two.\n1|1|Verse one.\n").unwrap();
        let out = dir.path().join("content");

        verse_pages(&input, &out, "2026-08-30").unwrap();
        let first = std::fs::read_to_string(out.join("1").join("1.md")).unwrap();
        let last = std::fs::read_to_string(out.join("2").join("1.md")).unwrap();
        assert!(first.contains("weight = 1"));
        assert!(last.contains("weight = 3"));
    }

    #[test]
    fn writes_surah_index_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("surahs.txt");
        std::fs::write(
            &input,
            "1 - Al-Fatiha (The opener)\n2 - Al-Baqara (The cow)\nnot a surah\n",
        )
        .unwrap();
        let out = dir.path().join("content");

        let summary = surah_index(&input, &out).unwrap();
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);
        assert!(out.join("1").join("_index.md").is_file());
        let md = std::fs::read_to_string(out.join("2").join("_index.md")).unwrap();
        assert!(md.contains("title = \"Al-Baqara\""));
    }
}

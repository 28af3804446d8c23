//! `ayat` command line interface.
//!
//! Usage:
//!   `ayat render <chapter:verse[-verse]> [--trans <id>] [--hl <start-end>] [--mode <mode>] [--data <dir>]`
//!   `ayat translations [--data <dir>]`
//!   `ayat convert <verses.txt> <out_dir>`
//!   `ayat pages <verses.txt> <out_dir> [--date <YYYY-MM-DD>]`
//!   `ayat index <surahs.txt> <out_dir>`
//!
//! `render` is the authoring-time check: it resolves a reference exactly
//! the way the site build does and prints the fragment or the error the
//! build would surface.

// Authoring/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;

use ayat::config::Config;
use ayat::convert;
use ayat::resolver::{RenderMode, RenderRequest, VerseResolver};
use ayat::table::{translation_label, TranslationTable};

fn usage(program: &str) {
    let config = Config::default();
    eprintln!("{} {}", config.app_name(), config.app_version());
    eprintln!();
    eprintln!("Usage: {program} render <chapter:verse[-verse]> [options]");
    eprintln!("       {program} translations [--data <dir>]");
    eprintln!("       {program} convert <verses.txt> <out_dir>");
    eprintln!("       {program} pages <verses.txt> <out_dir> [--date <YYYY-MM-DD>]");
    eprintln!("       {program} index <surahs.txt> <out_dir>");
    eprintln!();
    eprintln!("render options:");
    eprintln!("  --trans <id>       translation identifier (default from config)");
    eprintln!("  --hl <start-end>   highlight span, 1-indexed inclusive characters");
    eprintln!("  --mode <mode>      quote | tooltip | inline | inline-hl (default quote)");
    eprintln!("  --data <dir>       verse data directory (default from AYAT_DATA_DIR)");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "render" => run_render(&args[2..]),
        "translations" => run_translations(&args[2..]),
        "convert" => run_convert(&args[2..]),
        "pages" => run_pages(&args[2..]),
        "index" => run_index(&args[2..]),
        _ => {
            usage(&args[0]);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_mode(raw: &str) -> Result<RenderMode> {
    match raw {
        "quote" => Ok(RenderMode::Quote),
        "tooltip" => Ok(RenderMode::Tooltip),
        "inline" => Ok(RenderMode::InlinePlain),
        "inline-hl" => Ok(RenderMode::InlineHighlighted),
        other => bail!("unknown mode {other:?}: expected quote, tooltip, inline, or inline-hl"),
    }
}

fn run_render(args: &[String]) -> Result<()> {
    let mut verse = None;
    let mut translation = None;
    let mut highlight = None;
    let mut mode = RenderMode::Quote;
    let mut data_dir = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--trans" => translation = Some(take_value(&mut iter, "--trans")?),
            "--hl" => highlight = Some(take_value(&mut iter, "--hl")?),
            "--mode" => mode = parse_mode(&take_value(&mut iter, "--mode")?)?,
            "--data" => data_dir = Some(PathBuf::from(take_value(&mut iter, "--data")?)),
            other if verse.is_none() => verse = Some(other.to_string()),
            other => bail!("unexpected argument {other:?}"),
        }
    }
    let Some(verse) = verse else {
        bail!("render needs a reference, e.g. `ayat render 2:255`")
    };

    let config = Config::load()?;
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.require_data_dir()?.clone(),
    };
    let table = TranslationTable::load_dir(&data_dir)
        .with_context(|| format!("loading verse data from {}", data_dir.display()))?;

    let resolver = VerseResolver::new(&table);
    let request = RenderRequest {
        verse: &verse,
        translation: translation.as_deref().or(Some(&config.default_translation)),
        highlight: highlight.as_deref(),
        mode,
    };
    let fragment = resolver.render(&request)?;
    println!("{fragment}");
    Ok(())
}

fn run_translations(args: &[String]) -> Result<()> {
    let mut data_dir = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => data_dir = Some(PathBuf::from(take_value(&mut iter, "--data")?)),
            other => bail!("unexpected argument {other:?}"),
        }
    }

    let config = Config::load()?;
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.require_data_dir()?.clone(),
    };
    let table = TranslationTable::load_dir(&data_dir)
        .with_context(|| format!("loading verse data from {}", data_dir.display()))?;

    let mut ids: Vec<&str> = table.translations().collect();
    ids.sort_unstable();
    for id in ids {
        println!("{}", translation_label(id));
    }
    Ok(())
}

fn run_pages(args: &[String]) -> Result<()> {
    let mut input = None;
    let mut out_dir = None;
    let mut date = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--date" => date = Some(take_value(&mut iter, "--date")?),
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other if out_dir.is_none() => out_dir = Some(PathBuf::from(other)),
            other => bail!("unexpected argument {other:?}"),
        }
    }
    let (Some(input), Some(out_dir)) = (input, out_dir) else {
        bail!("pages needs an input file and an output directory")
    };
    let date = date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    let summary = convert::verse_pages(&input, &out_dir, &date)?;
    println!(
        "wrote {} verse page(s), skipped {} line(s)",
        summary.written, summary.skipped
    );
    Ok(())
}

fn run_convert(args: &[String]) -> Result<()> {
    let [input, out_dir] = args else {
        bail!("convert needs an input file and an output directory")
    };
    let summary = convert::verses_to_json(&PathBuf::from(input), &PathBuf::from(out_dir))?;
    println!(
        "wrote {} chapter file(s), skipped {} line(s)",
        summary.written, summary.skipped
    );
    Ok(())
}

fn run_index(args: &[String]) -> Result<()> {
    let [input, out_dir] = args else {
        bail!("index needs an input file and an output directory")
    };
    let summary = convert::surah_index(&PathBuf::from(input), &PathBuf::from(out_dir))?;
    println!(
        "wrote {} surah page(s), skipped {} line(s)",
        summary.written, summary.skipped
    );
    Ok(())
}

fn take_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String> {
    iter.next()
        .map(ToString::to_string)
        .with_context(|| format!("{flag} needs a value"))
}

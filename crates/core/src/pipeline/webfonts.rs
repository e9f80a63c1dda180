//! Web font recompression: subset each TTF and compress it to WOFF2.

use std::{
    collections::BTreeSet,
    fs::{create_dir_all, read, read_to_string, remove_dir, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use font_subsetter::{DEFAULT_UNICODE_RANGE, Subsetter, parse_unicode_ranges, printable_ascii};
use font_woff2::{Compressor, compress_to_dir, web_path};
use log::{info, warn};

use crate::{
    config::PRE_HINT_SUFFIX,
    io::{glob_fonts, remove_if_exists, size_kb},
    parallel::{BatchResult, process_parallel_iter},
};

/// Scratch directory for subset TTFs, inside the web directory.
const STAGING_DIR: &str = ".subset";

#[derive(Debug, Clone)]
pub struct WebfontOptions {
    pub ttf_dir: PathBuf,
    pub web_dir: PathBuf,
    /// Used when no text source is given.
    pub unicode_range: String,
    /// Files whose characters define the subset.
    pub text_sources: Vec<PathBuf>,
    /// Print the plan without writing anything.
    pub dry_run: bool,
}

impl WebfontOptions {
    pub fn new(ttf_dir: impl Into<PathBuf>, web_dir: impl Into<PathBuf>) -> Self {
        Self {
            ttf_dir: ttf_dir.into(),
            web_dir: web_dir.into(),
            unicode_range: DEFAULT_UNICODE_RANGE.to_string(),
            text_sources: Vec::new(),
            dry_run: false,
        }
    }

    fn subsetter(&self) -> Result<Subsetter> {
        if self.text_sources.is_empty() {
            let ranges = parse_unicode_ranges(&self.unicode_range)?;
            Ok(Subsetter::web().with_unicode_ranges(ranges))
        } else {
            Ok(Subsetter::web().with_characters(build_character_set(&self.text_sources)))
        }
    }
}

/// Printable ASCII plus every character of the readable text sources.
///
/// Unreadable files are reported and skipped.
pub fn build_character_set(text_sources: &[PathBuf]) -> BTreeSet<char> {
    let mut chars: BTreeSet<char> = printable_ascii().collect();
    for path in text_sources {
        match read_to_string(path) {
            Ok(text) => chars.extend(text.chars()),
            Err(e) => warn!("Could not read {}: {e}", path.display()),
        }
    }
    chars
}

fn is_pre_hint(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(PRE_HINT_SUFFIX))
}

fn subset_one(
    ttf: &Path,
    subsetter: &Subsetter,
    staging: &Path,
    web_dir: &Path,
    compressor: &dyn Compressor,
) -> Result<PathBuf> {
    let file_name = ttf.file_name().with_context(|| format!("Invalid path: {}", ttf.display()))?;
    let data = read(ttf).with_context(|| format!("Failed to read font: {}", ttf.display()))?;
    let subset = subsetter
        .subset(&data)
        .with_context(|| format!("Failed to subset {}", ttf.display()))?;

    let staged = staging.join(file_name);
    write(&staged, &subset)
        .with_context(|| format!("Failed to write font: {}", staged.display()))?;
    let result = compress_to_dir(compressor, &staged, web_dir);
    remove_if_exists(&staged);

    let Some(woff2) = result? else {
        bail!("{} produced no output for {}", compressor.name(), ttf.display());
    };
    info!(
        "Subset {} ({:.1} KB -> {:.1} KB)",
        file_name.to_string_lossy(),
        size_kb(data.len()),
        size_kb(subset.len())
    );
    Ok(woff2)
}

/// Subset every TTF in `options.ttf_dir` and write WOFF2 files to
/// `options.web_dir`.
pub fn webfonts(options: &WebfontOptions, compressor: &dyn Compressor) -> Result<BatchResult> {
    if !options.ttf_dir.is_dir() {
        bail!("Fonts directory {} does not exist", options.ttf_dir.display());
    }
    let fonts: Vec<PathBuf> = glob_fonts(&options.ttf_dir, "*.ttf")?
        .into_iter()
        .filter(|path| !is_pre_hint(path))
        .collect();
    if fonts.is_empty() {
        bail!("No .ttf fonts found in {}", options.ttf_dir.display());
    }

    let subsetter = options.subsetter()?;
    let coverage = subsetter.characters().len();

    for ttf in &fonts {
        let target = web_path(ttf, &options.web_dir)?;
        println!("  {} → {} ({coverage} characters)", ttf.display(), target.display());
    }
    if options.dry_run {
        println!("Dry run: {} fonts, nothing written", fonts.len());
        return Ok(BatchResult { succeeded: fonts.len(), failed: 0 });
    }

    let staging = options.web_dir.join(STAGING_DIR);
    create_dir_all(&staging)
        .with_context(|| format!("Failed to create directory: {}", staging.display()))?;

    let result = process_parallel_iter("webfonts", &fonts, |ttf| {
        subset_one(ttf, &subsetter, &staging, &options.web_dir, compressor)
    });

    if let Err(e) = remove_dir(&staging) {
        warn!("Failed to remove {}: {e}", staging.display());
    }
    Ok(result)
}

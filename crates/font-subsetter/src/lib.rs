//! Web font subsetting wrapper around hb-subset with builder pattern.
//!
//! Operates purely on byte slices. The caller decides where the subset
//! comes from and where it goes.
//!
//! # Example
//!
//! ```no_run
//! use font_subsetter::{DEFAULT_UNICODE_RANGE, Subsetter, parse_unicode_ranges};
//!
//! let font_data: &[u8] = &[];
//!
//! // Latin-1 subset
//! let ranges = parse_unicode_ranges(DEFAULT_UNICODE_RANGE)?;
//! let subset = Subsetter::web().with_unicode_ranges(ranges).subset(font_data)?;
//!
//! // Only what a sample text needs
//! let subset = Subsetter::web().with_text("Ελληνικά and кириллица").subset(font_data)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use hb_subset::{Blob, FontFace, SubsetInput, Tag};

/// Range used when no text source is given.
pub const DEFAULT_UNICODE_RANGE: &str = "U+0000-00FF";

/// Tables that only add weight to a web font.
pub const WEB_DROP_TABLES: &[&[u8; 4]] = &[b"DSIG", b"FFTM"];

/// Layout features to retain for Latin, Greek and Cyrillic text.
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"aalt", b"c2sc", b"calt", b"case", b"ccmp", b"clig", b"dlig", b"dnom", b"frac", b"kern",
    b"liga", b"lnum", b"locl", b"mark", b"mkmk", b"numr", b"onum", b"ordn", b"pnum", b"rvrn",
    b"salt", b"sinf", b"smcp", b"ss01", b"ss02", b"ss03", b"ss04", b"subs", b"sups", b"tnum",
    b"zero",
];

/// Printable ASCII plus the whitespace controls, always kept in text subsets.
pub fn printable_ascii() -> impl Iterator<Item = char> {
    ('\u{20}'..='\u{7E}').chain(['\t', '\n', '\u{0B}', '\u{0C}', '\r'])
}

/// Parse a comma-separated list of `U+XXXX` or `U+XXXX-YYYY` ranges.
///
/// The `U+` prefix is case-insensitive and may be repeated on the end of a
/// range. Ranges must be ordered and inside the Unicode code space.
pub fn parse_unicode_ranges(spec: &str) -> Result<Vec<(u32, u32)>> {
    let mut ranges = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_codepoint(start, part)?, parse_codepoint(end, part)?),
            None => {
                let cp = parse_codepoint(part, part)?;
                (cp, cp)
            }
        };
        if start > end {
            bail!("Invalid Unicode range '{part}': start is after end");
        }
        ranges.push((start, end));
    }
    if ranges.is_empty() {
        bail!("Empty Unicode range '{spec}'");
    }
    Ok(ranges)
}

fn parse_codepoint(text: &str, part: &str) -> Result<u32> {
    let text = text.trim();
    let hex = text
        .strip_prefix("U+")
        .or_else(|| text.strip_prefix("u+"))
        .unwrap_or(text);
    let cp = u32::from_str_radix(hex, 16)
        .with_context(|| format!("Invalid Unicode range '{part}'. Expected e.g. U+0000-00FF."))?;
    if cp > 0x10FFFF {
        bail!("Invalid Unicode range '{part}': U+{cp:X} is outside the Unicode code space");
    }
    Ok(cp)
}

/// Font subsetter with builder pattern.
#[derive(Debug, Clone, Default)]
pub struct Subsetter {
    unicode_ranges: Vec<(u32, u32)>,
    characters: BTreeSet<char>,
    drop_tables: Vec<[u8; 4]>,
    retain_glyph_names: bool,
    layout_features: Vec<[u8; 4]>,
}

impl Subsetter {
    /// Creates a new subsetter with the standard [`LAYOUT_FEATURES`] and no
    /// coverage.
    pub fn new() -> Self {
        Self {
            layout_features: LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Creates a subsetter for web delivery: standard layout features,
    /// [`WEB_DROP_TABLES`] removed.
    pub fn web() -> Self {
        Self::new().drop_tables(WEB_DROP_TABLES.iter().map(|t| **t))
    }

    /// Adds inclusive code point ranges.
    pub fn with_unicode_ranges(mut self, ranges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.unicode_ranges.extend(ranges);
        self
    }

    /// Adds individual characters.
    pub fn with_characters(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.characters.extend(chars);
        self
    }

    /// Adds every character of `text` plus [`printable_ascii`].
    pub fn with_text(self, text: &str) -> Self {
        self.with_characters(text.chars().chain(printable_ascii()))
    }

    /// Adds tables to drop from the subset.
    pub fn drop_tables(mut self, tables: impl IntoIterator<Item = [u8; 4]>) -> Self {
        self.drop_tables.extend(tables);
        self
    }

    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Sets the layout features to retain in the subset.
    ///
    /// Replaces any previously configured layout features.
    pub fn with_layout_features(mut self, features: impl IntoIterator<Item = [u8; 4]>) -> Self {
        self.layout_features = features.into_iter().collect();
        self
    }

    /// Every character the subset asks for.
    pub fn characters(&self) -> BTreeSet<char> {
        let ranged = self
            .unicode_ranges
            .iter()
            .flat_map(|(start, end)| (*start..=*end).filter_map(char::from_u32));
        self.characters.iter().copied().chain(ranged).collect()
    }

    /// Subsets `data` and returns the new font.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = SubsetInput::new()?;

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for c in self.characters() {
                unicode_set.insert(c);
            }
        }

        {
            let mut drop_tables = input.drop_table_tag_set();
            for table in &self.drop_tables {
                drop_tables.insert(Tag::new(table));
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

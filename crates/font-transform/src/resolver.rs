//! Mapping characters to the Latin letter used for table lookups.

use std::collections::HashSet;

use font_container::{FontInstance, GlyphName};
use unicode_normalization::char::decompose_canonical;

use crate::tables::mapped_base;

/// Resolve `c` to its canonical Latin base letter.
///
/// Greek and Cyrillic analogues come first, then the first alphabetic
/// character of the canonical decomposition (`á` → `a`). Anything else is
/// returned unchanged.
pub fn base_letter(c: char) -> char {
    if let Some(base) = mapped_base(c) {
        return base;
    }

    let mut first_alpha = None;
    decompose_canonical(c, |d| {
        if first_alpha.is_none() && d.is_alphabetic() {
            first_alpha = Some(d);
        }
    });
    first_alpha.unwrap_or(c)
}

/// Each mapped glyph once, paired with the lowest code point reaching it.
pub(crate) fn glyphs_by_first_char(font: &FontInstance) -> Vec<(char, GlyphName)> {
    let mut seen = HashSet::new();
    font.cmap
        .chars()
        .filter(|(_, name)| seen.insert((*name).clone()))
        .map(|(c, name)| (c, name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(base_letter('á'), 'a');
        assert_eq!(base_letter('Ǻ'), 'A');
        assert_eq!(base_letter('ệ'), 'e');
    }

    #[test]
    fn test_cross_script() {
        assert_eq!(base_letter('Δ'), 'A');
        assert_eq!(base_letter('р'), 'p');
        assert_eq!(base_letter('ά'), 'α');
    }

    #[test]
    fn test_unchanged() {
        assert_eq!(base_letter('7'), '7');
        assert_eq!(base_letter('-'), '-');
        assert_eq!(base_letter('ß'), 'ß');
    }
}

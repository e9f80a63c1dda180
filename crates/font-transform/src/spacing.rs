//! Advance width adjustments.

use font_container::{FontInstance, GlyphName};
use log::info;

use crate::{
    resolver::{base_letter, glyphs_by_first_char},
    tables::micro_spacing,
};

const SPACE: u32 = 0x20;

/// The word space glyph: whatever U+0020 maps to, else a glyph named `space`.
pub fn space_glyph(font: &FontInstance) -> Option<GlyphName> {
    font.glyph_for_char(SPACE).cloned().or_else(|| {
        font.contains_glyph("space").then(|| GlyphName::new("space"))
    })
}

/// Scale every advance by `letter_factor`, and the word space by
/// `word_factor` instead. Left side bearings are kept.
pub fn apply_comfort_spacing(
    font: &mut FontInstance,
    letter_factor: f64,
    word_factor: f64,
) -> usize {
    let space = space_glyph(font);

    let mut changed = 0;
    for (name, metric) in font.metrics.iter_mut() {
        let factor = if space.as_ref() == Some(name) { word_factor } else { letter_factor };
        metric.set_advance((metric.advance as f64 * factor).round() as i64);
        changed += 1;
    }

    info!("Spacing: letters×{letter_factor:.2}, words×{word_factor:.2}");
    changed
}

/// Add per-letter advance nudges scaled by `level`. Returns the number of
/// glyphs changed.
pub fn apply_micro_spacing(font: &mut FontInstance, level: f64) -> usize {
    if level <= 0.0 {
        info!("Micro-spacing: skipped (level {level:.2})");
        return 0;
    }

    let upem = font.units_per_em() as f64;
    let mut affected = 0;
    for (c, name) in glyphs_by_first_char(font) {
        let Some(fraction) = micro_spacing(c).or_else(|| micro_spacing(base_letter(c))) else {
            continue;
        };
        let Some(metric) = font.metrics.get_mut(&name) else {
            continue;
        };
        let delta = (fraction * level * upem).round() as i64;
        metric.set_advance((metric.advance as i64).saturating_add(delta));
        affected += 1;
    }

    info!("Micro-spacing: applied to {affected} glyphs");
    affected
}

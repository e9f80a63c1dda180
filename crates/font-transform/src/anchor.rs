//! Optical entry anchoring.
//!
//! Points near the left edge of a letter are pulled further left, tapering
//! linearly to zero at the edge of the entry band. This gives each letter a
//! stronger visual starting stroke without touching its right side.

use font_container::{FontInstance, Glyph, Point};
use log::info;

use crate::{
    resolver::{base_letter, glyphs_by_first_char},
    tables::{anchor_strength, in_anchor_blocks},
};

/// Fraction of the glyph width, measured from its left edge, that moves.
pub const ENTRY_BAND: f64 = 0.18;

/// Shift the entry zone of every eligible glyph. Returns the number of
/// glyphs changed.
pub fn apply_optical_anchoring(font: &mut FontInstance, global_strength: f64) -> usize {
    if global_strength <= 0.0 {
        info!("Anchoring: skipped (global={global_strength:.2})");
        return 0;
    }

    let mut affected = 0;
    for (c, name) in glyphs_by_first_char(font) {
        if !in_anchor_blocks(c) {
            continue;
        }
        let Some(strength) = anchor_strength(base_letter(c)) else {
            continue;
        };
        if strength <= 0.0 {
            continue;
        }
        let Some(outline) = font.glyph_mut(&name).and_then(Glyph::outline_mut) else {
            continue;
        };
        let Some((x_min, x_max)) = outline.x_bounds() else {
            continue;
        };

        let width = (x_max - x_min).max(1) as f64;
        let scale = strength * global_strength;
        outline.map_points(|p| {
            Point::new(p.x.saturating_sub(entry_shift(p.x, x_min, width, scale)), p.y)
        });
        affected += 1;
    }

    info!("Anchoring: {affected} glyphs (global={global_strength:.2})");
    affected
}

/// Leftward shift for a point at `x`; zero outside the entry band.
fn entry_shift(x: i32, x_min: i32, width: f64, scale: f64) -> i32 {
    let ratio = (x - x_min) as f64 / width;
    if ratio > ENTRY_BAND {
        return 0;
    }
    let t = 1.0 - ratio / ENTRY_BAND;
    (scale * t * width).round() as i32
}

//! X-height raise for lowercase glyphs.

use font_container::{FontInstance, Glyph, Point};
use log::info;

use crate::resolver::glyphs_by_first_char;

/// Factors this close to 1.0 leave the font untouched.
const XHEIGHT_EPSILON: f64 = 1e-3;

/// Scale the vertical coordinates of lowercase glyphs by `factor`.
///
/// A glyph reached by several characters is scaled only if the lowest of
/// them is lowercase. Returns the number of glyphs changed.
pub fn apply_xheight(font: &mut FontInstance, factor: f64) -> usize {
    if (factor - 1.0).abs() < XHEIGHT_EPSILON {
        info!("X-height: skipped (factor {factor:.2})");
        return 0;
    }

    let mut affected = 0;
    for (c, name) in glyphs_by_first_char(font) {
        if !c.is_lowercase() {
            continue;
        }
        let Some(outline) = font.glyph_mut(&name).and_then(Glyph::outline_mut) else {
            continue;
        };
        outline.map_points(|p| Point::new(p.x, (p.y as f64 * factor).round() as i32));
        affected += 1;
    }

    info!("X-height: {affected} glyphs scaled ×{factor:.2}");
    affected
}

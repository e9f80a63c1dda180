//! Minus sign (U+2212) synthesis from an existing dash glyph.

use font_container::{FontInstance, GlyphName};
use log::info;

const MINUS_SIGN: u32 = 0x2212;
const MINUS_GLYPH: &str = "uni2212";

/// Glyphs whose shape can stand in for a minus sign, in preference order.
const MINUS_SOURCES: [&str; 4] = ["minus", "uni2212", "hyphen", "uni2010"];

/// Make sure U+2212 MINUS SIGN is mapped.
///
/// Clones the first available source glyph into `uni2212` with the same
/// metrics and maps the code point to it. Returns the source glyph used, or
/// `None` when the font already maps U+2212 or has no usable source.
pub fn ensure_minus_glyph(font: &mut FontInstance) -> Option<GlyphName> {
    if font.cmap.contains(MINUS_SIGN) {
        return None;
    }

    let source = MINUS_SOURCES.iter().find(|name| font.contains_glyph(name))?;
    let glyph = font.glyph(source)?.clone();
    let metric = font.metrics.get(source).unwrap_or_default();

    let target = GlyphName::new(MINUS_GLYPH);
    font.insert_glyph(target.clone(), glyph, metric);
    font.cmap.insert(MINUS_SIGN, target);

    info!("Minus: added {MINUS_GLYPH} from {source}");
    Some(GlyphName::new(*source))
}

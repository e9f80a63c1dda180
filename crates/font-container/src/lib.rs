//! Editable TrueType font model.
//!
//! [`load`] decodes a font into a [`FontInstance`] with named glyphs, metrics
//! and a character map; [`save`] encodes it back, rebuilding the outline and
//! metric tables while copying every other table unchanged.

mod cmap;
mod error;
mod glyph;
mod instance;
mod load;
mod metrics;
mod names;
mod rewrite;
mod save;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use cmap::CharacterMap;
pub use error::{Error, Result};
pub use glyph::{
    Anchor, Component, ComponentFlags, CompositeGlyph, Glyph, GlyphName, Outline, Point, Transform,
};
pub use instance::FontInstance;
pub use load::{from_bytes, load};
pub use metrics::{AdvanceWidthTable, Metric};
pub use names::{NameEntry, NameTable};
pub use rewrite::rewrite_font;
pub use save::{save, to_bytes};

pub use read_fonts;
pub use write_fonts;

//! The mutable in-memory font.

use indexmap::IndexMap;
use write_fonts::tables::{
    head::{Head, MacStyle},
    hhea::Hhea,
    maxp::Maxp,
    os2::{Os2, SelectionFlags},
    post::Post,
};

use crate::{
    cmap::CharacterMap,
    glyph::{Glyph, GlyphName},
    metrics::{AdvanceWidthTable, Metric},
    names::NameTable,
};

/// A decoded TrueType font.
///
/// Glyphs, metrics, the character map and names are editable models; the
/// remaining header tables are owned `write-fonts` tables. Tables the model
/// does not cover are kept as raw bytes in `source` and copied on save.
#[derive(Debug, Clone)]
pub struct FontInstance {
    pub(crate) source: Vec<u8>,
    pub(crate) glyphs: IndexMap<GlyphName, Glyph>,
    pub metrics: AdvanceWidthTable,
    pub cmap: CharacterMap,
    pub names: NameTable,
    pub head: Head,
    pub hhea: Hhea,
    pub maxp: Maxp,
    pub os2: Option<Os2>,
    pub post: Option<Post>,
}

impl FontInstance {
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    pub fn weight_class(&self) -> Option<u16> {
        self.os2.as_ref().map(|os2| os2.us_weight_class)
    }

    pub fn is_italic(&self) -> bool {
        match &self.os2 {
            Some(os2) => os2.fs_selection.contains(SelectionFlags::ITALIC),
            None => self.head.mac_style.contains(MacStyle::ITALIC),
        }
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph_order(&self) -> impl Iterator<Item = &GlyphName> {
        self.glyphs.keys()
    }

    pub fn glyph_index(&self, name: &str) -> Option<usize> {
        self.glyphs.get_index_of(name)
    }

    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    pub fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.glyphs.get_mut(name)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (&GlyphName, &Glyph)> {
        self.glyphs.iter()
    }

    pub fn contains_glyph(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    /// Insert a glyph with its metric.
    ///
    /// A new name is appended to the glyph order; an existing name keeps its
    /// position and gets the new outline and metric.
    pub fn insert_glyph(&mut self, name: GlyphName, glyph: Glyph, metric: Metric) {
        self.metrics.insert(name.clone(), metric);
        self.glyphs.insert(name, glyph);
    }

    /// The glyph mapped from `codepoint`, if any.
    pub fn glyph_for_char(&self, codepoint: u32) -> Option<&GlyphName> {
        self.cmap.get(codepoint)
    }
}

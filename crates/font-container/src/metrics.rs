//! Horizontal metrics keyed by glyph name.

use indexmap::IndexMap;

use crate::glyph::GlyphName;

/// Advance width and left side bearing of one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metric {
    pub advance: u16,
    pub lsb: i16,
}

impl Metric {
    pub const fn new(advance: u16, lsb: i16) -> Self {
        Self { advance, lsb }
    }

    /// Replace the advance width, clamped to `1..=u16::MAX`.
    pub fn set_advance(&mut self, advance: i64) {
        self.advance = advance.clamp(1, u16::MAX as i64) as u16;
    }
}

/// Glyph name to horizontal metric, in glyph order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceWidthTable {
    metrics: IndexMap<GlyphName, Metric>,
}

impl AdvanceWidthTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Metric> {
        self.metrics.get(name).copied()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Metric> {
        self.metrics.get_mut(name)
    }

    pub fn advance(&self, name: &str) -> Option<u16> {
        self.get(name).map(|m| m.advance)
    }

    /// Insert or replace the metric for `name`.
    pub fn insert(&mut self, name: GlyphName, metric: Metric) {
        self.metrics.insert(name, metric);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlyphName, &Metric)> {
        self.metrics.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&GlyphName, &mut Metric)> {
        self.metrics.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_advance_clamps() {
        let mut metric = Metric::new(500, 20);
        metric.set_advance(-40);
        assert_eq!(metric.advance, 1);
        metric.set_advance(70_000);
        assert_eq!(metric.advance, u16::MAX);
        assert_eq!(metric.lsb, 20);
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = AdvanceWidthTable::new();
        table.insert("a".into(), Metric::new(500, 10));
        table.insert("a".into(), Metric::new(600, 10));
        assert_eq!(table.len(), 1);
        assert_eq!(table.advance("a"), Some(600));
        assert_eq!(table.advance("b"), None);
    }
}

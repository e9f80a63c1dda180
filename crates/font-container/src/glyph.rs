//! Glyph names and outlines.

use std::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    ops::Deref,
};

pub use write_fonts::tables::glyf::{Anchor, Component, ComponentFlags, CompositeGlyph, Transform};

/// A glyph name, unique within a [`FontInstance`](crate::FontInstance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphName(String);

impl GlyphName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for GlyphName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlyphName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GlyphName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A point in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A TrueType outline stored the way the `glyf` table lays it out: one flat
/// point array, a parallel on-curve flag array, and the index of the last
/// point of every contour.
///
/// The point and flag arrays always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    points: Vec<Point>,
    on_curve: Vec<bool>,
    end_points: Vec<usize>,
    instructions: Vec<u8>,
}

impl Outline {
    /// Build an outline from contours of `(point, on_curve)` pairs.
    pub fn from_contours<C>(contours: impl IntoIterator<Item = C>) -> Self
    where
        C: IntoIterator<Item = (Point, bool)>,
    {
        let mut outline = Self::default();
        for contour in contours {
            let before = outline.points.len();
            for (point, on_curve) in contour {
                outline.points.push(point);
                outline.on_curve.push(on_curve);
            }
            if outline.points.len() > before {
                outline.end_points.push(outline.points.len() - 1);
            }
        }
        outline
    }

    pub fn with_instructions(mut self, instructions: Vec<u8>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn on_curve(&self) -> &[bool] {
        &self.on_curve
    }

    pub fn end_points(&self) -> &[usize] {
        &self.end_points
    }

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate contours as `(points, on_curve)` slices.
    pub fn contours(&self) -> impl Iterator<Item = (&[Point], &[bool])> {
        let mut start = 0;
        self.end_points.iter().map(move |&end| {
            let range = start..end + 1;
            start = end + 1;
            (&self.points[range.clone()], &self.on_curve[range])
        })
    }

    /// Horizontal extent of the points, `None` for an empty outline.
    pub fn x_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.points.iter().map(|p| p.x))
    }

    /// Vertical extent of the points, `None` for an empty outline.
    pub fn y_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.points.iter().map(|p| p.y))
    }

    /// Replace the coordinates, contour ends and flags in one step.
    ///
    /// The flag array is padded with its last value (or truncated) so it
    /// always matches the point count, and contour ends are clamped to the
    /// new point range.
    pub fn set_coordinates(
        &mut self,
        points: Vec<Point>,
        mut end_points: Vec<usize>,
        mut on_curve: Vec<bool>,
    ) {
        let len = points.len();
        if on_curve.len() < len {
            let fill = on_curve.last().copied().unwrap_or(true);
            on_curve.resize(len, fill);
        } else {
            on_curve.truncate(len);
        }

        end_points.retain(|&end| end < len);
        end_points.dedup();
        if len > 0 && end_points.last() != Some(&(len - 1)) {
            end_points.push(len - 1);
        }

        self.points = points;
        self.on_curve = on_curve;
        self.end_points = end_points;
    }

    /// Map every point in place; the point count never changes.
    pub fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        for point in &mut self.points {
            *point = f(*point);
        }
    }
}

fn bounds(values: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// A glyph in the glyph table.
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    /// No outline data (e.g. `space`).
    Empty,
    /// A glyph with its own contours.
    Simple(Outline),
    /// A glyph built from references to other glyphs.
    Composite(CompositeGlyph),
}

impl Glyph {
    pub fn outline(&self) -> Option<&Outline> {
        match self {
            Glyph::Simple(outline) => Some(outline),
            _ => None,
        }
    }

    pub fn outline_mut(&mut self) -> Option<&mut Outline> {
        match self {
            Glyph::Simple(outline) => Some(outline),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Glyph::Composite(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Outline {
        Outline::from_contours([vec![
            (Point::new(0, 0), true),
            (Point::new(100, 0), true),
            (Point::new(100, 100), true),
            (Point::new(0, 100), false),
        ]])
    }

    #[test]
    fn test_from_contours_end_points() {
        let outline = Outline::from_contours([
            vec![(Point::new(0, 0), true), (Point::new(1, 1), true)],
            vec![],
            vec![(Point::new(5, 5), true)],
        ]);
        assert_eq!(outline.end_points(), &[1, 2]);
        assert_eq!(outline.contours().count(), 2);
    }

    #[test]
    fn test_bounds() {
        let outline = square();
        assert_eq!(outline.x_bounds(), Some((0, 100)));
        assert_eq!(outline.y_bounds(), Some((0, 100)));
        assert_eq!(Outline::default().x_bounds(), None);
    }

    #[test]
    fn test_set_coordinates_pads_flags() {
        let mut outline = square();
        let mut points = outline.points().to_vec();
        points.push(Point::new(50, 50));
        outline.set_coordinates(points, vec![3], vec![true, true, true, false]);

        assert_eq!(outline.points().len(), 5);
        assert_eq!(outline.on_curve().len(), 5);
        assert_eq!(outline.on_curve()[4], false);
        assert_eq!(outline.end_points(), &[3, 4]);
    }

    #[test]
    fn test_set_coordinates_truncates_flags() {
        let mut outline = square();
        let points = outline.points()[..2].to_vec();
        outline.set_coordinates(points, vec![3], vec![true, false, true, true]);

        assert_eq!(outline.on_curve(), &[true, false]);
        assert_eq!(outline.end_points(), &[1]);
    }

    #[test]
    fn test_map_points_keeps_flags() {
        let mut outline = square();
        outline.map_points(|p| Point::new(p.x + 10, p.y));
        assert_eq!(outline.x_bounds(), Some((10, 110)));
        assert_eq!(outline.on_curve(), &[true, true, true, false]);
    }

    #[test]
    fn test_glyph_name_equality() {
        let name = GlyphName::new("hyphen");
        assert_eq!(name, "hyphen");
        assert_eq!(name.to_string(), "hyphen");
    }
}

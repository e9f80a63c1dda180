//! Encoding a [`FontInstance`] back into a TrueType file.

use std::{collections::HashMap, fs, path::Path};

use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::CurvePoint,
    types::{GlyphId, NameId, Tag},
};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        cmap::{Cmap, CmapSubtable, EncodingRecord, PlatformId},
        glyf::{Anchor, Bbox, Contour, GlyfLocaBuilder, Glyph as WriteGlyph, SimpleGlyph},
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        name::{Name, NameRecord},
        post::Post,
    },
};

use crate::{
    error::{Error, Result},
    glyph::{Glyph, Outline, Point},
    instance::FontInstance,
};

/// Tables whose content is invalidated by outline or width edits.
const DROPPED_TABLES: [Tag; 4] = [
    Tag::new(b"hdmx"),
    Tag::new(b"LTSH"),
    Tag::new(b"VDMX"),
    Tag::new(b"DSIG"),
];

/// Nesting limit when resolving composite glyphs.
const MAX_COMPONENT_DEPTH: usize = 8;

/// Encode and write `font` to `path`.
pub fn save(font: &FontInstance, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = to_bytes(font)?;
    fs::write(path, data).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    debug!("Saved {}", path.display());
    Ok(())
}

/// Encode `font` into a TrueType binary.
pub fn to_bytes(font: &FontInstance) -> Result<Vec<u8>> {
    let source = FontRef::new(&font.source)?;
    let mut builder = FontBuilder::new();

    for record in source.table_directory.table_records() {
        let tag = record.tag();
        if DROPPED_TABLES.contains(&tag) {
            continue;
        }
        if let Some(table_data) = source.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    let resolver = Resolver::new(font);

    let mut glyf_builder = GlyfLocaBuilder::new();
    for (index, glyph) in font.glyphs.values().enumerate() {
        let glyph = match glyph {
            Glyph::Empty => WriteGlyph::Empty,
            Glyph::Simple(outline) if outline.is_empty() => WriteGlyph::Empty,
            Glyph::Simple(outline) => WriteGlyph::Simple(simple_glyph(outline)),
            Glyph::Composite(composite) => {
                let mut composite = composite.clone();
                composite.bbox = resolver.bbox(index).unwrap_or_default();
                WriteGlyph::Composite(composite)
            }
        };
        glyf_builder.add_glyph(&glyph)?;
    }
    let (glyf, loca, loca_format) = glyf_builder.build();
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;

    let stats = resolver.stats();

    let mut head = font.head.clone();
    let font_bbox = stats.bbox.unwrap_or_default();
    head.x_min = font_bbox.x_min;
    head.y_min = font_bbox.y_min;
    head.x_max = font_bbox.x_max;
    head.y_max = font_bbox.y_max;
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };
    builder.add_table(&head)?;

    let h_metrics: Vec<LongMetric> = font
        .glyphs
        .keys()
        .map(|name| {
            let metric = font.metrics.get(name).unwrap_or_default();
            LongMetric { advance: metric.advance, side_bearing: metric.lsb }
        })
        .collect();

    let mut hhea = font.hhea.clone();
    hhea.number_of_h_metrics = h_metrics.len() as u16;
    hhea.advance_width_max = h_metrics.iter().map(|m| m.advance).max().unwrap_or(0).into();
    let extents = horizontal_extents(font, &resolver, &h_metrics);
    if let Some((min_lsb, min_rsb, max_extent)) = extents {
        hhea.min_left_side_bearing = min_lsb.into();
        hhea.min_right_side_bearing = min_rsb.into();
        hhea.x_max_extent = max_extent.into();
    }
    builder.add_table(&hhea)?;
    builder.add_table(&Hmtx::new(h_metrics, Vec::new()))?;

    let mut maxp = font.maxp.clone();
    maxp.num_glyphs = font.glyphs.len() as u16;
    if maxp.max_points.is_some() {
        maxp.max_points = Some(stats.max_points);
        maxp.max_contours = Some(stats.max_contours);
        maxp.max_composite_points = Some(stats.max_composite_points);
        maxp.max_composite_contours = Some(stats.max_composite_contours);
        maxp.max_component_elements = Some(stats.max_component_elements);
        maxp.max_component_depth = Some(stats.max_component_depth);
    }
    builder.add_table(&maxp)?;

    let mappings: Vec<(char, GlyphId)> = font
        .cmap
        .chars()
        .filter_map(|(c, name)| {
            font.glyphs.get_index_of(name.as_str()).map(|gid| (c, GlyphId::new(gid as u32)))
        })
        .collect();
    let mut cmap = Cmap::from_mappings(mappings).map_err(|_| Error::CmapBuild)?;
    let sequences = variation_sequences(&source);
    if !sequences.is_empty() {
        debug!("Keeping {} variation sequence subtable(s)", sequences.len());
        let at = cmap
            .encoding_records
            .iter()
            .take_while(|r| r.platform_id == PlatformId::Unicode)
            .count();
        cmap.encoding_records.splice(at..at, sequences);
    }
    builder.add_table(&cmap)?;

    if let Some(post) = &font.post {
        builder.add_table(&post_with_names(post, font.glyphs.keys().map(|n| n.as_str())))?;
    }

    if let Some(os2) = &font.os2 {
        builder.add_table(os2)?;
    }

    if !font.names.entries().is_empty() {
        let mut entries: Vec<_> = font.names.entries().iter().collect();
        entries.sort_by_key(|e| e.sort_key());
        let records: Vec<NameRecord> = entries
            .into_iter()
            .map(|e| {
                NameRecord::new(
                    e.platform_id,
                    e.encoding_id,
                    e.language_id,
                    NameId::new(e.name_id),
                    e.value.clone().into(),
                )
            })
            .collect();
        builder.add_table(&Name::new(records))?;
    }

    Ok(builder.build())
}

/// Format 14 subtables of the source `cmap`. Glyph ids stay valid because
/// edits only replace glyphs in place or append them.
fn variation_sequences(source: &FontRef) -> Vec<EncodingRecord> {
    let Ok(cmap) = source.cmap() else {
        return Vec::new();
    };
    let owned: Cmap = cmap.to_owned_table();
    owned
        .encoding_records
        .into_iter()
        .filter(|r| matches!(&*r.subtable, CmapSubtable::Format14(_)))
        .collect()
}

/// A version 2 `post` table naming `order`, with the header of `post`.
fn post_with_names<'a>(post: &Post, order: impl IntoIterator<Item = &'a str>) -> Post {
    let mut rebuilt = Post::new_v2(order.into_iter().collect::<Vec<_>>());
    rebuilt.italic_angle = post.italic_angle;
    rebuilt.underline_position = post.underline_position;
    rebuilt.underline_thickness = post.underline_thickness;
    rebuilt.is_fixed_pitch = post.is_fixed_pitch;
    rebuilt.min_mem_type42 = post.min_mem_type42;
    rebuilt.max_mem_type42 = post.max_mem_type42;
    rebuilt.min_mem_type1 = post.min_mem_type1;
    rebuilt.max_mem_type1 = post.max_mem_type1;
    rebuilt
}

fn saturate(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn simple_glyph(outline: &Outline) -> SimpleGlyph {
    let contours: Vec<Contour> = outline
        .contours()
        .map(|(points, flags)| {
            points
                .iter()
                .zip(flags)
                .map(|(p, &on_curve)| CurvePoint { x: saturate(p.x), y: saturate(p.y), on_curve })
                .collect::<Vec<_>>()
                .into()
        })
        .collect();

    SimpleGlyph {
        bbox: outline_bbox(outline.points()).unwrap_or_default(),
        contours,
        instructions: outline.instructions().to_vec(),
    }
}

fn outline_bbox(points: &[Point]) -> Option<Bbox> {
    let (first, rest) = points.split_first()?;
    let mut bbox = (first.x, first.y, first.x, first.y);
    for p in rest {
        bbox.0 = bbox.0.min(p.x);
        bbox.1 = bbox.1.min(p.y);
        bbox.2 = bbox.2.max(p.x);
        bbox.3 = bbox.3.max(p.y);
    }
    Some(Bbox {
        x_min: saturate(bbox.0),
        y_min: saturate(bbox.1),
        x_max: saturate(bbox.2),
        y_max: saturate(bbox.3),
    })
}

/// `(min lsb, min rsb, max x extent)` over glyphs with outlines.
fn horizontal_extents(
    font: &FontInstance,
    resolver: &Resolver,
    h_metrics: &[LongMetric],
) -> Option<(i16, i16, i16)> {
    let mut result: Option<(i32, i32, i32)> = None;
    for (index, metric) in h_metrics.iter().enumerate() {
        if matches!(font.glyphs.get_index(index), Some((_, Glyph::Empty)) | None) {
            continue;
        }
        let Some(bbox) = resolver.bbox(index) else {
            continue;
        };
        let width = bbox.x_max as i32 - bbox.x_min as i32;
        let lsb = metric.side_bearing as i32;
        let rsb = metric.advance as i32 - lsb - width;
        let extent = lsb + width;
        result = Some(match result {
            None => (lsb, rsb, extent),
            Some((a, b, c)) => (a.min(lsb), b.min(rsb), c.max(extent)),
        });
    }
    result.map(|(a, b, c)| (saturate(a), saturate(b), saturate(c)))
}

/// Flattened view of a glyph, used for bounds and `maxp` statistics.
#[derive(Debug, Default, Clone)]
struct Resolved {
    points: Vec<(f64, f64)>,
    contours: usize,
    depth: u16,
}

#[derive(Debug, Default)]
struct Stats {
    bbox: Option<Bbox>,
    max_points: u16,
    max_contours: u16,
    max_composite_points: u16,
    max_composite_contours: u16,
    max_component_elements: u16,
    max_component_depth: u16,
}

/// Resolves composite glyphs against the glyph order of a font.
struct Resolver<'a> {
    font: &'a FontInstance,
    cache: HashMap<usize, Option<Resolved>>,
}

impl<'a> Resolver<'a> {
    fn new(font: &'a FontInstance) -> Self {
        let mut resolver = Self { font, cache: HashMap::new() };
        for index in 0..font.glyphs.len() {
            let resolved = resolver.resolve(index, 0);
            resolver.cache.insert(index, resolved);
        }
        resolver
    }

    fn resolve(&mut self, index: usize, depth: usize) -> Option<Resolved> {
        if let Some(cached) = self.cache.get(&index) {
            return cached.clone();
        }
        if depth > MAX_COMPONENT_DEPTH {
            return None;
        }

        let font = self.font;
        let (_, glyph) = font.glyphs.get_index(index)?;
        match glyph {
            Glyph::Empty => None,
            Glyph::Simple(outline) if outline.is_empty() => None,
            Glyph::Simple(outline) => Some(Resolved {
                points: outline.points().iter().map(|p| (p.x as f64, p.y as f64)).collect(),
                contours: outline.end_points().len(),
                depth: 0,
            }),
            Glyph::Composite(composite) => {
                let mut resolved = Resolved::default();
                for component in composite.components() {
                    let child_index = component.glyph.to_u16() as usize;
                    let Some(child) = self.resolve(child_index, depth + 1) else {
                        continue;
                    };
                    let (dx, dy) = match component.anchor {
                        Anchor::Offset { x, y } => (x as f64, y as f64),
                        Anchor::Point { .. } => (0.0, 0.0),
                    };
                    let t = &component.transform;
                    let (xx, yx) = (t.xx.to_f32() as f64, t.yx.to_f32() as f64);
                    let (xy, yy) = (t.xy.to_f32() as f64, t.yy.to_f32() as f64);
                    resolved.points.extend(
                        child
                            .points
                            .iter()
                            .map(|&(x, y)| (xx * x + xy * y + dx, yx * x + yy * y + dy)),
                    );
                    resolved.contours += child.contours;
                    resolved.depth = resolved.depth.max(child.depth + 1);
                }
                (!resolved.points.is_empty()).then_some(resolved)
            }
        }
    }

    fn resolved(&self, index: usize) -> Option<&Resolved> {
        self.cache.get(&index).and_then(Option::as_ref)
    }

    fn bbox(&self, index: usize) -> Option<Bbox> {
        let points: Vec<Point> = self
            .resolved(index)?
            .points
            .iter()
            .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .collect();
        outline_bbox(&points)
    }

    fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for (index, glyph) in self.font.glyphs.values().enumerate() {
            if let Some(bbox) = self.bbox(index) {
                stats.bbox = Some(match stats.bbox {
                    None => bbox,
                    Some(acc) => acc.union(bbox),
                });
            }
            let Some(resolved) = self.resolved(index) else {
                continue;
            };
            let points = resolved.points.len().min(u16::MAX as usize) as u16;
            let contours = resolved.contours.min(u16::MAX as usize) as u16;
            match glyph {
                Glyph::Composite(composite) => {
                    stats.max_composite_points = stats.max_composite_points.max(points);
                    stats.max_composite_contours = stats.max_composite_contours.max(contours);
                    stats.max_component_elements =
                        stats.max_component_elements.max(composite.components().len() as u16);
                    stats.max_component_depth = stats.max_component_depth.max(resolved.depth);
                }
                _ => {
                    stats.max_points = stats.max_points.max(points);
                    stats.max_contours = stats.max_contours.max(contours);
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(40_000), i16::MAX);
        assert_eq!(saturate(-40_000), i16::MIN);
        assert_eq!(saturate(-12), -12);
    }

    #[test]
    fn test_outline_bbox() {
        let points = [Point::new(10, -5), Point::new(-20, 30), Point::new(5, 5)];
        let bbox = outline_bbox(&points).unwrap();
        assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (-20, -5, 10, 30));
        assert!(outline_bbox(&[]).is_none());
    }
}

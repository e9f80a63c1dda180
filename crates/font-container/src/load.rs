//! Decoding a TrueType file into a [`FontInstance`].

use std::{collections::HashSet, fs, path::Path, result};

use indexmap::IndexMap;
use log::debug;
use read_fonts::{
    FontData, FontRef, ReadError, TableProvider,
    tables::glyf::Glyph as ReadGlyph,
    types::{GlyphId, GlyphId16},
};
use write_fonts::{
    from_obj::{FromObjRef, ToOwnedTable},
    tables::glyf::CompositeGlyph,
};

use crate::{
    cmap::{self, CharacterMap},
    error::{Error, Result},
    glyph::{Glyph, GlyphName, Outline, Point},
    instance::FontInstance,
    metrics::{AdvanceWidthTable, Metric},
    names::{NameEntry, NameTable},
};

/// Read and decode the font at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<FontInstance> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let font = from_bytes(data)?;
    debug!("Loaded {} ({} glyphs)", path.display(), font.glyph_count());
    Ok(font)
}

/// Decode a font from its binary representation.
pub fn from_bytes(data: Vec<u8>) -> Result<FontInstance> {
    let font = FontRef::new(&data)?;

    let head = require(font.head(), "head")?.to_owned_table();
    let hhea = require(font.hhea(), "hhea")?.to_owned_table();
    let maxp_table = require(font.maxp(), "maxp")?;
    let num_glyphs = maxp_table.num_glyphs() as u32;
    let maxp = maxp_table.to_owned_table();
    let os2 = optional(font.os2())?.map(|t| t.to_owned_table());
    let post_table = optional(font.post())?;
    let post = post_table.as_ref().map(|t| t.to_owned_table());

    let hmtx = require(font.hmtx(), "hmtx")?;
    let glyf = require(font.glyf(), "glyf")?;
    let loca = require(font.loca(None), "loca")?;
    let cmap_table = require(font.cmap(), "cmap")?;

    let names = glyph_names(num_glyphs, |gid| {
        post_table
            .as_ref()
            .and_then(|post| post.glyph_name(GlyphId16::new(gid as u16)))
            .map(str::to_string)
    });

    let mut glyphs = IndexMap::with_capacity(names.len());
    let mut metrics = AdvanceWidthTable::new();
    for (gid, name) in names.iter().enumerate() {
        let gid = GlyphId::new(gid as u32);
        let glyph = match loca.get_glyf(gid, &glyf)? {
            None => Glyph::Empty,
            Some(ReadGlyph::Simple(simple)) => {
                let points: Vec<Point> =
                    simple.points().map(|p| Point::new(p.x as i32, p.y as i32)).collect();
                let on_curve: Vec<bool> = simple.points().map(|p| p.on_curve).collect();
                let end_points: Vec<usize> =
                    simple.end_pts_of_contours().iter().map(|e| e.get() as usize).collect();

                let mut outline = Outline::default().with_instructions(simple.instructions().to_vec());
                outline.set_coordinates(points, end_points, on_curve);
                Glyph::Simple(outline)
            }
            Some(ReadGlyph::Composite(composite)) => {
                Glyph::Composite(CompositeGlyph::from_obj_ref(&composite, FontData::new(&[])))
            }
        };

        let advance = hmtx.advance(gid).unwrap_or(0);
        let lsb = hmtx.side_bearing(gid).unwrap_or(0);
        metrics.insert(name.clone(), Metric::new(advance, lsb));
        glyphs.insert(name.clone(), glyph);
    }

    let cmap: CharacterMap = cmap::read_mappings(&cmap_table)
        .into_iter()
        .filter_map(|(cp, gid)| names.get(gid as usize).map(|name| (cp, name.clone())))
        .collect();

    let names = match optional(font.name())? {
        Some(name) => {
            let entries = name
                .name_record()
                .iter()
                .filter_map(|record| {
                    let value = record.string(name.string_data()).ok()?.chars().collect();
                    Some(NameEntry {
                        platform_id: record.platform_id(),
                        encoding_id: record.encoding_id(),
                        language_id: record.language_id(),
                        name_id: record.name_id().to_u16(),
                        value,
                    })
                })
                .collect();
            NameTable::new(entries)
        }
        None => NameTable::default(),
    };

    Ok(FontInstance {
        source: data,
        glyphs,
        metrics,
        cmap,
        names,
        head,
        hhea,
        maxp,
        os2,
        post,
    })
}

/// Unique glyph names in glyph order.
///
/// Missing names become `glyph{gid:05}`; repeated names get a `.n` suffix.
fn glyph_names(num_glyphs: u32, lookup: impl Fn(u32) -> Option<String>) -> Vec<GlyphName> {
    let mut seen = HashSet::new();
    (0..num_glyphs)
        .map(|gid| {
            let base = lookup(gid)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("glyph{gid:05}"));
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{n}");
                n += 1;
            }
            GlyphName::new(name)
        })
        .collect()
}

fn require<T>(table: result::Result<T, ReadError>, tag: &'static str) -> Result<T> {
    table.map_err(|e| match e {
        ReadError::TableIsMissing(_) => Error::MissingTable(tag),
        other => Error::Parse(other),
    })
}

fn optional<T>(table: result::Result<T, ReadError>) -> Result<Option<T>> {
    match table {
        Ok(t) => Ok(Some(t)),
        Err(ReadError::TableIsMissing(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_names_fallback_and_dedup() {
        let source = [Some("a"), None, Some("a"), Some(""), Some("a")];
        let names = glyph_names(5, |gid| source[gid as usize].map(str::to_string));
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["a", "glyph00001", "a.1", "glyph00003", "a.2"]);
    }
}

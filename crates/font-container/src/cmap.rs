//! Character map and `cmap` subtable extraction.

use std::collections::BTreeMap;

use read_fonts::tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId};

use crate::glyph::GlyphName;

/// Unicode code point to glyph name, iterated in ascending code point order.
///
/// Several code points may map to the same glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterMap {
    entries: BTreeMap<u32, GlyphName>,
}

impl CharacterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, codepoint: u32) -> Option<&GlyphName> {
        self.entries.get(&codepoint)
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.entries.contains_key(&codepoint)
    }

    pub fn insert(&mut self, codepoint: u32, name: GlyphName) -> Option<GlyphName> {
        self.entries.insert(codepoint, name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &GlyphName)> {
        self.entries.iter().map(|(cp, name)| (*cp, name))
    }

    /// Entries whose code point is a valid `char`, ascending.
    pub fn chars(&self) -> impl Iterator<Item = (char, &GlyphName)> {
        self.entries
            .iter()
            .filter_map(|(cp, name)| char::from_u32(*cp).map(|c| (c, name)))
    }
}

impl FromIterator<(u32, GlyphName)> for CharacterMap {
    fn from_iter<T: IntoIterator<Item = (u32, GlyphName)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Read `(codepoint, glyph id)` pairs from the best Unicode subtable.
///
/// Preference: format 12 (Unicode or 3/10), format 4 (Unicode or 3/1), then
/// the first subtable that parses.
pub(crate) fn read_mappings(cmap: &ReadCmap) -> Vec<(u32, u32)> {
    find_best_subtable(cmap).map(|s| iter_subtable(&s)).unwrap_or_default()
}

fn find_best_subtable<'a>(cmap: &'a ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    let records = cmap.encoding_records();

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 10))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format12(_))
        {
            return Some(subtable);
        }
    }

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 1))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format4(_))
        {
            return Some(subtable);
        }
    }

    records.iter().find_map(|r| {
        r.subtable(cmap.offset_data()).ok().filter(|s| {
            matches!(
                s,
                CmapSubtable::Format4(_) | CmapSubtable::Format6(_) | CmapSubtable::Format12(_)
            )
        })
    })
}

fn iter_subtable(subtable: &CmapSubtable) -> Vec<(u32, u32)> {
    let mut mappings = Vec::new();

    match subtable {
        CmapSubtable::Format4(f4) => {
            let end_codes = f4.end_code();
            let start_codes = f4.start_code();
            let id_deltas = f4.id_delta();
            let id_range_offsets = f4.id_range_offsets();
            let glyph_id_array = f4.glyph_id_array();

            let seg_count = f4.seg_count_x2() as usize / 2;
            for seg in 0..seg_count {
                let end_code = end_codes.get(seg).map(|v| v.get()).unwrap_or(0xFFFF);
                let start_code = start_codes.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_delta = id_deltas.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_range_offset = id_range_offsets.get(seg).map(|v| v.get()).unwrap_or(0);

                if start_code == 0xFFFF || start_code > end_code {
                    continue;
                }

                for cp in start_code..=end_code {
                    let gid = if id_range_offset == 0 {
                        ((cp as i32 + id_delta as i32) & 0xFFFF) as u32
                    } else {
                        let index = (id_range_offset as usize / 2 + (cp - start_code) as usize)
                            .checked_sub(seg_count - seg);
                        match index.and_then(|i| glyph_id_array.get(i)).map(|g| g.get()) {
                            Some(0) | None => 0,
                            Some(gid) => ((gid as i32 + id_delta as i32) & 0xFFFF) as u32,
                        }
                    };

                    if gid != 0 {
                        mappings.push((cp as u32, gid));
                    }
                }
            }
        }
        CmapSubtable::Format12(f12) => {
            for group in f12.groups() {
                let start = group.start_char_code();
                let end = group.end_char_code();
                let mut gid = group.start_glyph_id();
                for cp in start..=end {
                    if gid != 0 {
                        mappings.push((cp, gid));
                    }
                    gid += 1;
                }
            }
        }
        CmapSubtable::Format6(f6) => {
            let first = f6.first_code() as u32;
            for (i, gid) in f6.glyph_id_array().iter().enumerate() {
                let gid = gid.get();
                if gid != 0 {
                    mappings.push((first + i as u32, gid as u32));
                }
            }
        }
        _ => {}
    }

    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_ascending() {
        let map: CharacterMap = [
            (0x62, GlyphName::new("b")),
            (0x41, GlyphName::new("A")),
            (0x61, GlyphName::new("a")),
        ]
        .into_iter()
        .collect();

        let order: Vec<u32> = map.iter().map(|(cp, _)| cp).collect();
        assert_eq!(order, vec![0x41, 0x61, 0x62]);
    }

    #[test]
    fn test_chars_skips_surrogates() {
        let map: CharacterMap =
            [(0xD800, GlyphName::new("bad")), (0x61, GlyphName::new("a"))].into_iter().collect();
        let chars: Vec<char> = map.chars().map(|(c, _)| c).collect();
        assert_eq!(chars, vec!['a']);
    }
}

//! Synthetic TrueType fonts for tests.

use std::collections::HashMap;

use font_types::{FWord, Fixed, LongDateTime, Tag, UfWord};
use read_fonts::{
    tables::glyf::CurvePoint,
    types::{GlyphId, GlyphId16, NameId},
};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, GlyfLocaBuilder,
            Glyph, SimpleGlyph, Transform,
        },
        head::{Flags, Head, MacStyle},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::{Os2, SelectionFlags},
        post::Post,
    },
};

use crate::{FontInstance, from_bytes};

enum Shape {
    Empty,
    Contours(Vec<Vec<(i16, i16)>>),
    Components(Vec<(String, i16, i16)>),
}

struct TestGlyph {
    name: String,
    shape: Shape,
    advance: u16,
    lsb: Option<i16>,
}

/// Builder for small TrueType fonts with named glyphs.
///
/// Starts with an empty `.notdef`. Units per em is 1000 unless changed.
pub struct TestFont {
    glyphs: Vec<TestGlyph>,
    cmap: Vec<(u32, String)>,
    names: Vec<(u16, String)>,
    raw: Vec<(Tag, Vec<u8>)>,
    units_per_em: u16,
    os2: bool,
    win_ascent: u16,
    win_descent: u16,
    weight_class: u16,
}

impl Default for TestFont {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFont {
    pub fn new() -> Self {
        Self {
            glyphs: vec![TestGlyph {
                name: ".notdef".to_string(),
                shape: Shape::Empty,
                advance: 500,
                lsb: None,
            }],
            cmap: Vec::new(),
            names: vec![
                (1, "Test Sans".to_string()),
                (2, "Regular".to_string()),
                (4, "Test Sans Regular".to_string()),
                (6, "TestSans-Regular".to_string()),
            ],
            raw: Vec::new(),
            units_per_em: 1000,
            os2: true,
            win_ascent: 900,
            win_descent: 200,
            weight_class: 400,
        }
    }

    pub fn units_per_em(mut self, upem: u16) -> Self {
        self.units_per_em = upem;
        self
    }

    /// A glyph with closed contours of on-curve points.
    pub fn glyph(mut self, name: &str, contours: &[&[(i16, i16)]], advance: u16) -> Self {
        let contours = contours.iter().map(|c| c.to_vec()).collect();
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            shape: Shape::Contours(contours),
            advance,
            lsb: None,
        });
        self
    }

    /// A single rectangular contour.
    pub fn rect(
        self,
        name: &str,
        x_min: i16,
        y_min: i16,
        x_max: i16,
        y_max: i16,
        advance: u16,
    ) -> Self {
        self.glyph(
            name,
            &[&[(x_min, y_min), (x_max, y_min), (x_max, y_max), (x_min, y_max)]],
            advance,
        )
    }

    pub fn empty(mut self, name: &str, advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            shape: Shape::Empty,
            advance,
            lsb: Some(0),
        });
        self
    }

    /// A composite of earlier glyphs placed at offsets.
    pub fn composite(mut self, name: &str, components: &[(&str, i16, i16)], advance: u16) -> Self {
        let components =
            components.iter().map(|(n, dx, dy)| (n.to_string(), *dx, *dy)).collect();
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            shape: Shape::Components(components),
            advance,
            lsb: None,
        });
        self
    }

    /// Map a code point to a glyph added earlier or later.
    pub fn map(mut self, codepoint: u32, name: &str) -> Self {
        self.cmap.push((codepoint, name.to_string()));
        self
    }

    pub fn name(mut self, name_id: u16, value: &str) -> Self {
        self.names.retain(|(id, _)| *id != name_id);
        self.names.push((name_id, value.to_string()));
        self
    }

    pub fn win_metrics(mut self, ascent: u16, descent: u16) -> Self {
        self.win_ascent = ascent;
        self.win_descent = descent;
        self
    }

    pub fn weight_class(mut self, weight: u16) -> Self {
        self.weight_class = weight;
        self
    }

    pub fn without_os2(mut self) -> Self {
        self.os2 = false;
        self
    }

    /// Add a table as opaque bytes.
    pub fn raw_table(mut self, tag: &[u8; 4], data: Vec<u8>) -> Self {
        self.raw.push((Tag::new(tag), data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let gids: HashMap<&str, u16> = self
            .glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), i as u16))
            .collect();

        let mut bounds: Vec<Option<Bbox>> = Vec::with_capacity(self.glyphs.len());
        let mut glyf_builder = GlyfLocaBuilder::new();
        for glyph in &self.glyphs {
            let (glyph, bbox) = match &glyph.shape {
                Shape::Empty => (Glyph::Empty, None),
                Shape::Contours(contours) => {
                    let bbox = points_bbox(contours.iter().flatten().copied());
                    let contours: Vec<Contour> = contours
                        .iter()
                        .map(|c| {
                            c.iter()
                                .map(|&(x, y)| CurvePoint::on_curve(x, y))
                                .collect::<Vec<_>>()
                                .into()
                        })
                        .collect();
                    let simple = SimpleGlyph {
                        bbox: bbox.unwrap_or_default(),
                        contours,
                        instructions: vec![],
                    };
                    (Glyph::Simple(simple), bbox)
                }
                Shape::Components(components) => {
                    let placed: Vec<(Component, Bbox)> = components
                        .iter()
                        .map(|(name, dx, dy)| {
                            let gid = *gids.get(name.as_str()).expect("component glyph exists");
                            let child = bounds
                                .get(gid as usize)
                                .copied()
                                .flatten()
                                .unwrap_or_default();
                            let component = Component {
                                glyph: GlyphId16::new(gid),
                                anchor: Anchor::Offset { x: *dx, y: *dy },
                                flags: ComponentFlags::default(),
                                transform: Transform::default(),
                            };
                            let bbox = Bbox {
                                x_min: child.x_min + dx,
                                y_min: child.y_min + dy,
                                x_max: child.x_max + dx,
                                y_max: child.y_max + dy,
                            };
                            (component, bbox)
                        })
                        .collect();
                    let mut iter = placed.into_iter();
                    let (first, first_bbox) = iter.next().expect("at least one component");
                    let mut composite = CompositeGlyph::new(first, first_bbox);
                    let mut bbox = first_bbox;
                    for (component, component_bbox) in iter {
                        composite.add_component(component, component_bbox);
                        bbox = bbox.union(component_bbox);
                    }
                    (Glyph::Composite(composite), Some(bbox))
                }
            };
            glyf_builder.add_glyph(&glyph).expect("valid glyph");
            bounds.push(bbox);
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let font_bbox = bounds
            .iter()
            .flatten()
            .copied()
            .reduce(Bbox::union)
            .unwrap_or_default();

        let head = Head {
            font_revision: Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            magic_number: 0x5F0F3CF5,
            flags: Flags::empty(),
            units_per_em: self.units_per_em,
            created: LongDateTime::new(0),
            modified: LongDateTime::new(0),
            x_min: font_bbox.x_min,
            y_min: font_bbox.y_min,
            x_max: font_bbox.x_max,
            y_max: font_bbox.y_max,
            mac_style: MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: match loca_format {
                LocaFormat::Short => 0,
                LocaFormat::Long => 1,
            },
        };

        let h_metrics: Vec<LongMetric> = self
            .glyphs
            .iter()
            .zip(&bounds)
            .map(|(g, bbox)| LongMetric {
                advance: g.advance,
                side_bearing: g.lsb.unwrap_or_else(|| bbox.map(|b| b.x_min).unwrap_or(0)),
            })
            .collect();

        let hhea = Hhea {
            ascender: FWord::new(800),
            descender: FWord::new(-200),
            line_gap: FWord::new(0),
            advance_width_max: UfWord::new(h_metrics.iter().map(|m| m.advance).max().unwrap_or(0)),
            min_left_side_bearing: FWord::new(0),
            min_right_side_bearing: FWord::new(0),
            x_max_extent: FWord::new(font_bbox.x_max),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: h_metrics.len() as u16,
        };

        let max_points = self
            .glyphs
            .iter()
            .map(|g| match &g.shape {
                Shape::Contours(c) => c.iter().map(Vec::len).sum::<usize>() as u16,
                _ => 0,
            })
            .max()
            .unwrap_or(0);

        let maxp = Maxp {
            num_glyphs: self.glyphs.len() as u16,
            max_points: Some(max_points),
            max_contours: Some(4),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(2),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        };

        let glyph_names: Vec<&str> = self.glyphs.iter().map(|g| g.name.as_str()).collect();
        let mut post = Post::new_v2(glyph_names);
        post.underline_position = FWord::new(-100);
        post.underline_thickness = FWord::new(50);

        let cmap_mappings: Vec<(char, GlyphId)> = self
            .cmap
            .iter()
            .filter_map(|(cp, name)| {
                let gid = gids.get(name.as_str())?;
                Some((char::from_u32(*cp)?, GlyphId::new(*gid as u32)))
            })
            .collect();
        let cmap = Cmap::from_mappings(cmap_mappings).expect("cmap");

        let mut names = self.names.clone();
        names.sort_by_key(|(id, _)| *id);
        let name = Name::new(
            names
                .iter()
                .map(|(id, value)| {
                    NameRecord::new(3, 1, 0x409, NameId::new(*id), value.clone().into())
                })
                .collect(),
        );

        let mut builder = FontBuilder::new();
        for (tag, data) in &self.raw {
            builder.add_raw(*tag, data.clone());
        }
        builder.add_table(&head).unwrap();
        builder.add_table(&hhea).unwrap();
        builder.add_table(&Hmtx::new(h_metrics, vec![])).unwrap();
        builder.add_table(&maxp).unwrap();
        builder.add_table(&cmap).unwrap();
        builder.add_table(&post).unwrap();
        builder.add_table(&glyf).unwrap();
        builder.add_table(&loca).unwrap();
        builder.add_table(&name).unwrap();
        if self.os2 {
            builder.add_table(&self.make_os2()).unwrap();
        }
        builder.build()
    }

    /// Build and decode.
    pub fn instance(&self) -> FontInstance {
        from_bytes(self.build()).expect("test font decodes")
    }

    fn make_os2(&self) -> Os2 {
        Os2 {
            x_avg_char_width: 500,
            us_weight_class: self.weight_class,
            us_width_class: 5,
            fs_type: 0,
            y_subscript_x_size: 650,
            y_subscript_y_size: 600,
            y_subscript_x_offset: 0,
            y_subscript_y_offset: 75,
            y_superscript_x_size: 650,
            y_superscript_y_size: 600,
            y_superscript_x_offset: 0,
            y_superscript_y_offset: 350,
            y_strikeout_size: 50,
            y_strikeout_position: 300,
            s_family_class: 0,
            panose_10: [0; 10],
            ul_unicode_range_1: 0,
            ul_unicode_range_2: 0,
            ul_unicode_range_3: 0,
            ul_unicode_range_4: 0,
            ach_vend_id: Tag::new(b"NONE"),
            fs_selection: SelectionFlags::REGULAR,
            us_first_char_index: 0x20,
            us_last_char_index: 0x7E,
            s_typo_ascender: 800,
            s_typo_descender: -200,
            s_typo_line_gap: 0,
            us_win_ascent: self.win_ascent,
            us_win_descent: self.win_descent,
            ul_code_page_range_1: Some(0),
            ul_code_page_range_2: Some(0),
            sx_height: Some(500),
            s_cap_height: Some(700),
            us_default_char: Some(0),
            us_break_char: Some(0x20),
            us_max_context: Some(0),
            us_lower_optical_point_size: None,
            us_upper_optical_point_size: None,
        }
    }
}

fn points_bbox(points: impl Iterator<Item = (i16, i16)>) -> Option<Bbox> {
    points.fold(None, |acc, (x, y)| {
        Some(match acc {
            None => Bbox { x_min: x, y_min: y, x_max: x, y_max: y },
            Some(b) => Bbox {
                x_min: b.x_min.min(x),
                y_min: b.y_min.min(y),
                x_max: b.x_max.max(x),
                y_max: b.y_max.max(y),
            },
        })
    })
}

use font_container::{Glyph, Point, from_bytes, testing::TestFont, to_bytes};
use font_transform::{
    AnchorProfile, ENTRY_BAND, FontVersion, StyleNaming, apply_comfort_spacing,
    apply_micro_spacing, apply_naming, apply_optical_anchoring, apply_transforms, apply_xheight,
    ensure_minus_glyph, reconcile_win_metrics_in_file,
};
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::tables::os2::SelectionFlags;

fn points(font: &font_container::FontInstance, name: &str) -> Vec<Point> {
    font.glyph(name).and_then(Glyph::outline).expect("simple glyph").points().to_vec()
}

fn naming(style_key: &str, style_label: &str, weight: u16, italic: bool) -> StyleNaming {
    StyleNaming {
        family: "EasyType Focus".to_string(),
        style_key: style_key.to_string(),
        style_label: style_label.to_string(),
        weight,
        italic,
        version: FontVersion::parse("1.0.2", "1.002").unwrap(),
        vendor: "EASYTYPE".to_string(),
    }
}

fn latin_font() -> TestFont {
    TestFont::new()
        .empty("space", 260)
        .rect("hyphen", 40, 250, 280, 320, 320)
        .glyph("o", &[&[(0, 0), (90, 100), (500, 250), (1000, 500), (500, 700)]], 1100)
        .rect("H", 80, 0, 620, 700, 700)
        .rect("one", 100, 0, 400, 700, 560)
        .rect("m", 60, 0, 840, 500, 900)
        .rect("mdot", 60, 0, 840, 640, 900)
        .composite("Hbar", &[("H", 0, 0), ("hyphen", 100, 0)], 700)
        .map(0x20, "space")
        .map(0x2D, "hyphen")
        .map(0x31, "one")
        .map(0x48, "H")
        .map(0x6D, "m")
        .map(0x6F, "o")
        .map(0x1E3F, "mdot")
        .map(0x0126, "Hbar")
}

#[test]
fn test_anchoring_entry_shift() {
    let mut font = latin_font().instance();
    apply_optical_anchoring(&mut font, 0.25);

    let moved = points(&font, "o");
    assert_eq!(moved[0], Point::new(-80, 0));
    assert_eq!(moved[1], Point::new(50, 100));
    assert_eq!(moved[2], Point::new(500, 250));
    assert_eq!(moved[3], Point::new(1000, 500));
    assert_eq!(moved[4], Point::new(500, 700));
}

#[test]
fn test_anchoring_only_moves_entry_band() {
    let original = latin_font().instance();
    let mut font = original.clone();
    let anchored = apply_optical_anchoring(&mut font, 0.55);

    // o, H, m and mdot; digits have no anchor and composites are skipped.
    assert_eq!(anchored, 4);
    assert_eq!(points(&font, "one"), points(&original, "one"));
    assert_eq!(font.glyph("Hbar"), original.glyph("Hbar"));

    for name in ["o", "H", "m", "mdot"] {
        let before = points(&original, name);
        let after = points(&font, name);
        let outline = original.glyph(name).and_then(Glyph::outline).unwrap();
        let (x_min, x_max) = outline.x_bounds().unwrap();
        let width = (x_max - x_min).max(1) as f64;
        let strength = font_transform::tables::anchor_strength(
            font_transform::base_letter(char::from_u32(match name {
                "o" => 0x6F,
                "H" => 0x48,
                _ => 0x6D,
            })
            .unwrap()),
        )
        .unwrap();

        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a.y, b.y);
            let ratio = (b.x - x_min) as f64 / width;
            if ratio > ENTRY_BAND {
                assert_eq!(a.x, b.x);
            }
            let shift = (b.x - a.x) as f64;
            assert!(shift >= 0.0);
            assert!(shift <= (strength * 0.55 * width).round());
        }
    }
}

#[test]
fn test_xheight_identity_factor() {
    let original = latin_font().instance();
    let mut font = original.clone();
    assert_eq!(apply_xheight(&mut font, 1.0), 0);
    assert_eq!(apply_xheight(&mut font, 1.0005), 0);
    for name in ["o", "H", "m", "mdot", "one"] {
        assert_eq!(points(&font, name), points(&original, name));
    }
}

#[test]
fn test_xheight_scales_lowercase_only() {
    let mut font = latin_font().instance();
    let scaled = apply_xheight(&mut font, 1.10);

    assert_eq!(scaled, 3);
    let m = font.glyph("m").and_then(Glyph::outline).unwrap();
    assert_eq!(m.y_bounds(), Some((0, 550)));
    assert_eq!(m.x_bounds(), Some((60, 840)));
    let h = font.glyph("H").and_then(Glyph::outline).unwrap();
    assert_eq!(h.y_bounds(), Some((0, 700)));
}

#[test]
fn test_xheight_shared_glyph_follows_first_char() {
    let mut font = TestFont::new()
        .rect("o", 50, 0, 550, 500, 600)
        .map(0x4F, "o")
        .map(0x6F, "o")
        .instance();
    assert_eq!(apply_xheight(&mut font, 1.2), 0);
    let o = font.glyph("o").and_then(Glyph::outline).unwrap();
    assert_eq!(o.y_bounds(), Some((0, 500)));
}

#[test]
fn test_comfort_spacing() {
    let mut font = latin_font().instance();
    let lsb_before = font.metrics.get("o").unwrap().lsb;
    apply_comfort_spacing(&mut font, 1.06, 1.12);

    assert_eq!(font.metrics.advance("H"), Some(742));
    assert_eq!(font.metrics.advance("o"), Some(1166));
    assert_eq!(font.metrics.advance("space"), Some(291));
    assert_eq!(font.metrics.get("o").unwrap().lsb, lsb_before);
}

#[test]
fn test_comfort_spacing_clamps_to_one() {
    let mut font = TestFont::new().rect("i", 0, 0, 10, 500, 1).map(0x69, "i").instance();
    apply_comfort_spacing(&mut font, 0.1, 1.0);
    assert_eq!(font.metrics.advance("i"), Some(1));
}

#[test]
fn test_micro_spacing() {
    let mut font = latin_font().instance();
    let affected = apply_micro_spacing(&mut font, 1.0);

    // m, mdot (via base letter m), o and 1
    assert_eq!(affected, 4);
    assert_eq!(font.metrics.advance("m"), Some(910));
    assert_eq!(font.metrics.advance("mdot"), Some(910));
    assert_eq!(font.metrics.advance("o"), Some(1098));
    assert_eq!(font.metrics.advance("one"), Some(554));
    assert_eq!(font.metrics.advance("H"), Some(700));
}

#[test]
fn test_micro_spacing_disabled() {
    let mut font = latin_font().instance();
    assert_eq!(apply_micro_spacing(&mut font, 0.0), 0);
    assert_eq!(font.metrics.advance("m"), Some(900));
}

#[test]
fn test_naming_is_idempotent() {
    let mut font = latin_font().instance();
    let style = naming("BoldItalic", "Bold Italic", 700, true);

    apply_naming(&mut font, &style);
    let names = font.names.clone();
    let os2 = font.os2.clone().unwrap();
    let head = font.head.clone();

    apply_naming(&mut font, &style);
    assert_eq!(font.names, names);
    let after = font.os2.clone().unwrap();
    assert_eq!(after.us_weight_class, os2.us_weight_class);
    assert_eq!(after.fs_selection.bits(), os2.fs_selection.bits());
    assert_eq!(font.head.mac_style.bits(), head.mac_style.bits());
    assert_eq!(font.head.font_revision, head.font_revision);

    assert_eq!(font.names.get(1), Some("EasyType Focus"));
    assert_eq!(font.names.get(2), Some("Bold Italic"));
    assert_eq!(font.names.get(3), Some("1.002;EASYTYPE;EasyTypeFocus-BoldItalic"));
    assert_eq!(font.names.get(4), Some("EasyType Focus Bold Italic"));
    assert_eq!(font.names.get(5), Some("Version 1.002"));
    assert_eq!(font.names.get(6), Some("EasyTypeFocus-BoldItalic"));
    assert_eq!(font.names.get(16), Some("EasyType Focus"));
    assert_eq!(font.names.get(17), Some("Bold Italic"));
    assert_eq!(after.us_weight_class, 700);
    assert!(after.fs_selection.contains(SelectionFlags::ITALIC));
    assert!(after.fs_selection.contains(SelectionFlags::BOLD));
    assert!(font.is_italic());
}

#[test]
fn test_naming_keeps_geometry() {
    let original = latin_font().instance();
    let mut font = original.clone();
    apply_naming(&mut font, &naming("Regular", "Regular", 400, false));
    for name in ["o", "H", "m"] {
        assert_eq!(points(&font, name), points(&original, name));
    }
    assert_eq!(font.metrics, original.metrics);
}

#[test]
fn test_minus_from_hyphen() {
    let mut font = latin_font().instance();
    let source = ensure_minus_glyph(&mut font);

    assert_eq!(source.as_deref(), Some("hyphen"));
    assert_eq!(font.cmap.get(0x2212).map(|n| n.as_str()), Some("uni2212"));
    assert_eq!(font.metrics.advance("uni2212"), font.metrics.advance("hyphen"));
    assert_eq!(font.glyph("uni2212"), font.glyph("hyphen"));
    assert_eq!(font.glyph_order().last().map(|n| n.as_str()), Some("uni2212"));

    assert_eq!(ensure_minus_glyph(&mut font), None);
}

#[test]
fn test_minus_prefers_minus_glyph_and_replaces_in_place() {
    let mut font = TestFont::new()
        .rect("uni2212", 0, 0, 10, 10, 100)
        .rect("hyphen", 40, 250, 280, 320, 320)
        .rect("minus", 50, 240, 550, 300, 600)
        .instance();
    let count = font.glyph_count();

    assert_eq!(ensure_minus_glyph(&mut font).as_deref(), Some("minus"));
    assert_eq!(font.glyph_count(), count);
    assert_eq!(font.glyph_index("uni2212"), Some(1));
    assert_eq!(font.metrics.advance("uni2212"), Some(600));
}

#[test]
fn test_minus_without_source() {
    let mut font = TestFont::new().rect("a", 0, 0, 500, 500, 600).map(0x61, "a").instance();
    assert_eq!(ensure_minus_glyph(&mut font), None);
    assert!(!font.cmap.contains(0x2212));
}

#[test]
fn test_minus_survives_save() {
    let mut font = latin_font().instance();
    ensure_minus_glyph(&mut font);
    let data = to_bytes(&font).unwrap();
    let raw = FontRef::new(&data).unwrap();
    let gid = raw.cmap().unwrap().map_codepoint(0x2212u32).unwrap();
    let reloaded = from_bytes(data).unwrap();
    assert_eq!(reloaded.glyph_index("uni2212"), Some(gid.to_u32() as usize));
}

#[test]
fn test_reconcile_in_file_raises_ascent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hinted.ttf");
    let data = TestFont::new()
        .rect("b", 50, -150, 550, 900, 600)
        .map(0x62, "b")
        .win_metrics(800, 200)
        .build();
    std::fs::write(&path, &data).unwrap();

    let metrics = reconcile_win_metrics_in_file(&path).unwrap().unwrap();
    assert_eq!(metrics.ascent, 900);
    assert_eq!(metrics.descent, 200);

    let updated = std::fs::read(&path).unwrap();
    let font = FontRef::new(&updated).unwrap();
    assert_eq!(font.os2().unwrap().us_win_ascent(), 900);
    assert_eq!(font.os2().unwrap().us_win_descent(), 200);

    let before = FontRef::new(&data).unwrap();
    let glyf = Tag::new(b"glyf");
    assert_eq!(
        before.table_data(glyf).map(|d| AsRef::<[u8]>::as_ref(&d).to_vec()),
        font.table_data(glyf).map(|d| AsRef::<[u8]>::as_ref(&d).to_vec())
    );
}

#[test]
fn test_apply_transforms_report() {
    let mut font = latin_font().instance();
    let profile = AnchorProfile {
        anchor_strength: 0.40,
        xheight_factor: 1.06,
        letter_spacing_factor: 1.14,
        word_spacing_factor: 1.24,
        micro_spacing_level: 1.0,
    };
    let report = apply_transforms(&mut font, &profile, &naming("Regular", "Regular", 400, false));

    assert_eq!(report.anchored, 4);
    assert_eq!(report.xheight_scaled, 3);
    assert_eq!(report.spaced, font.glyph_count() - 1);
    assert_eq!(report.micro_spaced, 4);
    assert_eq!(report.minus_source.as_deref(), Some("hyphen"));

    // 260 × 1.24 = 322.4
    assert_eq!(font.metrics.advance("space"), Some(322));
    // 900 × 1.14 = 1026, then +10
    assert_eq!(font.metrics.advance("m"), Some(1036));

    let reloaded = from_bytes(to_bytes(&font).unwrap()).unwrap();
    assert_eq!(reloaded.names.get(6), Some("EasyTypeFocus-Regular"));
    assert_eq!(reloaded.metrics.advance("uni2212"), reloaded.metrics.advance("hyphen"));
}

#[test]
fn test_naming_survives_save() {
    // TestFont carries name IDs 1, 2, 4 and 6 only.
    let mut font = latin_font().instance();
    assert_eq!(font.names.get(3), None);
    apply_naming(&mut font, &naming("BoldItalic", "Bold Italic", 700, true));

    let data = to_bytes(&font).unwrap();
    let raw = FontRef::new(&data).unwrap();
    let os2 = raw.os2().unwrap();
    assert_eq!(os2.us_weight_class(), 700);
    assert_eq!(
        os2.fs_selection().bits(),
        SelectionFlags::BOLD.bits() | SelectionFlags::ITALIC.bits()
    );
    assert!((raw.head().unwrap().font_revision().to_f64() - 1.002).abs() < 1e-4);

    let reloaded = from_bytes(data).unwrap();
    let expected = [
        (1, "EasyType Focus"),
        (2, "Bold Italic"),
        (3, "1.002;EASYTYPE;EasyTypeFocus-BoldItalic"),
        (4, "EasyType Focus Bold Italic"),
        (5, "Version 1.002"),
        (6, "EasyTypeFocus-BoldItalic"),
        (16, "EasyType Focus"),
        (17, "Bold Italic"),
    ];
    for (id, value) in expected {
        assert_eq!(reloaded.names.get(id), Some(value), "name ID {id}");
    }
}

#[test]
fn test_identity_profile_keeps_outlines() {
    let original = latin_font().instance();
    let mut font = original.clone();
    apply_transforms(
        &mut font,
        &AnchorProfile::IDENTITY,
        &naming("Regular", "Regular", 400, false),
    );
    for name in ["o", "H", "m", "mdot", "one"] {
        assert_eq!(points(&font, name), points(&original, name));
    }
    assert_eq!(font.metrics.advance("o"), original.metrics.advance("o"));
}

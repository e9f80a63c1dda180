//! Style definitions shared by every family.

/// Font slant (upright or italic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slant {
    Upright,
    Italic,
}

impl Slant {
    pub const fn is_italic(self) -> bool {
        matches!(self, Slant::Italic)
    }
}

/// One style of the build matrix and the base file it derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleVariant {
    /// Used in file and PostScript names, e.g. "BoldItalic".
    pub key: &'static str,
    /// Used in the subfamily and full names, e.g. "Bold Italic".
    pub label: &'static str,
    pub weight: u16,
    pub slant: Slant,
    /// Base font file name, relative to the base URL and cache directory.
    pub base_file: &'static str,
}

impl StyleVariant {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        weight: u16,
        slant: Slant,
        base_file: &'static str,
    ) -> Self {
        Self { key, label, weight, slant, base_file }
    }

    pub const fn is_italic(&self) -> bool {
        self.slant.is_italic()
    }

    /// Look up a style by key, ignoring case.
    pub fn find(key: &str) -> Option<&'static StyleVariant> {
        STYLES.iter().find(|style| style.key.eq_ignore_ascii_case(key))
    }
}

/// The four styles every family is built in.
pub const STYLES: &[StyleVariant] = &[
    StyleVariant::new("Regular", "Regular", 400, Slant::Upright, "NotoSans-Regular.ttf"),
    StyleVariant::new("Italic", "Italic", 400, Slant::Italic, "NotoSans-Italic.ttf"),
    StyleVariant::new("Bold", "Bold", 700, Slant::Upright, "NotoSans-Bold.ttf"),
    StyleVariant::new("BoldItalic", "Bold Italic", 700, Slant::Italic, "NotoSans-BoldItalic.ttf"),
];

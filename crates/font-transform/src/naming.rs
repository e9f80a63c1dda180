//! Family naming, version and weight metadata.

use anyhow::{Result, bail};
use font_container::FontInstance;
use font_types::Fixed;
use log::info;
use write_fonts::tables::{head::MacStyle, os2::SelectionFlags};

/// Name table IDs.
const NAME_ID_FAMILY: u16 = 1;
const NAME_ID_SUBFAMILY: u16 = 2;
const NAME_ID_UNIQUE_ID: u16 = 3;
const NAME_ID_FULL_NAME: u16 = 4;
const NAME_ID_VERSION: u16 = 5;
const NAME_ID_POSTSCRIPT: u16 = 6;
const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;
const NAME_ID_TYPOGRAPHIC_SUBFAMILY: u16 = 17;

const WEIGHT_BOLD: u16 = 700;

/// Font version in display ("1.0.2") and decimal ("1.002") form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVersion {
    pub display: String,
    pub decimal: String,
}

impl FontVersion {
    /// Parse a decimal version such as `1.002`.
    pub fn parse(display: &str, decimal: &str) -> Result<Self> {
        let Some((major, minor)) = decimal.split_once('.') else {
            bail!("Invalid version '{decimal}'. Expected MAJOR.MINOR, e.g. 1.002.");
        };
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !digits(major) || !digits(minor) {
            bail!("Invalid version '{decimal}'. Expected MAJOR.MINOR, e.g. 1.002.");
        }
        Ok(Self { display: display.to_string(), decimal: decimal.to_string() })
    }

    /// Name ID 5 string, e.g. "Version 1.002".
    pub fn version_string(&self) -> String {
        format!("Version {}", self.decimal)
    }

    /// `head.fontRevision` value.
    pub fn revision(&self) -> Fixed {
        Fixed::from_f64(self.decimal.parse::<f64>().unwrap_or_default())
    }
}

/// Everything the naming patch writes for one family/style cell.
#[derive(Debug, Clone)]
pub struct StyleNaming {
    /// Family display name, e.g. "EasyType Sans".
    pub family: String,
    /// Style key used in file and PostScript names, e.g. "BoldItalic".
    pub style_key: String,
    /// Style display label, e.g. "Bold Italic".
    pub style_label: String,
    pub weight: u16,
    pub italic: bool,
    pub version: FontVersion,
    /// Vendor part of the unique ID.
    pub vendor: String,
}

impl StyleNaming {
    /// PostScript name: family without spaces, a hyphen, the style key.
    pub fn postscript_name(&self) -> String {
        format!("{}-{}", self.family.replace(' ', ""), self.style_key)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.family, self.style_label)
    }

    pub fn unique_id(&self) -> String {
        format!("{};{};{}", self.version.decimal, self.vendor, self.postscript_name())
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= WEIGHT_BOLD
    }
}

/// Write family/style names, weight class, style bits and revision.
///
/// Geometry is never touched and applying twice gives the same result.
pub fn apply_naming(font: &mut FontInstance, naming: &StyleNaming) {
    let names = &mut font.names;
    names.set_windows(NAME_ID_FAMILY, &naming.family);
    names.set_windows(NAME_ID_SUBFAMILY, &naming.style_label);
    names.set_windows(NAME_ID_UNIQUE_ID, naming.unique_id());
    names.set_windows(NAME_ID_FULL_NAME, naming.full_name());
    names.set_windows(NAME_ID_VERSION, naming.version.version_string());
    names.set_windows(NAME_ID_POSTSCRIPT, naming.postscript_name());
    names.set_windows(NAME_ID_TYPOGRAPHIC_FAMILY, &naming.family);
    names.set_windows(NAME_ID_TYPOGRAPHIC_SUBFAMILY, &naming.style_label);

    if let Some(os2) = font.os2.as_mut() {
        os2.us_weight_class = naming.weight;
        os2.fs_selection = selection_flags(os2.fs_selection, naming.italic, naming.is_bold());
    }

    font.head.mac_style = mac_style(font.head.mac_style, naming.italic, naming.is_bold());
    font.head.font_revision = naming.version.revision();

    info!(
        "Naming: {} (weight {}, {})",
        naming.full_name(),
        naming.weight,
        naming.version.version_string()
    );
}

fn selection_flags(current: SelectionFlags, italic: bool, bold: bool) -> SelectionFlags {
    let style_bits = SelectionFlags::ITALIC.bits()
        | SelectionFlags::BOLD.bits()
        | SelectionFlags::REGULAR.bits();
    let mut bits = current.bits() & !style_bits;
    if italic {
        bits |= SelectionFlags::ITALIC.bits();
    }
    if bold {
        bits |= SelectionFlags::BOLD.bits();
    }
    if !italic && !bold {
        bits |= SelectionFlags::REGULAR.bits();
    }
    SelectionFlags::from_bits_truncate(bits)
}

fn mac_style(current: MacStyle, italic: bool, bold: bool) -> MacStyle {
    let mut bits = current.bits() & !(MacStyle::BOLD.bits() | MacStyle::ITALIC.bits());
    if bold {
        bits |= MacStyle::BOLD.bits();
    }
    if italic {
        bits |= MacStyle::ITALIC.bits();
    }
    MacStyle::from_bits_truncate(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        let version = FontVersion::parse("1.0.2", "1.002").unwrap();
        assert_eq!(version.version_string(), "Version 1.002");
        assert!((version.revision().to_f64() - 1.002).abs() < 1e-4);
    }

    #[test]
    fn test_parse_version_invalid() {
        assert!(FontVersion::parse("1", "1").is_err());
        assert!(FontVersion::parse("1.x", "1.x").is_err());
        assert!(FontVersion::parse("", ".002").is_err());
    }

    #[test]
    fn test_selection_flags() {
        let flags = selection_flags(SelectionFlags::REGULAR, true, true);
        assert!(flags.contains(SelectionFlags::ITALIC));
        assert!(flags.contains(SelectionFlags::BOLD));
        assert!(!flags.contains(SelectionFlags::REGULAR));

        let flags = selection_flags(flags, false, false);
        assert!(flags.contains(SelectionFlags::REGULAR));
        assert!(!flags.contains(SelectionFlags::ITALIC));
    }

    #[test]
    fn test_selection_flags_keep_other_bits() {
        let current = SelectionFlags::from_bits_truncate(
            SelectionFlags::REGULAR.bits() | SelectionFlags::USE_TYPO_METRICS.bits(),
        );
        let flags = selection_flags(current, true, false);
        assert!(flags.contains(SelectionFlags::USE_TYPO_METRICS));
        assert!(flags.contains(SelectionFlags::ITALIC));
    }
}

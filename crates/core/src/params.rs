//! Parameters for a single (family, style) cell.

use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use font_transform::{AnchorProfile, FontVersion, StyleNaming};
use serde::{Deserialize, Serialize};

use crate::{families::FamilySpec, styles::StyleVariant};

/// Everything one cell build needs besides paths and tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellParams {
    pub family: String,
    /// Style key, e.g. "BoldItalic".
    pub style: String,
    pub weight: u16,
    pub anchor_strength: f64,
    pub xheight_factor: f64,
    pub letter_spacing_factor: f64,
    pub word_spacing_factor: f64,
    pub micro_spacing_level: f64,
}

impl CellParams {
    pub fn new(family: &FamilySpec, style: &StyleVariant) -> Self {
        Self {
            family: family.name.clone(),
            style: style.key.to_string(),
            weight: style.weight,
            anchor_strength: family.anchor_strength,
            xheight_factor: family.xheight_factor,
            letter_spacing_factor: family.letter_spacing_factor,
            word_spacing_factor: family.word_spacing_factor,
            micro_spacing_level: family.micro_spacing_level,
        }
    }

    /// Read parameters from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = read_to_string(path)
            .with_context(|| format!("Failed to read cell parameters: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid cell parameters: {}", path.display()))
    }

    pub fn style_variant(&self) -> Result<&'static StyleVariant> {
        StyleVariant::find(&self.style).with_context(|| format!("Unknown style '{}'", self.style))
    }

    pub fn profile(&self) -> AnchorProfile {
        AnchorProfile {
            anchor_strength: self.anchor_strength,
            xheight_factor: self.xheight_factor,
            letter_spacing_factor: self.letter_spacing_factor,
            word_spacing_factor: self.word_spacing_factor,
            micro_spacing_level: self.micro_spacing_level,
        }
    }

    pub fn naming(&self, version: &FontVersion, vendor: &str) -> Result<StyleNaming> {
        let style = self.style_variant()?;
        Ok(StyleNaming {
            family: self.family.clone(),
            style_key: style.key.to_string(),
            style_label: style.label.to_string(),
            weight: self.weight,
            italic: style.is_italic(),
            version: version.clone(),
            vendor: vendor.to_string(),
        })
    }

    /// Output file stem, e.g. "EasyTypeSans-BoldItalic".
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.family.replace(' ', ""), self.style)
    }

    /// Short label for progress output.
    pub fn label(&self) -> String {
        format!("{} {}", self.family, self.style)
    }
}

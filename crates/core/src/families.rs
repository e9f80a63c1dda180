//! Family definitions: the built-in set and optional JSON overrides.

use std::{collections::HashSet, fs::read_to_string, path::Path};

use anyhow::{Context, Result, bail};
use font_transform::AnchorProfile;
use log::debug;
use serde::{Deserialize, Serialize};

/// A named family and its transform strengths.
///
/// Family files are a JSON array of these objects. Unknown fields are
/// rejected so that typos do not silently fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilySpec {
    pub name: String,
    pub anchor_strength: f64,
    pub xheight_factor: f64,
    pub letter_spacing_factor: f64,
    pub word_spacing_factor: f64,
    pub micro_spacing_level: f64,
}

impl FamilySpec {
    pub fn profile(&self) -> AnchorProfile {
        AnchorProfile {
            anchor_strength: self.anchor_strength,
            xheight_factor: self.xheight_factor,
            letter_spacing_factor: self.letter_spacing_factor,
            word_spacing_factor: self.word_spacing_factor,
            micro_spacing_level: self.micro_spacing_level,
        }
    }

    /// Family name as used in file and PostScript names.
    pub fn file_prefix(&self) -> String {
        self.name.replace(' ', "")
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Family name must not be empty");
        }
        let values = [
            ("anchor_strength", self.anchor_strength),
            ("xheight_factor", self.xheight_factor),
            ("letter_spacing_factor", self.letter_spacing_factor),
            ("word_spacing_factor", self.word_spacing_factor),
            ("micro_spacing_level", self.micro_spacing_level),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                bail!("{}: {field} must be a finite number", self.name);
            }
        }
        for (field, value) in &values[1..4] {
            if *value <= 0.0 {
                bail!("{}: {field} must be positive, got {value}", self.name);
            }
        }
        Ok(())
    }
}

/// (name, anchor, x-height, letter spacing, word spacing, micro level)
const BUILTIN: &[(&str, f64, f64, f64, f64, f64)] = &[
    ("EasyType Sans", 0.25, 1.02, 1.06, 1.12, 0.8),
    ("EasyType Focus", 0.40, 1.06, 1.14, 1.24, 1.0),
    ("EasyType Dyslexic", 0.55, 1.10, 1.22, 1.32, 1.0),
];

/// The families built when no family file is given.
pub fn builtin_families() -> Vec<FamilySpec> {
    BUILTIN
        .iter()
        .map(|&(name, anchor, xheight, letter, word, micro)| FamilySpec {
            name: name.to_string(),
            anchor_strength: anchor,
            xheight_factor: xheight,
            letter_spacing_factor: letter,
            word_spacing_factor: word,
            micro_spacing_level: micro,
        })
        .collect()
}

/// Parse and validate a JSON family list.
pub fn parse_families(json: &str) -> Result<Vec<FamilySpec>> {
    let families: Vec<FamilySpec> =
        serde_json::from_str(json).context("Failed to parse family definitions")?;
    if families.is_empty() {
        bail!("Family file defines no families");
    }

    let mut seen = HashSet::new();
    for family in &families {
        family.validate()?;
        if !seen.insert(family.name.as_str()) {
            bail!("Family '{}' is defined twice", family.name);
        }
    }
    Ok(families)
}

/// Load families from a JSON file.
pub fn load_families(path: &Path) -> Result<Vec<FamilySpec>> {
    let json = read_to_string(path)
        .with_context(|| format!("Failed to read family file: {}", path.display()))?;
    let families =
        parse_families(&json).with_context(|| format!("Invalid family file: {}", path.display()))?;
    debug!("Loaded {} families from {}", families.len(), path.display());
    Ok(families)
}

/// Keep the families named in `names`, in the order given. An empty list
/// keeps everything.
pub fn select_families(families: Vec<FamilySpec>, names: &[String]) -> Result<Vec<FamilySpec>> {
    if names.is_empty() {
        return Ok(families);
    }
    names
        .iter()
        .map(|name| {
            families
                .iter()
                .find(|f| f.name == *name || f.file_prefix() == *name)
                .cloned()
                .with_context(|| format!("Unknown family '{name}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_families() {
        let families = builtin_families();
        assert_eq!(families.len(), 3);
        assert_eq!(families[0].name, "EasyType Sans");
        assert_eq!(families[0].file_prefix(), "EasyTypeSans");
        assert_eq!(families[2].profile().word_spacing_factor, 1.32);
        assert!(families.iter().all(|f| f.validate().is_ok()));
    }

    #[test]
    fn test_parse_families() {
        let json = r#"[{
            "name": "EasyType Calm",
            "anchor_strength": 0.1,
            "xheight_factor": 1.0,
            "letter_spacing_factor": 1.02,
            "word_spacing_factor": 1.05,
            "micro_spacing_level": 0.0
        }]"#;
        let families = parse_families(json).unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].profile().anchor_strength, 0.1);
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let json = r#"[{
            "name": "X", "anchor_strength": 0.1, "xheight_factor": 1.0,
            "letter_spacing_factor": 1.0, "word_spacing_factor": 1.0,
            "micro_spacing_level": 0.0, "xheight": 2.0
        }]"#;
        assert!(parse_families(json).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let json = r#"[{
            "name": "X", "anchor_strength": 0.1, "xheight_factor": 0.0,
            "letter_spacing_factor": 1.0, "word_spacing_factor": 1.0,
            "micro_spacing_level": 0.0
        }]"#;
        assert!(parse_families(json).is_err());
        assert!(parse_families("[]").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let one = r#"{"name": "X", "anchor_strength": 0.1, "xheight_factor": 1.0,
            "letter_spacing_factor": 1.0, "word_spacing_factor": 1.0,
            "micro_spacing_level": 0.0}"#;
        assert!(parse_families(&format!("[{one}, {one}]")).is_err());
    }

    #[test]
    fn test_select_families() {
        let selected = select_families(
            builtin_families(),
            &["EasyTypeDyslexic".to_string(), "EasyType Sans".to_string()],
        )
        .unwrap();
        let names: Vec<_> = selected.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["EasyType Dyslexic", "EasyType Sans"]);

        assert_eq!(select_families(builtin_families(), &[]).unwrap().len(), 3);
        assert!(select_families(builtin_families(), &["Nope".to_string()]).is_err());
    }
}

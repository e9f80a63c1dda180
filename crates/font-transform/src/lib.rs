//! Glyph and metric transforms for accessibility-tuned font variants.
//!
//! The transforms run in a fixed order: optical anchoring, x-height,
//! comfort spacing, micro-spacing, naming and minus synthesis. Each one is
//! also public on its own. Windows metrics are reconciled separately, after
//! hinting.

mod anchor;
mod metrics;
mod minus;
mod naming;
mod resolver;
mod spacing;
pub mod tables;
mod xheight;

use font_container::{FontInstance, GlyphName};

pub use anchor::{ENTRY_BAND, apply_optical_anchoring};
pub use metrics::{WinMetrics, reconcile_win_metrics, reconcile_win_metrics_in_file};
pub use minus::ensure_minus_glyph;
pub use naming::{FontVersion, StyleNaming, apply_naming};
pub use resolver::base_letter;
pub use spacing::{apply_comfort_spacing, apply_micro_spacing, space_glyph};
pub use xheight::apply_xheight;

/// Per-family transform strengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorProfile {
    /// Multiplier on every per-letter anchor strength.
    pub anchor_strength: f64,
    /// Vertical scale for lowercase glyphs.
    pub xheight_factor: f64,
    /// Advance width scale for every glyph except the word space.
    pub letter_spacing_factor: f64,
    /// Advance width scale for the word space.
    pub word_spacing_factor: f64,
    /// Multiplier on the micro-spacing nudges; zero disables them.
    pub micro_spacing_level: f64,
}

impl AnchorProfile {
    /// A profile that leaves geometry and metrics unchanged.
    pub const IDENTITY: Self = Self {
        anchor_strength: 0.0,
        xheight_factor: 1.0,
        letter_spacing_factor: 1.0,
        word_spacing_factor: 1.0,
        micro_spacing_level: 0.0,
    };
}

/// What each transform changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub anchored: usize,
    pub xheight_scaled: usize,
    pub spaced: usize,
    pub micro_spaced: usize,
    /// Source glyph cloned into `uni2212`, if any.
    pub minus_source: Option<GlyphName>,
}

/// Apply every transform to `font` in order.
pub fn apply_transforms(
    font: &mut FontInstance,
    profile: &AnchorProfile,
    naming: &StyleNaming,
) -> TransformReport {
    let anchored = apply_optical_anchoring(font, profile.anchor_strength);
    let xheight_scaled = apply_xheight(font, profile.xheight_factor);
    let spaced = apply_comfort_spacing(
        font,
        profile.letter_spacing_factor,
        profile.word_spacing_factor,
    );
    let micro_spaced = apply_micro_spacing(font, profile.micro_spacing_level);
    apply_naming(font, naming);
    let minus_source = ensure_minus_glyph(font);

    TransformReport { anchored, xheight_scaled, spaced, micro_spaced, minus_source }
}

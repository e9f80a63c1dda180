//! EasyType Core - reusable build pipeline logic for EasyType fonts.

pub mod config;
pub mod families;
pub mod io;
pub mod parallel;
pub mod params;
pub mod pipeline;
pub mod styles;
pub mod tools;

pub use families::{FamilySpec, builtin_families, load_families, select_families};
pub use params::CellParams;
pub use pipeline::{
    BaseSource, BuildSummary, CellJob, CellOutcome, CellSettings, CellState, PipelineContext,
    WebfontOptions, build, build_cell, build_matrix, clean, download, webfonts,
};
pub use styles::{STYLES, Slant, StyleVariant};
pub use tools::Toolchain;

pub use font_autohint::{Hinter, NoHinter, Ttfautohint};
pub use font_transform::{AnchorProfile, FontVersion, TransformReport};
pub use font_woff2::{Compressor, NoCompressor, Woff2Compress};

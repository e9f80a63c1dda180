//! CLI command implementations.

mod build;
mod transform;
mod webfonts;

use std::path::Path;

use anyhow::Result;
use easytype_core::{STYLES, pipeline};

pub use build::build;
pub use transform::{resolve_params, transform};
pub use webfonts::webfonts;

pub fn download(base_dir: &Path) -> Result<()> {
    let bases = pipeline::download(base_dir, STYLES)?;
    println!("All {} base fonts ready in {}/", bases.len(), base_dir.display());
    Ok(())
}

pub fn clean(ttf_dir: &Path, web_dir: &Path) -> Result<()> {
    pipeline::clean(ttf_dir, web_dir)?;
    Ok(())
}

//! External tool selection.

use font_autohint::{Hinter, NoHinter, Ttfautohint};
use font_woff2::{Compressor, NoCompressor, Woff2Compress};
use log::{info, warn};

/// The hinter and compressor a build runs with.
pub struct Toolchain {
    pub hinter: Box<dyn Hinter>,
    pub compressor: Box<dyn Compressor>,
}

impl Toolchain {
    pub fn new(hinter: impl Hinter + 'static, compressor: impl Compressor + 'static) -> Self {
        Self { hinter: Box::new(hinter), compressor: Box::new(compressor) }
    }

    /// No external tools: unhinted TTFs only.
    pub fn none() -> Self {
        Self::new(NoHinter, NoCompressor)
    }

    /// Find the installed tools. A disabled or missing tool becomes a no-op.
    pub fn discover(hint: bool, woff2: bool) -> Self {
        let hinter: Box<dyn Hinter> = match hint.then(Ttfautohint::discover).flatten() {
            Some(tool) => {
                info!("Hinting with {}", tool.binary().display());
                Box::new(tool)
            }
            None => {
                if hint {
                    warn!("ttfautohint not found; fonts will not be hinted");
                }
                Box::new(NoHinter)
            }
        };

        let compressor: Box<dyn Compressor> = match woff2.then(Woff2Compress::discover).flatten()
        {
            Some(tool) => {
                info!("Compressing with {}", tool.binary().display());
                Box::new(tool)
            }
            None => {
                if woff2 {
                    warn!("woff2_compress not found; skipping webfonts");
                }
                Box::new(NoCompressor)
            }
        };

        Self { hinter, compressor }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::none()
    }
}

use anyhow::{Result, bail};
use easytype_core::{
    NoCompressor, Woff2Compress,
    pipeline::{self, WebfontOptions},
};

/// Subset and compress every TTF in the options' TTF directory.
pub fn webfonts(options: WebfontOptions) -> Result<()> {
    if options.dry_run {
        pipeline::webfonts(&options, &NoCompressor)?;
        return Ok(());
    }

    let Some(compressor) = Woff2Compress::discover() else {
        bail!("woff2_compress not found. Install woff2 or set WOFF2_BIN.");
    };
    pipeline::webfonts(&options, &compressor)?.ok_or_bail("webfonts")?;
    println!("Webfonts written to {}/", options.web_dir.display());
    Ok(())
}

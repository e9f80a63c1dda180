//! WOFF2 compression through the external `woff2_compress` binary.
//!
//! `woff2_compress` takes a single TTF argument and writes `<name>.ttf.woff2`
//! wherever it sees fit. [`locate_output`] finds the result and
//! [`compress_to_dir`] moves it into the web directory as `<stem>.woff2`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use font_woff2::{Woff2Compress, compress_to_dir};
//!
//! if let Some(tool) = Woff2Compress::discover() {
//!     let ttf = Path::new("fonts/ttf/A-Regular.ttf");
//!     let woff2 = compress_to_dir(&tool, ttf, Path::new("fonts/web"))?;
//!     println!("{woff2:?}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::{
    env,
    fs::{copy, create_dir_all, remove_file, rename},
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, bail};
use log::{debug, warn};

/// Environment variable naming an explicit `woff2_compress` binary.
pub const WOFF2_ENV: &str = "WOFF2_BIN";

/// Last-resort location used by Homebrew on Apple silicon.
pub const HOMEBREW_WOFF2: &str = "/opt/homebrew/bin/woff2_compress";

/// Something that can turn a TTF into a WOFF2 file.
pub trait Compressor: Send + Sync {
    /// Short name for progress output.
    fn name(&self) -> &str;

    /// Compress `ttf` and return the path of the file it produced.
    ///
    /// `None` means the stage failed. Failures are logged, not propagated.
    fn compress(&self, ttf: &Path) -> Option<PathBuf>;
}

/// The `woff2_compress` command line tool.
#[derive(Debug, Clone)]
pub struct Woff2Compress {
    binary: PathBuf,
}

impl Woff2Compress {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    /// Locate the binary from `WOFF2_BIN`, `PATH`, then the Homebrew prefix.
    pub fn discover() -> Option<Self> {
        if let Some(path) = env::var_os(WOFF2_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(Self::new(path));
            }
            warn!("{WOFF2_ENV} points to {} which does not exist", path.display());
        }

        let on_path = env::var_os("PATH").and_then(|paths| {
            env::split_paths(&paths)
                .map(|dir| dir.join("woff2_compress"))
                .find(|path| path.is_file())
        });

        on_path
            .or_else(|| Some(PathBuf::from(HOMEBREW_WOFF2)).filter(|p| p.is_file()))
            .map(Self::new)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run(&self, ttf: &Path) -> Result<PathBuf> {
        let file_name = ttf
            .file_name()
            .with_context(|| format!("Invalid font path: {}", ttf.display()))?;
        let ttf_dir = parent_dir(ttf);

        debug!("Running {} in {}", self.binary.display(), ttf_dir.display());
        let status = Command::new(&self.binary)
            .arg(file_name)
            .current_dir(ttf_dir)
            .status()
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;

        if !status.success() {
            bail!("woff2_compress exited with {status}");
        }

        let cwd = env::current_dir().context("Failed to read the working directory")?;
        locate_output(ttf, &cwd)
            .with_context(|| format!("Could not locate .woff2 output for {}", ttf.display()))
    }
}

impl Compressor for Woff2Compress {
    fn name(&self) -> &str {
        "woff2_compress"
    }

    fn compress(&self, ttf: &Path) -> Option<PathBuf> {
        match self.run(ttf) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("WOFF2 skipped for {}: {e:#}", ttf.display());
                None
            }
        }
    }
}

/// Compressor used when WOFF2 output is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompressor;

impl Compressor for NoCompressor {
    fn name(&self) -> &str {
        "none"
    }

    fn compress(&self, _ttf: &Path) -> Option<PathBuf> {
        None
    }
}

/// Where a compressor may have left the output for `ttf`, in search order.
pub fn output_candidates(ttf: &Path, working_dir: &Path) -> Vec<PathBuf> {
    let Some(file_name) = ttf.file_name() else {
        return Vec::new();
    };
    let mut appended = file_name.to_os_string();
    appended.push(".woff2");

    vec![
        parent_dir(ttf).join(&appended),
        working_dir.join(&appended),
        ttf.with_extension("woff2"),
    ]
}

/// First existing output candidate for `ttf`.
pub fn locate_output(ttf: &Path, working_dir: &Path) -> Option<PathBuf> {
    output_candidates(ttf, working_dir).into_iter().find(|path| path.is_file())
}

/// WOFF2 file name for `ttf` inside `web_dir`: the stem plus `.woff2`.
pub fn web_path(ttf: &Path, web_dir: &Path) -> Result<PathBuf> {
    let mut name = ttf
        .file_stem()
        .with_context(|| format!("Invalid font path: {}", ttf.display()))?
        .to_os_string();
    name.push(".woff2");
    Ok(web_dir.join(name))
}

/// Compress `ttf` and move the result into `web_dir`.
///
/// Returns the final path, or `None` when the compressor produced nothing.
pub fn compress_to_dir(
    compressor: &dyn Compressor,
    ttf: &Path,
    web_dir: &Path,
) -> Result<Option<PathBuf>> {
    let target = web_path(ttf, web_dir)?;
    let Some(produced) = compressor.compress(ttf) else {
        return Ok(None);
    };

    create_dir_all(web_dir)
        .with_context(|| format!("Failed to create directory: {}", web_dir.display()))?;
    if produced != target {
        move_file(&produced, &target)?;
    }
    Ok(Some(target))
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if rename(from, to).is_ok() {
        return Ok(());
    }
    // Cross-device moves cannot rename.
    copy(from, to)
        .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
    remove_file(from).with_context(|| format!("Failed to remove {}", from.display()))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

//! TrueType hinting through the external `ttfautohint` binary.
//!
//! Hinting is optional in the build. Callers hold a [`Hinter`] and keep the
//! unhinted file whenever it reports failure.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use font_autohint::{Hinter, NoHinter, Ttfautohint};
//!
//! let hinter: Box<dyn Hinter> = match Ttfautohint::discover() {
//!     Some(tool) => Box::new(tool),
//!     None => Box::new(NoHinter),
//! };
//! let hinted = hinter.hint(Path::new("in.ttf"), Path::new("out.ttf"));
//! ```

use std::{
    env,
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, bail};
use log::{debug, warn};

/// Environment variable naming an explicit `ttfautohint` binary.
pub const TTFAUTOHINT_ENV: &str = "TTFAUTOHINT_BIN";

/// Flags passed before the input and output paths.
pub const TTFAUTOHINT_ARGS: &[&str] = &["--windows-compatibility", "--symbol", "--no-info"];

/// Something that can write a hinted copy of a TrueType file.
pub trait Hinter: Send + Sync {
    /// Short name for progress output.
    fn name(&self) -> &str;

    /// Hint `input` into `output`.
    ///
    /// Returns `true` only when a hinted file now exists at `output`.
    /// Failures are logged and never propagate.
    fn hint(&self, input: &Path, output: &Path) -> bool;
}

/// The `ttfautohint` command line tool.
#[derive(Debug, Clone)]
pub struct Ttfautohint {
    binary: PathBuf,
}

impl Ttfautohint {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    /// Locate the binary from `TTFAUTOHINT_BIN`, then `PATH`.
    pub fn discover() -> Option<Self> {
        if let Some(path) = env::var_os(TTFAUTOHINT_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(Self::new(path));
            }
            warn!("{TTFAUTOHINT_ENV} points to {} which does not exist", path.display());
        }
        find_in_path("ttfautohint").map(Self::new)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("Running {} on {}", self.binary.display(), input.display());
        let status = Command::new(&self.binary)
            .args(TTFAUTOHINT_ARGS)
            .arg(input)
            .arg(output)
            .status()
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;

        if !status.success() {
            bail!("ttfautohint exited with {status}");
        }
        if !output.exists() {
            bail!("ttfautohint reported success but wrote no {}", output.display());
        }
        Ok(())
    }
}

impl Hinter for Ttfautohint {
    fn name(&self) -> &str {
        "ttfautohint"
    }

    fn hint(&self, input: &Path, output: &Path) -> bool {
        match self.run(input, output) {
            Ok(()) => true,
            Err(e) => {
                warn!("Hinting skipped for {}: {e:#}", input.display());
                false
            }
        }
    }
}

/// Hinter used when hinting is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHinter;

impl Hinter for NoHinter {
    fn name(&self) -> &str {
        "none"
    }

    fn hint(&self, _input: &Path, _output: &Path) -> bool {
        false
    }
}

/// First regular file called `name` in a `PATH` directory.
pub fn find_in_path(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).map(|dir| dir.join(name.as_ref())).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_no_hinter_never_succeeds() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.ttf");
        let output = dir.path().join("out.ttf");
        fs::write(&input, b"font").unwrap();

        assert!(!NoHinter.hint(&input, &output));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_binary_fails() {
        let dir = TempDir::new().unwrap();
        let hinter = Ttfautohint::new(dir.path().join("no-such-tool"));
        assert!(!hinter.hint(&dir.path().join("in.ttf"), &dir.path().join("out.ttf")));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_requires_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.ttf");
        fs::write(&input, b"font").unwrap();

        // Arguments: three flags, then input and output.
        let copying = Ttfautohint::new(script(dir.path(), "copy.sh", r#"cp "$4" "$5""#));
        let output = dir.path().join("hinted.ttf");
        assert!(copying.hint(&input, &output));
        assert_eq!(fs::read(&output).unwrap(), b"font");

        let silent = Ttfautohint::new(script(dir.path(), "silent.sh", "exit 0"));
        assert!(!silent.hint(&input, &dir.path().join("missing.ttf")));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.ttf");
        let output = dir.path().join("out.ttf");
        fs::write(&input, b"font").unwrap();

        let failing = Ttfautohint::new(script(dir.path(), "fail.sh", r#"cp "$4" "$5"; exit 3"#));
        assert!(!failing.hint(&input, &output));
    }

    #[test]
    fn test_find_in_path_missing() {
        assert!(find_in_path("easytype-definitely-not-installed").is_none());
    }
}

//! Shared font I/O utilities.

use std::{
    fs::{create_dir_all, remove_file},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::glob;
use log::warn;

/// Find fonts matching a glob pattern in a directory, sorted by path.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut fonts: Vec<PathBuf> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    fonts.sort();
    Ok(fonts)
}

/// Create the parent directory of `path` if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Best-effort removal used when cleaning up after a failed step.
pub fn remove_if_exists(path: &Path) {
    if path.exists() {
        if let Err(e) = remove_file(path) {
            warn!("Failed to remove {}: {e}", path.display());
        }
    }
}

/// Human-readable file size in KB.
pub fn size_kb(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_glob_fonts_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["B-Regular.ttf", "A-Bold.ttf", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let fonts = glob_fonts(dir.path(), "*.ttf").unwrap();
        assert_eq!(fonts, vec![dir.path().join("A-Bold.ttf"), dir.path().join("B-Regular.ttf")]);
    }

    #[test]
    fn test_ensure_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fonts").join("ttf").join("A.ttf");
        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("fonts").join("ttf").is_dir());
        ensure_parent_dir(Path::new("A.ttf")).unwrap();
    }
}

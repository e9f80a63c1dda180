use std::{fs::remove_dir_all, path::Path};

use anyhow::{Context, Result};

/// Remove the generated TTF and web directories. The base font cache is kept.
pub fn clean(ttf_dir: &Path, web_dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for dir in [ttf_dir, web_dir] {
        if dir.exists() {
            remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
            println!("Removed {}", dir.display());
            removed += 1;
        } else {
            println!("Skipped {} (not found)", dir.display());
        }
    }

    println!("Cleaned {removed} directories");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_clean() {
        let dir = TempDir::new().unwrap();
        let ttf = dir.path().join("fonts").join("ttf");
        let web = dir.path().join("fonts").join("web");
        fs::create_dir_all(&ttf).unwrap();
        fs::write(ttf.join("A-Regular.ttf"), b"").unwrap();

        assert_eq!(clean(&ttf, &web).unwrap(), 1);
        assert!(!ttf.exists());
        assert_eq!(clean(&ttf, &web).unwrap(), 0);
    }
}

use std::{
    collections::BTreeMap,
    fs::{create_dir_all, rename, write},
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use reqwest::blocking::get;

use crate::{config::BASE_URL, styles::StyleVariant};

/// Base fonts fetched by URL into a cache directory keyed by file name.
#[derive(Debug, Clone)]
pub struct BaseSource {
    base_url: String,
    cache_dir: PathBuf,
}

impl BaseSource {
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self { base_url: base_url.into(), cache_dir: cache_dir.into() }
    }

    /// The Noto Sans source used by default.
    pub fn noto(cache_dir: impl Into<PathBuf>) -> Self {
        Self::new(BASE_URL, cache_dir)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, style: &StyleVariant) -> PathBuf {
        self.cache_dir.join(style.base_file)
    }

    pub fn url_for(&self, style: &StyleVariant) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), style.base_file)
    }

    fn fetch(&self, style: &StyleVariant) -> Result<PathBuf> {
        let target = self.path_for(style);
        if target.is_file() {
            println!("  Found {}", style.base_file);
            return Ok(target);
        }

        let url = self.url_for(style);
        println!("  Downloading {}", style.base_file);

        let response = get(&url).with_context(|| format!("Failed to fetch {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} for {url}");
        }
        let bytes = response.bytes()?;

        // A cached file is always complete.
        let partial = target.with_extension("part");
        write(&partial, &bytes)
            .with_context(|| format!("Failed to write {}", partial.display()))?;
        rename(&partial, &target)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        let size_mb = bytes.len() as f64 / 1024.0 / 1024.0;
        println!("  Downloaded {} ({size_mb:.2} MB)", style.base_file);
        Ok(target)
    }

    /// Make sure every style's base file is cached, fetching missing ones in
    /// parallel. Fails if any of them is unavailable.
    pub fn ensure(&self, styles: &[StyleVariant]) -> Result<BTreeMap<&'static str, PathBuf>> {
        create_dir_all(&self.cache_dir).with_context(|| {
            format!("Failed to create directory: {}", self.cache_dir.display())
        })?;
        println!("Base fonts in {}", self.cache_dir.display());

        let failure_count = AtomicUsize::new(0);
        let results: Vec<_> = styles
            .par_iter()
            .map(|style| {
                let result = self.fetch(style);
                if let Err(e) = &result {
                    eprintln!("Error downloading {}: {e:?}", style.base_file);
                    failure_count.fetch_add(1, Ordering::Relaxed);
                }
                result.map(|path| (style.key, path))
            })
            .collect();

        let failures = failure_count.load(Ordering::Relaxed);
        if failures > 0 {
            bail!("{failures} of {} base fonts could not be downloaded", styles.len());
        }
        results.into_iter().collect()
    }
}

/// Fetch the default base fonts for `styles` into `cache_dir`.
pub fn download(
    cache_dir: &Path,
    styles: &[StyleVariant],
) -> Result<BTreeMap<&'static str, PathBuf>> {
    BaseSource::noto(cache_dir).ensure(styles)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::styles::STYLES;

    #[test]
    fn test_url_for() {
        let source = BaseSource::noto("cache");
        assert_eq!(
            source.url_for(&STYLES[2]),
            "https://github.com/notofonts/noto-fonts/raw/main/hinted/ttf/NotoSans/NotoSans-Bold.ttf"
        );
        let source = BaseSource::new("http://localhost/fonts", "cache");
        assert_eq!(source.url_for(&STYLES[0]), "http://localhost/fonts/NotoSans-Regular.ttf");
    }

    #[test]
    fn test_cache_hit_skips_network() {
        let dir = TempDir::new().unwrap();
        for style in STYLES {
            fs::write(dir.path().join(style.base_file), b"cached").unwrap();
        }
        // Unroutable URL: any network access would fail the call.
        let source = BaseSource::new("http://127.0.0.1:9/", dir.path());

        let paths = source.ensure(STYLES).unwrap();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths["BoldItalic"], dir.path().join("NotoSans-BoldItalic.ttf"));
    }

    #[test]
    fn test_unavailable_base_fails() {
        let dir = TempDir::new().unwrap();
        let source = BaseSource::new("http://127.0.0.1:9/", dir.path().join("cache"));
        assert!(source.ensure(&STYLES[..1]).is_err());
        assert!(!dir.path().join("cache").join("NotoSans-Regular.ttf").exists());
    }
}

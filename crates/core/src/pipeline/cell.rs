//! Build of a single (family, style) cell.
//!
//! A cell moves through [`CellState`] in order. Loading and saving failures
//! abort the cell and remove anything it wrote. Hinting and compression
//! failures only skip their stage.

use std::{
    fmt,
    fs::rename,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use font_container::{load, save};
use font_transform::{
    FontVersion, TransformReport, WinMetrics, apply_transforms, reconcile_win_metrics_in_file,
};
use font_woff2::compress_to_dir;
use log::{debug, info, warn};

use crate::{
    config::PRE_HINT_SUFFIX,
    io::{ensure_parent_dir, remove_if_exists},
    params::CellParams,
    tools::Toolchain,
};

/// Stages of a cell build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellState {
    Idle,
    LoadBase,
    Transforming,
    Hinting,
    MetricsFix,
    Compressing,
    Done,
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Idle => "idle",
            CellState::LoadBase => "load-base",
            CellState::Transforming => "transforming",
            CellState::Hinting => "hinting",
            CellState::MetricsFix => "metrics-fix",
            CellState::Compressing => "compressing",
            CellState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Inputs and outputs of one cell.
#[derive(Debug, Clone)]
pub struct CellJob {
    pub params: CellParams,
    /// Base font to transform.
    pub base: PathBuf,
    /// Final TTF path.
    pub output: PathBuf,
}

impl CellJob {
    /// Job writing `<ttf_dir>/<Family>-<Style>.ttf`.
    pub fn new(params: CellParams, base: impl Into<PathBuf>, ttf_dir: &Path) -> Self {
        let output = ttf_dir.join(format!("{}.ttf", params.file_stem()));
        Self { params, base: base.into(), output }
    }

    /// Where the unhinted font is written before hinting.
    pub fn pre_hint_path(&self) -> PathBuf {
        pre_hint_path(&self.output)
    }
}

/// `A-Regular.ttf` → `A-Regular-tmp.ttf`.
pub fn pre_hint_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    output.with_file_name(format!("{stem}{PRE_HINT_SUFFIX}.ttf"))
}

/// Settings shared by every cell of a run.
#[derive(Debug, Clone)]
pub struct CellSettings {
    pub version: FontVersion,
    pub vendor: String,
    /// Destination for WOFF2 files.
    pub web_dir: PathBuf,
}

/// What a finished cell produced.
#[derive(Debug, Clone)]
pub struct CellOutcome {
    pub params: CellParams,
    pub ttf: PathBuf,
    pub report: TransformReport,
    pub hinted: bool,
    pub win_metrics: Option<WinMetrics>,
    pub woff2: Option<PathBuf>,
    pub elapsed_secs: f64,
}

impl CellOutcome {
    /// One-line status for the run summary.
    pub fn summary(&self) -> String {
        let hint = if self.hinted { "hinted" } else { "unhinted" };
        let web = if self.woff2.is_some() { "woff2" } else { "no woff2" };
        format!(
            "{} ({hint}, {web}, {:.2}s)",
            self.ttf.file_name().unwrap_or_default().to_string_lossy(),
            self.elapsed_secs
        )
    }
}

struct Cell<'a> {
    job: &'a CellJob,
    state: CellState,
}

impl Cell<'_> {
    fn enter(&mut self, next: CellState) {
        debug!("{}: {} -> {next}", self.job.params.label(), self.state);
        self.state = next;
    }

    fn run(&mut self, settings: &CellSettings, tools: &Toolchain) -> Result<CellOutcome> {
        let start = Instant::now();
        let job = self.job;
        let label = job.params.label();
        let pre_hint = job.pre_hint_path();

        self.enter(CellState::LoadBase);
        let mut font = load(&job.base)
            .with_context(|| format!("{label}: failed to load {}", job.base.display()))?;

        self.enter(CellState::Transforming);
        let naming = job.params.naming(&settings.version, &settings.vendor)?;
        let report = apply_transforms(&mut font, &job.params.profile(), &naming);
        ensure_parent_dir(&job.output)?;
        save(&font, &pre_hint)
            .with_context(|| format!("{label}: failed to write {}", pre_hint.display()))?;
        drop(font);

        self.enter(CellState::Hinting);
        let hinted = tools.hinter.hint(&pre_hint, &job.output);
        if hinted {
            remove_if_exists(&pre_hint);
            info!("{label}: hinted with {}", tools.hinter.name());
        } else {
            rename(&pre_hint, &job.output).with_context(|| {
                format!("{label}: failed to move {} into place", pre_hint.display())
            })?;
            info!("{label}: keeping unhinted outlines");
        }

        self.enter(CellState::MetricsFix);
        let win_metrics = reconcile_win_metrics_in_file(&job.output)?;

        self.enter(CellState::Compressing);
        let compressor = tools.compressor.as_ref();
        let woff2 = match compress_to_dir(compressor, &job.output, &settings.web_dir) {
            Ok(path) => path,
            Err(e) => {
                warn!("{label}: {e:#}");
                None
            }
        };

        self.enter(CellState::Done);
        Ok(CellOutcome {
            params: job.params.clone(),
            ttf: job.output.clone(),
            report,
            hinted,
            win_metrics,
            woff2,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}

/// Build one cell. On failure nothing the cell wrote is left behind.
pub fn build_cell(
    job: &CellJob,
    settings: &CellSettings,
    tools: &Toolchain,
) -> Result<CellOutcome> {
    let mut cell = Cell { job, state: CellState::Idle };
    let result = cell.run(settings, tools);
    if result.is_err() && cell.state >= CellState::Transforming {
        remove_if_exists(&job.pre_hint_path());
        remove_if_exists(&job.output);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_hint_path() {
        assert_eq!(
            pre_hint_path(Path::new("fonts/ttf/EasyTypeSans-Regular.ttf")),
            PathBuf::from("fonts/ttf/EasyTypeSans-Regular-tmp.ttf")
        );
    }

    #[test]
    fn test_state_order() {
        assert!(CellState::LoadBase < CellState::Transforming);
        assert!(CellState::Compressing < CellState::Done);
        assert_eq!(CellState::MetricsFix.to_string(), "metrics-fix");
    }
}

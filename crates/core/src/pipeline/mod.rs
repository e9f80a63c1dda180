//! Build pipeline: base fonts in, one TTF (and WOFF2) per family × style out.

mod cell;
mod clean;
mod download;
mod webfonts;

use std::{path::PathBuf, time::Instant};

use anyhow::{Result, bail};
use font_transform::FontVersion;
use log::error;
use rayon::prelude::*;

use crate::{
    config::{BASE_DIR, TTF_DIR, VENDOR, VERSION_DECIMAL, VERSION_DISPLAY, WEB_DIR},
    families::{FamilySpec, builtin_families},
    params::CellParams,
    parallel::worker_pool,
    styles::{STYLES, StyleVariant},
    tools::Toolchain,
};

pub use cell::{CellJob, CellOutcome, CellSettings, CellState, build_cell, pre_hint_path};
pub use clean::clean;
pub use download::{BaseSource, download};
pub use webfonts::{WebfontOptions, build_character_set, webfonts};

/// Pipeline execution context.
pub struct PipelineContext {
    pub base_dir: PathBuf,
    pub ttf_dir: PathBuf,
    pub web_dir: PathBuf,
    pub families: Vec<FamilySpec>,
    pub styles: Vec<StyleVariant>,
    /// Worker threads for cells; `None` uses the available parallelism.
    pub jobs: Option<usize>,
    pub version: FontVersion,
    pub vendor: String,
    pub tools: Toolchain,
    /// Where base fonts come from; the Noto Sans source when `None`.
    pub base_source: Option<BaseSource>,
}

impl PipelineContext {
    /// Context with the default directories, families, styles and version.
    pub fn new(tools: Toolchain) -> Result<Self> {
        Ok(Self {
            base_dir: PathBuf::from(BASE_DIR),
            ttf_dir: PathBuf::from(TTF_DIR),
            web_dir: PathBuf::from(WEB_DIR),
            families: builtin_families(),
            styles: STYLES.to_vec(),
            jobs: None,
            version: FontVersion::parse(VERSION_DISPLAY, VERSION_DECIMAL)?,
            vendor: VENDOR.to_string(),
            tools,
            base_source: None,
        })
    }

    fn base_source(&self) -> BaseSource {
        self.base_source.clone().unwrap_or_else(|| BaseSource::noto(&self.base_dir))
    }

    fn cell_settings(&self) -> CellSettings {
        CellSettings {
            version: self.version.clone(),
            vendor: self.vendor.clone(),
            web_dir: self.web_dir.clone(),
        }
    }
}

/// Result of a matrix run, in cell order.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub built: Vec<CellOutcome>,
    pub failed: Vec<(String, anyhow::Error)>,
}

impl BuildSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn ok_or_bail(&self) -> Result<()> {
        if !self.failed.is_empty() {
            bail!(
                "Build failed: {} cells succeeded, {} failed",
                self.built.len(),
                self.failed.len()
            );
        }
        Ok(())
    }

    fn print(&self) {
        for outcome in &self.built {
            println!("  ✓ {}", outcome.summary());
        }
        for (label, e) in &self.failed {
            println!("  ✗ {label}");
            error!("{label}: {e:#}");
        }
    }
}

/// Run a named pipeline step with timing.
fn run_step<T>(
    name: &str,
    step_num: usize,
    total: usize,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    println!("\n[{step_num}/{total}] {name}");
    let start = Instant::now();
    let value = f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(value)
}

/// Build every family × style cell on the worker pool.
///
/// Base fonts must already be cached. Cell failures are collected, not
/// propagated.
pub fn build_matrix(ctx: &PipelineContext) -> Result<BuildSummary> {
    let source = ctx.base_source();
    let settings = ctx.cell_settings();

    let jobs: Vec<CellJob> = ctx
        .families
        .iter()
        .flat_map(|family| {
            ctx.styles.iter().map(|style| {
                CellJob::new(CellParams::new(family, style), source.path_for(style), &ctx.ttf_dir)
            })
        })
        .collect();

    let pool = worker_pool(ctx.jobs)?;
    println!(
        "  {} families × {} styles on {} workers",
        ctx.families.len(),
        ctx.styles.len(),
        pool.current_num_threads()
    );

    let results: Vec<_> = pool.install(|| {
        jobs.par_iter().map(|job| build_cell(job, &settings, &ctx.tools)).collect()
    });

    let mut summary = BuildSummary::default();
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(outcome) => summary.built.push(outcome),
            Err(e) => summary.failed.push((job.params.label(), e)),
        }
    }
    summary.print();
    Ok(summary)
}

/// Run the full pipeline: fetch base fonts, then build the matrix.
///
/// A missing base font aborts the run. Failed cells are reported at the end
/// and turn the result into an error.
pub fn build(ctx: &PipelineContext) -> Result<BuildSummary> {
    let start = Instant::now();

    println!("═══════════════════════════════════════════════════════════════════════════════");
    println!("EasyType Fonts Build Pipeline v{}", ctx.version.display);
    println!("═══════════════════════════════════════════════════════════════════════════════");

    run_step("download", 1, 2, || ctx.base_source().ensure(&ctx.styles))?;
    let summary = run_step("build", 2, 2, || build_matrix(ctx))?;

    println!("\n═══════════════════════════════════════════════════════════════════════════════");
    println!("✨ Build complete in {:.2}s", start.elapsed().as_secs_f64());
    println!("   TTF: {}", ctx.ttf_dir.display());
    println!("   Web: {}", ctx.web_dir.display());
    println!(
        "   Fonts: {} built, {} failed, {} webfonts",
        summary.built.len(),
        summary.failed.len(),
        summary.built.iter().filter(|o| o.woff2.is_some()).count()
    );
    println!("═══════════════════════════════════════════════════════════════════════════════");

    summary.ok_or_bail()?;
    Ok(summary)
}

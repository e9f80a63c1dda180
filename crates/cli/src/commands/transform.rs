use std::path::PathBuf;

use anyhow::{Context, Result};
use easytype_core::{
    CellJob, CellParams, CellSettings, FontVersion, StyleVariant, Toolchain, build_cell,
    builtin_families,
    config::{VENDOR, VERSION_DECIMAL, VERSION_DISPLAY, WEB_DIR},
    load_families, select_families,
};
use log::info;

use crate::cli::TransformArgs;

/// Cell parameters from `--params`, or from `--family`/`--style`, with any
/// overrides applied.
pub fn resolve_params(args: &TransformArgs) -> Result<CellParams> {
    let mut params = match &args.params {
        Some(path) => CellParams::load(path)?,
        None => {
            let family_name = args.family.clone().context("--family is required")?;
            let style_key = args.style.as_deref().context("--style is required")?;
            let families = match &args.families {
                Some(path) => load_families(path)?,
                None => builtin_families(),
            };
            let family = select_families(families, &[family_name])?
                .into_iter()
                .next()
                .context("No family selected")?;
            let style = StyleVariant::find(style_key)
                .with_context(|| format!("Unknown style '{style_key}'"))?;
            CellParams::new(&family, style)
        }
    };

    let overrides = &args.overrides;
    if let Some(weight) = overrides.weight {
        params.weight = weight;
    }
    if let Some(value) = overrides.anchor_strength {
        params.anchor_strength = value;
    }
    if let Some(value) = overrides.xheight_factor {
        params.xheight_factor = value;
    }
    if let Some(value) = overrides.letter_spacing_factor {
        params.letter_spacing_factor = value;
    }
    if let Some(value) = overrides.word_spacing_factor {
        params.word_spacing_factor = value;
    }
    if let Some(value) = overrides.micro_spacing_level {
        params.micro_spacing_level = value;
    }

    params.style_variant()?;
    Ok(params)
}

/// Transform one font file. External tools run only when asked for.
pub fn transform(args: &TransformArgs) -> Result<()> {
    let params = resolve_params(args)?;
    let tools = Toolchain::discover(args.hint, args.web_dir.is_some());
    let settings = CellSettings {
        version: FontVersion::parse(VERSION_DISPLAY, VERSION_DECIMAL)?,
        vendor: VENDOR.to_string(),
        web_dir: args.web_dir.clone().unwrap_or_else(|| PathBuf::from(WEB_DIR)),
    };
    let job = CellJob { params, base: args.input.clone(), output: args.output.clone() };

    let outcome = build_cell(&job, &settings, &tools)?;
    let report = &outcome.report;
    println!("✓ {}", outcome.summary());
    info!(
        "Anchored {}, x-height {}, spacing {}, micro-spacing {} glyphs",
        report.anchored, report.xheight_scaled, report.spaced, report.micro_spaced
    );
    if let Some(source) = &report.minus_source {
        info!("Minus sign cloned from {source}");
    }
    Ok(())
}

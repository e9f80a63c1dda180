use anyhow::{Context, Result};
use easytype_core::{
    PipelineContext, STYLES, StyleVariant, Toolchain, builtin_families, load_families,
    pipeline, select_families,
};

use crate::cli::BuildArgs;

fn select_styles(keys: &[String]) -> Result<Vec<StyleVariant>> {
    if keys.is_empty() {
        return Ok(STYLES.to_vec());
    }
    keys.iter()
        .map(|key| {
            StyleVariant::find(key).copied().with_context(|| format!("Unknown style '{key}'"))
        })
        .collect()
}

/// Build the selected family × style matrix.
pub fn build(args: &BuildArgs) -> Result<()> {
    let families = match &args.families {
        Some(path) => load_families(path)?,
        None => builtin_families(),
    };

    let mut ctx = PipelineContext::new(Toolchain::discover(!args.no_hint, !args.no_woff2))?;
    ctx.families = select_families(families, &args.family)?;
    ctx.styles = select_styles(&args.style)?;
    ctx.base_dir = args.base_dir.clone();
    ctx.ttf_dir = args.ttf_dir.clone();
    ctx.web_dir = args.web_dir.clone();
    ctx.jobs = args.jobs;

    pipeline::build(&ctx)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_styles() {
        assert_eq!(select_styles(&[]).unwrap().len(), 4);
        let styles = select_styles(&["bolditalic".to_string()]).unwrap();
        assert_eq!(styles[0].label, "Bold Italic");
        assert!(select_styles(&["Thin".to_string()]).is_err());
    }
}

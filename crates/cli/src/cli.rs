//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use easytype_core::{
    config::{BASE_DIR, DEFAULT_UNICODE_RANGE, TTF_DIR, WEB_DIR},
    pipeline::WebfontOptions,
};

use crate::commands::{build, clean, download, transform, webfonts};

#[derive(Parser)]
#[command(name = "easytype-fonts")]
#[command(about = "Build accessibility-tuned EasyType fonts from Noto Sans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// JSON file with family definitions (default: built-in families)
    #[arg(long)]
    pub families: Option<PathBuf>,
    /// Only build these families (repeatable)
    #[arg(long = "family", value_name = "NAME")]
    pub family: Vec<String>,
    /// Only build these styles (repeatable)
    #[arg(long = "style", value_name = "KEY")]
    pub style: Vec<String>,
    #[arg(long, default_value = BASE_DIR)]
    pub base_dir: PathBuf,
    #[arg(long, default_value = TTF_DIR)]
    pub ttf_dir: PathBuf,
    #[arg(long, default_value = WEB_DIR)]
    pub web_dir: PathBuf,
    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Skip ttfautohint
    #[arg(long)]
    pub no_hint: bool,
    /// Skip WOFF2 output
    #[arg(long)]
    pub no_woff2: bool,
}

/// Per-cell parameter overrides for `transform`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileOverrides {
    #[arg(long)]
    pub weight: Option<u16>,
    #[arg(long)]
    pub anchor_strength: Option<f64>,
    #[arg(long)]
    pub xheight_factor: Option<f64>,
    #[arg(long)]
    pub letter_spacing_factor: Option<f64>,
    #[arg(long)]
    pub word_spacing_factor: Option<f64>,
    #[arg(long)]
    pub micro_spacing_level: Option<f64>,
}

#[derive(Debug, Clone, Args)]
pub struct TransformArgs {
    #[arg(short, long)]
    pub input: PathBuf,
    #[arg(short, long)]
    pub output: PathBuf,
    /// Cell parameters as JSON; replaces --family/--style
    #[arg(long, conflicts_with_all = ["family", "style"])]
    pub params: Option<PathBuf>,
    #[arg(long, required_unless_present = "params")]
    pub family: Option<String>,
    #[arg(long, required_unless_present = "params")]
    pub style: Option<String>,
    /// JSON file with family definitions (default: built-in families)
    #[arg(long)]
    pub families: Option<PathBuf>,
    #[command(flatten)]
    pub overrides: ProfileOverrides,
    /// Run ttfautohint on the result
    #[arg(long)]
    pub hint: bool,
    /// Also write a WOFF2 file into this directory
    #[arg(long)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct WebfontArgs {
    #[arg(long, default_value = TTF_DIR)]
    pub ttf_dir: PathBuf,
    #[arg(long, default_value = WEB_DIR)]
    pub web_dir: PathBuf,
    /// Unicode range used when no text source is given
    #[arg(long, default_value = DEFAULT_UNICODE_RANGE)]
    pub unicode_range: String,
    /// File whose characters define the subset (repeatable)
    #[arg(long = "text-source", value_name = "FILE")]
    pub text_source: Vec<PathBuf>,
    /// Print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl From<WebfontArgs> for WebfontOptions {
    fn from(args: WebfontArgs) -> Self {
        WebfontOptions {
            ttf_dir: args.ttf_dir,
            web_dir: args.web_dir,
            unicode_range: args.unicode_range,
            text_sources: args.text_source,
            dry_run: args.dry_run,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every family × style cell
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Fetch the base fonts into the cache
    Download {
        #[arg(long, default_value = BASE_DIR)]
        base_dir: PathBuf,
    },
    /// Transform a single font file
    Transform {
        #[command(flatten)]
        args: TransformArgs,
    },
    /// Subset TTFs and compress them to WOFF2
    Webfonts {
        #[command(flatten)]
        args: WebfontArgs,
    },
    /// Remove generated fonts
    Clean {
        #[arg(long, default_value = TTF_DIR)]
        ttf_dir: PathBuf,
        #[arg(long, default_value = WEB_DIR)]
        web_dir: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => build(&args)?,
            Commands::Download { base_dir } => download(&base_dir)?,
            Commands::Transform { args } => transform(&args)?,
            Commands::Webfonts { args } => webfonts(args.into())?,
            Commands::Clean { ttf_dir, web_dir } => clean(&ttf_dir, &web_dir)?,
        }
        Ok(())
    }
}

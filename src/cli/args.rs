//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{OutputFormat, Sample};
use crate::config::Config;

/// Render an image's silhouette as blocks of syntax-highlighted "code"
#[derive(Parser, Debug)]
#[command(name = "codeblocks")]
#[command(version, about = "Turn an image silhouette into an SVG of code blocks", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image file or http(s) URL (PNG, JPEG, GIF, BMP, WebP or SVG).
    /// A file named `config` or `cache` must be given as `./config` or `./cache`.
    pub input: Option<String>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "svg")]
    pub format: OutputFormat,

    /// Row height in pixels
    #[arg(long)]
    pub cell_height: Option<u32>,

    /// Narrowest regular block in pixels
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Widest regular block in pixels
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Gap between blocks in pixels
    #[arg(long)]
    pub spacing: Option<f32>,

    /// Grid column width in pixels (default: min width)
    #[arg(long)]
    pub accuracy: Option<u32>,

    /// Only use multiples of the minimum width
    #[arg(long)]
    pub monotype: bool,

    /// Cell sampling strategy
    #[arg(long)]
    pub sample: Option<Sample>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Id prefix for the SVG group
    #[arg(long)]
    pub id: Option<String>,

    /// Corner radius for each block
    #[arg(long)]
    pub border_radius: Option<f32>,

    /// Don't embed class colors in the SVG
    #[arg(long)]
    pub no_palette: bool,

    /// Don't read or write the download cache
    #[arg(long)]
    pub no_cache: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Download cache management
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create default config file
    Init,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// Print the cache directory
    Path,
    /// Delete all cached downloads
    Clear,
}

impl Args {
    /// Layer command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        let blocks = &mut config.blocks;
        if let Some(cell_height) = self.cell_height {
            blocks.cell_height = cell_height;
        }
        if let Some(min_width) = self.min_width {
            blocks.min_width = min_width;
        }
        if let Some(max_width) = self.max_width {
            blocks.max_width = max_width;
        }
        if let Some(spacing) = self.spacing {
            blocks.spacing = spacing;
        }
        if self.accuracy.is_some() {
            blocks.accuracy = self.accuracy;
        }
        if self.monotype {
            blocks.monotype = true;
        }
        if let Some(sample) = self.sample {
            blocks.sample = sample.into();
        }
        if self.seed.is_some() {
            blocks.seed = self.seed;
        }

        let render = &mut config.render;
        if let Some(id) = &self.id {
            render.id = id.clone();
        }
        if self.border_radius.is_some() {
            render.border_radius = self.border_radius;
        }
        if self.no_palette {
            render.palette = false;
        }

        if self.no_cache {
            config.source.cache = false;
        }
    }
}

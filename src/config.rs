//! Configuration file handling for codeblocks.
//!
//! Loads configuration from `~/.config/codeblocks/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::blocks::{
    BlockOptions, SampleMode, DEFAULT_CELL_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH,
    DEFAULT_SPACING,
};
use crate::renderer::{Palette, RenderOptions, DEFAULT_ID};
use crate::source::{default_cache_dir, ImageCache, DEFAULT_TIMEOUT};

/// Configuration file structure for codeblocks.
/// Loaded from ~/.config/codeblocks/config.toml (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub blocks: BlocksConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    pub cell_height: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub spacing: f32,
    pub accuracy: Option<u32>,
    pub monotype: bool,
    pub sample: SampleMode,
    pub seed: Option<u64>,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            cell_height: DEFAULT_CELL_HEIGHT,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            spacing: DEFAULT_SPACING,
            accuracy: None,
            monotype: false,
            sample: SampleMode::default(),
            seed: None,
        }
    }
}

impl BlocksConfig {
    pub fn to_options(&self) -> BlockOptions {
        BlockOptions {
            cell_height: self.cell_height,
            min_width: self.min_width,
            max_width: self.max_width,
            spacing: self.spacing,
            accuracy: self.accuracy,
            monotype: self.monotype,
            sample: self.sample,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub id: String,
    pub palette: bool,
    pub border_radius: Option<f32>,
    /// Per-class color overrides, keyed by CSS class name.
    pub colors: BTreeMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            palette: true,
            border_radius: None,
            colors: BTreeMap::new(),
        }
    }
}

impl RenderConfig {
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions {
            id: self.id.clone(),
            palette: self
                .palette
                .then(|| Palette::default().with_overrides(&self.colors)),
            border_radius: self.border_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub cache: bool,
    pub cache_dir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            cache: true,
            cache_dir: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// The cache to use, or `None` when caching is off.
    pub fn image_cache(&self) -> Option<ImageCache> {
        self.cache.then(|| {
            ImageCache::new(self.cache_dir.clone().unwrap_or_else(default_cache_dir))
        })
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("codeblocks").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/codeblocks/config.toml")
        })
}

/// Contents written by `codeblocks config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# codeblocks configuration

[blocks]
# Height of each row of blocks in pixels
cell_height = 10
# Narrowest and widest regular block
min_width = 10
max_width = 40
# Gap between blocks
spacing = 2.5
# Grid column width (defaults to min_width)
# accuracy = 5
# Only use multiples of min_width
monotype = false
# Cell sampling: mid-row, full-area
sample = "mid-row"
# Fixed seed for reproducible output
# seed = 42

[render]
# Group id prefix in the SVG output
id = "codeblocks"
# Embed a <style> block with class colors
palette = true
# Corner radius for each block
# border_radius = 1.0

[render.colors]
# comment = "rgb(106, 153, 81)"

[source]
# Cache downloaded images
cache = true
# timeout_secs = 30
"#;

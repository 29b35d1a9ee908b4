//! Tunables for the block transformation and their validation.

use super::sampler::SampleMode;

/// Default row height in pixels.
pub const DEFAULT_CELL_HEIGHT: u32 = 10;

/// Default minimum block width (one "character").
pub const DEFAULT_MIN_WIDTH: u32 = DEFAULT_CELL_HEIGHT;

/// Default maximum block width (four "characters").
pub const DEFAULT_MAX_WIDTH: u32 = DEFAULT_MIN_WIDTH * 4;

/// Default gap between neighbouring blocks, a quarter of the row height.
pub const DEFAULT_SPACING: f32 = DEFAULT_CELL_HEIGHT as f32 / 4.0;

/// Settings for one image-to-blocks transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOptions {
    /// Height of every grid row and therefore of every block.
    pub cell_height: u32,
    /// Smallest block width a run is split into.
    pub min_width: u32,
    /// Largest block width a run is split into.
    pub max_width: u32,
    /// Inset subtracted from each block's width and height when emitting.
    pub spacing: f32,
    /// Grid column width. `None` falls back to `min_width`.
    pub accuracy: Option<u32>,
    /// Restrict every block to a multiple of `min_width`.
    pub monotype: bool,
    /// Which pixels of a cell are inspected.
    pub sample: SampleMode,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            cell_height: DEFAULT_CELL_HEIGHT,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            spacing: DEFAULT_SPACING,
            accuracy: None,
            monotype: false,
            sample: SampleMode::default(),
        }
    }
}

impl BlockOptions {
    /// Width of one grid column.
    ///
    /// Monotype mode always uses `min_width` so that every run, and every
    /// block split from it, is a whole number of minimum-width steps.
    pub fn column_width(&self) -> u32 {
        if self.monotype {
            self.min_width
        } else {
            self.accuracy.unwrap_or(self.min_width)
        }
    }

    /// Reject settings that would make the transformation meaningless.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cell_height == 0 {
            return Err(ConfigurationError::ZeroCellHeight);
        }
        if self.min_width == 0 {
            return Err(ConfigurationError::ZeroMinWidth);
        }
        if self.min_width > self.max_width {
            return Err(ConfigurationError::MinExceedsMax {
                min: self.min_width,
                max: self.max_width,
            });
        }
        if self.accuracy == Some(0) {
            return Err(ConfigurationError::ZeroAccuracy);
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigurationError::InvalidSpacing(self.spacing));
        }
        Ok(())
    }
}

/// Inconsistent transformation settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("cell height must be greater than 0")]
    ZeroCellHeight,

    #[error("minimum block width must be greater than 0")]
    ZeroMinWidth,

    #[error("accuracy must be greater than 0")]
    ZeroAccuracy,

    #[error("minimum block width {min} exceeds maximum block width {max}")]
    MinExceedsMax {
        /// Configured minimum width
        min: u32,
        /// Configured maximum width
        max: u32,
    },

    #[error("spacing must be a finite, non-negative number, got {0}")]
    InvalidSpacing(f32),
}

//! CLI enum types for output format and sampling options.

use clap::ValueEnum;

use crate::blocks::SampleMode;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document
    #[default]
    Svg,
    /// Layout as JSON (canvas size and rectangles)
    Json,
}

/// Which pixels of a cell are checked for color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Sample {
    /// One row through the middle of the cell
    #[default]
    MidRow,
    /// Every pixel of the cell
    FullArea,
}

impl From<Sample> for SampleMode {
    fn from(s: Sample) -> Self {
        match s {
            Sample::MidRow => SampleMode::MidRow,
            Sample::FullArea => SampleMode::FullArea,
        }
    }
}

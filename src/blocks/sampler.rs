//! Per-cell color detection.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// How much of a cell is inspected when deciding whether it is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleMode {
    /// Single pixel row through the vertical middle of the cell
    #[default]
    MidRow,
    /// Every pixel in the cell
    FullArea,
}

impl SampleMode {
    pub fn name(&self) -> &'static str {
        match self {
            SampleMode::MidRow => "mid-row",
            SampleMode::FullArea => "full-area",
        }
    }
}

/// A pixel is filled when it is not fully transparent and not pure white.
pub fn is_filled_pixel(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    // Fully transparent pixels never count, whatever their color channels say
    if a == 0 {
        return false;
    }
    r < u8::MAX || g < u8::MAX || b < u8::MAX
}

/// Check whether the `width` x `height` area at (`x`, `y`) contains color.
///
/// In [`SampleMode::MidRow`] only the row at `y + height / 2` is read.
/// Pixels outside the buffer read as transparent, so a partial cell at the
/// right or bottom edge simply has fewer candidates.
///
/// # Arguments
/// * `image` - Source RGBA buffer
/// * `x`, `y` - Top-left corner of the area in buffer coordinates
/// * `width`, `height` - Area size in pixels
/// * `mode` - Which pixels of the area to inspect
pub fn contains_color(
    image: &RgbaImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    mode: SampleMode,
) -> bool {
    let rows = match mode {
        SampleMode::MidRow => {
            let mid = y.saturating_add(height / 2);
            mid..mid.saturating_add(1)
        }
        SampleMode::FullArea => y..y.saturating_add(height),
    };

    let x_end = x.saturating_add(width).min(image.width());
    let y_end = rows.end.min(image.height());

    (rows.start..y_end).any(|py| {
        (x..x_end).any(|px| {
            image
                .get_pixel_checked(px, py)
                .is_some_and(is_filled_pixel)
        })
    })
}

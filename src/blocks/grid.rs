//! Slicing a buffer into a grid of sampled cells.

use image::RgbaImage;

use super::sampler::{contains_color, SampleMode};

/// One sampled cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub start_x: u32,
    pub start_y: u32,
    pub width: u32,
    pub filled: bool,
}

/// Sample `image` into rows of cells, row-major.
///
/// Origins step by `column_width` horizontally and `cell_height` vertically
/// for as long as they lie inside the buffer, giving
/// `ceil(height / cell_height)` rows of `ceil(width / column_width)` cells.
/// Cells on the right and bottom edges may hang off the buffer; they keep
/// their nominal width and the overhang reads as transparent.
///
/// Returns an empty grid if either step is zero.
pub fn build_grid(
    image: &RgbaImage,
    column_width: u32,
    cell_height: u32,
    mode: SampleMode,
) -> Vec<Vec<GridCell>> {
    if column_width == 0 || cell_height == 0 {
        return Vec::new();
    }

    let (width, height) = image.dimensions();

    (0..height)
        .step_by(cell_height as usize)
        .map(|start_y| {
            (0..width)
                .step_by(column_width as usize)
                .map(|start_x| GridCell {
                    start_x,
                    start_y,
                    width: column_width,
                    filled: contains_color(
                        image,
                        start_x,
                        start_y,
                        column_width,
                        cell_height,
                        mode,
                    ),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const INK: Rgba<u8> = Rgba([30, 30, 30, 255]);

    #[test]
    fn test_divisible_dimensions() {
        let image = RgbaImage::from_pixel(20, 10, WHITE);
        let grid = build_grid(&image, 5, 5, SampleMode::MidRow);
        assert_eq!(grid.len(), 2);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[1][3].start_x, 15);
        assert_eq!(grid[1][3].start_y, 5);
    }

    #[test]
    fn test_non_divisible_dimensions_round_up() {
        let image = RgbaImage::from_pixel(23, 11, WHITE);
        let grid = build_grid(&image, 5, 5, SampleMode::MidRow);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 5);
        // Partial last column keeps its nominal width
        assert_eq!(grid[0][4].start_x, 20);
        assert_eq!(grid[0][4].width, 5);
    }

    #[test]
    fn test_cells_are_marked_filled() {
        let mut image = RgbaImage::from_pixel(15, 5, WHITE);
        for x in 10..15 {
            image.put_pixel(x, 2, INK);
        }
        let grid = build_grid(&image, 5, 5, SampleMode::MidRow);
        let filled: Vec<bool> = grid[0].iter().map(|cell| cell.filled).collect();
        assert_eq!(filled, vec![false, false, true]);
    }

    #[test]
    fn test_blank_image_has_no_filled_cells() {
        let image = RgbaImage::new(40, 40);
        let grid = build_grid(&image, 10, 10, SampleMode::FullArea);
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().flatten().all(|cell| !cell.filled));
    }

    #[test]
    fn test_zero_steps_yield_empty_grid() {
        let image = RgbaImage::from_pixel(10, 10, INK);
        assert!(build_grid(&image, 0, 5, SampleMode::MidRow).is_empty());
        assert!(build_grid(&image, 5, 0, SampleMode::MidRow).is_empty());
    }

    #[test]
    fn test_empty_image_yields_empty_grid() {
        let image = RgbaImage::new(0, 0);
        assert!(build_grid(&image, 5, 5, SampleMode::MidRow).is_empty());
    }
}

//! The image-to-blocks pipeline.

use image::RgbaImage;
use rand::Rng;
use serde::Serialize;

use crate::blocks::{
    assign_styles, build_grid, emit_rects, merge_grid, partition_runs, BlockOptions,
    ConfigurationError, Rect,
};

/// Output of one transformation: the canvas size and its rectangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockLayout {
    pub width: u32,
    pub height: u32,
    pub rects: Vec<Rect>,
}

impl BlockLayout {
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Run sample → merge → partition → style → emit over `image`.
///
/// Options are validated first. Style adjacency is tracked within this call
/// only, and all randomness comes from `rng`, so a seeded RNG gives a
/// reproducible layout.
pub fn transform<R: Rng + ?Sized>(
    image: &RgbaImage,
    options: &BlockOptions,
    rng: &mut R,
) -> Result<BlockLayout, ConfigurationError> {
    options.validate()?;

    let column_width = options.column_width();
    let grid = build_grid(image, column_width, options.cell_height, options.sample);
    log::debug!(
        "Sampled {} rows x {} columns ({} filled cells)",
        grid.len(),
        grid.first().map_or(0, Vec::len),
        grid.iter().flatten().filter(|cell| cell.filled).count()
    );

    let runs = merge_grid(&grid);
    log::debug!("Merged into {} runs", runs.iter().map(Vec::len).sum::<usize>());

    let blocks = partition_runs(
        &runs,
        options.min_width,
        options.max_width,
        options.monotype,
        rng,
    );
    log::debug!("Partitioned into {} blocks", blocks.len());

    let styled = assign_styles(&blocks, options.min_width, options.max_width, rng);
    let rects = emit_rects(&styled, options.cell_height, options.spacing);

    Ok(BlockLayout {
        width: image.width(),
        height: image.height(),
        rects,
    })
}

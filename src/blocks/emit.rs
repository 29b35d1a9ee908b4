//! Turning styled blocks into drawable rectangles.

use serde::Serialize;

use super::style::{StyleClass, StyledBlock};

/// A positioned, styled rectangle ready for rendering.
///
/// `width` and `height` are already inset by the spacing and may be zero or
/// negative for blocks narrower than the spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: f32,
    pub height: f32,
    pub class: StyleClass,
}

/// Inset each block by `spacing` on its right and bottom edges.
pub fn emit_rects(blocks: &[StyledBlock], cell_height: u32, spacing: f32) -> Vec<Rect> {
    let height = cell_height as f32 - spacing;

    blocks
        .iter()
        .map(|styled| Rect {
            x: styled.block.start_x,
            y: styled.block.start_y,
            width: styled.block.width as f32 - spacing,
            height,
            class: styled.class,
        })
        .collect()
}

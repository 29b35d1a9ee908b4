//! Image-to-code-block transformation.
//!
//! This module turns a decoded RGBA buffer into rows of styled rectangles
//! that look like syntax-highlighted source code:
//!
//! 1. **Sampling** - Decide whether a cell contains any visible color
//! 2. **Grid** - Slice the buffer into fixed-size cells
//! 3. **Merging** - Join adjacent filled cells into runs
//! 4. **Partitioning** - Break runs into random bounded-width blocks
//! 5. **Styling** - Pick a class per block, never repeating the previous one
//! 6. **Emitting** - Inset blocks by the spacing to get final rectangles
//!
//! # Width Categories
//!
//! Style classes are keyed by block width via [`StyleClass`]:
//! - minimum width - `parenthesis`, `space`
//! - maximum width - `comment`, `function`
//! - anything else - keywords, types and declarations

mod emit;
mod grid;
mod merge;
mod options;
mod partition;
mod sampler;
mod style;

pub use emit::{emit_rects, Rect};
pub use grid::{build_grid, GridCell};
pub use merge::{merge_grid, merge_row, Run};
pub use options::{
    BlockOptions, ConfigurationError, DEFAULT_CELL_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH,
    DEFAULT_SPACING,
};
pub use partition::{partition_runs, split_run, Block};
pub use sampler::{contains_color, is_filled_pixel, SampleMode};
pub use style::{
    assign_styles, class_for, StyleClass, StyledBlock, GENERAL_POOL, MAX_WIDTH_POOL,
    MIN_WIDTH_POOL,
};

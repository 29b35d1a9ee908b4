//! codeblocks library crate.
//!
//! Turns the silhouette of an image into rows of colored rectangles that
//! look like syntax-highlighted source code, and writes them out as SVG.
//!
//! ```no_run
//! use codeblocks::blocks::BlockOptions;
//! use rand::SeedableRng;
//!
//! let image = image::open("wales.png").unwrap().to_rgba8();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let layout = codeblocks::transform(&image, &BlockOptions::default(), &mut rng).unwrap();
//! let svg = codeblocks::renderer::render_svg(&layout, &Default::default());
//! ```

pub mod blocks;
pub mod cli;
pub mod config;
pub mod error;
pub mod renderer;
pub mod source;
pub mod transform;

pub use error::{Error, Result};
pub use transform::{transform, BlockLayout};

//! Random partitioning of runs into bounded-width blocks.

use rand::seq::SliceRandom;
use rand::Rng;

use super::merge::Run;

/// A final block: one "token" of the code effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start_x: u32,
    pub start_y: u32,
    pub width: u32,
}

/// Widths a block may take when `remaining` pixels of the run are left.
///
/// Every candidate lies in `[min_width, max_width]` and either consumes the
/// rest of the run or leaves at least `min_width` behind, so no unusable
/// sliver is ever produced. Monotype keeps only multiples of `min_width`.
fn admissible_widths(remaining: u32, min_width: u32, max_width: u32, monotype: bool) -> Vec<u32> {
    (min_width..=max_width.min(remaining))
        .filter(|&w| w == remaining || remaining - w >= min_width)
        .filter(|&w| !monotype || w % min_width == 0)
        .collect()
}

/// Split a run of `run_width` pixels into block widths.
///
/// The returned widths always sum to `run_width`. Each is drawn uniformly
/// from the admissible widths until fewer than `2 * min_width` pixels remain;
/// that remainder becomes the last block as-is, so it is the only width that
/// may fall outside `[min_width, max_width]`.
///
/// # Arguments
/// * `run_width` - Total width to cover
/// * `min_width` - Smallest regular block width
/// * `max_width` - Largest regular block width
/// * `monotype` - Draw only multiples of `min_width`
/// * `rng` - Random source
///
/// # Example
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let widths = codeblocks::blocks::split_run(100, 10, 40, true, &mut rng);
/// assert_eq!(widths.iter().sum::<u32>(), 100);
/// assert!(widths.iter().all(|w| w % 10 == 0));
/// ```
pub fn split_run<R: Rng + ?Sized>(
    run_width: u32,
    min_width: u32,
    max_width: u32,
    monotype: bool,
    rng: &mut R,
) -> Vec<u32> {
    if run_width == 0 {
        return Vec::new();
    }
    // Nothing sensible to draw from; keep the run whole
    if min_width == 0 || min_width > max_width {
        return vec![run_width];
    }

    let mut widths = Vec::new();
    let mut remaining = run_width;

    while remaining > 0 {
        if remaining < min_width.saturating_mul(2) {
            widths.push(remaining);
            break;
        }

        let pool = admissible_widths(remaining, min_width, max_width, monotype);
        // min_width itself is always admissible here
        let width = pool.choose(rng).copied().unwrap_or(min_width);
        widths.push(width);
        remaining -= width;
    }

    widths
}

/// Split every run of every row into blocks, in row-major order.
pub fn partition_runs<R: Rng + ?Sized>(
    rows: &[Vec<Run>],
    min_width: u32,
    max_width: u32,
    monotype: bool,
    rng: &mut R,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    for run in rows.iter().flatten() {
        let mut start_x = run.start_x;
        for width in split_run(run.width, min_width, max_width, monotype, rng) {
            blocks.push(Block {
                start_x,
                start_y: run.start_y,
                width,
            });
            start_x += width;
        }
    }

    blocks
}

//! Joining adjacent filled cells into runs.

use super::grid::GridCell;

/// A horizontal interval of filled cells within one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start_x: u32,
    pub start_y: u32,
    pub width: u32,
}

impl Run {
    /// First x coordinate past the end of the run.
    pub fn end_x(&self) -> u32 {
        self.start_x + self.width
    }
}

impl From<Run> for GridCell {
    fn from(run: Run) -> Self {
        GridCell {
            start_x: run.start_x,
            start_y: run.start_y,
            width: run.width,
            filled: true,
        }
    }
}

/// Merge one row of cells into runs.
///
/// A filled cell that starts exactly where the current run ends extends it;
/// any other filled cell opens a new run. Empty cells close the current run
/// and produce nothing.
pub fn merge_row(cells: &[GridCell]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut open = false;

    for cell in cells {
        if !cell.filled {
            open = false;
            continue;
        }

        if open {
            if let Some(run) = runs.last_mut() {
                if run.end_x() == cell.start_x {
                    run.width += cell.width;
                    continue;
                }
            }
        }

        runs.push(Run {
            start_x: cell.start_x,
            start_y: cell.start_y,
            width: cell.width,
        });
        open = true;
    }

    runs
}

/// Merge every row of a grid.
pub fn merge_grid(grid: &[Vec<GridCell>]) -> Vec<Vec<Run>> {
    grid.iter().map(|row| merge_row(row)).collect()
}

use crate::error::*;
use crate::grid::*;
use crate::solver::kernel::relax_cell;
use crate::solver::*;
use crate::util::*;

/// Single threaded sweep over `block_size` square tiles,
/// tiles in row-major order and cells row-major inside each tile.
#[derive(Copy, Clone, Debug)]
pub struct BlockedSweep {
    block_size: usize,
}

impl BlockedSweep {
    pub fn new(block_size: usize) -> Self {
        debug_assert!(block_size > 0);
        BlockedSweep { block_size }
    }
}

impl Sweep for BlockedSweep {
    fn name(&self) -> &'static str {
        "blocked"
    }

    fn check(&self, grid: &Grid) -> Result<()> {
        check_block_size(grid, self.block_size)
    }

    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64 {
        profiling::scope!("blocked_sweep");
        let row_len = grid.row_len();
        let b = self.block_size;
        let cells = grid.buffer_mut();
        let mut total_change = 0.0;
        for ii in block_starts(1..row_len - 1, b) {
            for jj in block_starts(1..row_len - 1, b) {
                for i in ii..(ii + b).min(row_len - 1) {
                    for j in jj..(jj + b).min(row_len - 1) {
                        total_change +=
                            relax_cell(cells, i * row_len + j, row_len, omega);
                    }
                }
            }
        }
        total_change
    }
}

/// Reject block sizes that do not tile the interior exactly.
pub fn check_block_size(grid: &Grid, block_size: usize) -> Result<()> {
    let interior = grid.interior_len();
    if block_size == 0 || interior % block_size != 0 {
        return Err(SorError::BlockSize {
            interior,
            block_size,
        });
    }
    Ok(())
}

pub fn relax_blocked(
    grid: &mut Grid,
    params: &SorParameters,
) -> Result<SolveReport> {
    let sweep = BlockedSweep::new(params.block_size.max(1));
    Ok(Relaxation::new(&sweep, grid, params)?.run())
}

use crate::error::*;
use crate::grid::*;
use crate::solver::blocked::check_block_size;
use crate::solver::*;
use crate::util::*;
use std::sync::{Mutex, PoisonError};

/// `StripeSweep` with each stripe walked in `block_size` square tiles.
/// Stripes are whole block rows, so the interior has to be a multiple
/// of the block size.
pub struct BlockedStripeSweep {
    pool: rayon::ThreadPool,
    threads: usize,
    block_size: usize,
}

impl BlockedStripeSweep {
    pub fn new(threads: usize, block_size: usize) -> Result<Self> {
        debug_assert!(block_size > 0);
        Ok(BlockedStripeSweep {
            pool: worker_pool(threads)?,
            threads,
            block_size,
        })
    }
}

impl Sweep for BlockedStripeSweep {
    fn name(&self) -> &'static str {
        "blocked_stripe"
    }

    fn check(&self, grid: &Grid) -> Result<()> {
        check_block_size(grid, self.block_size)
    }

    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64 {
        profiling::scope!("blocked_stripe_sweep");
        let row_len = grid.row_len();
        let b = self.block_size;
        let stripes = block_row_stripes(row_len, self.threads, b);
        let total_change = Mutex::new(0.0);
        let shared = grid.shared();
        let shared = &shared;
        let total_ref = &total_change;
        self.pool.scope(|s| {
            for stripe in stripes {
                s.spawn(move |_| {
                    profiling::scope!("blocked_stripe_sweep: Thread Callback");
                    let mut change = 0.0;
                    for ii in block_starts(stripe, b) {
                        for jj in block_starts(1..row_len - 1, b) {
                            for i in ii..ii + b {
                                for j in jj..jj + b {
                                    change += shared.relax_cell(i, j, omega);
                                }
                            }
                        }
                    }
                    *total_ref.lock().unwrap_or_else(PoisonError::into_inner) +=
                        change;
                });
            }
        });
        total_change
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn relax_blocked_stripes(
    grid: &mut Grid,
    params: &SorParameters,
) -> Result<SolveReport> {
    params.validate()?;
    let sweep = BlockedStripeSweep::new(params.threads, params.block_size)?;
    Ok(Relaxation::new(&sweep, grid, params)?.run())
}

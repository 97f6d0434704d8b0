//! Successive over-relaxation on a ghost-bordered square grid.
//!
//! Every strategy applies the same update to interior cells,
//! they only differ in how a sweep is split between workers.
//! `Relaxation` runs sweeps until the solve converges or diverges.

pub mod blocked;
pub mod blocked_stripe;
pub mod kernel;
pub mod loop_parallel;
mod relaxation;
pub mod sequential;
mod solver_parameters;
pub mod stripe;

pub use blocked::*;
pub use blocked_stripe::*;
pub use loop_parallel::*;
pub use relaxation::*;
pub use sequential::*;
pub use solver_parameters::*;
pub use stripe::*;

use crate::error::*;
use crate::grid::*;
use clap::ValueEnum;

/// One full pass over the interior.
pub trait Sweep {
    fn name(&self) -> &'static str;

    /// Reject a grid this sweep cannot handle, called before the first sweep.
    fn check(&self, _grid: &Grid) -> Result<()> {
        Ok(())
    }

    /// Relax every interior cell once, returns the sum of `|delta|`.
    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Strategy {
    #[default]
    Sequential,
    Blocked,
    Stripe,
    BlockedStripe,
    LoopParallel,
}

impl Strategy {
    pub fn build(&self, params: &SorParameters) -> Result<Box<dyn Sweep>> {
        params.validate()?;
        Ok(match self {
            Strategy::Sequential => Box::new(SequentialSweep),
            Strategy::Blocked => Box::new(BlockedSweep::new(params.block_size)),
            Strategy::Stripe => Box::new(StripeSweep::new(params.threads)?),
            Strategy::BlockedStripe => Box::new(BlockedStripeSweep::new(
                params.threads,
                params.block_size,
            )?),
            Strategy::LoopParallel => {
                Box::new(LoopParallelSweep::new(params.threads)?)
            }
        })
    }
}

/// Relax `grid` in place with the chosen strategy.
pub fn solve(
    strategy: Strategy,
    grid: &mut Grid,
    params: &SorParameters,
) -> Result<SolveReport> {
    let sweep = strategy.build(params)?;
    Ok(Relaxation::new(sweep.as_ref(), grid, params)?.run())
}

/// Fixed size pool owned by one threaded sweep.
pub fn worker_pool(threads: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("sor_worker_{}", i))
        .build()?;
    Ok(pool)
}

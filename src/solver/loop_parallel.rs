use crate::error::*;
use crate::grid::*;
use crate::solver::*;
use rayon::prelude::*;

/// Parallel-for over interior rows with a sum reduction of the change.
/// Rows are handed out by rayon's work stealing rather than fixed stripes.
pub struct LoopParallelSweep {
    pool: rayon::ThreadPool,
}

impl LoopParallelSweep {
    pub fn new(threads: usize) -> Result<Self> {
        Ok(LoopParallelSweep {
            pool: worker_pool(threads)?,
        })
    }
}

impl Sweep for LoopParallelSweep {
    fn name(&self) -> &'static str {
        "loop_parallel"
    }

    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64 {
        profiling::scope!("loop_parallel_sweep");
        let row_len = grid.row_len();
        let shared = grid.shared();
        let shared = &shared;
        self.pool.install(|| {
            (1..row_len - 1)
                .into_par_iter()
                .map(|i| shared.relax_row(i, 1..row_len - 1, omega))
                .sum::<f64>()
        })
    }
}

pub fn relax_loop_parallel(
    grid: &mut Grid,
    params: &SorParameters,
) -> Result<SolveReport> {
    params.validate()?;
    let sweep = LoopParallelSweep::new(params.threads)?;
    Ok(Relaxation::new(&sweep, grid, params)?.run())
}

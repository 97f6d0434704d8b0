use crate::error::*;
use crate::grid::*;
use crate::solver::*;
use crate::util::*;
use std::sync::{Mutex, PoisonError};

/// Interior rows split into one contiguous stripe per worker.
///
/// Every sweep forks one task per stripe on a dedicated pool and joins
/// them all before returning, so the next sweep never overlaps this one.
/// Workers sum their own `|delta|` and merge it once into the shared total.
pub struct StripeSweep {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl StripeSweep {
    pub fn new(threads: usize) -> Result<Self> {
        Ok(StripeSweep {
            pool: worker_pool(threads)?,
            threads,
        })
    }
}

impl Sweep for StripeSweep {
    fn name(&self) -> &'static str {
        "stripe"
    }

    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64 {
        profiling::scope!("stripe_sweep");
        let row_len = grid.row_len();
        let stripes = row_stripes(row_len, self.threads);
        let total_change = Mutex::new(0.0);
        let shared = grid.shared();
        let shared = &shared;
        let total_ref = &total_change;
        self.pool.scope(|s| {
            for stripe in stripes {
                s.spawn(move |_| {
                    profiling::scope!("stripe_sweep: Thread Callback");
                    let mut change = 0.0;
                    for i in stripe {
                        // this task is the only writer of rows in `stripe`
                        for j in 1..row_len - 1 {
                            change += shared.relax_cell(i, j, omega);
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

pub fn relax_stripes(
    grid: &mut Grid,
    params: &SorParameters,
) -> Result<SolveReport> {
    params.validate()?;
    let sweep = StripeSweep::new(params.threads)?;
    Ok(Relaxation::new(&sweep, grid, params)?.run())
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::init;

    #[test]
    fn single_stripe_matches_sequential_test() {
        let mut a = Grid::with_interior(10).unwrap();
        init::rand_uniform(&mut a, 0.0, 10.0, 12);
        let mut b = a.clone();

        let params = SorParameters {
            omega: 1.0,
            threads: 1,
            ..Default::default()
        };
        let report_a = relax(&mut a, params.omega, params.tolerance).unwrap();
        let report_b = relax_stripes(&mut b, &params).unwrap();
        assert_eq!(report_a.iterations, report_b.iterations);
        assert_eq!(a, b);
    }

    #[test]
    fn boundary_untouched_test() {
        let mut grid = Grid::with_interior(20).unwrap();
        init::rand_uniform(&mut grid, 0.0, 10.0, 22);
        let ring = grid.boundary_snapshot();
        let report =
            relax_stripes(&mut grid, &SorParameters::default()).unwrap();
        assert!(report.converged());
        assert_eq!(grid.boundary_snapshot(), ring);
    }

    #[test]
    fn adjacent_stripes_test() {
        // two workers, each reads the other's edge row while it is written
        let sweep = StripeSweep::new(2).unwrap();
        for _ in 0..50 {
            let mut grid = Grid::with_interior(4).unwrap();
            grid.par_set_values(|c| if c[0] == 0 { 8.0 } else { 0.0 }, 6);
            let ring = grid.boundary_snapshot();
            for _ in 0..10 {
                let change = sweep.sweep(&mut grid, 1.0);
                assert!(change.is_finite());
            }
            assert_eq!(grid.boundary_snapshot(), ring);
            assert!(grid.buffer().iter().all(|v| (0.0..=8.0).contains(v)));
        }
    }

    #[test]
    fn more_threads_than_rows_test() {
        let mut grid = Grid::with_interior(2).unwrap();
        init::rand_uniform(&mut grid, 0.0, 10.0, 4);
        let params = SorParameters {
            threads: 8,
            ..Default::default()
        };
        let report = relax_stripes(&mut grid, &params).unwrap();
        assert!(report.converged());
    }
}

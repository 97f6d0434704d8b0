use crate::error::*;
use crate::grid::*;
use crate::solver::kernel::relax_cell;
use crate::solver::*;

/// Gauss-Seidel style in place sweep, rows top to bottom,
/// columns left to right.
/// Cells see neighbors already updated earlier in the same sweep,
/// so results only reproduce bit for bit in exactly this order.
#[derive(Copy, Clone, Debug, Default)]
pub struct SequentialSweep;

impl Sweep for SequentialSweep {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn sweep(&self, grid: &mut Grid, omega: f64) -> f64 {
        profiling::scope!("sequential_sweep");
        let row_len = grid.row_len();
        let cells = grid.buffer_mut();
        let mut total_change = 0.0;
        for i in 1..row_len - 1 {
            for j in 1..row_len - 1 {
                total_change +=
                    relax_cell(cells, i * row_len + j, row_len, omega);
            }
        }
        total_change
    }
}

/// Relax `grid` in place until the mean change per cell is at or below
/// `tolerance`, or the probe guard trips.
pub fn relax(
    grid: &mut Grid,
    omega: f64,
    tolerance: f64,
) -> Result<SolveReport> {
    let params = SorParameters {
        omega,
        tolerance,
        ..Default::default()
    };
    Ok(Relaxation::new(&SequentialSweep, grid, &params)?.run())
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::init;
    use crate::util::*;

    #[test]
    fn equilibrium_test() {
        let mut grid = Grid::with_interior(10).unwrap();
        init::uniform(&mut grid, 5.0, 16);
        let report = relax(&mut grid, 1.58, 1.0e-5).unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.total_change, 0.0);
        assert!(report.converged());
        assert!(grid.buffer().iter().all(|v| *v == 5.0));
    }

    #[test]
    fn sweep_order_test() {
        // 4x4 with a hot top edge, omega 1:
        // later cells see the earlier cells of the same sweep
        let mut grid = Grid::new(4).unwrap();
        grid.par_set_values(|c| if c[0] == 0 { 8.0 } else { 0.0 }, 4);
        let change = SequentialSweep.sweep(&mut grid, 1.0);
        assert_eq!(grid.view(&vector![1, 1]), 2.0);
        assert_eq!(grid.view(&vector![1, 2]), 2.5);
        assert_eq!(grid.view(&vector![2, 1]), 0.5);
        assert_eq!(grid.view(&vector![2, 2]), 0.75);
        assert_eq!(change, 2.0 + 2.5 + 0.5 + 0.75);
    }

    #[test]
    fn reproducible_test() {
        let run = || {
            let mut grid = Grid::with_interior(10).unwrap();
            init::rand_uniform(&mut grid, 0.0, 10.0, 12);
            let report = relax(&mut grid, 1.0, 1.0e-5).unwrap();
            (report, grid)
        };
        let (report_a, grid_a) = run();
        let (report_b, grid_b) = run();
        assert!(report_a.converged());
        assert_eq!(report_a, report_b);
        assert_eq!(grid_a, grid_b);
    }
}

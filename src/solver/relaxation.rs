use crate::error::*;
use crate::grid::*;
use crate::solver::*;

/// Where a solve is.
/// `Running` until the sweep total drops to the tolerance
/// or the probe guard trips, both of which are final.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SorState {
    Running,
    Converged,
    Diverged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    Converged,

    /// The probe cell left the divergence limit, or the sweep total
    /// stopped being a finite number. Not proof of non-convergence.
    Diverged,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolveReport {
    /// Sweeps performed, including the one that terminated the solve.
    pub iterations: usize,

    pub termination: Termination,

    /// Sum of `|delta|` over the last sweep.
    pub total_change: f64,
}

impl SolveReport {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Drives one solve, a sweep at a time.
pub struct Relaxation<'a, SweepType: Sweep + ?Sized> {
    sweep: &'a SweepType,
    grid: &'a mut Grid,
    omega: f64,
    tolerance: f64,
    divergence_limit: f64,
    state: SorState,
    iterations: usize,
    total_change: f64,
}

impl<'a, SweepType: Sweep + ?Sized> Relaxation<'a, SweepType> {
    /// Validates everything up front,
    /// nothing is swept if this fails.
    pub fn new(
        sweep: &'a SweepType,
        grid: &'a mut Grid,
        params: &SorParameters,
    ) -> Result<Self> {
        params.validate()?;
        sweep.check(grid)?;
        Ok(Relaxation {
            sweep,
            grid,
            omega: params.omega,
            tolerance: params.tolerance,
            divergence_limit: params.divergence_limit(),
            state: SorState::Running,
            iterations: 0,
            total_change: 0.0,
        })
    }

    pub fn state(&self) -> SorState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn total_change(&self) -> f64 {
        self.total_change
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Run one sweep and update the state.
    /// Does nothing once the state is terminal.
    pub fn advance(&mut self) -> SorState {
        if self.state != SorState::Running {
            return self.state;
        }

        self.iterations += 1;
        self.total_change = self.sweep.sweep(self.grid, self.omega);

        let row_len = self.grid.row_len();
        let mean_change = self.total_change / (row_len * row_len) as f64;
        log::debug!(
            "{}: iteration {} total change {:e}",
            self.sweep.name(),
            self.iterations,
            self.total_change
        );

        let probe = self.grid.probe();
        if !self.total_change.is_finite() || probe.abs() > self.divergence_limit
        {
            log::warn!(
                "{}: suspect divergence at iteration {} (probe {})",
                self.sweep.name(),
                self.iterations,
                probe
            );
            self.state = SorState::Diverged;
        } else if mean_change <= self.tolerance {
            log::info!(
                "{}: converged after {} iterations",
                self.sweep.name(),
                self.iterations
            );
            self.state = SorState::Converged;
        }
        self.state
    }

    pub fn run(mut self) -> SolveReport {
        profiling::scope!("relaxation");
        while self.advance() == SorState::Running {}
        SolveReport {
            iterations: self.iterations,
            termination: match self.state {
                SorState::Diverged => Termination::Diverged,
                _ => Termination::Converged,
            },
            total_change: self.total_change,
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::util::*;

    fn cross_grid(value: f64) -> Grid {
        let mut grid = Grid::new(3).unwrap();
        for c in [vector![0, 1], vector![1, 0], vector![1, 2], vector![2, 1]] {
            grid.set(&c, value);
        }
        grid
    }

    #[test]
    fn advance_test() {
        let mut grid = cross_grid(4.0);
        let params = SorParameters {
            omega: 1.5,
            ..Default::default()
        };
        let mut relaxation =
            Relaxation::new(&SequentialSweep, &mut grid, &params).unwrap();
        assert_eq!(relaxation.state(), SorState::Running);
        assert_eq!(relaxation.iterations(), 0);

        assert_eq!(relaxation.advance(), SorState::Running);
        assert_eq!(relaxation.total_change(), 4.0);
        assert_eq!(relaxation.grid().view(&vector![1, 1]), 6.0);

        assert_eq!(relaxation.advance(), SorState::Running);
        assert_eq!(relaxation.total_change(), 2.0);
        assert_eq!(relaxation.grid().view(&vector![1, 1]), 3.0);
        assert_eq!(relaxation.iterations(), 2);

        let report = relaxation.run();
        assert!(report.converged());
        assert!(report.total_change / 9.0 <= params.tolerance);
    }

    #[test]
    fn terminal_state_sticks_test() {
        let mut grid = cross_grid(4.0);
        let params = SorParameters {
            omega: 1.0,
            ..Default::default()
        };
        let mut relaxation =
            Relaxation::new(&SequentialSweep, &mut grid, &params).unwrap();
        assert_eq!(relaxation.advance(), SorState::Running);
        assert_eq!(relaxation.advance(), SorState::Converged);
        assert_eq!(relaxation.advance(), SorState::Converged);
        assert_eq!(relaxation.iterations(), 2);
    }

    #[test]
    fn probe_guard_test() {
        // the probe starts far outside the default limit
        let mut grid = cross_grid(4.0);
        grid.set(&vector![1, 1], 1.0e6);
        let report = relax(&mut grid, 1.0, 1.0e-5).unwrap();
        // one sweep pulls the probe straight to 4.0
        assert_eq!(report.iterations, 2);
        assert!(report.converged());

        let mut grid = cross_grid(500.0);
        let report = relax(&mut grid, 1.0, 1.0e-5).unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.termination, Termination::Diverged);
    }

    #[test]
    fn non_finite_change_test() {
        let mut grid = cross_grid(f64::NAN);
        let report = relax(&mut grid, 1.0, 1.0e-5).unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.termination, Termination::Diverged);
    }

    #[test]
    fn invalid_parameters_rejected_test() {
        let mut grid = cross_grid(1.0);
        let params = SorParameters {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(Relaxation::new(&SequentialSweep, &mut grid, &params).is_err());
    }
}

use super::Grid;
use crate::solver::kernel::correction;
use std::mem::{align_of, size_of};
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

const _: () = assert!(
    size_of::<f64>() == size_of::<AtomicU64>()
        && align_of::<f64>() >= align_of::<AtomicU64>()
);

/// Shared view of a mutably borrowed grid for concurrent sweeps.
///
/// Cells are accessed as relaxed atomics holding `f64` bits. Workers
/// partition the interior rows between them and every row is written by
/// exactly one worker per sweep. Reads are not partitioned: the row just
/// above or below a stripe belongs to a neighbor that may be updating it
/// at the same moment, so those reads see either the old or the new
/// value. That is the relaxed consistency the threaded SOR variants
/// accept; final convergence does not depend on which value is seen,
/// bit-exact results across thread counts do.
pub struct SharedGrid<'a> {
    cells: &'a [AtomicU64],
    row_len: usize,
}

impl<'a> SharedGrid<'a> {
    pub(super) fn new(grid: &'a mut Grid) -> Self {
        let row_len = grid.row_len;
        let buffer = grid.buffer.as_mut_slice();
        // Safety: the grid is exclusively borrowed for 'a, and `AtomicU64`
        // has the size of `f64` and no stricter alignment.
        let cells = unsafe {
            std::slice::from_raw_parts(
                buffer.as_mut_ptr().cast::<AtomicU64>(),
                buffer.len(),
            )
        };
        SharedGrid { cells, row_len }
    }

    #[inline(always)]
    fn load(&self, index: usize) -> f64 {
        f64::from_bits(self.cells[index].load(Ordering::Relaxed))
    }

    /// Apply the update rule to interior cell `(i, j)`, returns `|delta|`.
    ///
    /// Callers keep each cell to a single writer per sweep, otherwise
    /// concurrent updates of the same cell can be lost.
    #[inline(always)]
    pub fn relax_cell(&self, i: usize, j: usize, omega: f64) -> f64 {
        debug_assert!(i >= 1 && i < self.row_len - 1);
        debug_assert!(j >= 1 && j < self.row_len - 1);
        let index = i * self.row_len + j;
        let center = self.load(index);
        let delta = correction(
            center,
            self.load(index - self.row_len),
            self.load(index + self.row_len),
            self.load(index + 1),
            self.load(index - 1),
        );
        self.cells[index]
            .store((center - delta * omega).to_bits(), Ordering::Relaxed);
        delta.abs()
    }

    /// Relax columns `columns` of interior row `i` left to right.
    #[inline]
    pub fn relax_row(
        &self,
        i: usize,
        columns: Range<usize>,
        omega: f64,
    ) -> f64 {
        let mut change = 0.0;
        for j in columns {
            change += self.relax_cell(i, j, omega);
        }
        change
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::util::*;

    #[test]
    fn relax_cell_test() {
        let mut grid = Grid::new(3).unwrap();
        for c in [vector![0, 1], vector![1, 0], vector![1, 2], vector![2, 1]] {
            grid.set(&c, 4.0);
        }
        {
            let shared = grid.shared();
            let change = shared.relax_cell(1, 1, 1.5);
            assert_eq!(change, 4.0);
        }
        // delta = 0 - 4, cell -= -4 * 1.5
        assert_eq!(grid.view(&vector![1, 1]), 6.0);
    }

    #[test]
    fn relax_row_test() {
        let mut grid = Grid::new(4).unwrap();
        grid.par_set_values(|c| if c[0] == 0 { 8.0 } else { 0.0 }, 4);
        let change = grid.shared().relax_row(1, 1..3, 1.0);
        // (1, 1): 0 - 0.25 * 8 = -2 -> 2
        // (1, 2): 0 - 0.25 * (8 + 2) = -2.5 -> 2.5
        assert_eq!(change, 4.5);
        assert_eq!(grid.view(&vector![1, 1]), 2.0);
        assert_eq!(grid.view(&vector![1, 2]), 2.5);
    }

    #[test]
    fn concurrent_rows_stay_bounded_test() {
        // with omega 1 every update is a neighbor average, so whatever
        // mix of old and new neighbors a worker sees, cells stay in [0, 8]
        let mut grid = Grid::new(34).unwrap();
        grid.par_set_values(|c| if c[0] == 0 { 8.0 } else { 0.0 }, 34);
        let ring = grid.boundary_snapshot();
        for _ in 0..20 {
            let shared = grid.shared();
            let shared = &shared;
            rayon::scope(|s| {
                for i in 1..33 {
                    s.spawn(move |_| {
                        shared.relax_row(i, 1..33, 1.0);
                    });
                }
            });
        }
        assert_eq!(grid.boundary_snapshot(), ring);
        assert!(grid.buffer().iter().all(|v| (0.0..=8.0).contains(v)));
        assert!(grid.view(&vector![1, 16]) > 0.0);
    }
}

//! The update rule shared by every sweep strategy.

/// Correction for a cell given its four neighbors.
///
/// Neighbors are summed up, down, right, left; every strategy goes
/// through here so the arithmetic is identical across them.
#[inline(always)]
pub fn correction(
    center: f64,
    up: f64,
    down: f64,
    right: f64,
    left: f64,
) -> f64 {
    center - 0.25 * (up + down + right + left)
}

/// Relax the cell at linear `index` of a row-major buffer in place,
/// returns `|delta|`.
#[inline(always)]
pub fn relax_cell(
    cells: &mut [f64],
    index: usize,
    row_len: usize,
    omega: f64,
) -> f64 {
    let center = cells[index];
    let delta = correction(
        center,
        cells[index - row_len],
        cells[index + row_len],
        cells[index + 1],
        cells[index - 1],
    );
    cells[index] = center - delta * omega;
    delta.abs()
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn correction_test() {
        assert_eq!(correction(1.0, 1.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(correction(0.0, 4.0, 4.0, 4.0, 4.0), -4.0);
        assert_approx_eq!(f64, correction(2.0, 1.0, 2.0, 3.0, 4.0), -0.5);
    }

    #[test]
    fn relax_cell_test() {
        // 3x3, only the center is interior
        let mut cells = vec![0.0, 4.0, 0.0, 4.0, 0.0, 4.0, 0.0, 4.0, 0.0];
        let change = relax_cell(&mut cells, 4, 3, 1.0);
        assert_eq!(change, 4.0);
        assert_eq!(cells[4], 4.0);

        // already at equilibrium, nothing moves
        let change = relax_cell(&mut cells, 4, 3, 1.0);
        assert_eq!(change, 0.0);
        assert_eq!(cells[4], 4.0);
    }

    #[test]
    fn over_relax_test() {
        let mut cells = vec![0.0, 4.0, 0.0, 4.0, 0.0, 4.0, 0.0, 4.0, 0.0];
        relax_cell(&mut cells, 4, 3, 1.5);
        assert_eq!(cells[4], 6.0);
        let change = relax_cell(&mut cells, 4, 3, 1.5);
        assert_eq!(change, 2.0);
        assert_eq!(cells[4], 3.0);
    }
}

use crate::util::*;

/// Number of cells in a square grid, `None` if it does not fit a `usize`.
pub fn square_buffer_size(row_len: usize) -> Option<usize> {
    row_len.checked_mul(row_len)
}

pub fn coord_to_linear(coord: &Coord, row_len: usize) -> usize {
    debug_assert!(coord[1] < row_len);
    coord[0] * row_len + coord[1]
}

pub fn linear_to_coord(linear_index: usize, row_len: usize) -> Coord {
    vector![linear_index / row_len, linear_index % row_len]
}

/// Whether a coordinate lies on the ghost ring of a square grid.
pub fn on_ghost_ring(coord: &Coord, row_len: usize) -> bool {
    coord[0] == 0
        || coord[1] == 0
        || coord[0] == row_len - 1
        || coord[1] == row_len - 1
}

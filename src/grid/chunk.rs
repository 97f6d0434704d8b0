use crate::util::*;

/// A contiguous piece of a grid buffer that knows where it came from,
/// so cells can be addressed by grid coordinate.
pub struct GridChunk<'a> {
    offset: usize,
    row_len: usize,
    buffer: &'a mut [f64],
}

impl<'a> GridChunk<'a> {
    pub fn new(offset: usize, row_len: usize, buffer: &'a mut [f64]) -> Self {
        GridChunk {
            offset,
            row_len,
            buffer,
        }
    }

    pub fn coord_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Coord, &mut f64)> {
        let offset = self.offset;
        let row_len = self.row_len;
        self.buffer
            .iter_mut()
            .enumerate()
            .map(move |(i, v): (usize, &mut f64)| {
                (linear_to_coord(offset + i, row_len), v)
            })
    }
}

//! Square, row-major grids of `f64` cells.
//!
//! The outermost ring of cells is the ghost zone: it holds the fixed
//! boundary values and is never written by a relaxation sweep.
//! Everything inside it, rows and columns `1..row_len - 1`, is the interior.

mod chunk;
mod shared;

pub use chunk::*;
pub use shared::*;

use crate::error::*;
use crate::util::*;
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    row_len: usize,
    buffer: Vec<f64>,
}

impl Grid {
    /// Allocate a zeroed `row_len` x `row_len` grid.
    /// A size that overflows is an allocation failure like any other.
    pub fn new(row_len: usize) -> Result<Self> {
        check_row_len(row_len)?;
        let size = square_buffer_size(row_len)
            .ok_or(SorError::Allocation { row_len })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| SorError::Allocation { row_len })?;
        buffer.resize(size, 0.0);
        Ok(Grid { row_len, buffer })
    }

    /// Allocate a grid with an `interior` x `interior` interior
    /// plus the ghost ring.
    pub fn with_interior(interior: usize) -> Result<Self> {
        Self::new(interior.saturating_add(2))
    }

    pub fn from_vec(row_len: usize, buffer: Vec<f64>) -> Result<Self> {
        check_row_len(row_len)?;
        if square_buffer_size(row_len) != Some(buffer.len()) {
            return Err(SorError::BufferSize {
                row_len,
                len: buffer.len(),
            });
        }
        Ok(Grid { row_len, buffer })
    }

    /// Side length, ghost ring included.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Side length of the interior.
    #[inline]
    pub fn interior_len(&self) -> usize {
        self.row_len - 2
    }

    #[inline]
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    #[track_caller]
    pub fn view(&self, coord: &Coord) -> f64 {
        assert!(
            self.contains(coord),
            "{:?} is outside a {}x{} grid",
            coord,
            self.row_len,
            self.row_len
        );
        self.buffer[coord_to_linear(coord, self.row_len)]
    }

    #[track_caller]
    pub fn set(&mut self, coord: &Coord, value: f64) {
        assert!(
            self.contains(coord),
            "{:?} is outside a {}x{} grid",
            coord,
            self.row_len,
            self.row_len
        );
        let index = coord_to_linear(coord, self.row_len);
        self.buffer[index] = value;
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.row_len && j < self.row_len {
            Some(self.buffer[i * self.row_len + j])
        } else {
            None
        }
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord[0] < self.row_len && coord[1] < self.row_len
    }

    /// The divergence probe, bottom right interior cell.
    #[inline]
    pub fn probe(&self) -> f64 {
        self.buffer[coord_to_linear(&self.probe_coord(), self.row_len)]
    }

    pub fn probe_coord(&self) -> Coord {
        vector![self.row_len - 2, self.row_len - 2]
    }

    /// Copy of every ghost ring cell, in linear order.
    pub fn boundary_snapshot(&self) -> Vec<f64> {
        self.buffer
            .iter()
            .enumerate()
            .filter(|(l, _)| {
                on_ghost_ring(&linear_to_coord(*l, self.row_len), self.row_len)
            })
            .map(|(_, v)| *v)
            .collect()
    }

    /// Smallest and largest cell, ghost ring included.
    pub fn min_max(&self) -> (f64, f64) {
        self.buffer.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), v| (min.min(*v), max.max(*v)),
        )
    }

    pub fn par_modify_access(
        &mut self,
        chunk_size: usize,
    ) -> impl IndexedParallelIterator<Item = GridChunk<'_>> {
        let row_len = self.row_len;
        self.buffer.par_chunks_mut(chunk_size).enumerate().map(
            move |(i, buffer_chunk): (usize, &mut [f64])| {
                GridChunk::new(i * chunk_size, row_len, buffer_chunk)
            },
        )
    }

    pub fn par_set_values<F: Fn(Coord) -> f64 + Send + Sync>(
        &mut self,
        f: F,
        chunk_size: usize,
    ) {
        self.par_modify_access(chunk_size)
            .for_each(|mut d: GridChunk<'_>| {
                d.coord_iter_mut().for_each(|(coord, value_mut)| {
                    *value_mut = f(coord);
                })
            });
    }

    /// Concurrent view used by the threaded sweeps.
    pub fn shared(&mut self) -> SharedGrid<'_> {
        SharedGrid::new(self)
    }
}

fn check_row_len(row_len: usize) -> Result<()> {
    if row_len < 3 {
        return Err(SorError::GridTooSmall { row_len });
    }
    Ok(())
}

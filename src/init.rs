//! Grid Initilization
//!
//! Utilities for common grid initilization.
//! Use `Grid::par_set_values` for custom needs.

use crate::grid::*;
use crate::util::*;
use clap::ValueEnum;
use rand::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InitType {
    Zero,
    Uniform { value: f64 },
    Incrementing,
    Rand { min: f64, max: f64, seed: u64 },
}

impl std::default::Default for InitType {
    fn default() -> Self {
        InitType::Rand {
            min: 0.0,
            max: 10.0,
            seed: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, Default)]
pub enum ClapInitType {
    Zero,
    Uniform,
    Incrementing,
    #[default]
    Rand,
}

impl ClapInitType {
    /// `dial` is the fill value for `Uniform`, and the upper end of the
    /// `[0, dial)` range for `Rand`.
    pub fn to_init_type(&self, dial: f64, seed: u64) -> InitType {
        match self {
            ClapInitType::Zero => InitType::Zero,
            ClapInitType::Uniform => InitType::Uniform { value: dial },
            ClapInitType::Incrementing => InitType::Incrementing,
            ClapInitType::Rand => InitType::Rand {
                min: 0.0,
                max: dial,
                seed,
            },
        }
    }
}

pub fn generate(grid: &mut Grid, init_type: InitType, chunk_size: usize) {
    match init_type {
        InitType::Zero => zero(grid),
        InitType::Uniform { value } => uniform(grid, value, chunk_size),
        InitType::Incrementing => incrementing(grid, chunk_size),
        InitType::Rand { min, max, seed } => rand_uniform(grid, min, max, seed),
    }
}

pub fn zero(grid: &mut Grid) {
    grid.buffer_mut().fill(0.0);
}

pub fn uniform(grid: &mut Grid, value: f64, chunk_size: usize) {
    grid.par_set_values(|_| value, chunk_size);
}

/// Cell with linear index `k` gets `k`.
pub fn incrementing(grid: &mut Grid, chunk_size: usize) {
    let row_len = grid.row_len();
    grid.par_set_values(|c| coord_to_linear(&c, row_len) as f64, chunk_size);
}

/// Uniform values in `[min, max)`.
/// Filled serially from one seeded generator, so the same seed always
/// produces the same grid no matter which strategy solves it.
pub fn rand_uniform(grid: &mut Grid, min: f64, max: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for value in grid.buffer_mut() {
        *value = min + rng.gen::<f64>() * (max - min);
    }
}

/// Overwrite the ghost ring, leave the interior alone.
pub fn ghost_boundary(grid: &mut Grid, value: f64) {
    let row_len = grid.row_len();
    for (l, cell) in grid.buffer_mut().iter_mut().enumerate() {
        if on_ghost_ring(&linear_to_coord(l, row_len), row_len) {
            *cell = value;
        }
    }
}

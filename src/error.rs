use thiserror::Error;

/// Everything that can stop a solve before its first sweep.
///
/// Divergence is not in here, a solve that trips the probe guard
/// still returns a report, see `Termination::Diverged`.
#[derive(Debug, Error)]
pub enum SorError {
    /// A grid needs at least one interior cell.
    #[error("grid row length {row_len} leaves no interior cells (minimum 3)")]
    GridTooSmall { row_len: usize },

    /// Could not reserve storage for the grid.
    #[error("could not allocate a {row_len}x{row_len} grid")]
    Allocation { row_len: usize },

    /// Buffer handed to `Grid::from_vec` does not match the row length.
    #[error("buffer holds {len} cells, expected {row_len}x{row_len}")]
    BufferSize { row_len: usize, len: usize },

    /// Cache-blocked strategies need the interior to tile exactly.
    #[error("interior {interior} is not a multiple of block {block_size}")]
    BlockSize { interior: usize, block_size: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SorError>;

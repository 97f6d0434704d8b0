pub mod indexing;
mod partition;

pub use indexing::*;
pub use partition::*;

pub use nalgebra::vector;

/// Grid coordinate, `[row, column]`.
pub type Coord = nalgebra::Vector2<usize>;

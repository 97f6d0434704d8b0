pub mod build_info;
pub mod error;
pub mod grid;
pub mod init;
pub mod solver;
pub mod sor_example;
pub mod util;

pub use error::{Result, SorError};
pub use grid::Grid;
pub use solver::{
    relax, solve, SolveReport, SorParameters, Strategy, Termination,
};

mod cell;
mod grid;

pub use cell::Cell;
pub use grid::Grid;
pub(crate) use grid::{check_density, check_dimensions};

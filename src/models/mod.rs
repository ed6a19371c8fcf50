mod cell;
mod matrix;

pub use cell::CellState;
pub use matrix::{Area, PresenceMatrix, PresenceMatrixData, Taxon};

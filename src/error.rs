//! Errors raised when the maze model is violated

use thiserror::Error;

use crate::Point;

/// Unrecoverable failure during generation or rendering.
///
/// None of these are runtime conditions a caller can fix by retrying; they
/// indicate bad input dimensions or a defect in the generator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("maze of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("start row {row} is outside a maze of height {height}")]
    StartRow { row: usize, height: usize },
    #[error("illegal random move draw {0}")]
    IllegalRandom(u32),
    #[error("position {0} is outside the grid")]
    OutOfBounds(Point),
    #[error("position {0} is already occupied")]
    Occupied(Point),
    #[error("missing cell at {0}")]
    MissingCell(Point),
    #[error("cell at {0} is not connected to the start")]
    Detached(Point),
}

//! Generate a perfect maze by randomized depth-first backtracking and draw it
//!
//! The walk enters the grid from the west edge, remembers the deepest cell
//! it ever reached, and designates the closest boundary cell on the way back
//! from there as the exit. The solution is the chain of back-references from
//! the exit to the entrance.
//!
//! # Examples
//! ```
//! use backtrack_maze::canvas::encode_ppm;
//! use backtrack_maze::maze_generator::MazeGenerator;
//! use backtrack_maze::render::{RenderOptions, Renderer};
//!
//! let mut gen = MazeGenerator::new(Some(7));
//! let maze = gen.generate_maze(12, 8).unwrap();
//! assert!(maze.grid().on_edge(maze.exit_cell().pos));
//!
//! let mut renderer = Renderer::new(&maze, RenderOptions::default()).unwrap();
//! renderer.draw_walls(&maze).unwrap();
//! renderer.draw_path(&maze);
//! assert_eq!(renderer.canvas().dimensions(), (250, 170));
//!
//! let ppm = encode_ppm(renderer.canvas()).unwrap();
//! assert!(ppm.starts_with(b"P6"));
//! ```

use std::fmt;

use bitflags::bitflags;

pub mod canvas;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod render;

pub use error::MazeError;
pub use grid::{Cell, CellId, Grid, Maze};

/// Location in grid coordinates
///
/// Coordinates are signed, because the entrance lies one step west of the
/// grid and candidate neighbours may fall outside of it.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step towards `orientation`
    pub fn step(self, orientation: Orientation) -> Self {
        let (dx, dy) = orientation.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Absolute heading; north is towards smaller `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Heading after taking the relative move `mv`
    ///
    /// Left is a counter-clockwise quarter turn, right a clockwise one.
    pub fn turn(self, mv: Move) -> Self {
        match mv {
            Move::Forward => self,
            Move::Left => match self {
                Orientation::North => Orientation::West,
                Orientation::East => Orientation::North,
                Orientation::South => Orientation::East,
                Orientation::West => Orientation::South,
            },
            Move::Right => match self {
                Orientation::North => Orientation::East,
                Orientation::East => Orientation::South,
                Orientation::South => Orientation::West,
                Orientation::West => Orientation::North,
            },
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::North => Orientation::South,
            Orientation::East => Orientation::West,
            Orientation::South => Orientation::North,
            Orientation::West => Orientation::East,
        }
    }

    /// Relative move that faces `side` when heading this way
    ///
    /// Returns `None` for the side behind, which no move can reach.
    pub fn relative(self, side: Orientation) -> Option<Move> {
        Move::ALL.into_iter().find(|mv| self.turn(*mv) == side)
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, -1),
            Orientation::East => (1, 0),
            Orientation::South => (0, 1),
            Orientation::West => (-1, 0),
        }
    }
}

/// Move relative to the heading a cell was entered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Forward,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Forward, Move::Left, Move::Right];

    /// Map a draw from `0..3` to a move
    pub fn from_draw(draw: u32) -> Result<Self, MazeError> {
        match draw {
            0 => Ok(Move::Forward),
            1 => Ok(Move::Left),
            2 => Ok(Move::Right),
            n => Err(MazeError::IllegalRandom(n)),
        }
    }

    pub fn flag(self) -> Moves {
        match self {
            Move::Forward => Moves::FORWARD,
            Move::Left => Moves::LEFT,
            Move::Right => Moves::RIGHT,
        }
    }
}

bitflags! {
    /// Set of relative moves, used for the tried and open masks of a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Moves: u8 {
        const FORWARD = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

impl Moves {
    pub fn has(self, mv: Move) -> bool {
        self.contains(mv.flag())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Move, Moves, Orientation, Point};

    #[test]
    fn left_and_right_are_quarter_turns() {
        for o in Orientation::ALL {
            assert_eq!(o.turn(Move::Forward), o);
            assert_eq!(o.turn(Move::Left).turn(Move::Right), o);
            assert_eq!(o.turn(Move::Right).turn(Move::Right), o.opposite());
        }
        assert_eq!(Orientation::North.turn(Move::Left), Orientation::West);
        assert_eq!(Orientation::North.turn(Move::Right), Orientation::East);
    }

    #[test]
    fn step_follows_heading() {
        let p = Point::new(3, 4);
        assert_eq!(p.step(Orientation::North), Point::new(3, 3));
        assert_eq!(p.step(Orientation::East), Point::new(4, 4));
        assert_eq!(p.step(Orientation::South), Point::new(3, 5));
        assert_eq!(p.step(Orientation::West), Point::new(2, 4));
    }

    #[test]
    fn relative_inverts_turn() {
        for o in Orientation::ALL {
            for mv in Move::ALL {
                assert_eq!(o.relative(o.turn(mv)), Some(mv));
            }
            assert_eq!(o.relative(o.opposite()), None);
        }
    }

    #[test]
    fn draws_outside_three_are_rejected() {
        assert_eq!(Move::from_draw(2), Ok(Move::Right));
        assert!(Move::from_draw(3).is_err());
    }

    #[test]
    fn move_flags_fill_mask() {
        let mut mask = Moves::empty();
        for mv in Move::ALL {
            assert!(!mask.has(mv));
            mask |= mv.flag();
        }
        assert!(mask.is_all());
    }
}

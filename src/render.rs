//! Drawing of the maze and its solution

use image::{Rgb, RgbImage};
use itertools::Itertools;

use crate::canvas::{self, BLACK, RED, WHITE};
use crate::{Maze, MazeError, Orientation, Point};

/// Image layout and colors
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Blank border around the maze in pixels
    pub margin: u32,
    /// Line width in pixels
    pub stroke: u32,
    pub background: Rgb<u8>,
    pub wall: Rgb<u8>,
    pub path: Rgb<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 20,
            margin: 5,
            stroke: 1,
            background: WHITE,
            wall: BLACK,
            path: RED,
        }
    }
}

/// Grid corners bounding each wall drawn around the maze
///
/// Positions are visited column by column. Every position must hold a cell.
pub fn wall_segments(maze: &Maze) -> Result<Vec<(Point, Point)>, MazeError> {
    let grid = maze.grid();
    let mut segments = Vec::new();
    for p in grid.positions() {
        let id = grid.id_at(p).ok_or(MazeError::MissingCell(p))?;
        segments.extend(maze.walls(id).map(|side| side_corners(p, side)));
    }
    Ok(segments)
}

/// End points of the edge of square `p` facing `side`
fn side_corners(p: Point, side: Orientation) -> (Point, Point) {
    let (from, to) = match side {
        Orientation::North => ((0, 0), (1, 0)),
        Orientation::East => ((1, 0), (1, 1)),
        Orientation::South => ((0, 1), (1, 1)),
        Orientation::West => ((0, 0), (0, 1)),
    };
    (
        Point::new(p.x + from.0, p.y + from.1),
        Point::new(p.x + to.0, p.y + to.1),
    )
}

/// Draws a [Maze] onto a canvas sized to fit it
pub struct Renderer {
    options: RenderOptions,
    /// `options.cell_size` and `options.margin` as signed pixel offsets
    cell: i32,
    margin: i32,
    canvas: RgbImage,
}

impl Renderer {
    /// Renderer with a blank canvas of `cells * cell_size + 2 * margin`
    /// pixels per axis
    ///
    /// Returns error if the canvas would not fit `i32` pixel coordinates.
    pub fn new(maze: &Maze, options: RenderOptions) -> Result<Self, MazeError> {
        let grid = maze.grid();
        let too_large = || MazeError::TooLarge {
            width: grid.width(),
            height: grid.height(),
        };
        let extent = |cells: usize| {
            u32::try_from(cells)
                .ok()?
                .checked_mul(options.cell_size)?
                .checked_add(options.margin.checked_mul(2)?)
                .filter(|&px| i32::try_from(px).is_ok())
        };
        let width = extent(grid.width()).ok_or_else(too_large)?;
        let height = extent(grid.height()).ok_or_else(too_large)?;
        log::debug!("Canvas is {width}x{height} pixels");

        let cell = i32::try_from(options.cell_size).map_err(|_| too_large())?;
        let margin = i32::try_from(options.margin).map_err(|_| too_large())?;
        Ok(Self {
            canvas: canvas::blank(width, height, options.background),
            options,
            cell,
            margin,
        })
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Draw every closed side of every cell
    ///
    /// The exit cell is drawn open on all sides, which leaves the gap the
    /// solution leaves through. The entry side of the start faces the
    /// entrance and is never drawn.
    pub fn draw_walls(&mut self, maze: &Maze) -> Result<(), MazeError> {
        for (from, to) in wall_segments(maze)? {
            let (from, to) = (self.corner(from), self.corner(to));
            canvas::draw_segment(
                &mut self.canvas,
                from,
                to,
                self.options.wall,
                self.options.stroke,
            );
        }
        Ok(())
    }

    /// Overlay the solution from the exit back to the entrance
    pub fn draw_path(&mut self, maze: &Maze) {
        let grid = maze.grid();
        let path = maze.solution().map(|id| grid.cell(id).pos);
        for (from, to) in path.chain([maze.entrance()]).tuple_windows() {
            let (from, to) = (self.center(from), self.center(to));
            canvas::draw_segment(
                &mut self.canvas,
                from,
                to,
                self.options.path,
                self.options.stroke,
            );
        }
    }

    /// Pixel of the top-left corner of grid square `p`
    fn corner(&self, p: Point) -> (i32, i32) {
        (p.x * self.cell + self.margin, p.y * self.cell + self.margin)
    }

    fn center(&self, p: Point) -> (i32, i32) {
        let (x, y) = self.corner(p);
        (x + self.cell / 2, y + self.cell / 2)
    }
}

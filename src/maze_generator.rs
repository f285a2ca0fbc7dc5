//! Maze generation

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Cell, CellId, Grid, Maze, MazeError, Move, Orientation, Point};

/// Randomized depth-first maze generator
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_rng(if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        })
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Generator drawing its moves and start row from `random`
    pub fn with_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a maze entered from a random row on the west edge
    pub fn generate_maze(&mut self, width: usize, height: usize) -> Result<Maze, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        let start_row = self.random.gen_range(0..height);
        self.generate_maze_from(width, height, start_row)
    }

    /// Generate a perfect maze entered from the west at `start_row`
    ///
    /// Walks the grid depth first, trying the forward, left and right moves
    /// of each cell in random order and backing up once all three have been
    /// tried. The walk ends when it backs out of the start cell, at which
    /// point every cell has been visited exactly once.
    ///
    /// The exit is the first boundary cell found when following
    /// back-references from the deepest cell reached.
    pub fn generate_maze_from(
        &mut self,
        width: usize,
        height: usize,
        start_row: usize,
    ) -> Result<Maze, MazeError> {
        let mut grid = Grid::new(width, height)?;
        let row = i32::try_from(start_row)
            .ok()
            .filter(|_| start_row < height)
            .ok_or(MazeError::StartRow {
                row: start_row,
                height,
            })?;
        log::info!("Generating {width}x{height} maze entered at row {start_row}");

        let entrance = Point::new(-1, row);
        let start = grid.insert(Cell::new(
            entrance.step(Orientation::East),
            Orientation::East,
            None,
        ))?;

        let mut current = start;
        let mut depth = 1;
        let mut farthest = start;
        let mut max_depth = depth;

        loop {
            if grid.cell(current).tried.is_all() {
                match Self::backtrack(&grid, current, &mut depth) {
                    Some(id) => current = id,
                    None => break,
                }
            }

            // Redraw until an untried move comes up
            let mv = Move::from_draw(self.random.gen_range(0..3))?;
            let cell = grid.cell_mut(current);
            if cell.tried.has(mv) {
                continue;
            }
            cell.tried |= mv.flag();

            let orientation = cell.orientation.turn(mv);
            let next = cell.pos.step(orientation);
            if grid.collides(next) {
                continue;
            }

            grid.cell_mut(current).open |= mv.flag();
            current = grid.insert(Cell::new(next, orientation, Some(current)))?;
            depth += 1;
            if depth > max_depth {
                max_depth = depth;
                farthest = current;
            }
        }
        log::debug!(
            "Visited {} cells, deepest at {} with depth {max_depth}",
            grid.len(),
            grid.cell(farthest).pos
        );

        let exit = Self::nearest_edge(&grid, farthest)?;
        log::debug!("Exit at {}", grid.cell(exit).pos);

        Ok(Maze::new(grid, entrance, start, farthest, max_depth, exit))
    }

    /// Back up from an exhausted cell to the nearest ancestor with an
    /// untried move, decreasing `depth` once per step.
    ///
    /// Returns `None` when the start itself is exhausted.
    fn backtrack(grid: &Grid, mut id: CellId, depth: &mut usize) -> Option<CellId> {
        while grid.cell(id).tried.is_all() {
            *depth -= 1;
            id = grid.cell(id).back?;
        }
        Some(id)
    }

    /// First cell on the grid boundary when walking back from `id`
    fn nearest_edge(grid: &Grid, mut id: CellId) -> Result<CellId, MazeError> {
        loop {
            let cell = grid.cell(id);
            if grid.on_edge(cell.pos) {
                return Ok(id);
            }
            id = cell.back.ok_or(MazeError::Detached(cell.pos))?;
        }
    }
}

//! Grid of visited cells and the finished maze

use crate::{MazeError, Move, Moves, Orientation, Point};

/// Index of a cell inside its [Grid]
pub type CellId = usize;

/// Visited grid square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub pos: Point,
    /// Cell this one was first entered from; `None` only for the start
    pub back: Option<CellId>,
    /// Heading when the cell was entered
    pub orientation: Orientation,
    /// Moves already attempted from here
    pub tried: Moves,
    /// Moves that carved a passage, always a subset of `tried`
    pub open: Moves,
}

impl Cell {
    pub fn new(pos: Point, orientation: Orientation, back: Option<CellId>) -> Self {
        Self {
            pos,
            back,
            orientation,
            tried: Moves::empty(),
            open: Moves::empty(),
        }
    }
}

/// Fixed-size grid of cells
///
/// Cells live in an arena in visiting order, so a back-reference always
/// holds a smaller id than the cell it belongs to. `slots` maps each
/// position to the cell occupying it.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// `width` and `height` as signed coordinates
    columns: i32,
    rows: i32,
    slots: Vec<Option<CellId>>,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    ///
    /// Returns error if either dimension is zero, or if the grid cannot be
    /// addressed with `i32` coordinates and a `usize` cell count.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        let too_large = || MazeError::TooLarge { width, height };
        let columns = i32::try_from(width).map_err(|_| too_large())?;
        let rows = i32::try_from(height).map_err(|_| too_large())?;
        let size = width.checked_mul(height).ok_or_else(too_large)?;
        Ok(Self {
            width,
            height,
            columns,
            rows,
            slots: vec![None; size],
            cells: Vec::with_capacity(size),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major slot of `p`, or `None` if it lies outside the grid
    fn slot(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.height).then_some(x + y * self.width)
    }

    /// Id of the cell at `p`
    pub fn id_at(&self, p: Point) -> Option<CellId> {
        self.slot(p).and_then(|slot| self.slots[slot])
    }

    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.id_at(p).map(|id| &self.cells[id])
    }

    /// Cell with the given id; ids come from [Self::insert]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id]
    }

    /// True if `p` is outside the grid or already holds a cell
    pub fn collides(&self, p: Point) -> bool {
        self.slot(p).map_or(true, |slot| self.slots[slot].is_some())
    }

    pub fn on_edge(&self, p: Point) -> bool {
        p.x == 0 || p.y == 0 || p.x == self.columns - 1 || p.y == self.rows - 1
    }

    /// Every position of the grid, column by column
    pub fn positions(&self) -> impl Iterator<Item = Point> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |x| (0..rows).map(move |y| Point::new(x, y)))
    }

    /// Store `cell` at its position
    pub fn insert(&mut self, cell: Cell) -> Result<CellId, MazeError> {
        let slot = self.slot(cell.pos).ok_or(MazeError::OutOfBounds(cell.pos))?;
        if self.slots[slot].is_some() {
            return Err(MazeError::Occupied(cell.pos));
        }
        let id = self.cells.len();
        self.slots[slot] = Some(id);
        self.cells.push(cell);
        Ok(id)
    }

    /// Number of visited cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over cells in visiting order
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate()
    }
}

/// Completed maze
///
/// Immutable once generated. The exit always lies on the grid boundary and
/// the start is the cell just east of [Self::entrance].
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    entrance: Point,
    start: CellId,
    farthest: CellId,
    max_depth: usize,
    exit: CellId,
}

impl Maze {
    pub(crate) fn new(
        grid: Grid,
        entrance: Point,
        start: CellId,
        farthest: CellId,
        max_depth: usize,
        exit: CellId,
    ) -> Self {
        Self {
            grid,
            entrance,
            start,
            farthest,
            max_depth,
            exit,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Virtual position west of the start cell where the walk came from
    pub fn entrance(&self) -> Point {
        self.entrance
    }

    pub fn start(&self) -> CellId {
        self.start
    }

    pub fn start_cell(&self) -> &Cell {
        self.grid.cell(self.start)
    }

    /// Deepest cell found during generation
    pub fn farthest(&self) -> CellId {
        self.farthest
    }

    /// Depth of [Self::farthest]; the start has depth 1
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn exit(&self) -> CellId {
        self.exit
    }

    pub fn exit_cell(&self) -> &Cell {
        self.grid.cell(self.exit)
    }

    /// Open moves of a cell as drawn: the exit is open on every side
    pub fn open_moves(&self, id: CellId) -> Moves {
        if id == self.exit {
            Moves::all()
        } else {
            self.grid.cell(id).open
        }
    }

    /// Cells from `id` back to the start, both included
    pub fn path_from(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        std::iter::successors(Some(id), move |&id| self.grid.cell(id).back)
    }

    /// Solution path from the exit back to the start
    pub fn solution(&self) -> impl Iterator<Item = CellId> + '_ {
        self.path_from(self.exit)
    }

    /// Number of cells on the back-reference chain of `id`
    pub fn depth(&self, id: CellId) -> usize {
        self.path_from(id).count()
    }

    /// Whether a passage leads from the cell at `p` towards `side`
    ///
    /// Openings are stored only on the cell that carved them, so this also
    /// looks at the entry side, which is open towards the predecessor. The
    /// generation-time masks are used; the exit is not special here.
    pub fn connected(&self, p: Point, side: Orientation) -> Result<bool, MazeError> {
        let cell = self.grid.get(p).ok_or(MazeError::MissingCell(p))?;
        Ok(match cell.orientation.relative(side) {
            Some(mv) => cell.open.has(mv),
            None => cell.back.is_some(),
        })
    }

    /// Sides of a cell drawn as walls
    pub fn walls(&self, id: CellId) -> impl Iterator<Item = Orientation> + '_ {
        let cell = self.grid.cell(id);
        let open = self.open_moves(id);
        Move::ALL
            .into_iter()
            .filter(move |mv| !open.has(*mv))
            .map(move |mv| cell.orientation.turn(mv))
    }
}

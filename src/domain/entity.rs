/// Entities: Player, Wall, Gold, plus the input vocabulary that moves them.
///
/// Walls and golds live on a fixed row and only ever translate horizontally,
/// one column per tick, wrapping within the interior span.

use super::grid::{Grid, Pos};

/// Horizontal drift direction of a wall or gold.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn delta(self) -> isize {
        match self {
            Heading::Left => -1,
            Heading::Right => 1,
        }
    }
}

/// Player movement direction (one cell per key press)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            MoveDir::Up => (-1, 0),
            MoveDir::Down => (1, 0),
            MoveDir::Left => (0, -1),
            MoveDir::Right => (0, 1),
        }
    }
}

/// What a single key press asks the game to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(MoveDir),
    Quit,
    /// Unbound key: no state change, frame is still redrawn.
    Other(char),
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Player { pos }
    }
}

#[derive(Clone, Debug)]
pub struct Wall {
    pub row: usize,
    /// First column of the span, always in `[1, cols - 2]`.
    pub col: usize,
    pub heading: Heading,
}

impl Wall {
    pub fn new(row: usize, col: usize, heading: Heading) -> Self {
        Wall { row, col, heading }
    }

    /// Columns occupied by a wall of length `len`, wrapping around the interior.
    pub fn columns(&self, grid: Grid, len: usize) -> impl Iterator<Item = usize> + '_ {
        (0..len).map(move |offset| grid.wrap_col(self.col, offset as isize))
    }

    pub fn covers(&self, pos: Pos, grid: Grid, len: usize) -> bool {
        pos.row == self.row && self.columns(grid, len).any(|c| c == pos.col)
    }

    pub fn advance(&mut self, grid: Grid) {
        self.col = grid.wrap_col(self.col, self.heading.delta());
    }
}

#[derive(Clone, Debug)]
pub struct Gold {
    pub row: usize,
    pub col: usize,
    pub heading: Heading,
    /// Cleared exactly once, on pickup. Never set again.
    pub alive: bool,
}

impl Gold {
    pub fn new(row: usize, col: usize, heading: Heading) -> Self {
        Gold { row, col, heading, alive: true }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    pub fn advance(&mut self, grid: Grid) {
        self.col = grid.wrap_col(self.col, self.heading.delta());
    }
}

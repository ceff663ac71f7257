/// Grid geometry: a fixed rectangle with a one-cell border frame.
///
/// Row 0, row `rows - 1`, column 0 and column `cols - 1` are border.
/// Everything else is the interior, where the player and all entities live.
/// Horizontal motion wraps within the interior column span `[1, cols - 2]`.

use super::entity::MoveDir;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// Both dimensions must be at least 3 so the interior is non-empty.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Grid { rows, cols }
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.rows / 2, self.cols / 2)
    }

    /// Number of interior columns; the modulus of every horizontal wrap.
    pub fn span(&self) -> usize {
        self.cols - 2
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.row >= 1 && pos.row <= self.rows - 2 && pos.col >= 1 && pos.col <= self.cols - 2
    }

    #[inline]
    pub fn is_border(&self, pos: Pos) -> bool {
        self.contains(pos) && !self.is_interior(pos)
    }

    /// Shift an interior column by `delta`, wrapping into `[1, cols - 2]`.
    pub fn wrap_col(&self, col: usize, delta: isize) -> usize {
        let span = self.span() as isize;
        let zero_based = col as isize - 1 + delta;
        1 + zero_based.rem_euclid(span) as usize
    }

    /// The neighbouring cell in `dir`, or None if it would leave the interior.
    pub fn step(&self, from: Pos, dir: MoveDir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = from.row as isize + dr;
        let col = from.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let to = Pos::new(row as usize, col as usize);
        if self.is_interior(to) { Some(to) } else { None }
    }
}

/// WorldState: the complete snapshot of a running game.
///
/// The single source of truth for grid, player, walls, golds and status.
/// Both actors reach it only through `SharedWorld::with_lock`; nothing here
/// knows about threads.
///
/// ## Status
///
/// `status` starts at `Playing` and moves exactly once to a terminal value.
/// All transitions go through `finish()`, which refuses a second one.

use rand::Rng;

use crate::domain::entity::{Gold, Heading, Player, Wall};
use crate::domain::grid::{Grid, Pos};
use crate::domain::rules::{self, GOLD_ROWS, GRID, WALL_LEN, WALL_ROWS};
use crate::domain::tile::Glyph;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum GameStatus {
    Playing = 0,
    Lost = 1,
    Won = 2,
    Quit = 3,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of `to_u8`. Unknown values read as `Quit`.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => GameStatus::Playing,
            1 => GameStatus::Lost,
            2 => GameStatus::Won,
            _ => GameStatus::Quit,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorldState {
    pub grid: Grid,
    pub wall_len: usize,
    pub player: Player,
    pub walls: Vec<Wall>,
    pub golds: Vec<Gold>,
    pub status: GameStatus,
}

// ── Construction ──

impl WorldState {
    /// Standard layout: player at the center, walls on `WALL_ROWS` with
    /// alternating headings, golds on `GOLD_ROWS` with random headings.
    /// Starting columns are drawn from `rng`.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let span = GRID.span();

        let walls = WALL_ROWS.iter().enumerate()
            .map(|(i, &row)| Wall::new(row, rng.gen_range(1..=span), rules::wall_heading(i)))
            .collect();

        let golds = GOLD_ROWS.iter()
            .map(|&row| {
                let col = rng.gen_range(1..=span);
                let heading = if rng.gen_bool(0.5) { Heading::Right } else { Heading::Left };
                Gold::new(row, col, heading)
            })
            .collect();

        WorldState::from_layout(GRID, WALL_LEN, GRID.center(), walls, golds)
    }

    /// Build a world from an explicit layout. Status starts at `Playing`.
    pub fn from_layout(
        grid: Grid,
        wall_len: usize,
        player: Pos,
        walls: Vec<Wall>,
        golds: Vec<Gold>,
    ) -> Self {
        debug_assert!(grid.is_interior(player));
        debug_assert!(wall_len <= grid.span());
        WorldState {
            grid,
            wall_len,
            player: Player::new(player),
            walls,
            golds,
            status: GameStatus::Playing,
        }
    }
}

// ── Queries ──

impl WorldState {
    /// Is any wall span currently covering `pos`?
    pub fn wall_covers(&self, pos: Pos) -> bool {
        self.walls.iter().any(|w| w.covers(pos, self.grid, self.wall_len))
    }

    pub fn gold_remaining(&self) -> usize {
        self.golds.iter().filter(|g| g.alive).count()
    }

    /// What `pos` renders as. Same precedence as the renderer's stamping
    /// order: border, then player over gold over wall.
    pub fn glyph_at(&self, pos: Pos) -> Glyph {
        let grid = self.grid;
        if !grid.contains(pos) {
            return Glyph::Empty;
        }
        if grid.is_border(pos) {
            let top_or_bottom = pos.row == 0 || pos.row == grid.rows - 1;
            let side = pos.col == 0 || pos.col == grid.cols - 1;
            return match (top_or_bottom, side) {
                (true, true) => Glyph::Corner,
                (true, false) => Glyph::HLine,
                _ => Glyph::VLine,
            };
        }
        if self.player.pos == pos {
            Glyph::Player
        } else if self.golds.iter().any(|g| g.alive && g.pos() == pos) {
            Glyph::Gold
        } else if self.wall_covers(pos) {
            Glyph::Wall
        } else {
            Glyph::Empty
        }
    }
}

// ── Mutation ──

impl WorldState {
    /// Move to a terminal status. Returns false (and changes nothing) if the
    /// game already ended or `status` is `Playing`.
    pub fn finish(&mut self, status: GameStatus) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }

    /// Mark the first alive gold at `pos` as collected.
    pub fn collect_gold_at(&mut self, pos: Pos) -> bool {
        match self.golds.iter_mut().find(|g| g.alive && g.pos() == pos) {
            Some(gold) => {
                gold.alive = false;
                true
            }
            None => false,
        }
    }
}

/// Compiled-in game constants.
///
/// Geometry, entity rows, wall length and cadences are fixed: the game has
/// no difficulty settings. Only key bindings and presentation live in
/// `config.toml`.

use std::time::Duration;

use super::entity::Heading;
use super::grid::Grid;

pub const GRID: Grid = Grid::new(17, 49);

pub const WALL_LEN: usize = 15;

/// Wall rows. Disjoint from gold rows and from the player's start row.
pub const WALL_ROWS: [usize; 6] = [2, 4, 6, 10, 12, 14];

pub const GOLD_ROWS: [usize; 6] = [1, 3, 5, 11, 13, 15];

/// How often the input actor polls for a key.
pub const INPUT_POLL: Duration = Duration::from_millis(50);

/// One world tick: walls and golds advance together on this cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Walls alternate direction by row: right, left, right, ...
pub fn wall_heading(index: usize) -> Heading {
    if index % 2 == 0 { Heading::Right } else { Heading::Left }
}

/// The two world-advance rules: one key press, one tick.
///
/// Both are pure functions over `WorldState`: no locking, no drawing.
/// The caller holds the world lock and redraws afterwards.
///
/// Tick processing order:
///   1. Walls advance by heading (wrapping)
///   2. Alive golds advance by heading (wrapping)
///   3. Wall over player → Lost
///   4. Gold drifted onto player → collected
///   5. No gold left → Won
///
/// Once `status` is terminal, neither rule touches anything.

use tracing::debug;

use crate::domain::entity::Command;
use crate::domain::tile::Glyph;
use super::event::{GameEvent, Pickup};
use super::world::{GameStatus, WorldState};

// ══════════════════════════════════════════════════════════════
// Key press
// ══════════════════════════════════════════════════════════════

pub fn apply_command(world: &mut WorldState, command: Command) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.status.is_terminal() { return events; }

    let dir = match command {
        Command::Quit => {
            world.finish(GameStatus::Quit);
            events.push(GameEvent::Quit);
            return events;
        }
        Command::Other(key) => {
            debug!(?key, "unbound key");
            return events;
        }
        Command::Move(dir) => dir,
    };

    let target = match world.grid.step(world.player.pos, dir) {
        Some(t) => t,
        None => {
            debug!(?dir, from = ?world.player.pos, "move blocked by border");
            return events;
        }
    };

    let glyph = world.glyph_at(target);
    if glyph.is_lethal() {
        // The losing frame shows the player on the wall cell.
        world.player.pos = target;
        world.finish(GameStatus::Lost);
        events.push(GameEvent::PlayerCrushed { at: target });
        return events;
    }
    if glyph.is_pickup() && world.collect_gold_at(target) {
        events.push(GameEvent::GoldCollected { at: target, by: Pickup::Stepped });
    }

    world.player.pos = target;
    resolve_win(world, &mut events);
    events
}

// ══════════════════════════════════════════════════════════════
// Tick
// ══════════════════════════════════════════════════════════════

pub fn tick(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.status.is_terminal() { return events; }

    let grid = world.grid;
    for wall in world.walls.iter_mut() {
        wall.advance(grid);
    }
    for gold in world.golds.iter_mut().filter(|g| g.alive) {
        gold.advance(grid);
    }

    let player = world.player.pos;
    if world.wall_covers(player) {
        world.finish(GameStatus::Lost);
        events.push(GameEvent::PlayerCrushed { at: player });
        return events;
    }

    for gold in world.golds.iter_mut().filter(|g| g.alive && g.pos() == player) {
        gold.alive = false;
        events.push(GameEvent::GoldCollected { at: player, by: Pickup::Drifted });
    }

    resolve_win(world, &mut events);
    events
}

fn resolve_win(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.gold_remaining() == 0 && world.finish(GameStatus::Won) {
        events.push(GameEvent::AllGoldCollected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Gold, Heading, MoveDir, Wall};
    use crate::domain::grid::Pos;
    use crate::domain::rules::{GRID, WALL_LEN};

    fn world(player: Pos, walls: Vec<Wall>, golds: Vec<Gold>) -> WorldState {
        WorldState::from_layout(GRID, WALL_LEN, player, walls, golds)
    }

    fn far_gold() -> Gold {
        Gold::new(15, 2, Heading::Right)
    }

    // ── Key press ──

    #[test]
    fn move_into_empty_cell() {
        let mut w = world(Pos::new(8, 24), vec![], vec![far_gold()]);
        let events = apply_command(&mut w, Command::Move(MoveDir::Left));
        assert!(events.is_empty());
        assert_eq!(w.player.pos, Pos::new(8, 23));
        assert_eq!(w.status, GameStatus::Playing);
    }

    #[test]
    fn move_into_border_is_ignored() {
        let mut w = world(Pos::new(1, 1), vec![], vec![far_gold()]);
        for dir in [MoveDir::Up, MoveDir::Left] {
            assert!(apply_command(&mut w, Command::Move(dir)).is_empty());
            assert_eq!(w.player.pos, Pos::new(1, 1));
        }
        assert_eq!(w.status, GameStatus::Playing);
    }

    #[test]
    fn stepping_onto_gold_collects_it() {
        let mut w = world(
            Pos::new(8, 24),
            vec![],
            vec![Gold::new(7, 24, Heading::Left), far_gold()],
        );
        let events = apply_command(&mut w, Command::Move(MoveDir::Up));
        assert_eq!(
            events,
            vec![GameEvent::GoldCollected { at: Pos::new(7, 24), by: Pickup::Stepped }]
        );
        assert_eq!(w.player.pos, Pos::new(7, 24));
        assert!(!w.golds[0].alive);
        assert!(w.golds[1].alive);
        assert_eq!(w.status, GameStatus::Playing);
        assert_eq!(w.glyph_at(Pos::new(7, 24)), Glyph::Player);
    }

    #[test]
    fn collecting_last_gold_wins() {
        let mut w = world(Pos::new(8, 24), vec![], vec![Gold::new(8, 25, Heading::Right)]);
        let events = apply_command(&mut w, Command::Move(MoveDir::Right));
        assert_eq!(events.last(), Some(&GameEvent::AllGoldCollected));
        assert_eq!(w.status, GameStatus::Won);
        assert_eq!(w.gold_remaining(), 0);
    }

    #[test]
    fn stepping_onto_wall_loses_and_moves_player() {
        let mut w = world(
            Pos::new(9, 24),
            vec![Wall::new(10, 20, Heading::Right)],
            vec![far_gold()],
        );
        let events = apply_command(&mut w, Command::Move(MoveDir::Down));
        assert_eq!(events, vec![GameEvent::PlayerCrushed { at: Pos::new(10, 24) }]);
        assert_eq!(w.player.pos, Pos::new(10, 24));
        assert_eq!(w.status, GameStatus::Lost);
    }

    #[test]
    fn quit_sets_status() {
        let mut w = world(Pos::new(8, 24), vec![], vec![far_gold()]);
        assert_eq!(apply_command(&mut w, Command::Quit), vec![GameEvent::Quit]);
        assert_eq!(w.status, GameStatus::Quit);
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut w = world(Pos::new(8, 24), vec![], vec![far_gold()]);
        assert!(apply_command(&mut w, Command::Other('x')).is_empty());
        assert_eq!(w.player.pos, Pos::new(8, 24));
        assert_eq!(w.status, GameStatus::Playing);
    }

    #[test]
    fn no_mutation_after_terminal_status() {
        let mut w = world(
            Pos::new(8, 24),
            vec![Wall::new(2, 1, Heading::Right)],
            vec![Gold::new(7, 24, Heading::Left), far_gold()],
        );
        w.finish(GameStatus::Quit);

        assert!(apply_command(&mut w, Command::Move(MoveDir::Up)).is_empty());
        assert!(apply_command(&mut w, Command::Quit).is_empty());
        assert!(tick(&mut w).is_empty());

        assert_eq!(w.player.pos, Pos::new(8, 24));
        assert_eq!(w.walls[0].col, 1);
        assert_eq!(w.golds[0].col, 24);
        assert!(w.golds[0].alive);
        assert_eq!(w.status, GameStatus::Quit);
    }

    // ── Tick ──

    #[test]
    fn tick_advances_walls_and_alive_golds() {
        let mut w = world(
            Pos::new(8, 24),
            vec![Wall::new(2, 47, Heading::Right), Wall::new(4, 1, Heading::Left)],
            vec![Gold::new(1, 1, Heading::Left), Gold::new(3, 10, Heading::Right), far_gold()],
        );
        w.golds[1].alive = false;

        tick(&mut w);

        assert_eq!(w.walls[0].col, 1);
        assert_eq!(w.walls[1].col, 47);
        assert_eq!(w.golds[0].col, 47);
        assert_eq!(w.golds[1].col, 10, "collected gold stays put");
        assert_eq!(w.golds[2].col, 3);
    }

    #[test]
    fn wall_sweeping_onto_player_loses() {
        // Span 10..=24 moves to 11..=25 and covers the player at column 25.
        let mut w = world(
            Pos::new(10, 25),
            vec![Wall::new(10, 10, Heading::Right)],
            vec![far_gold()],
        );
        let events = tick(&mut w);
        assert_eq!(events, vec![GameEvent::PlayerCrushed { at: Pos::new(10, 25) }]);
        assert_eq!(w.status, GameStatus::Lost);
        assert_eq!(w.player.pos, Pos::new(10, 25));
    }

    #[test]
    fn wrapped_wall_span_still_hits() {
        // Span starting at 40 wraps to columns 1..=7; after one step it covers 1..=8.
        let mut w = world(
            Pos::new(12, 8),
            vec![Wall::new(12, 40, Heading::Right)],
            vec![far_gold()],
        );
        tick(&mut w);
        assert_eq!(w.status, GameStatus::Lost);
    }

    #[test]
    fn gold_drifting_onto_player_is_collected() {
        let mut w = world(
            Pos::new(11, 20),
            vec![],
            vec![Gold::new(11, 21, Heading::Left), far_gold()],
        );
        let events = tick(&mut w);
        assert_eq!(
            events,
            vec![GameEvent::GoldCollected { at: Pos::new(11, 20), by: Pickup::Drifted }]
        );
        assert!(!w.golds[0].alive);
        assert_eq!(w.status, GameStatus::Playing);
    }

    #[test]
    fn last_gold_drifting_in_wins() {
        let mut w = world(Pos::new(11, 20), vec![], vec![Gold::new(11, 19, Heading::Right)]);
        let events = tick(&mut w);
        assert_eq!(events.last(), Some(&GameEvent::AllGoldCollected));
        assert_eq!(w.status, GameStatus::Won);
    }

    #[test]
    fn wall_check_precedes_gold_pickup() {
        let mut w = world(
            Pos::new(10, 25),
            vec![Wall::new(10, 10, Heading::Right)],
            vec![Gold::new(10, 26, Heading::Left)],
        );
        tick(&mut w);
        assert_eq!(w.status, GameStatus::Lost);
        assert!(w.golds[0].alive);
    }

    #[test]
    fn player_never_leaves_interior() {
        let mut w = world(Pos::new(8, 24), vec![], vec![far_gold()]);
        let dirs = [MoveDir::Up, MoveDir::Left, MoveDir::Down, MoveDir::Right];
        for dir in dirs {
            for _ in 0..60 {
                apply_command(&mut w, Command::Move(dir));
                assert!(w.grid.is_interior(w.player.pos));
            }
        }
    }
}

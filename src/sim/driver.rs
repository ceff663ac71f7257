/// Game driver: owns the world, runs both actors, reports the outcome.
///
/// Actors run on scoped threads that borrow the shared world. While they
/// play, the driver thread drains the event channel (logging, sound). The
/// channel closes once both actors have dropped their senders; the driver
/// then joins them and only afterwards reads the final status.

use std::sync::mpsc;
use std::thread;

use tracing::{debug, info};

use crate::config::KeyBindings;
use crate::error::GameError;
use crate::ui::{FrameSink, KeySource};
use super::actors::{self, Cadence};
use super::event::GameEvent;
use super::shared::SharedWorld;
use super::world::{GameStatus, WorldState};

#[derive(Debug)]
pub struct Finished {
    pub status: GameStatus,
    pub world: WorldState,
}

pub fn run<K, S>(
    world: WorldState,
    keys: K,
    sink: S,
    bindings: &KeyBindings,
    cadence: Cadence,
    mut on_event: impl FnMut(&GameEvent),
) -> Result<Finished, GameError>
where
    K: KeySource + Send,
    S: FrameSink + Send,
{
    let shared = SharedWorld::new(world, sink);
    shared.with_lock(|s| s.present());
    info!(?cadence, "game started");

    let (tx, rx) = mpsc::channel();
    let (input_ok, tick_ok) = thread::scope(|scope| {
        let shared = &shared;
        let input_tx = tx.clone();
        let mut keys = keys;

        let input = scope.spawn(move || {
            actors::run_input(shared, &mut keys, bindings, cadence.input_poll, &input_tx)
        });
        let ticker = scope.spawn(move || actors::run_ticks(shared, cadence.tick, &tx));

        for event in rx.iter() {
            debug!(?event, "event");
            on_event(&event);
        }

        (input.join().is_ok(), ticker.join().is_ok())
    });

    if !input_ok {
        return Err(GameError::WorkerPanicked("input"));
    }
    if !tick_ok {
        return Err(GameError::WorkerPanicked("tick"));
    }

    let world = shared.into_world();
    info!(status = ?world.status, gold_left = world.gold_remaining(), "game finished");
    Ok(Finished { status: world.status, world })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use crate::domain::entity::{Gold, Heading, Wall};
    use crate::domain::grid::Pos;
    use crate::domain::rules::{GRID, WALL_LEN};
    use crate::domain::tile::Glyph;
    use crate::sim::event::Pickup;
    use crate::ui::renderer::{compose, Frame};

    struct Script(VecDeque<char>);

    impl KeySource for Script {
        fn poll_key(&mut self) -> Option<char> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
    }

    impl FrameSink for Recorder {
        fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn keys(s: &str) -> Script {
        Script(s.chars().collect())
    }

    fn cadence(poll_ms: u64, tick_ms: u64) -> Cadence {
        Cadence {
            input_poll: Duration::from_millis(poll_ms),
            tick: Duration::from_millis(tick_ms),
        }
    }

    fn play(
        world: WorldState,
        script: &str,
        cadence: Cadence,
    ) -> (Finished, Vec<Frame>, Vec<GameEvent>) {
        let mut rec = Recorder::default();
        let mut events = Vec::new();
        let finished = run(
            world,
            keys(script),
            &mut rec,
            &KeyBindings::default(),
            cadence,
            |e| events.push(e.clone()),
        )
        .expect("actors should not panic");
        (finished, rec.frames, events)
    }

    fn far_gold() -> Gold {
        Gold::new(1, 1, Heading::Right)
    }

    #[test]
    fn gold_drifting_onto_idle_player_wins() {
        let world = WorldState::from_layout(
            GRID, WALL_LEN, Pos::new(8, 24), vec![],
            vec![Gold::new(8, 27, Heading::Left)],
        );
        let (finished, frames, events) = play(world, "", cadence(1, 1));

        assert_eq!(finished.status, GameStatus::Won);
        assert_eq!(
            events,
            vec![
                GameEvent::GoldCollected { at: Pos::new(8, 24), by: Pickup::Drifted },
                GameEvent::AllGoldCollected,
            ]
        );
        // Initial frame plus three ticks; nothing drawn after the win.
        assert_eq!(frames.len(), 4);
        assert_eq!(frames.last(), Some(&compose(&finished.world)));
    }

    #[test]
    fn stepping_onto_last_gold_wins() {
        let world = WorldState::from_layout(
            GRID, WALL_LEN, Pos::new(8, 24), vec![],
            vec![Gold::new(8, 25, Heading::Right)],
        );
        let (finished, frames, events) = play(world, "d", cadence(1, 500));

        assert_eq!(finished.status, GameStatus::Won);
        assert_eq!(finished.world.player.pos, Pos::new(8, 25));
        assert!(events.contains(&GameEvent::GoldCollected { at: Pos::new(8, 25), by: Pickup::Stepped }));
        assert_eq!(frames.last(), Some(&compose(&finished.world)));
    }

    #[test]
    fn stepping_onto_wall_loses_with_player_on_the_wall() {
        // Span 17..=31 still covers column 24 after a tick or two.
        let world = WorldState::from_layout(
            GRID, WALL_LEN, Pos::new(8, 24),
            vec![Wall::new(9, 17, Heading::Right)],
            vec![far_gold()],
        );
        let (finished, frames, events) = play(world, "s", cadence(1, 200));

        assert_eq!(finished.status, GameStatus::Lost);
        assert_eq!(finished.world.player.pos, Pos::new(9, 24));
        assert_eq!(events, vec![GameEvent::PlayerCrushed { at: Pos::new(9, 24) }]);
        let last = frames.last().expect("loss frame");
        assert_eq!(last.get(Pos::new(9, 24)), Glyph::Player);
        assert_eq!(last.get(Pos::new(8, 24)), Glyph::Empty);
    }

    #[test]
    fn sweeping_wall_crushes_idle_player() {
        let world = WorldState::from_layout(
            GRID, WALL_LEN, Pos::new(8, 30),
            vec![Wall::new(8, 10, Heading::Right)],
            vec![far_gold()],
        );
        let (finished, frames, _) = play(world, "", cadence(1, 1));

        assert_eq!(finished.status, GameStatus::Lost);
        assert_eq!(finished.world.player.pos, Pos::new(8, 30));
        assert_eq!(finished.world.walls[0].col, 16);
        assert_eq!(frames.len(), 7);
        assert_eq!(frames.last(), Some(&compose(&finished.world)));
    }

    #[test]
    fn quit_stops_both_actors_without_further_mutation() {
        let world = WorldState::from_layout(
            GRID, WALL_LEN, Pos::new(8, 24),
            vec![Wall::new(2, 5, Heading::Right)],
            vec![far_gold(), Gold::new(3, 9, Heading::Left)],
        );
        let (finished, frames, events) = play(world, "xq", cadence(1, 300));

        assert_eq!(finished.status, GameStatus::Quit);
        assert_eq!(events, vec![GameEvent::Quit]);
        // The tick actor woke after the quit and left everything alone.
        assert_eq!(finished.world.walls[0].col, 5);
        assert_eq!(finished.world.golds[1].col, 9);
        assert_eq!(finished.world.gold_remaining(), 2);
        // Initial frame plus the unbound-key redraw.
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn standard_world_survives_concurrent_play() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let world = WorldState::new(&mut StdRng::seed_from_u64(3));
        let (finished, frames, _) = play(world, "wwaassddwdsaq", cadence(1, 1));

        assert!(finished.status.is_terminal());
        assert!(finished.world.grid.is_interior(finished.world.player.pos));
        assert_eq!(finished.world.golds.len(), 6);
        for frame in &frames {
            assert_eq!(frame.lines().len(), 17);
        }
        assert_eq!(frames.last(), Some(&compose(&finished.world)));
    }
}

/// The two workers that race over the shared world.
///
///   - Input actor: polls the key source every `input_poll`; each key press
///     becomes one `Command` applied under the lock, followed by a redraw.
///   - Tick actor: sleeps `tick`, then advances the world one step under
///     the lock and redraws.
///
/// Both loop while the shutdown signal is up. Because the signal is only a
/// hint, each re-checks the status after taking the lock and backs off if
/// the other actor already ended the game. Worst-case shutdown latency is
/// one sleep interval.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::KeyBindings;
use crate::domain::entity::Command;
use crate::domain::rules::{INPUT_POLL, TICK_INTERVAL};
use crate::ui::{FrameSink, KeySource};
use super::event::GameEvent;
use super::shared::SharedWorld;
use super::step;

#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    pub input_poll: Duration,
    /// Walls and golds share this single period.
    pub tick: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence { input_poll: INPUT_POLL, tick: TICK_INTERVAL }
    }
}

pub fn run_input<K, S>(
    shared: &SharedWorld<S>,
    keys: &mut K,
    bindings: &KeyBindings,
    poll: Duration,
    events: &Sender<GameEvent>,
)
where
    K: KeySource,
    S: FrameSink,
{
    let _stop = shared.stop_on_exit();

    while shared.keep_running() {
        if let Some(key) = keys.poll_key() {
            let command = bindings.command_for(key);
            let applied = shared.with_lock(|s| {
                if s.world().status.is_terminal() {
                    return None;
                }
                let emitted = step::apply_command(s.world_mut(), command);
                if command != Command::Quit {
                    s.present();
                }
                Some(emitted)
            });

            match applied {
                Some(emitted) => forward(events, emitted),
                None => {
                    debug!(?command, "key arrived after game over, dropped");
                    break;
                }
            }
            if shared.status().is_terminal() {
                break;
            }
        }
        thread::sleep(poll);
    }
    debug!("input actor stopped");
}

pub fn run_ticks<S: FrameSink>(
    shared: &SharedWorld<S>,
    interval: Duration,
    events: &Sender<GameEvent>,
) {
    let _stop = shared.stop_on_exit();
    let mut ticks: u64 = 0;

    while shared.keep_running() {
        thread::sleep(interval);

        let advanced = shared.with_lock(|s| {
            if s.world().status.is_terminal() {
                return None;
            }
            let emitted = step::tick(s.world_mut());
            s.present();
            Some(emitted)
        });

        match advanced {
            Some(emitted) => forward(events, emitted),
            None => {
                debug!(ticks, "tick abandoned, game already over");
                break;
            }
        }
        ticks += 1;
        trace!(ticks, "tick");
    }
    debug!(ticks, "tick actor stopped");
}

fn forward(events: &Sender<GameEvent>, emitted: Vec<GameEvent>) {
    for event in emitted {
        // The driver may already be gone during teardown.
        let _ = events.send(event);
    }
}

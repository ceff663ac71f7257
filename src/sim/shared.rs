/// SharedWorld: the one lock both actors go through.
///
/// The mutex guards the world *and* the frame sink, so a mutation and the
/// frame showing it are produced inside the same critical section and
/// frames from the two actors can never interleave.
///
/// Next to the mutex sit two atomics:
///   - `status`: a copy of `WorldState::status`, readable without the lock
///   - `running`: the shutdown signal both polling loops watch
///
/// Both are written only while the lock is held, right after a closure
/// leaves the world in a terminal status. The lock-free reads are hints:
/// an actor must re-check `status` under the lock before mutating.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::ui::renderer::compose;
use crate::ui::FrameSink;
use super::world::{GameStatus, WorldState};

/// Exclusive view handed to `with_lock` closures.
pub struct Session<S> {
    world: WorldState,
    sink: S,
}

impl<S: FrameSink> Session<S> {
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Render the current world and hand it to the sink.
    /// Write failures are logged and otherwise ignored.
    pub fn present(&mut self) {
        let frame = compose(&self.world);
        if let Err(e) = self.sink.write_frame(&frame) {
            warn!("frame write failed: {e}");
        }
    }
}

pub struct SharedWorld<S> {
    inner: Mutex<Session<S>>,
    status: AtomicU8,
    running: AtomicBool,
}

impl<S: FrameSink> SharedWorld<S> {
    pub fn new(world: WorldState, sink: S) -> Self {
        let status = world.status;
        SharedWorld {
            inner: Mutex::new(Session { world, sink }),
            status: AtomicU8::new(status.to_u8()),
            running: AtomicBool::new(!status.is_terminal()),
        }
    }

    /// Run `f` with exclusive access to the world and sink. If `f` leaves
    /// the world in a terminal status, the status is published and the
    /// shutdown signal raised before the lock is released.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Session<S>) -> R) -> R {
        let mut session = self.lock();
        let out = f(&mut *session);
        let status = session.world.status;
        if status.is_terminal() && self.status() != status {
            self.status.store(status.to_u8(), Ordering::Release);
            self.running.store(false, Ordering::Release);
            info!(?status, "game over");
        }
        out
    }

    /// Best-effort status, no lock taken.
    pub fn status(&self) -> GameStatus {
        GameStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn keep_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Raise the shutdown signal without touching the world.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Raises the shutdown signal when dropped, including during a panic.
    pub fn stop_on_exit(&self) -> StopOnExit<'_, S> {
        StopOnExit { shared: self }
    }

    pub fn into_world(self) -> WorldState {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner).world
    }

    fn lock(&self) -> MutexGuard<'_, Session<S>> {
        // A panicking actor cannot leave the world half-written in a way
        // that matters to the other: every field stays in range.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct StopOnExit<'a, S: FrameSink> {
    shared: &'a SharedWorld<S>,
}

impl<S: FrameSink> Drop for StopOnExit<'_, S> {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

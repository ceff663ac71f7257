/// Error types for the game binary.
///
/// The game core itself has no failure modes: blocked moves and late
/// actors are normal control flow. Only terminal setup, logging setup and
/// a crashed worker surface here.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("logging already initialized: {0}")]
    LogInit(String),

    /// A worker thread panicked; the game was stopped.
    #[error("{0} worker panicked")]
    WorkerPanicked(&'static str),
}

/// Events emitted while applying a key press or a tick.
/// The driver consumes these for logging and sound.

use crate::domain::grid::Pos;

/// Who brought player and gold together.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pickup {
    /// The player stepped onto the gold.
    Stepped,
    /// The gold drifted onto the standing player.
    Drifted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GoldCollected { at: Pos, by: Pickup },
    PlayerCrushed { at: Pos },
    AllGoldCollected,
    Quit,
}

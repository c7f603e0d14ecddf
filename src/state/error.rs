use thiserror::Error;
use uuid::Uuid;

use crate::state::lifecycle::InvalidTransition;

/// Failures raised by the player and game registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A player with the same normalized name is already on the roster.
    #[error("player `{0}` already exists")]
    DuplicatePlayer(String),
    /// The supplied name is empty once normalized.
    #[error("player name must not be empty")]
    InvalidName,
    /// No player with this normalized name is on the roster.
    #[error("player `{0}` not found")]
    UnknownPlayer(String),
    /// No game with this identifier exists.
    #[error("game `{0}` not found")]
    UnknownGame(Uuid),
    /// Resting can only be entered with a rest end time, i.e. by finishing a game.
    #[error("player `{0}` can only start resting by finishing a game")]
    RestWithoutGame(String),
    /// The game is not in the stage the operation requires.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

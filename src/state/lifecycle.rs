use thiserror::Error;

/// Lifecycle stage of a game. Games only ever move forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Teams are drawn but nobody is on court yet.
    NotStarted,
    /// The four players are on court.
    InGame,
    /// The game is over and its players went to rest.
    Completed,
}

/// Events that can be applied to a game's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Players walk on court.
    Start,
    /// Players walk off court.
    Finish,
}

/// Error returned when attempting to apply an event from the wrong stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The stage the game was in when the event was received.
    pub from: GameStatus,
    /// The event that cannot be applied from this stage.
    pub event: GameEvent,
}

/// Compute the next stage for `event`, if the transition is valid.
pub fn compute_transition(
    from: GameStatus,
    event: GameEvent,
) -> Result<GameStatus, InvalidTransition> {
    let next = match (from, event) {
        (GameStatus::NotStarted, GameEvent::Start) => GameStatus::InGame,
        (GameStatus::InGame, GameEvent::Finish) => GameStatus::Completed,
        (from, event) => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

//! Game operations behind the `/games` routes.

use rand::rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::game::{CreateGameResponse, GamePageResponse, GameSummary},
    error::ServiceError,
    services::rest_scheduler,
    state::{
        SharedState,
        error::RegistryError,
        rest::now_ms,
        rotation::CreateOutcome,
        transitions::{run_mutation, run_mutation_detailed},
    },
};

/// Current page of games, newest first.
pub async fn list_page(state: &SharedState) -> GamePageResponse {
    let rotation = state.rotation().await;
    GamePageResponse::from(rotation.games())
}

/// Every game in creation order.
pub async fn list_games(state: &SharedState) -> Vec<GameSummary> {
    let rotation = state.rotation().await;
    rotation.games().games().iter().map(GameSummary::from).collect()
}

/// Single game by id.
pub async fn get_game(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let rotation = state.rotation().await;
    rotation
        .games()
        .get(id)
        .map(GameSummary::from)
        .ok_or_else(|| RegistryError::UnknownGame(id).into())
}

/// Draw the next four players into a pending game.
///
/// A refusal (not enough players, pending game) is reported in the response
/// rather than as an error.
pub async fn create_game(state: &SharedState) -> Result<CreateGameResponse, ServiceError> {
    let outcome = run_mutation(state, |rotation| {
        Ok(rotation.create_game(&mut rng(), now_ms()))
    })
    .await?;

    match &outcome {
        CreateOutcome::Created(game) => {
            info!(game = %game.id, players = ?game.players, "game created");
        }
        CreateOutcome::NotEnoughPlayers { available } => {
            debug!(available, "game creation refused: not enough available players");
        }
        CreateOutcome::PendingGameExists => {
            debug!("game creation refused: a game is still pending");
        }
    }

    Ok(outcome.into())
}

/// Move a pending game on court.
pub async fn start_game(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let game = run_mutation(state, |rotation| Ok(rotation.start_game(id)?)).await?;
    info!(game = %game.id, "game started");
    Ok(GameSummary::from(&game))
}

/// Complete a running game and send its players to rest, starting the rest
/// timer when it was idle.
pub async fn finish_game(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let mutation =
        run_mutation_detailed(state, |rotation| Ok(rotation.finish_game(id, now_ms())?)).await;

    // The rest began in memory even if the flush failed; the timer must run.
    if matches!(&mutation.outcome, Ok(outcome) if outcome.start_rest_timer) {
        rest_scheduler::start(state).await;
    }

    let outcome = mutation.into_result()?;
    info!(game = %outcome.game.id, "game finished");
    Ok(GameSummary::from(&outcome.game))
}

/// Delete a game and release its players.
pub async fn remove_game(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let game = run_mutation(state, |rotation| Ok(rotation.remove_game(id)?)).await?;
    info!(game = %game.id, status = ?game.status, "game removed");
    Ok(GameSummary::from(&game))
}

/// Drop every game and reset the cursor.
pub async fn clear_games(state: &SharedState) -> Result<(), ServiceError> {
    run_mutation(state, |rotation| {
        rotation.clear_games();
        Ok(())
    })
    .await?;
    info!("game list cleared");
    Ok(())
}

/// Move the cursor to `page`; out-of-range pages leave it where it is.
pub async fn go_to_page(state: &SharedState, page: usize) -> Result<GamePageResponse, ServiceError> {
    run_mutation(state, |rotation| {
        if !rotation.go_to_page(page) {
            debug!(page, "page out of range; cursor unchanged");
        }
        Ok(GamePageResponse::from(rotation.games()))
    })
    .await
}

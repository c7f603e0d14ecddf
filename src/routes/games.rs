use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::game::{CreateGameResponse, GamePageResponse, GameSummary},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Game lifecycle endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/games",
            get(list_page).post(create_game).delete(clear_games),
        )
        .route("/games/all", get(list_games))
        .route("/games/page/{page}", post(go_to_page))
        .route("/games/{id}", get(get_game).delete(remove_game))
        .route("/games/{id}/start", post(start_game))
        .route("/games/{id}/finish", post(finish_game))
}

/// Current page of games, newest first.
#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    responses((status = 200, description = "Current page", body = GamePageResponse))
)]
pub async fn list_page(State(state): State<SharedState>) -> Json<GamePageResponse> {
    Json(game_service::list_page(&state).await)
}

/// Every game in creation order.
#[utoipa::path(
    get,
    path = "/games/all",
    tag = "games",
    responses((status = 200, description = "All games", body = [GameSummary]))
)]
pub async fn list_games(State(state): State<SharedState>) -> Json<Vec<GameSummary>> {
    Json(game_service::list_games(&state).await)
}

/// Pair the next four players into a pending game.
#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    responses((
        status = 200,
        description = "Created game, or the reason none was created",
        body = CreateGameResponse
    ))
)]
pub async fn create_game(
    State(state): State<SharedState>,
) -> Result<Json<CreateGameResponse>, AppError> {
    Ok(Json(game_service::create_game(&state).await?))
}

/// Remove every game.
#[utoipa::path(
    delete,
    path = "/games",
    tag = "games",
    responses((status = 204, description = "Games cleared"))
)]
pub async fn clear_games(State(state): State<SharedState>) -> Result<StatusCode, AppError> {
    game_service::clear_games(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move the paging cursor. Pages out of range leave it unchanged.
#[utoipa::path(
    post,
    path = "/games/page/{page}",
    tag = "games",
    params(("page" = usize, Path, description = "1-based page number")),
    responses((status = 200, description = "Page after the move", body = GamePageResponse))
)]
pub async fn go_to_page(
    State(state): State<SharedState>,
    Path(page): Path<usize>,
) -> Result<Json<GamePageResponse>, AppError> {
    Ok(Json(game_service::go_to_page(&state, page).await?))
}

/// Fetch one game.
#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game", body = GameSummary),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSummary>, AppError> {
    Ok(Json(game_service::get_game(&state, id).await?))
}

/// Delete a game whatever its stage; its players become available.
#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 204, description = "Game removed"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn remove_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    game_service::remove_game(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Start a pending game.
#[utoipa::path(
    post,
    path = "/games/{id}/start",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game started", body = GameSummary),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game is not pending")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSummary>, AppError> {
    Ok(Json(game_service::start_game(&state, id).await?))
}

/// Finish a running game; its players go to rest.
#[utoipa::path(
    post,
    path = "/games/{id}/finish",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game finished", body = GameSummary),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game is not running")
    )
)]
pub async fn finish_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSummary>, AppError> {
    Ok(Json(game_service::finish_game(&state, id).await?))
}

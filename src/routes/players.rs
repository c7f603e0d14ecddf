use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use axum_valid::Valid;

use crate::{
    dto::player::{AddPlayerRequest, PlayerSummary, RosterSummaryDto, UpdatePlayerStatusRequest},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Roster management endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/players",
            get(list_players).post(add_player).delete(clear_players),
        )
        .route("/players/summary", get(summary))
        .route("/players/{name}", get(get_player).delete(remove_player))
        .route("/players/{name}/status", put(set_status))
}

/// List the roster in registration order.
#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    responses((status = 200, description = "Roster", body = [PlayerSummary]))
)]
pub async fn list_players(State(state): State<SharedState>) -> Json<Vec<PlayerSummary>> {
    Json(player_service::list_players(&state).await)
}

/// Register a new player.
#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = AddPlayerRequest,
    responses(
        (status = 201, description = "Player added", body = PlayerSummary),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "A player with this name already exists")
    )
)]
pub async fn add_player(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<AddPlayerRequest>>,
) -> Result<(StatusCode, Json<PlayerSummary>), AppError> {
    let player = player_service::add_player(&state, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Remove every player.
#[utoipa::path(
    delete,
    path = "/players",
    tag = "players",
    responses((status = 204, description = "Roster cleared"))
)]
pub async fn clear_players(State(state): State<SharedState>) -> Result<StatusCode, AppError> {
    player_service::clear_players(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Head count per status.
#[utoipa::path(
    get,
    path = "/players/summary",
    tag = "players",
    responses((status = 200, description = "Status counts", body = RosterSummaryDto))
)]
pub async fn summary(State(state): State<SharedState>) -> Json<RosterSummaryDto> {
    Json(player_service::summary(&state).await)
}

/// Fetch one player.
#[utoipa::path(
    get,
    path = "/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name, case-insensitive")),
    responses(
        (status = 200, description = "Player", body = PlayerSummary),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(player_service::get_player(&state, &name).await?))
}

/// Remove one player.
#[utoipa::path(
    delete,
    path = "/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name, case-insensitive")),
    responses(
        (status = 204, description = "Player removed"),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn remove_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    player_service::remove_player(&state, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Override a player's status: put on hold, release, or end a rest early.
#[utoipa::path(
    put,
    path = "/players/{name}/status",
    tag = "players",
    params(("name" = String, Path, description = "Player name, case-insensitive")),
    request_body = UpdatePlayerStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = PlayerSummary),
        (status = 400, description = "Resting can only follow a finished game"),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn set_status(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<UpdatePlayerStatusRequest>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(
        player_service::set_status(&state, &name, payload.status).await?,
    ))
}

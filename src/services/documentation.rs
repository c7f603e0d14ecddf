use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the rotation server.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::change_stream,
        crate::routes::players::list_players,
        crate::routes::players::add_player,
        crate::routes::players::clear_players,
        crate::routes::players::summary,
        crate::routes::players::get_player,
        crate::routes::players::remove_player,
        crate::routes::players::set_status,
        crate::routes::games::list_page,
        crate::routes::games::list_games,
        crate::routes::games::create_game,
        crate::routes::games::clear_games,
        crate::routes::games::go_to_page,
        crate::routes::games::get_game,
        crate::routes::games::remove_game,
        crate::routes::games::start_game,
        crate::routes::games::finish_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::CollectionChangedEvent,
            crate::dto::player::AddPlayerRequest,
            crate::dto::player::UpdatePlayerStatusRequest,
            crate::dto::player::PlayerStatusDto,
            crate::dto::player::PlayerSummary,
            crate::dto::player::RosterSummaryDto,
            crate::dto::game::GameStatusDto,
            crate::dto::game::GameSummary,
            crate::dto::game::PaginationDto,
            crate::dto::game::GamePageResponse,
            crate::dto::game::CreateGameResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Roster management"),
        (name = "games", description = "Pairing and game lifecycle"),
        (name = "sse", description = "Server-sent change notifications"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths.keys().cloned().collect::<Vec<_>>();

        for expected in [
            "/players",
            "/players/{name}/status",
            "/games/page/{page}",
            "/games/{id}/finish",
            "/events",
            "/healthcheck",
        ] {
            assert!(paths.iter().any(|path| path == expected), "{expected} missing");
        }
    }
}

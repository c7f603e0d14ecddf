use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, Sse},
    routing::get,
};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/events",
    tag = "sse",
    responses((
        status = 200,
        description = "Change stream: `players.changed` and `games.changed`",
        content_type = "text/event-stream",
        body = String
    ))
)]
/// Stream collection change notifications to connected frontends.
pub async fn change_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!("New SSE connection");
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/events", get(change_stream))
}

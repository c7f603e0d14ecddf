use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod games;
pub mod health;
pub mod players;
pub mod sse;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(players::router())
        .merge(games::router())
        .merge(sse::router())
        .merge(docs::router())
        .with_state(state)
}

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::sse::{CollectionChangedEvent, ServerEvent},
    state::{SharedState, rotation::ChangeSet},
};

const EVENT_PLAYERS_CHANGED: &str = "players.changed";
const EVENT_GAMES_CHANGED: &str = "games.changed";

/// Announce every collection named in `changes`.
pub fn broadcast_changes(state: &SharedState, changes: ChangeSet) {
    if changes.announces_players() {
        broadcast_players_changed(state);
    }
    if changes.games {
        broadcast_games_changed(state);
    }
}

/// Tell subscribers to re-read the roster.
pub fn broadcast_players_changed(state: &SharedState) {
    let payload = CollectionChangedEvent {
        collection: "players".into(),
    };
    send_event(state, EVENT_PLAYERS_CHANGED, &payload);
}

/// Tell subscribers to re-read the game list.
pub fn broadcast_games_changed(state: &SharedState) {
    let payload = CollectionChangedEvent {
        collection: "games".into(),
    };
    send_event(state, EVENT_GAMES_CHANGED, &payload);
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.events().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}

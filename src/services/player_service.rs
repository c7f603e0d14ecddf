//! Roster operations behind the `/players` routes. Every mutation goes through
//! [`run_mutation`] so it is persisted and announced exactly once.

use tracing::info;

use crate::{
    dto::player::{PlayerStatusDto, PlayerSummary, RosterSummaryDto},
    error::ServiceError,
    state::{SharedState, player::normalize_name, transitions::run_mutation},
};

/// Roster in registration order.
pub async fn list_players(state: &SharedState) -> Vec<PlayerSummary> {
    let rotation = state.rotation().await;
    rotation.players().iter().map(PlayerSummary::from).collect()
}

/// Single roster entry, looked up case-insensitively.
pub async fn get_player(state: &SharedState, name: &str) -> Result<PlayerSummary, ServiceError> {
    let rotation = state.rotation().await;
    rotation
        .players()
        .get(name)
        .map(PlayerSummary::from)
        .ok_or_else(|| ServiceError::NotFound(format!("player `{}` not found", normalize_name(name))))
}

/// Head count per status.
pub async fn summary(state: &SharedState) -> RosterSummaryDto {
    state.rotation().await.summary().into()
}

/// Register a player as available with no games played.
pub async fn add_player(state: &SharedState, name: &str) -> Result<PlayerSummary, ServiceError> {
    let player = run_mutation(state, |rotation| Ok(rotation.add_player(name)?)).await?;
    info!(player = %player.name, "player added");
    Ok(PlayerSummary::from(&player))
}

/// Remove a player from the roster. Games referencing the name are kept.
pub async fn remove_player(state: &SharedState, name: &str) -> Result<PlayerSummary, ServiceError> {
    let removed = run_mutation(state, |rotation| {
        rotation.remove_player(name).ok_or_else(|| {
            ServiceError::NotFound(format!("player `{}` not found", normalize_name(name)))
        })
    })
    .await?;
    info!(player = %removed.name, "player removed");
    Ok(PlayerSummary::from(&removed))
}

/// Manually override a player's status.
pub async fn set_status(
    state: &SharedState,
    name: &str,
    status: PlayerStatusDto,
) -> Result<PlayerSummary, ServiceError> {
    let player = run_mutation(state, |rotation| {
        Ok(rotation.set_player_status(name, status.into())?)
    })
    .await?;
    info!(player = %player.name, status = ?player.status, "player status overridden");
    Ok(PlayerSummary::from(&player))
}

/// Empty the roster.
pub async fn clear_players(state: &SharedState) -> Result<(), ServiceError> {
    run_mutation(state, |rotation| {
        rotation.clear_players();
        Ok(())
    })
    .await?;
    info!("roster cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::kv_store::{KeyValueStore, PLAYERS_KEY, memory::MemoryStore},
        state::{AppState, rotation::Rotation},
    };

    fn state_with_store() -> (SharedState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(AppConfig::default(), store.clone(), Rotation::default());
        (state, store)
    }

    #[tokio::test]
    async fn added_players_are_persisted_and_announced() {
        let (state, store) = state_with_store();
        let mut events = state.events().subscribe();

        let player = add_player(&state, "  alice ").await.unwrap();

        assert_eq!(player.name, "ALICE");
        assert_eq!(player.status, PlayerStatusDto::Available);
        let raw = store.get(PLAYERS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"ALICE\""));
        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some("players.changed"));
    }

    #[tokio::test]
    async fn duplicates_are_rejected_without_touching_the_store() {
        let (state, store) = state_with_store();
        add_player(&state, "bob").await.unwrap();
        let before = store.get(PLAYERS_KEY).unwrap();

        let err = add_player(&state, "BOB").await.unwrap_err();

        assert!(matches!(err, ServiceError::Duplicate(_)));
        assert_eq!(store.get(PLAYERS_KEY).unwrap(), before);
        assert_eq!(list_players(&state).await.len(), 1);
    }

    #[tokio::test]
    async fn removing_an_unknown_player_is_not_found() {
        let (state, _store) = state_with_store();

        let err = remove_player(&state, "ghost").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn status_overrides_cannot_start_a_rest() {
        let (state, _store) = state_with_store();
        add_player(&state, "carol").await.unwrap();

        let held = set_status(&state, "carol", PlayerStatusDto::OnHold)
            .await
            .unwrap();
        let err = set_status(&state, "carol", PlayerStatusDto::Resting)
            .await
            .unwrap_err();

        assert_eq!(held.status, PlayerStatusDto::OnHold);
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(summary(&state).await.on_hold, 1);
    }

    #[tokio::test]
    async fn clearing_the_roster_deletes_its_document() {
        let (state, store) = state_with_store();
        add_player(&state, "dave").await.unwrap();

        clear_players(&state).await.unwrap();

        assert!(store.get(PLAYERS_KEY).unwrap().is_none());
        assert!(list_players(&state).await.is_empty());
        assert!(matches!(
            get_player(&state, "dave").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

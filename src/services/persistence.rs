//! Loading and flushing the rotation through the key-value store.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    dao::{
        kv_store::{GAMES_KEY, KeyValueStore, PAGINATION_KEY, PLAYERS_KEY},
        models::{GameEntity, GamePaginationEntity, PlayerEntity},
        storage::{StorageError, StorageResult},
    },
    state::{
        game::{GamePagination, GameRegistry},
        player::PlayerRegistry,
        rotation::{ChangeSet, Rotation},
    },
};

/// Rebuild the rotation from the store.
///
/// Missing or unreadable documents load as empty collections; only store
/// failures are reported.
pub fn load_rotation(store: &dyn KeyValueStore, config: &AppConfig) -> StorageResult<Rotation> {
    let players = read_document::<Vec<PlayerEntity>>(store, PLAYERS_KEY)?.unwrap_or_default();
    let games = read_document::<Vec<GameEntity>>(store, GAMES_KEY)?.unwrap_or_default();
    let pagination = read_document::<GamePaginationEntity>(store, PAGINATION_KEY)?
        .map(GamePagination::from)
        .unwrap_or_else(|| GamePagination::new(config.items_per_page()));

    let players = PlayerRegistry::from_players(players.into_iter().map(Into::into));
    let games = GameRegistry::from_parts(games.into_iter().map(Into::into).collect(), pagination);
    info!(
        players = players.len(),
        games = games.games().len(),
        "rotation loaded from storage"
    );

    Ok(Rotation::new(players, games, config.rest_duration()))
}

/// Write the collections named in `changes`. Countdown-only changes are not flushed.
pub fn persist_changes(
    store: &dyn KeyValueStore,
    rotation: &Rotation,
    changes: ChangeSet,
) -> StorageResult<()> {
    if changes.players {
        save_players(store, rotation.players())?;
    }
    if changes.games {
        save_games(store, rotation.games())?;
    }
    Ok(())
}

/// Write the roster, deleting the document once the roster is empty.
pub fn save_players(store: &dyn KeyValueStore, players: &PlayerRegistry) -> StorageResult<()> {
    if players.is_empty() {
        return store.delete(PLAYERS_KEY);
    }
    let entities = players.iter().map(PlayerEntity::from).collect::<Vec<_>>();
    write_document(store, PLAYERS_KEY, &entities)
}

/// Write the game list and its cursor, deleting both once the list is empty.
pub fn save_games(store: &dyn KeyValueStore, games: &GameRegistry) -> StorageResult<()> {
    if games.games().is_empty() {
        store.delete(GAMES_KEY)?;
        return store.delete(PAGINATION_KEY);
    }
    let entities = games.games().iter().map(GameEntity::from).collect::<Vec<_>>();
    write_document(store, GAMES_KEY, &entities)?;
    write_document(
        store,
        PAGINATION_KEY,
        &GamePaginationEntity::from(games.pagination()),
    )
}

fn read_document<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &'static str,
) -> StorageResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        debug!(key, "no stored document; starting empty");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(document) => Ok(Some(document)),
        Err(err) => {
            warn!(key, error = %err, "stored document is corrupt; starting empty");
            Ok(None)
        }
    }
}

fn write_document<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &'static str,
    document: &T,
) -> StorageResult<()> {
    let raw =
        serde_json::to_string(document).map_err(|source| StorageError::Encode { key, source })?;
    store.set(key, raw)
}

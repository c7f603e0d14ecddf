pub mod file;
pub mod memory;

use crate::dao::storage::StorageResult;

/// Key holding the serialized roster.
pub const PLAYERS_KEY: &str = "players";
/// Key holding the serialized game list.
pub const GAMES_KEY: &str = "game";
/// Key holding the serialized game cursor.
pub const PAGINATION_KEY: &str = "gamePagination";

/// Minimal key-value persistence the rotation depends on.
///
/// Implementations are local and synchronous; callers hold the rotation lock
/// across a flush.
pub trait KeyValueStore: Send + Sync {
    /// Stored value, `None` when the key was never written or was deleted.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: String) -> StorageResult<()>;
    /// Remove `key`; absent keys are not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;
    /// Cheap probe used by the health route.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

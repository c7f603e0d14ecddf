use crate::{
    dao::storage::StorageError,
    error::ServiceError,
    services::{events, persistence},
    state::{SharedState, rotation::Rotation},
};

/// What a mutation produced, kept apart from whether its flush succeeded.
pub struct Mutation<T> {
    /// Result of the work itself; already applied in memory when `Ok`.
    pub outcome: Result<T, ServiceError>,
    /// Result of writing the changed collections.
    pub flushed: Result<(), StorageError>,
}

impl<T> Mutation<T> {
    /// Collapse into a single result, reporting the work error first.
    pub fn into_result(self) -> Result<T, ServiceError> {
        let value = self.outcome?;
        self.flushed?;
        Ok(value)
    }
}

/// Run `work` against the rotation under its lock, persist the collections it
/// changed, then announce them once the lock is released.
///
/// Changes are announced even when the flush fails so subscribers never show
/// a stale in-memory view; the storage error is still returned.
pub async fn run_mutation<F, T>(state: &SharedState, work: F) -> Result<T, ServiceError>
where
    F: FnOnce(&mut Rotation) -> Result<T, ServiceError>,
{
    run_mutation_detailed(state, work).await.into_result()
}

/// Same as [`run_mutation`] but hands back the work's value even when the
/// flush failed.
///
/// A failed flush puts the change set back on the rotation so the next
/// mutation or countdown pass writes those collections again.
pub async fn run_mutation_detailed<F, T>(state: &SharedState, work: F) -> Mutation<T>
where
    F: FnOnce(&mut Rotation) -> Result<T, ServiceError>,
{
    let (outcome, changes, flushed) = {
        let mut rotation = state.rotation().await;
        let outcome = work(&mut rotation);
        let changes = rotation.take_changes();
        let flushed = persistence::persist_changes(state.store(), &rotation, changes);
        if flushed.is_err() {
            rotation.restore_changes(changes);
        }
        (outcome, changes, flushed)
    };

    events::broadcast_changes(state, changes);

    Mutation { outcome, flushed }
}

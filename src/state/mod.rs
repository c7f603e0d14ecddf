pub mod error;
pub mod game;
pub mod lifecycle;
pub mod player;
pub mod rest;
pub mod rotation;
mod sse;
pub mod transitions;

use std::sync::Arc;

use tokio::{
    sync::{Mutex, MutexGuard},
    task::JoinHandle,
};

use crate::{config::AppConfig, dao::kv_store::KeyValueStore, state::rotation::Rotation};

pub use self::sse::SseHub;

/// Handle to the application state shared by routes and background tasks.
pub type SharedState = Arc<AppState>;

/// Capacity of the change-notification channel.
const EVENTS_CAPACITY: usize = 64;

/// Central application state: the rotation, its store and the notification hub.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    rotation: Mutex<Rotation>,
    events: SseHub,
    rest_task: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>, rotation: Rotation) -> SharedState {
        Arc::new(Self {
            config,
            store,
            rotation: Mutex::new(rotation),
            events: SseHub::new(EVENTS_CAPACITY),
            rest_task: Mutex::new(None),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Key-value store backing the collections.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Exclusive access to the rotation. Held for the duration of one operation.
    pub async fn rotation(&self) -> MutexGuard<'_, Rotation> {
        self.rotation.lock().await
    }

    /// Broadcast hub for the change stream.
    pub fn events(&self) -> &SseHub {
        &self.events
    }

    /// Remember the running rest timer task so shutdown can stop it.
    pub async fn install_rest_task(&self, handle: JoinHandle<()>) {
        let mut guard = self.rest_task.lock().await;
        // A previous task is already disarmed and only finishing its last pass.
        if let Some(previous) = guard.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the rest timer task, if any.
    pub async fn stop_rest_task(&self) {
        if let Some(handle) = self.rest_task.lock().await.take() {
            handle.abort();
        }
    }
}

//! Player rotation server entrypoint wiring storage, the rest timer, REST and SSE.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use player_rotation::{
    config::AppConfig,
    dao::kv_store::{KeyValueStore, file::FileStore, memory::MemoryStore},
    routes,
    services::{persistence, rest_scheduler},
    state::{AppState, SharedState},
};

/// Selects the in-memory store when set to `memory`.
const STORE_ENV: &str = "PLAYER_ROTATION_STORE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(&config)?;
    let rotation =
        persistence::load_rotation(store.as_ref(), &config).context("loading rotation")?;

    let app_state = AppState::new(config, store, rotation);
    // Players persisted mid-rest keep counting down after a restart.
    rest_scheduler::resume(&app_state).await;

    let app = build_router(app_state.clone());

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    app_state.stop_rest_task().await;
    info!("server stopped");

    Ok(())
}

/// Open the configured key-value store.
fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match env::var(STORE_ENV).as_deref() {
        Ok("memory") => {
            info!("using in-memory store; nothing survives a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        _ => {
            let store = FileStore::open(config.data_dir())
                .with_context(|| format!("opening data dir {}", config.data_dir().display()))?;
            Ok(Arc::new(store))
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let Ok(mut term) = signal(SignalKind::terminate()) else {
            let _ = tokio::signal::ctrl_c().await;
            return;
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

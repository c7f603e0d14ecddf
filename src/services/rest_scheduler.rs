//! Background countdown for resting players.
//!
//! The task runs only while somebody is resting: it is started by the first
//! finished game (or at startup when the store holds resting players) and
//! exits on the pass that releases the last one.

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    error::ServiceError,
    state::{SharedState, rest::now_ms, transitions::run_mutation},
};

/// Spawn the countdown task. The caller must have armed the timer.
pub async fn start(state: &SharedState) {
    let handle = tokio::spawn(run(state.clone()));
    state.install_rest_task(handle).await;
    info!(
        tick_ms = state.config().tick_interval().as_millis() as u64,
        "rest timer started"
    );
}

/// Start the countdown if the loaded roster has resting players.
pub async fn resume(state: &SharedState) {
    let armed = state.rotation().await.arm_rest_timer();
    if armed {
        start(state).await;
    }
}

/// One countdown pass at `now`. Returns whether the timer must keep running.
pub async fn tick_once(state: &SharedState, now: u64) -> Result<bool, ServiceError> {
    let pass = run_mutation(state, |rotation| Ok(rotation.tick_rest(now))).await?;

    for name in &pass.tick.released {
        info!(player = %name, "rest over; player available");
    }

    Ok(pass.keep_running)
}

async fn run(state: SharedState) {
    let mut interval = time::interval(state.config().tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let keep_running = match tick_once(&state, now_ms()).await {
            Ok(keep_running) => keep_running,
            Err(err) => {
                // The pass itself was applied; only the flush failed.
                warn!(error = %err, "rest countdown pass could not be persisted");
                state.rotation().await.rest_timer_armed()
            }
        };

        if !keep_running {
            debug!("nobody resting; rest timer stopped");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::kv_store::memory::MemoryStore,
        services::{game_service, player_service},
        state::{AppState, player::PlayerStatus, rotation::Rotation},
    };

    async fn state_after_one_game(rest: Duration, tick: Duration) -> SharedState {
        let config = AppConfig::default().with_timing(rest, tick);
        let rotation = Rotation::new(
            Default::default(),
            Default::default(),
            config.rest_duration(),
        );
        let state = AppState::new(config, Arc::new(MemoryStore::new()), rotation);
        for name in ["a", "b", "c", "d"] {
            player_service::add_player(&state, name).await.unwrap();
        }
        let game = game_service::create_game(&state)
            .await
            .unwrap()
            .game
            .unwrap();
        game_service::start_game(&state, game.id).await.unwrap();
        game_service::finish_game(&state, game.id).await.unwrap();
        state
    }

    #[tokio::test]
    async fn ticks_refresh_countdowns_until_the_rest_ends() {
        let state = state_after_one_game(Duration::from_secs(300), Duration::from_secs(3600)).await;
        state.stop_rest_task().await;
        let end = state.rotation().await.players().get("a").unwrap().rest_end_time;

        assert!(tick_once(&state, end - 65_000).await.unwrap());
        assert_eq!(
            state.rotation().await.players().get("a").unwrap().rest_time_display,
            "|1:05"
        );

        assert!(!tick_once(&state, end).await.unwrap());
        let rotation = state.rotation().await;
        assert!(!rotation.rest_timer_armed());
        assert!(
            rotation
                .players()
                .iter()
                .all(|player| player.status == PlayerStatus::Available && player.rest_end_time == 0)
        );
    }

    #[tokio::test]
    async fn the_task_releases_players_and_stops_itself() {
        let state = state_after_one_game(Duration::from_millis(20), Duration::from_millis(5)).await;

        let released = async {
            loop {
                if !state.rotation().await.rest_timer_armed() {
                    break;
                }
                time::sleep(Duration::from_millis(5)).await;
            }
        };
        time::timeout(Duration::from_secs(5), released)
            .await
            .expect("rest timer never stopped");

        assert_eq!(player_service::summary(&state).await.available, 4);
    }

    #[tokio::test]
    async fn resume_ignores_a_roster_without_rest() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(MemoryStore::new()),
            Rotation::default(),
        );

        resume(&state).await;

        assert!(!state.rotation().await.rest_timer_armed());
    }
}

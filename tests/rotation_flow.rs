use std::{sync::Arc, time::Duration};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_valid::Valid;
use player_rotation::{
    config::AppConfig,
    dao::kv_store::{KeyValueStore, PLAYERS_KEY, file::FileStore, memory::MemoryStore},
    dto::{
        game::GameStatusDto,
        player::{AddPlayerRequest, PlayerStatusDto},
    },
    routes,
    services::{game_service, persistence, player_service, rest_scheduler},
    state::{AppState, SharedState, rotation::Rotation},
};
use uuid::Uuid;

fn memory_state() -> SharedState {
    AppState::new(
        AppConfig::default(),
        Arc::new(MemoryStore::new()),
        Rotation::default(),
    )
}

async fn add_all(state: &SharedState, names: &[&str]) {
    for name in names {
        player_service::add_player(state, name).await.unwrap();
    }
}

#[tokio::test]
async fn four_players_play_rest_and_come_back() {
    let state = memory_state();
    add_all(&state, &["ann", "ben", "cat", "dan"]).await;

    let created = game_service::create_game(&state).await.unwrap();
    let game = created.game.expect("four players are available");
    let mut seated = game.team_a.iter().chain(&game.team_b).cloned().collect::<Vec<_>>();
    seated.sort();
    assert_eq!(seated, ["ANN", "BEN", "CAT", "DAN"]);

    game_service::start_game(&state, game.id).await.unwrap();
    assert_eq!(player_service::summary(&state).await.in_game, 4);

    game_service::finish_game(&state, game.id).await.unwrap();
    state.stop_rest_task().await;

    let players = player_service::list_players(&state).await;
    assert!(players.iter().all(|player| {
        player.status == PlayerStatusDto::Resting
            && player.games_played == 1
            && player.rest_end_time > 0
            && player.rest_ends_at.is_some()
    }));

    let refused = game_service::create_game(&state).await.unwrap();
    assert!(!refused.created);

    let end = players[0].rest_end_time;
    assert!(!rest_scheduler::tick_once(&state, end).await.unwrap());
    let summary = player_service::summary(&state).await;
    assert_eq!(summary.available, 4);
    assert_eq!(summary.resting, 0);
}

#[tokio::test]
async fn removing_a_running_game_releases_players_without_rest() {
    let state = memory_state();
    add_all(&state, &["ann", "ben", "cat", "dan", "eve"]).await;
    let game = game_service::create_game(&state).await.unwrap().game.unwrap();
    game_service::start_game(&state, game.id).await.unwrap();

    game_service::remove_game(&state, game.id).await.unwrap();

    let players = player_service::list_players(&state).await;
    assert!(players.iter().all(|player| {
        player.status == PlayerStatusDto::Available
            && player.rest_end_time == 0
            && player.games_played == 0
    }));
    assert!(game_service::list_games(&state).await.is_empty());
}

#[tokio::test]
async fn pages_show_the_newest_games_first() {
    let config = AppConfig::default();
    let state = memory_state();
    add_all(&state, &["a", "b", "c", "d"]).await;

    let mut kept = Vec::new();
    for _ in 0..(config.items_per_page() + 2) {
        let game = game_service::create_game(&state).await.unwrap().game.unwrap();
        game_service::start_game(&state, game.id).await.unwrap();
        game_service::finish_game(&state, game.id).await.unwrap();
        let end = player_service::list_players(&state).await[0].rest_end_time;
        rest_scheduler::tick_once(&state, end).await.unwrap();
        kept.push(game.id);
    }
    state.stop_rest_task().await;

    let first = game_service::list_page(&state).await;
    assert_eq!(first.pagination.total_pages, 2);
    assert_eq!(first.games.len(), config.items_per_page());
    assert_eq!(first.games[0].id, *kept.last().unwrap());
    assert!(first.games.iter().all(|game| game.status == GameStatusDto::Completed));

    let second = game_service::go_to_page(&state, 2).await.unwrap();
    assert_eq!(second.pagination.current_page, 2);
    assert_eq!(
        second.games.iter().map(|game| game.id).collect::<Vec<_>>(),
        vec![kept[1], kept[0]]
    );

    let unchanged = game_service::go_to_page(&state, 3).await.unwrap();
    assert_eq!(unchanged.pagination.current_page, 2);
}

#[tokio::test]
async fn state_survives_a_restart_on_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default().with_timing(Duration::from_secs(300), Duration::from_secs(3600));

    let game_id = {
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let rotation = persistence::load_rotation(store.as_ref(), &config).unwrap();
        let state = AppState::new(config.clone(), store, rotation);
        add_all(&state, &["ann", "ben", "cat", "dan", "eve"]).await;
        player_service::set_status(&state, "eve", PlayerStatusDto::OnHold)
            .await
            .unwrap();
        let game = game_service::create_game(&state).await.unwrap().game.unwrap();
        game_service::start_game(&state, game.id).await.unwrap();
        game_service::finish_game(&state, game.id).await.unwrap();
        state.stop_rest_task().await;
        game.id
    };

    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let rotation = persistence::load_rotation(store.as_ref(), &config).unwrap();
    let state = AppState::new(config, store, rotation);
    rest_scheduler::resume(&state).await;

    let summary = player_service::summary(&state).await;
    assert_eq!(summary.total, 5);
    assert_eq!(summary.resting, 4);
    assert_eq!(summary.on_hold, 1);
    let game = game_service::get_game(&state, game_id).await.unwrap();
    assert_eq!(game.status, GameStatusDto::Completed);
    assert!(state.rotation().await.rest_timer_armed());
    state.stop_rest_task().await;
}

#[tokio::test]
async fn subscribers_hear_about_each_collection_once() {
    let state = memory_state();
    let mut events = state.events().subscribe();

    add_all(&state, &["a", "b", "c", "d"]).await;
    let game = game_service::create_game(&state).await.unwrap().game.unwrap();
    game_service::start_game(&state, game.id).await.unwrap();

    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.push(event.event.unwrap_or_default());
    }
    assert_eq!(
        names,
        [
            "players.changed",
            "players.changed",
            "players.changed",
            "players.changed",
            "games.changed",
            "players.changed",
            "games.changed",
        ]
    );
}

#[tokio::test]
async fn refused_writes_leave_the_store_untouched() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(AppConfig::default(), store.clone(), Rotation::default());
    add_all(&state, &["ann"]).await;
    let before = store.get(PLAYERS_KEY).unwrap();

    assert!(player_service::add_player(&state, "Ann").await.is_err());
    assert!(game_service::create_game(&state).await.unwrap().reason.is_some());

    assert_eq!(store.get(PLAYERS_KEY).unwrap(), before);
}

#[tokio::test]
async fn handlers_map_errors_to_status_codes() {
    let state = memory_state();

    let created = routes::players::add_player(
        State(state.clone()),
        Valid(Json(AddPlayerRequest { name: "zoe".into() })),
    )
    .await
    .into_response();
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = routes::players::add_player(
        State(state.clone()),
        Valid(Json(AddPlayerRequest { name: "ZOE".into() })),
    )
    .await
    .into_response();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let missing = routes::games::start_game(State(state.clone()), Path(Uuid::new_v4()))
        .await
        .into_response();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let removed = routes::players::remove_player(State(state), Path("zoe".into()))
        .await
        .into_response();
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
}

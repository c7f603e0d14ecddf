/// OpenAPI documentation generation.
pub mod documentation;
/// "Players changed" / "games changed" notifications.
pub mod events;
/// Game creation, lifecycle and paging.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Fairness ordering and team selection.
pub mod pairing;
/// Loading and flushing the rotation through the key-value store.
pub mod persistence;
/// Roster management.
pub mod player_service;
/// Background countdown releasing resting players.
pub mod rest_scheduler;
/// Server-Sent Events broadcasting service.
pub mod sse_service;

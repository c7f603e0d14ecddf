use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{
    game::{Game, GamePagination},
    lifecycle::GameStatus,
    player::{Player, PlayerStatus},
};

/// Persisted roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntity {
    pub name: String,
    #[serde(default)]
    pub games_played: u32,
    pub status: PlayerStatusEntity,
    /// Epoch milliseconds; `0` when not resting.
    #[serde(default)]
    pub rest_end_time: u64,
    #[serde(default, rename = "restTime")]
    pub rest_time_display: String,
}

/// Persisted player status, stored with its human-readable label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatusEntity {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "In Game")]
    InGame,
    #[serde(rename = "Resting")]
    Resting,
    #[serde(rename = "On Hold")]
    OnHold,
}

/// Persisted game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameEntity {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub player1: String,
    pub player2: String,
    pub player3: String,
    pub player4: String,
    pub status: GameStatusEntity,
    #[serde(default)]
    pub created_at: u64,
}

/// Persisted game status label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatusEntity {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Game")]
    InGame,
    #[serde(rename = "Completed")]
    Completed,
}

/// Persisted game cursor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GamePaginationEntity {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
}

impl From<PlayerStatusEntity> for PlayerStatus {
    fn from(value: PlayerStatusEntity) -> Self {
        match value {
            PlayerStatusEntity::Available => PlayerStatus::Available,
            PlayerStatusEntity::InGame => PlayerStatus::InGame,
            PlayerStatusEntity::Resting => PlayerStatus::Resting,
            PlayerStatusEntity::OnHold => PlayerStatus::OnHold,
        }
    }
}

impl From<PlayerStatus> for PlayerStatusEntity {
    fn from(value: PlayerStatus) -> Self {
        match value {
            PlayerStatus::Available => PlayerStatusEntity::Available,
            PlayerStatus::InGame => PlayerStatusEntity::InGame,
            PlayerStatus::Resting => PlayerStatusEntity::Resting,
            PlayerStatus::OnHold => PlayerStatusEntity::OnHold,
        }
    }
}

impl From<PlayerEntity> for Player {
    fn from(value: PlayerEntity) -> Self {
        Self {
            name: value.name,
            games_played: value.games_played,
            status: value.status.into(),
            rest_end_time: value.rest_end_time,
            rest_time_display: value.rest_time_display,
        }
    }
}

impl From<&Player> for PlayerEntity {
    fn from(value: &Player) -> Self {
        Self {
            name: value.name.clone(),
            games_played: value.games_played,
            status: value.status.into(),
            rest_end_time: value.rest_end_time,
            rest_time_display: value.rest_time_display.clone(),
        }
    }
}

impl From<GameStatusEntity> for GameStatus {
    fn from(value: GameStatusEntity) -> Self {
        match value {
            GameStatusEntity::NotStarted => GameStatus::NotStarted,
            GameStatusEntity::InGame => GameStatus::InGame,
            GameStatusEntity::Completed => GameStatus::Completed,
        }
    }
}

impl From<GameStatus> for GameStatusEntity {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::NotStarted => GameStatusEntity::NotStarted,
            GameStatus::InGame => GameStatusEntity::InGame,
            GameStatus::Completed => GameStatusEntity::Completed,
        }
    }
}

impl From<GameEntity> for Game {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id,
            players: [value.player1, value.player2, value.player3, value.player4],
            status: value.status.into(),
            created_at: value.created_at,
        }
    }
}

impl From<&Game> for GameEntity {
    fn from(value: &Game) -> Self {
        let [player1, player2, player3, player4] = value.players.clone();
        Self {
            id: value.id,
            player1,
            player2,
            player3,
            player4,
            status: value.status.into(),
            created_at: value.created_at,
        }
    }
}

impl From<GamePaginationEntity> for GamePagination {
    fn from(value: GamePaginationEntity) -> Self {
        Self {
            current_page: value.current_page,
            items_per_page: value.items_per_page,
            total_pages: value.total_pages,
        }
    }
}

impl From<GamePagination> for GamePaginationEntity {
    fn from(value: GamePagination) -> Self {
        Self {
            current_page: value.current_page,
            items_per_page: value.items_per_page,
            total_pages: value.total_pages,
        }
    }
}

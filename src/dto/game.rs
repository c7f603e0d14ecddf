use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::format_epoch_millis,
    state::{
        game::{Game, GamePagination, GameRegistry},
        lifecycle::GameStatus,
        rotation::CreateOutcome,
    },
};

/// Game lifecycle stage as exposed over the API.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameStatusDto {
    NotStarted,
    InGame,
    Completed,
}

/// Game as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSummary {
    pub id: Uuid,
    /// Players in slots 1 and 2.
    pub team_a: Vec<String>,
    /// Players in slots 3 and 4.
    pub team_b: Vec<String>,
    pub status: GameStatusDto,
    /// Creation time as RFC 3339, omitted for games persisted without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Paging cursor over the game list.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationDto {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
}

/// One page of games, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct GamePageResponse {
    pub games: Vec<GameSummary>,
    pub pagination: PaginationDto,
}

/// Answer to a game creation request. Refusals are not errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateGameResponse {
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameSummary>,
    /// Why no game was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<GameStatus> for GameStatusDto {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::NotStarted => GameStatusDto::NotStarted,
            GameStatus::InGame => GameStatusDto::InGame,
            GameStatus::Completed => GameStatusDto::Completed,
        }
    }
}

impl From<&Game> for GameSummary {
    fn from(value: &Game) -> Self {
        Self {
            id: value.id,
            team_a: value.team_a().to_vec(),
            team_b: value.team_b().to_vec(),
            status: value.status.into(),
            created_at: format_epoch_millis(value.created_at),
        }
    }
}

impl From<GamePagination> for PaginationDto {
    fn from(value: GamePagination) -> Self {
        Self {
            current_page: value.current_page,
            items_per_page: value.items_per_page,
            total_pages: value.total_pages,
        }
    }
}

impl From<&GameRegistry> for GamePageResponse {
    fn from(value: &GameRegistry) -> Self {
        Self {
            games: value.paginated().into_iter().map(GameSummary::from).collect(),
            pagination: value.pagination().into(),
        }
    }
}

impl From<CreateOutcome> for CreateGameResponse {
    fn from(value: CreateOutcome) -> Self {
        match value {
            CreateOutcome::Created(game) => Self {
                created: true,
                game: Some(GameSummary::from(&game)),
                reason: None,
            },
            CreateOutcome::NotEnoughPlayers { available } => Self {
                created: false,
                game: None,
                reason: Some(format!(
                    "a minimum of four available players is required to create a new game ({available} available)"
                )),
            },
            CreateOutcome::PendingGameExists => Self {
                created: false,
                game: None,
                reason: Some("start all pending games before creating a new game".into()),
            },
        }
    }
}

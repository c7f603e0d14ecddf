use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{format_epoch_millis, validation::validate_player_name},
    state::player::{Player, PlayerStatus, RosterSummary},
};

/// Payload registering a new player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPlayerRequest {
    /// Display name; stored uppercase and compared case-insensitively.
    #[validate(custom(function = "validate_player_name"))]
    pub name: String,
}

/// Rotation status as exposed over the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatusDto {
    Available,
    InGame,
    Resting,
    OnHold,
}

/// Manual status override (hold, release, end a rest early).
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePlayerStatusRequest {
    pub status: PlayerStatusDto,
}

/// Roster entry as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerSummary {
    pub name: String,
    pub games_played: u32,
    pub status: PlayerStatusDto,
    /// Epoch milliseconds at which the rest ends, `0` unless resting.
    pub rest_end_time: u64,
    /// Same instant as RFC 3339, omitted unless resting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_ends_at: Option<String>,
    /// Countdown such as `|2:05`, empty unless resting.
    pub rest_time: String,
}

/// Head count of the roster per status.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterSummaryDto {
    pub total: usize,
    pub available: usize,
    pub in_game: usize,
    pub resting: usize,
    pub on_hold: usize,
}

impl From<PlayerStatus> for PlayerStatusDto {
    fn from(value: PlayerStatus) -> Self {
        match value {
            PlayerStatus::Available => PlayerStatusDto::Available,
            PlayerStatus::InGame => PlayerStatusDto::InGame,
            PlayerStatus::Resting => PlayerStatusDto::Resting,
            PlayerStatus::OnHold => PlayerStatusDto::OnHold,
        }
    }
}

impl From<PlayerStatusDto> for PlayerStatus {
    fn from(value: PlayerStatusDto) -> Self {
        match value {
            PlayerStatusDto::Available => PlayerStatus::Available,
            PlayerStatusDto::InGame => PlayerStatus::InGame,
            PlayerStatusDto::Resting => PlayerStatus::Resting,
            PlayerStatusDto::OnHold => PlayerStatus::OnHold,
        }
    }
}

impl From<&Player> for PlayerSummary {
    fn from(value: &Player) -> Self {
        Self {
            name: value.name.clone(),
            games_played: value.games_played,
            status: value.status.into(),
            rest_end_time: value.rest_end_time,
            rest_ends_at: format_epoch_millis(value.rest_end_time),
            rest_time: value.rest_time_display.clone(),
        }
    }
}

impl From<RosterSummary> for RosterSummaryDto {
    fn from(value: RosterSummary) -> Self {
        Self {
            total: value.total,
            available: value.available,
            in_game: value.in_game,
            resting: value.resting,
            on_hold: value.on_hold,
        }
    }
}

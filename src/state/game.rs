use uuid::Uuid;

use crate::{
    services::pairing::{PLAYERS_PER_GAME, Teams},
    state::{
        error::RegistryError,
        lifecycle::{GameEvent, GameStatus, compute_transition},
    },
};

/// Page size used when no configuration overrides it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// A four-player game. Slots 1-2 form team A and slots 3-4 team B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Stable identifier used by callers to address the game.
    pub id: Uuid,
    /// Player names in slot order; fixed once created.
    pub players: [String; PLAYERS_PER_GAME],
    /// Lifecycle stage.
    pub status: GameStatus,
    /// Creation time in epoch milliseconds.
    pub created_at: u64,
}

impl Game {
    /// Build a pending game from freshly drawn teams.
    pub fn new(teams: Teams, created_at: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            players: teams.into_slots(),
            status: GameStatus::NotStarted,
            created_at,
        }
    }

    /// Slots 1 and 2.
    pub fn team_a(&self) -> &[String] {
        &self.players[..2]
    }

    /// Slots 3 and 4.
    pub fn team_b(&self) -> &[String] {
        &self.players[2..]
    }
}

/// Paging cursor over the game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePagination {
    /// One-based page currently displayed.
    pub current_page: usize,
    /// Games per page, at least one.
    pub items_per_page: usize,
    /// `ceil(games / items_per_page)`.
    pub total_pages: usize,
}

impl GamePagination {
    /// Cursor on the first page of an empty list.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_pages: 0,
        }
    }

    /// Recompute the page count after the list changed size, pulling the
    /// cursor back when its page disappeared.
    pub fn recompute(&mut self, game_count: usize) {
        self.total_pages = game_count.div_ceil(self.items_per_page);
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
    }

    /// Move to `page` if it exists. Returns whether the cursor moved.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.current_page = page;
        true
    }
}

impl Default for GamePagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Owns the games in creation order together with the paging cursor.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: Vec<Game>,
    pagination: GamePagination,
}

impl GameRegistry {
    /// Empty registry paging by `items_per_page`.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            games: Vec::new(),
            pagination: GamePagination::new(items_per_page),
        }
    }

    /// Rebuild a registry from persisted parts. The page count is recomputed
    /// rather than trusted.
    pub fn from_parts(games: Vec<Game>, pagination: GamePagination) -> Self {
        let mut pagination = GamePagination {
            items_per_page: pagination.items_per_page.max(1),
            ..pagination
        };
        pagination.recompute(games.len());
        Self { games, pagination }
    }

    /// Whether a game is waiting to be started.
    pub fn has_pending(&self) -> bool {
        self.games
            .iter()
            .any(|game| game.status == GameStatus::NotStarted)
    }

    /// Append a game and recompute pagination.
    pub fn push(&mut self, game: Game) -> &Game {
        self.games.push(game);
        self.pagination.recompute(self.games.len());
        &self.games[self.games.len() - 1]
    }

    /// Look a game up by id.
    pub fn get(&self, id: Uuid) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Apply a lifecycle event to a game.
    pub fn transition(&mut self, id: Uuid, event: GameEvent) -> Result<&Game, RegistryError> {
        let game = self
            .games
            .iter_mut()
            .find(|game| game.id == id)
            .ok_or(RegistryError::UnknownGame(id))?;
        game.status = compute_transition(game.status, event)?;
        Ok(game)
    }

    /// Delete a game regardless of its status.
    pub fn remove(&mut self, id: Uuid) -> Option<Game> {
        let index = self.games.iter().position(|game| game.id == id)?;
        let game = self.games.remove(index);
        self.pagination.recompute(self.games.len());
        Some(game)
    }

    /// Drop every game and reset the cursor.
    pub fn clear(&mut self) {
        self.games.clear();
        self.pagination = GamePagination::new(self.pagination.items_per_page);
    }

    /// Games in creation order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Current paging cursor.
    pub fn pagination(&self) -> GamePagination {
        self.pagination
    }

    /// Move the cursor. Pages outside `1..=total_pages` are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination.go_to_page(page)
    }

    /// Games on the current page, newest first. The stored order is untouched.
    pub fn paginated(&self) -> Vec<&Game> {
        let GamePagination {
            current_page,
            items_per_page,
            ..
        } = self.pagination;

        self.games
            .iter()
            .rev()
            .skip((current_page - 1) * items_per_page)
            .take(items_per_page)
            .collect()
    }
}

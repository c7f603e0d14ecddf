use indexmap::IndexMap;
use rand::Rng;

use crate::{services::pairing, state::error::RegistryError};

/// Where a player currently stands in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Eligible for the next game.
    Available,
    /// Currently on court.
    InGame,
    /// Serving the post-game cooldown.
    Resting,
    /// Manually excluded from selection until released.
    OnHold,
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Normalized (uppercase) display name, also the roster key.
    pub name: String,
    /// Number of completed games.
    pub games_played: u32,
    /// Current rotation status.
    pub status: PlayerStatus,
    /// Epoch milliseconds at which the rest ends, `0` unless resting.
    pub rest_end_time: u64,
    /// Countdown shown while resting, empty otherwise.
    pub rest_time_display: String,
}

impl Player {
    /// Fresh roster entry, available with no games played.
    pub fn new(name: String) -> Self {
        Self {
            name,
            games_played: 0,
            status: PlayerStatus::Available,
            rest_end_time: 0,
            rest_time_display: String::new(),
        }
    }

    /// Whether the player is serving a rest with a known end.
    pub fn is_resting(&self) -> bool {
        self.status == PlayerStatus::Resting && self.rest_end_time > 0
    }

    pub(crate) fn clear_rest(&mut self) {
        self.rest_end_time = 0;
        self.rest_time_display.clear();
    }

    /// Restore the resting invariant on data coming from outside the registry.
    fn repaired(mut self) -> Self {
        match self.status {
            PlayerStatus::Resting if self.rest_end_time == 0 => {
                self.status = PlayerStatus::Available;
                self.clear_rest();
            }
            PlayerStatus::Resting => {}
            _ => self.clear_rest(),
        }
        self
    }
}

/// Canonical form of a player name: trimmed and uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Per-status head count of the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterSummary {
    /// Everyone on the roster.
    pub total: usize,
    /// Players eligible for the next game.
    pub available: usize,
    /// Players on court.
    pub in_game: usize,
    /// Players resting.
    pub resting: usize,
    /// Players on hold.
    pub on_hold: usize,
}

/// Owns the roster, keyed by normalized name in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: IndexMap<String, Player>,
}

impl PlayerRegistry {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from persisted players.
    ///
    /// Names are normalized again, later duplicates are dropped and the resting
    /// invariant is enforced so a hand-edited blob cannot corrupt the registry.
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut registry = Self::new();
        for mut player in players {
            player.name = normalize_name(&player.name);
            if player.name.is_empty() || registry.players.contains_key(&player.name) {
                continue;
            }
            registry
                .players
                .insert(player.name.clone(), player.repaired());
        }
        registry
    }

    /// Insert a new available player.
    pub fn add(&mut self, name: &str) -> Result<&Player, RegistryError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(RegistryError::InvalidName);
        }
        if self.players.contains_key(&name) {
            return Err(RegistryError::DuplicatePlayer(name));
        }

        let entry = self
            .players
            .entry(name.clone())
            .or_insert_with(|| Player::new(name));
        Ok(entry)
    }

    /// Remove a player by name. Absent names are a no-op returning `None`.
    pub fn remove(&mut self, name: &str) -> Option<Player> {
        self.players.shift_remove(&normalize_name(name))
    }

    /// Overwrite a player's status.
    ///
    /// Every status other than resting clears the rest fields. Resting itself
    /// needs an end time and goes through [`PlayerRegistry::begin_rest`].
    pub fn set_status(
        &mut self,
        name: &str,
        status: PlayerStatus,
    ) -> Result<&Player, RegistryError> {
        let player = self.get_mut(name)?;
        if status == PlayerStatus::Resting {
            return Err(RegistryError::RestWithoutGame(player.name.clone()));
        }
        player.status = status;
        player.clear_rest();
        Ok(player)
    }

    /// Send a player to rest until `rest_end_time` (epoch milliseconds).
    pub fn begin_rest(&mut self, name: &str, rest_end_time: u64) -> Result<&Player, RegistryError> {
        let player = self.get_mut(name)?;
        player.status = PlayerStatus::Resting;
        player.rest_end_time = rest_end_time.max(1);
        player.rest_time_display.clear();
        Ok(player)
    }

    /// Bump the completed-games counter, returning the new value.
    pub fn increment_games_played(&mut self, name: &str) -> Result<u32, RegistryError> {
        let player = self.get_mut(name)?;
        player.games_played = player.games_played.saturating_add(1);
        Ok(player.games_played)
    }

    /// Available players in pairing-selection order: fewest games first, ties
    /// in random order.
    pub fn list_available<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Player> {
        let mut available = self
            .players
            .values()
            .filter(|player| player.status == PlayerStatus::Available)
            .cloned()
            .collect::<Vec<_>>();
        pairing::fairness_order(&mut available, rng);
        available
    }

    /// Number of available players.
    pub fn available_count(&self) -> usize {
        self.count(PlayerStatus::Available)
    }

    /// Number of resting players.
    pub fn resting_count(&self) -> usize {
        self.count(PlayerStatus::Resting)
    }

    /// Case-insensitive existence check.
    pub fn exists_by_normalized_name(&self, name: &str) -> bool {
        self.players.contains_key(&normalize_name(name))
    }

    /// Look a player up by name.
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.get(&normalize_name(name))
    }

    /// Every player in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// Roster size.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Drop every player.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Head count per status.
    pub fn summary(&self) -> RosterSummary {
        self.players
            .values()
            .fold(RosterSummary::default(), |mut summary, player| {
                summary.total += 1;
                match player.status {
                    PlayerStatus::Available => summary.available += 1,
                    PlayerStatus::InGame => summary.in_game += 1,
                    PlayerStatus::Resting => summary.resting += 1,
                    PlayerStatus::OnHold => summary.on_hold += 1,
                }
                summary
            })
    }

    fn count(&self, status: PlayerStatus) -> usize {
        self.players
            .values()
            .filter(|player| player.status == status)
            .count()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Player, RegistryError> {
        let key = normalize_name(name);
        self.players
            .get_mut(&key)
            .ok_or(RegistryError::UnknownPlayer(key))
    }
}

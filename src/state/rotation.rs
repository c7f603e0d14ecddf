//! Single-writer aggregate over the player and game registries.
//!
//! Every operation runs to completion on `&mut self` and records which
//! collections it touched so the caller can persist and notify afterwards.

use std::time::Duration;

use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::{
    services::pairing::{self, PLAYERS_PER_GAME},
    state::{
        error::RegistryError,
        game::{Game, GameRegistry},
        lifecycle::{GameEvent, GameStatus},
        player::{Player, PlayerRegistry, PlayerStatus, RosterSummary},
        rest::{RestTick, advance_rest},
    },
};

/// Cooldown applied after a finished game when nothing else is configured.
pub const DEFAULT_REST_DURATION: Duration = Duration::from_secs(5 * 60);

/// Collections modified since the last [`Rotation::take_changes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// The roster must be persisted and announced.
    pub players: bool,
    /// The game list or its cursor must be persisted and announced.
    pub games: bool,
    /// Only countdown displays moved; announce without persisting.
    pub countdown: bool,
}

impl ChangeSet {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        !(self.players || self.games || self.countdown)
    }

    /// Whether subscribers should re-read the roster.
    pub fn announces_players(&self) -> bool {
        self.players || self.countdown
    }
}

/// Result of asking for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A pending game was appended.
    Created(Game),
    /// Fewer than four players are available.
    NotEnoughPlayers {
        /// Available players at the time of the request.
        available: usize,
    },
    /// A game is still waiting to be started.
    PendingGameExists,
}

/// Result of finishing a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOutcome {
    /// The completed game.
    pub game: Game,
    /// The rest timer was idle and must be started by the caller.
    pub start_rest_timer: bool,
}

/// Result of a countdown pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestPass {
    /// Per-player details of the pass.
    pub tick: RestTick,
    /// `false` once nobody is resting; the timer has been disarmed.
    pub keep_running: bool,
}

/// Owns the roster, the games and the rest-timer flag.
#[derive(Debug, Clone)]
pub struct Rotation {
    players: PlayerRegistry,
    games: GameRegistry,
    rest_duration: Duration,
    rest_timer_armed: bool,
    changes: ChangeSet,
}

impl Rotation {
    /// Assemble a rotation from its registries.
    pub fn new(players: PlayerRegistry, games: GameRegistry, rest_duration: Duration) -> Self {
        Self {
            players,
            games,
            rest_duration,
            rest_timer_armed: false,
            changes: ChangeSet::default(),
        }
    }

    /// Read access to the roster.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Read access to the games.
    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    /// Head count per status.
    pub fn summary(&self) -> RosterSummary {
        self.players.summary()
    }

    /// Return and reset the pending change set.
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    /// Put back a change set whose flush failed so the next flush retries it.
    ///
    /// Countdown-only changes are never persisted and are not restored.
    pub fn restore_changes(&mut self, changes: ChangeSet) {
        self.changes.players |= changes.players;
        self.changes.games |= changes.games;
    }

    /// Register a new player.
    pub fn add_player(&mut self, name: &str) -> Result<Player, RegistryError> {
        let player = self.players.add(name)?.clone();
        self.changes.players = true;
        Ok(player)
    }

    /// Remove a player. Unknown names leave everything untouched.
    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        let removed = self.players.remove(name)?;
        self.changes.players = true;
        Some(removed)
    }

    /// Manually override a player's status (hold, release, cut a rest short).
    pub fn set_player_status(
        &mut self,
        name: &str,
        status: PlayerStatus,
    ) -> Result<Player, RegistryError> {
        let player = self.players.set_status(name, status)?.clone();
        self.changes.players = true;
        Ok(player)
    }

    /// Empty the roster.
    pub fn clear_players(&mut self) {
        self.players.clear();
        self.changes.players = true;
    }

    /// Draw four players into a new pending game.
    ///
    /// Refused while another game is pending or when fewer than four players
    /// are available. Player statuses are untouched until the game starts.
    pub fn create_game<R: Rng + ?Sized>(&mut self, rng: &mut R, now: u64) -> CreateOutcome {
        if self.games.has_pending() {
            return CreateOutcome::PendingGameExists;
        }

        let available = self.players.available_count();
        if available < PLAYERS_PER_GAME {
            return CreateOutcome::NotEnoughPlayers { available };
        }

        let ordered = self.players.list_available(rng);
        let Some(teams) = pairing::select_teams(&ordered) else {
            return CreateOutcome::NotEnoughPlayers { available };
        };

        let game = self.games.push(Game::new(teams, now)).clone();
        self.changes.games = true;
        CreateOutcome::Created(game)
    }

    /// Start a pending game and put its players on court.
    pub fn start_game(&mut self, id: Uuid) -> Result<Game, RegistryError> {
        let game = self.games.transition(id, GameEvent::Start)?.clone();
        self.changes.games = true;

        for name in &game.players {
            if self.players.set_status(name, PlayerStatus::InGame).is_ok() {
                self.changes.players = true;
            }
        }

        Ok(game)
    }

    /// Complete a running game: its players rest until `now + rest_duration`
    /// and are credited one game each.
    pub fn finish_game(&mut self, id: Uuid, now: u64) -> Result<FinishOutcome, RegistryError> {
        let game = self.games.transition(id, GameEvent::Finish)?.clone();
        self.changes.games = true;

        let rest_end_time = now.saturating_add(self.rest_duration.as_millis() as u64);
        for name in &game.players {
            if self.players.begin_rest(name, rest_end_time).is_ok() {
                self.players.increment_games_played(name)?;
                self.changes.players = true;
            } else {
                debug!(player = %name, game = %game.id, "finished game references a removed player");
            }
        }

        let start_rest_timer = self.arm_rest_timer();
        Ok(FinishOutcome {
            game,
            start_rest_timer,
        })
    }

    /// Delete a game whatever its stage and hand its players back to the pool.
    ///
    /// Players of a running game skip the rest they would have earned.
    pub fn remove_game(&mut self, id: Uuid) -> Result<Game, RegistryError> {
        let game = self.games.remove(id).ok_or(RegistryError::UnknownGame(id))?;
        self.changes.games = true;

        for name in &game.players {
            if self.players.set_status(name, PlayerStatus::Available).is_ok() {
                self.changes.players = true;
            }
        }

        if game.status == GameStatus::InGame {
            debug!(game = %game.id, "removed a running game; players released without rest");
        }

        Ok(game)
    }

    /// Empty the game list and its cursor.
    pub fn clear_games(&mut self) {
        self.games.clear();
        self.changes.games = true;
    }

    /// Move the game cursor. Returns whether it moved.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.games.go_to_page(page);
        if moved {
            self.changes.games = true;
        }
        moved
    }

    /// Arm the rest timer if anyone is resting and it is idle.
    ///
    /// Returns `true` when the caller must start the timer task.
    pub fn arm_rest_timer(&mut self) -> bool {
        if self.rest_timer_armed || self.players.resting_count() == 0 {
            return false;
        }
        self.rest_timer_armed = true;
        true
    }

    /// Whether a timer task is expected to be running.
    pub fn rest_timer_armed(&self) -> bool {
        self.rest_timer_armed
    }

    /// One countdown pass. Disarms the timer once nobody is resting.
    pub fn tick_rest(&mut self, now: u64) -> RestPass {
        let tick = advance_rest(&mut self.players, now);

        if !tick.released.is_empty() {
            self.changes.players = true;
        } else if tick.refreshed > 0 {
            self.changes.countdown = true;
        }

        let keep_running = self.players.resting_count() > 0;
        if !keep_running {
            self.rest_timer_armed = false;
        }

        RestPass { tick, keep_running }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(
            PlayerRegistry::new(),
            GameRegistry::default(),
            DEFAULT_REST_DURATION,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const NOW: u64 = 1_700_000_000_000;
    const REST_MS: u64 = 5 * 60 * 1_000;

    fn rotation(names: &[&str]) -> Rotation {
        let mut rotation = Rotation::default();
        for name in names {
            rotation.add_player(name).unwrap();
        }
        rotation.take_changes();
        rotation
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn created(outcome: CreateOutcome) -> Game {
        match outcome {
            CreateOutcome::Created(game) => game,
            other => panic!("expected a game, got {other:?}"),
        }
    }

    fn assert_rest_invariant(rotation: &Rotation) {
        for player in rotation.players().iter() {
            if player.status == PlayerStatus::Resting {
                assert!(player.rest_end_time > 0, "{} rests without end", player.name);
            } else {
                assert_eq!(player.rest_end_time, 0, "{} keeps a rest end", player.name);
                assert!(player.rest_time_display.is_empty());
            }
        }
    }

    #[test]
    fn four_players_play_and_rest() {
        let mut rotation = rotation(&["a", "b", "c", "d"]);

        let game = created(rotation.create_game(&mut rng(), NOW));
        assert_eq!(game.status, GameStatus::NotStarted);
        let mut names = game.players.to_vec();
        names.sort();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(rotation.players().available_count(), 4);
        assert_eq!(
            rotation.take_changes(),
            ChangeSet {
                games: true,
                ..ChangeSet::default()
            }
        );
        assert_rest_invariant(&rotation);

        rotation.start_game(game.id).unwrap();
        assert_eq!(rotation.summary().in_game, 4);
        assert_rest_invariant(&rotation);

        let outcome = rotation.finish_game(game.id, NOW).unwrap();
        assert!(outcome.start_rest_timer);
        assert_eq!(outcome.game.status, GameStatus::Completed);
        for player in rotation.players().iter() {
            assert_eq!(player.status, PlayerStatus::Resting);
            assert_eq!(player.games_played, 1);
            assert_eq!(player.rest_end_time, NOW + REST_MS);
        }
        assert_rest_invariant(&rotation);
    }

    #[test]
    fn three_players_cannot_form_a_game() {
        let mut rotation = rotation(&["a", "b", "c"]);

        let outcome = rotation.create_game(&mut rng(), NOW);

        assert_eq!(outcome, CreateOutcome::NotEnoughPlayers { available: 3 });
        assert!(rotation.games().games().is_empty());
        assert!(rotation.take_changes().is_empty());
    }

    #[test]
    fn a_pending_game_blocks_the_next_one() {
        let mut rotation = rotation(&["a", "b", "c", "d", "e", "f", "g", "h"]);

        created(rotation.create_game(&mut rng(), NOW));
        let second = rotation.create_game(&mut rng(), NOW);

        assert_eq!(second, CreateOutcome::PendingGameExists);
        assert_eq!(rotation.games().games().len(), 1);
    }

    #[test]
    fn finish_only_credits_the_four_players() {
        let mut rotation = rotation(&["a", "b", "c", "d", "e", "f"]);
        let game = created(rotation.create_game(&mut rng(), NOW));
        rotation.start_game(game.id).unwrap();
        rotation.finish_game(game.id, NOW).unwrap();

        for player in rotation.players().iter() {
            let expected = u32::from(game.players.contains(&player.name));
            assert_eq!(player.games_played, expected, "{}", player.name);
        }
        assert_rest_invariant(&rotation);
    }

    #[test]
    fn next_game_prefers_benched_players() {
        let mut rotation = rotation(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let first = created(rotation.create_game(&mut rng(), NOW));
        rotation.start_game(first.id).unwrap();
        rotation.finish_game(first.id, NOW).unwrap();
        rotation.tick_rest(NOW + REST_MS);

        let second = created(rotation.create_game(&mut rng(), NOW + REST_MS));

        for name in &second.players {
            assert!(!first.players.contains(name), "{name} played twice in a row");
        }
    }

    #[test]
    fn start_and_finish_reject_wrong_stage() {
        let mut rotation = rotation(&["a", "b", "c", "d"]);
        let game = created(rotation.create_game(&mut rng(), NOW));

        assert!(matches!(
            rotation.finish_game(game.id, NOW),
            Err(RegistryError::InvalidTransition(_))
        ));
        rotation.start_game(game.id).unwrap();
        assert!(matches!(
            rotation.start_game(game.id),
            Err(RegistryError::InvalidTransition(_))
        ));
        assert_eq!(rotation.summary().resting, 0);
    }

    #[test]
    fn removing_a_running_game_releases_players_without_rest() {
        let mut rotation = rotation(&["p1", "p2", "p3", "p4"]);
        let game = created(rotation.create_game(&mut rng(), NOW));
        rotation.start_game(game.id).unwrap();

        rotation.remove_game(game.id).unwrap();

        for player in rotation.players().iter() {
            assert_eq!(player.status, PlayerStatus::Available);
            assert_eq!(player.rest_end_time, 0);
            assert_eq!(player.games_played, 0);
        }
        assert!(rotation.games().games().is_empty());
        assert_eq!(rotation.games().pagination().total_pages, 0);
        assert_rest_invariant(&rotation);
    }

    #[test]
    fn rest_timer_disarms_once_everyone_is_back() {
        let mut rotation = rotation(&["a", "b", "c", "d"]);
        let game = created(rotation.create_game(&mut rng(), NOW));
        rotation.start_game(game.id).unwrap();
        assert!(rotation.finish_game(game.id, NOW).unwrap().start_rest_timer);
        assert!(!rotation.arm_rest_timer());
        rotation.take_changes();

        let pass = rotation.tick_rest(NOW + 1_000);
        assert!(pass.keep_running);
        assert_eq!(
            rotation.take_changes(),
            ChangeSet {
                countdown: true,
                ..ChangeSet::default()
            }
        );

        let pass = rotation.tick_rest(NOW + REST_MS);
        assert!(!pass.keep_running);
        assert_eq!(pass.tick.released.len(), 4);
        assert!(!rotation.rest_timer_armed());
        assert!(rotation.take_changes().players);
        assert_rest_invariant(&rotation);
    }

    #[test]
    fn removed_players_are_skipped_on_finish() {
        let mut rotation = rotation(&["a", "b", "c", "d"]);
        let game = created(rotation.create_game(&mut rng(), NOW));
        rotation.start_game(game.id).unwrap();
        let gone = game.players[0].clone();
        rotation.remove_player(&gone).unwrap();

        rotation.finish_game(game.id, NOW).unwrap();

        assert_eq!(rotation.players().len(), 3);
        assert_eq!(rotation.summary().resting, 3);
    }

    #[test]
    fn restored_changes_merge_with_new_ones() {
        let mut rotation = rotation(&["a"]);
        rotation.add_player("b").unwrap();
        let failed = rotation.take_changes();

        rotation.clear_games();
        rotation.restore_changes(failed);
        rotation.restore_changes(ChangeSet {
            countdown: true,
            ..ChangeSet::default()
        });

        assert_eq!(
            rotation.take_changes(),
            ChangeSet {
                players: true,
                games: true,
                countdown: false,
            }
        );
    }

    #[test]
    fn go_to_page_only_records_real_moves() {
        let mut rotation = rotation(&["a", "b", "c", "d"]);
        assert!(!rotation.go_to_page(1));
        assert!(rotation.take_changes().is_empty());
    }
}

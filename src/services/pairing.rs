//! Fairness ordering and team selection for new games.

use rand::{Rng, seq::SliceRandom};

use crate::state::player::Player;

/// Players needed to form a game.
pub const PLAYERS_PER_GAME: usize = 4;

/// Two teams of two, by player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teams {
    /// Slots 1 and 2.
    pub team_a: [String; 2],
    /// Slots 3 and 4.
    pub team_b: [String; 2],
}

impl Teams {
    /// The four names in slot order.
    pub fn into_slots(self) -> [String; PLAYERS_PER_GAME] {
        let [a1, a2] = self.team_a;
        let [b1, b2] = self.team_b;
        [a1, a2, b1, b2]
    }
}

/// Order players for selection: least-played first, ties broken uniformly at random.
///
/// The Fisher-Yates shuffle randomizes ties, then the stable sort groups by
/// games played without disturbing the shuffled order inside each group.
pub fn fairness_order<R: Rng + ?Sized>(players: &mut [Player], rng: &mut R) {
    players.shuffle(rng);
    players.sort_by_key(|player| player.games_played);
}

/// Split the head of an already ordered list into two teams.
///
/// Returns `None` when fewer than four players are supplied.
pub fn select_teams(ordered: &[Player]) -> Option<Teams> {
    let [a1, a2, b1, b2] = ordered.get(..PLAYERS_PER_GAME)? else {
        return None;
    };

    Some(Teams {
        team_a: [a1.name.clone(), a2.name.clone()],
        team_b: [b1.name.clone(), b2.name.clone()],
    })
}

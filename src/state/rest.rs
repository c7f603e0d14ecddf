use std::time::{SystemTime, UNIX_EPOCH};

use crate::state::player::{PlayerRegistry, PlayerStatus};

/// Outcome of one countdown pass over the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestTick {
    /// Players whose countdown was refreshed.
    pub refreshed: usize,
    /// Players released back to available, by name.
    pub released: Vec<String>,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Render a remaining duration as `|m:ss`.
pub fn format_rest_time(remaining_ms: u64) -> String {
    let minutes = remaining_ms / 60_000;
    let seconds = (remaining_ms % 60_000) / 1_000;
    format!("|{minutes}:{seconds:02}")
}

/// Refresh every resting player's countdown and release the ones whose rest
/// ended at or before `now`.
pub fn advance_rest(players: &mut PlayerRegistry, now: u64) -> RestTick {
    let mut tick = RestTick::default();

    for player in players.iter_mut() {
        if !player.is_resting() {
            continue;
        }

        let remaining = player.rest_end_time.saturating_sub(now);
        if remaining > 0 {
            player.rest_time_display = format_rest_time(remaining);
            tick.refreshed += 1;
        } else {
            player.status = PlayerStatus::Available;
            player.clear_rest();
            tick.released.push(player.name.clone());
        }
    }

    tick
}

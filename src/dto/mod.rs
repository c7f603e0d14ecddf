use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod game;
pub mod health;
pub mod player;
pub mod sse;
pub mod validation;

/// Render epoch milliseconds as RFC 3339, `None` for the unset value `0`.
fn format_epoch_millis(millis: u64) -> Option<String> {
    if millis == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|timestamp| timestamp.format(&Rfc3339).ok())
}

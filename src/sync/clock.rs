//! Block-height countdowns.

/// Assumed average block time of the target network.
pub const SECONDS_PER_BLOCK: u64 = 13;

/// Whole days left until `vote_end`, assuming [`SECONDS_PER_BLOCK`].
///
/// Returns 0 when either height is 0 (unset). Past deadlines give a
/// negative count.
pub fn time_remaining(vote_end: u64, current_block: u64) -> i64 {
    days_remaining(vote_end, current_block, SECONDS_PER_BLOCK)
}

pub fn days_remaining(vote_end: u64, current_block: u64, seconds_per_block: u64) -> i64 {
    if vote_end == 0 || current_block == 0 {
        return 0;
    }
    let blocks_remaining = vote_end as i128 - current_block as i128;
    let seconds = blocks_remaining as f64 * seconds_per_block as f64;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    round_half_up(hours / 24.0) as i64
}

// Halves round toward +inf (2.5 -> 3, -2.5 -> -2), unlike f64::round.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

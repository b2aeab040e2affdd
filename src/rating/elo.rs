// Score-to-rating conversion
//
// Piecewise-linear in the session's overall score. Both the base value and
// the difficulty-scaled value are truncated toward zero, not rounded.

use crate::config::Difficulty;

/// Largest loss a single session can cost
pub const MIN_DELTA: i32 = -20;

/// Largest gain a single session can award
pub const MAX_DELTA: i32 = 60;

/// Overall score at or above which a session counts as a win
pub const WIN_THRESHOLD: f64 = 6.0;

pub fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 1.0,
        Difficulty::Medium => 1.5,
        Difficulty::Hard => 2.0,
    }
}

/// Unscaled rating change for an overall score, truncated toward zero
pub fn base_delta(overall_score: f64) -> i32 {
    let s = overall_score;
    let base = if s < 4.0 {
        -15.0 + s * 2.5
    } else if s < 6.0 {
        5.0 + (s - 4.0) * 2.5
    } else if s < 8.0 {
        12.0 + (s - 6.0) * 3.0
    } else {
        20.0 + (s - 8.0) * 5.0
    };
    base.trunc() as i32
}

/// Rating change for a ranked session, clamped to [MIN_DELTA, MAX_DELTA]
pub fn rating_delta(overall_score: f64, difficulty: Difficulty) -> i32 {
    let base = base_delta(overall_score);
    let scaled = (f64::from(base) * difficulty_multiplier(difficulty)).trunc() as i32;
    let delta = scaled.clamp(MIN_DELTA, MAX_DELTA);

    tracing::debug!(
        score = overall_score,
        %difficulty,
        base,
        delta,
        "Rating delta computed"
    );

    delta
}

pub fn is_win(overall_score: f64) -> bool {
    overall_score >= WIN_THRESHOLD
}

/// Apply a delta, flooring the rating at zero
pub fn apply_delta(rating: u32, delta: i32) -> u32 {
    let next = i64::from(rating) + i64::from(delta);
    next.clamp(0, i64::from(u32::MAX)) as u32
}

//! Pure derivations for score and fall speed.
//!
//! Score is recomputed from scratch after every lock rather than accumulated.
//! That makes it a pure function of (cumulative lines, current level) with no
//! drift, and means a level-up retroactively raises the score attributed to
//! previously cleared lines.

use crate::types::{BASE_FALL_MS, FALL_STEP_PER_LEVEL_MS, LEVEL_SCORE, LINE_SCORE, MIN_FALL_MS};

/// `lines * 500 + (level - 1) * 5000`. Level is 1-based.
pub fn score_for(lines_cleared: u32, level: u32) -> u32 {
    lines_cleared * LINE_SCORE + level.saturating_sub(1) * LEVEL_SCORE
}

/// Level-derived gravity interval in milliseconds, floored at 100.
pub fn fall_interval_ms(level: u32) -> u32 {
    let stepped =
        BASE_FALL_MS as i64 - (level as i64 - 1) * FALL_STEP_PER_LEVEL_MS as i64;
    stepped.max(MIN_FALL_MS as i64) as u32
}

//! Scoring module - placement points, line bonuses and level progression
//!
//! All awards scale with the level that was current when the piece locked.

use crate::levels::clamp_level;
use crate::types::{
    LockKind, HARD_DROP_LOCK_POINTS, LINES_PER_LEVEL, LINE_CLEAR_POINTS, LOCK_POINTS, MAX_LEVEL,
    MIN_LEVEL,
};

/// Points for placing a piece.
///
/// The forced lock performed while finalizing game over awards nothing.
pub fn lock_points(lock: LockKind, level: u32) -> u32 {
    let base = match lock {
        LockKind::Gravity => LOCK_POINTS,
        LockKind::HardDrop => HARD_DROP_LOCK_POINTS,
        LockKind::Final => 0,
    };
    base.saturating_mul(level)
}

/// Bonus for clearing `lines` rows in one lock (0..=4; larger counts score as 4)
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_CLEAR_POINTS.len() - 1);
    LINE_CLEAR_POINTS[idx].saturating_mul(level)
}

/// Level reached after `total_lines` cumulative cleared lines, capped at [`MAX_LEVEL`]
pub fn level_for_lines(total_lines: u32) -> u32 {
    clamp_level(MIN_LEVEL.saturating_add(total_lines / LINES_PER_LEVEL)).min(MAX_LEVEL)
}

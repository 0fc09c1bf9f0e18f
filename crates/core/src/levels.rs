//! Level/timing table - gravity delay per level

use crate::types::{LEVEL_DELAYS_MS, MAX_LEVEL, MIN_LEVEL};

/// Clamp a level into `MIN_LEVEL..=MAX_LEVEL`
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Gravity delay (milliseconds) for a level; out-of-range levels use the nearest bound
pub fn delay_for_level(level: u32) -> u32 {
    LEVEL_DELAYS_MS[(clamp_level(level) - MIN_LEVEL) as usize]
}

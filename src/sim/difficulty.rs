//! Distance-driven difficulty
//!
//! Recomputed from scratch every tick, so it can never drift from `distance`.

use super::state::DifficultyLevel;
use crate::config::DifficultyTuning;

/// Level is 1 plus the number of thresholds already reached
pub fn difficulty_for(distance: u64, tuning: &DifficultyTuning) -> DifficultyLevel {
    let reached = tuning.thresholds.partition_point(|&t| t <= distance) as u32;
    let level = 1 + reached;
    DifficultyLevel {
        level,
        speed_multiplier: speed_multiplier_for(level, tuning.speed_step),
    }
}

/// Multiplier applied to obstacle, enemy and enemy-bullet base speeds
#[inline]
pub fn speed_multiplier_for(level: u32, speed_step: f32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * speed_step
}

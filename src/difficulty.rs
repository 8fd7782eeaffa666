//! Difficulty ramp derived from the score.
//!
//! Every `level_step` points the level goes up; each level-up shortens the
//! spawn interval (down to a floor) and speeds up newly spawned targets.

use std::time::Duration;

/// Spawn interval multiplier per level-up, in percent.
pub const INTERVAL_FACTOR_PCT: u32 = 87;
/// Target speed multiplier per level-up.
pub const SPEED_FACTOR: f32 = 1.08;
/// First level that spawns two targets per tick.
pub const DOUBLE_SPAWN_LEVEL: u32 = 3;

/// Spawn pacing and target speed for the current level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub spawn_interval_ms: u32,
    pub speed_scale: f32,
}

/// Result of a level-up: the new level and the re-tuned difficulty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub difficulty: Difficulty,
}

impl Difficulty {
    pub fn new(spawn_interval_ms: u32) -> Self {
        Self {
            spawn_interval_ms,
            speed_scale: 1.0,
        }
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms as u64)
    }

    /// Level a given score earns: one level per `level_step` points, starting at 1.
    pub fn level_for_score(score: u32, level_step: u32) -> u32 {
        score / level_step.max(1) + 1
    }

    /// Re-tune if `score` has earned a level above `current_level`.
    ///
    /// A jump of several levels at once still applies a single step.
    pub fn maybe_level_up(
        &self,
        current_level: u32,
        score: u32,
        level_step: u32,
        min_interval_ms: u32,
    ) -> Option<LevelUp> {
        let level = Self::level_for_score(score, level_step);
        if level <= current_level {
            return None;
        }

        // Rounded to the nearest millisecond: 900 -> 783 -> 681 -> ...
        let scaled = (self.spawn_interval_ms as u64 * INTERVAL_FACTOR_PCT as u64 + 50) / 100;
        let spawn_interval_ms = (scaled as u32).max(min_interval_ms);

        Some(LevelUp {
            level,
            difficulty: Difficulty {
                spawn_interval_ms,
                speed_scale: self.speed_scale * SPEED_FACTOR,
            },
        })
    }
}

/// Targets created per spawn tick at `level`.
pub fn spawn_count(level: u32) -> usize {
    if level < DOUBLE_SPAWN_LEVEL {
        1
    } else {
        2
    }
}

//! Round settings
//!
//! Defaults match the classic gallery round. A couple of values can be
//! overridden from the environment; there are no command-line flags.

use std::time::Duration;

/// Environment override for the round length in seconds
pub const ROUND_SECS_ENV: &str = "SHOOTING_GALLERY_ROUND_SECS";
/// Environment override for the miss limit
pub const MAX_MISSES_ENV: &str = "SHOOTING_GALLERY_MAX_MISSES";

/// Tunables for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Round length in seconds
    pub round_secs: u64,
    /// Spawn interval at level 1, in milliseconds
    pub spawn_start_ms: u32,
    /// Floor for the spawn interval, in milliseconds
    pub spawn_min_ms: u32,
    /// Score needed per level
    pub level_step: u32,
    /// End the round early after this many misses
    pub max_misses: Option<u32>,
    /// Frame rate the loop paces itself to
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_secs: 60,
            spawn_start_ms: 900,
            spawn_min_ms: 350,
            level_step: 10,
            max_misses: None,
            fps: 60,
        }
    }
}

impl Settings {
    /// Defaults with any environment overrides applied
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Some(secs) = read_positive(ROUND_SECS_ENV) {
            settings.round_secs = secs;
        }
        if let Some(limit) = read_positive(MAX_MISSES_ENV) {
            settings.max_misses = Some(limit as u32);
        }
        log::info!("Loaded settings: {:?}", settings);
        settings
    }

    pub fn round_time(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }

    /// Wall-clock length of one frame
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn read_positive(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match parse_positive(&raw) {
        Some(value) => Some(value),
        None => {
            log::warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}

/// Parse a strictly positive integer that fits in a `u32`
pub fn parse_positive(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value as u64),
    }
}


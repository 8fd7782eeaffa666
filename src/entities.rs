//! Game entity types and their own per-frame motion.
//!
//! Round-level rules (spawning, shooting, leveling) live in `compute`;
//! drawing lives in `render`.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::Rng;

use crate::config::Settings;
use crate::consts::{
    FLASH_FRAMES, HEIGHT, TARGET_PALETTE, TARGET_RADIUS_MAX, TARGET_RADIUS_MIN,
    TARGET_SPEED_MAX, TARGET_SPEED_MIN, WIDTH,
};
use crate::difficulty::Difficulty;

// ── Geometry & colour ─────────────────────────────────────────────────────────

/// A point on the logical playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centre of the playfield.
    pub fn center() -> Self {
        Self::new(WIDTH / 2.0, HEIGHT / 2.0)
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `self` over `under` with the given opacity (0 = invisible).
    pub fn over(self, under: Rgb, alpha: u8) -> Rgb {
        let mix = |top: u8, bottom: u8| -> u8 {
            let a = alpha as u32;
            ((top as u32 * a + bottom as u32 * (255 - a) + 127) / 255) as u8
        };
        Rgb::new(mix(self.r, under.r), mix(self.g, under.g), mix(self.b, under.b))
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// One bouncing disc.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    /// Velocity in units per frame.
    pub vx: f32,
    pub vy: f32,
    pub radius: u32,
    pub color: Rgb,
    /// Frames of hit flash left; 0 means no flash.
    pub hit_flash: u32,
}

impl Target {
    /// Roll a new target that fits entirely inside the playfield.
    pub fn spawn(rng: &mut impl Rng, speed_scale: f32) -> Self {
        let radius = rng.gen_range(TARGET_RADIUS_MIN..=TARGET_RADIUS_MAX);
        let r = radius as f32;
        let x = rng.gen_range(r..=WIDTH - r).round();
        let y = rng.gen_range(r..=HEIGHT - r).round();

        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(TARGET_SPEED_MIN..TARGET_SPEED_MAX) * speed_scale;
        let color = TARGET_PALETTE[rng.gen_range(0..TARGET_PALETTE.len())];

        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            radius,
            color,
            hit_flash: 0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move one frame, bouncing off the playfield walls.
    ///
    /// Each axis is reflected and clamped independently, so a corner hit
    /// flips both components in the same frame.
    pub fn advance(&mut self) {
        let r = self.radius as f32;
        self.x += self.vx;
        self.y += self.vy;

        if self.x - r <= 0.0 || self.x + r >= WIDTH {
            self.vx = -self.vx;
            self.x = self.x.clamp(r, WIDTH - r);
        }
        if self.y - r <= 0.0 || self.y + r >= HEIGHT {
            self.vy = -self.vy;
            self.y = self.y.clamp(r, HEIGHT - r);
        }

        self.hit_flash = self.hit_flash.saturating_sub(1);
    }

    /// True when `point` lies inside or on the disc.
    pub fn hit_test(&self, point: Point) -> bool {
        let r = self.radius as f32;
        self.center().distance_sq(point) <= r * r
    }

    /// Start the hit flash from full brightness.
    pub fn flash(&mut self) {
        self.hit_flash = FLASH_FRAMES;
    }
}

// ── Round state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// The entire state of one round.  Cloneable so the pure operations in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct RoundState {
    /// Live targets, oldest first.
    pub targets: Vec<Target>,
    /// Targets already shot, kept only while their flash fades.
    pub bursts: Vec<Target>,
    pub score: u32,
    pub shots: u32,
    pub hits: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    /// Time since the round started, as of the last frame advance.
    pub elapsed: Duration,
    pub status: GameStatus,
    pub settings: Settings,
}

impl RoundState {
    pub fn misses(&self) -> u32 {
        self.shots.saturating_sub(self.hits)
    }

    /// Hits per shot as a percentage; 0 before the first shot.
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f32 / self.shots as f32 * 100.0
        }
    }

    /// Whole seconds left on the round clock.
    pub fn time_left(&self) -> u64 {
        self.settings.round_secs.saturating_sub(self.elapsed.as_secs())
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

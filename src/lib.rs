//! Shooting Gallery - bouncing targets, a countdown and a crosshair in the terminal.
//!
//! Core modules:
//! - `entities`: pure data (targets, round state)
//! - `difficulty`: level-driven spawn interval and speed ramp
//! - `compute`: round operations as pure state transitions
//! - `render`: draw primitives and frame/HUD composition
//! - `display`: terminal implementation of the draw primitives
//! - `input`: crossterm event translation and dispatch

pub mod compute;
pub mod config;
pub mod difficulty;
pub mod display;
pub mod entities;
pub mod input;
pub mod logging;
pub mod render;
pub mod timer;

pub use config::Settings;

/// Fixed playfield geometry and palette.
pub mod consts {
    use crate::entities::Rgb;

    /// Logical playfield size. The terminal canvas scales it to whatever fits.
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Target radius range (inclusive)
    pub const TARGET_RADIUS_MIN: u32 = 14;
    pub const TARGET_RADIUS_MAX: u32 = 28;
    /// Base target speed range in units per frame, before the speed scale
    pub const TARGET_SPEED_MIN: f32 = 1.2;
    pub const TARGET_SPEED_MAX: f32 = 2.7;

    /// Frames a hit flash takes to fade out
    pub const FLASH_FRAMES: u32 = 8;

    pub const TARGET_PALETTE: [Rgb; 4] = [
        Rgb::new(255, 90, 90),
        Rgb::new(255, 190, 60),
        Rgb::new(60, 200, 255),
        Rgb::new(120, 255, 120),
    ];

    pub const BG_COLOR: Rgb = Rgb::new(20, 24, 28);
    pub const HUD_COLOR: Rgb = Rgb::new(173, 216, 230);
    pub const CROSSHAIR_COLOR: Rgb = Rgb::new(240, 240, 240);
    pub const TARGET_RIM_COLOR: Rgb = Rgb::new(0, 0, 0);
    pub const TARGET_EYE_COLOR: Rgb = Rgb::new(245, 245, 245);
    pub const FLASH_COLOR: Rgb = Rgb::new(255, 255, 255);
    /// Opacity of the game-over shade
    pub const SHADE_ALPHA: u8 = 140;
}

//! Frame composition.
//!
//! Everything here only reads game state and issues draw primitives against
//! a `Surface`; the terminal backend lives in `display`.

use crate::consts::{
    BG_COLOR, CROSSHAIR_COLOR, FLASH_COLOR, FLASH_FRAMES, HEIGHT, HUD_COLOR, SHADE_ALPHA,
    TARGET_EYE_COLOR, TARGET_RIM_COLOR, WIDTH,
};
use crate::entities::{Point, Rgb, RoundState, Target};

const CROSSHAIR_SIZE: f32 = 16.0;
const CROSSHAIR_THICKNESS: f32 = 2.0;
const HUD_ORIGIN: Point = Point::new(10.0, 10.0);

/// Horizontal anchoring for text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Draw primitives in logical playfield coordinates.  Later calls occlude
/// earlier ones.
pub trait Surface {
    /// Fill the whole surface.
    fn fill(&mut self, color: Rgb);
    /// Solid disc.
    fn circle(&mut self, center: Point, radius: f32, color: Rgb);
    /// Translucent ring `width` thick whose outer edge sits at `radius`.
    fn ring(&mut self, center: Point, radius: f32, width: f32, color: Rgb, alpha: u8);
    fn line(&mut self, from: Point, to: Point, width: f32, color: Rgb);
    /// Translucent full-surface overlay.
    fn shade(&mut self, color: Rgb, alpha: u8);
    /// One line of text; `at.y` is its top edge.
    fn text(&mut self, at: Point, align: Align, text: &str, color: Rgb);
}

impl Target {
    /// Rim, body and centre dot, then the fading hit flash if any.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let center = self.center();
        let r = self.radius as f32;
        surface.circle(center, r + 2.0, TARGET_RIM_COLOR);
        surface.circle(center, r, self.color);
        surface.circle(center, (self.radius / 4).max(3) as f32, TARGET_EYE_COLOR);
        self.render_flash(surface);
    }

    /// Just the flash ring, fading linearly over `FLASH_FRAMES`.
    pub fn render_flash<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.hit_flash == 0 {
            return;
        }
        let alpha = flash_alpha(self.hit_flash);
        surface.ring(self.center(), self.radius as f32 + 6.0, 4.0, FLASH_COLOR, alpha);
    }
}

/// Opacity of a flash with `frames_left` frames to go.
pub fn flash_alpha(frames_left: u32) -> u8 {
    (255 * frames_left.min(FLASH_FRAMES) / FLASH_FRAMES) as u8
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &RoundState, pointer: Point) {
    surface.fill(BG_COLOR);

    for target in &state.targets {
        target.render(surface);
    }
    for burst in &state.bursts {
        burst.render_flash(surface);
    }

    draw_crosshair(surface, pointer);
    draw_hud(surface, state);

    if state.is_over() {
        draw_game_over(surface, state);
    }
}

fn draw_crosshair<S: Surface + ?Sized>(surface: &mut S, at: Point) {
    let Point { x, y } = at;
    surface.line(
        Point::new(x - CROSSHAIR_SIZE, y),
        Point::new(x + CROSSHAIR_SIZE, y),
        CROSSHAIR_THICKNESS,
        CROSSHAIR_COLOR,
    );
    surface.line(
        Point::new(x, y - CROSSHAIR_SIZE),
        Point::new(x, y + CROSSHAIR_SIZE),
        CROSSHAIR_THICKNESS,
        CROSSHAIR_COLOR,
    );
    surface.ring(at, 3.0, 1.0, CROSSHAIR_COLOR, 255);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// The single status line shown while playing.
pub fn hud_line(state: &RoundState) -> String {
    format!(
        "Score: {}   Level: {}   Time: {}   Accuracy: {:.0}%",
        state.score,
        state.level,
        state.time_left(),
        state.accuracy()
    )
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, state: &RoundState) {
    surface.text(HUD_ORIGIN, Align::Left, &hud_line(state), HUD_COLOR);
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

/// Title, stats and hint lines of the game-over screen.
pub fn game_over_lines(state: &RoundState) -> [String; 3] {
    [
        "GAME OVER".to_string(),
        format!(
            "Score: {}   Shots: {}   Hits: {}   Accuracy: {:.1}%",
            state.score,
            state.shots,
            state.hits,
            state.accuracy()
        ),
        "R - Play Again   ESC - Quit".to_string(),
    ]
}

fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &RoundState) {
    surface.shade(Rgb::new(0, 0, 0), SHADE_ALPHA);

    let [title, stats, hint] = game_over_lines(state);
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    surface.text(Point::new(cx, cy - 80.0), Align::Center, &title, HUD_COLOR);
    surface.text(Point::new(cx, cy - 30.0), Align::Center, &stats, HUD_COLOR);
    surface.text(Point::new(cx, cy + 15.0), Align::Center, &hint, HUD_COLOR);
}

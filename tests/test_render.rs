use std::time::Duration;

use shooting_gallery::compute::{init_state, shoot, tick};
use shooting_gallery::consts::*;
use shooting_gallery::display::TerminalCanvas;
use shooting_gallery::entities::*;
use shooting_gallery::render::*;
use shooting_gallery::Settings;

/// Records primitive calls instead of drawing them.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Fill(Rgb),
    Circle(Point, f32, Rgb),
    Ring(Point, f32, u8),
    Line,
    Shade(u8),
    Text(Align, String),
}

impl Surface for Recorder {
    fn fill(&mut self, color: Rgb) {
        self.calls.push(Call::Fill(color));
    }
    fn circle(&mut self, center: Point, radius: f32, color: Rgb) {
        self.calls.push(Call::Circle(center, radius, color));
    }
    fn ring(&mut self, center: Point, radius: f32, _width: f32, _color: Rgb, alpha: u8) {
        self.calls.push(Call::Ring(center, radius, alpha));
    }
    fn line(&mut self, _from: Point, _to: Point, _width: f32, _color: Rgb) {
        self.calls.push(Call::Line);
    }
    fn shade(&mut self, _color: Rgb, alpha: u8) {
        self.calls.push(Call::Shade(alpha));
    }
    fn text(&mut self, _at: Point, align: Align, text: &str, _color: Rgb) {
        self.calls.push(Call::Text(align, text.to_string()));
    }
}

fn target(x: f32, y: f32, radius: u32) -> Target {
    Target {
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        radius,
        color: TARGET_PALETTE[3],
        hit_flash: 0,
    }
}

// ── Target::render ────────────────────────────────────────────────────────────

#[test]
fn target_draws_rim_body_and_eye() {
    let mut rec = Recorder::default();
    target(100.0, 100.0, 20).render(&mut rec);
    let c = Point::new(100.0, 100.0);
    assert_eq!(
        rec.calls,
        vec![
            Call::Circle(c, 22.0, TARGET_RIM_COLOR),
            Call::Circle(c, 20.0, TARGET_PALETTE[3]),
            Call::Circle(c, 5.0, TARGET_EYE_COLOR),
        ]
    );
}

#[test]
fn small_target_eye_has_minimum_size() {
    let mut rec = Recorder::default();
    target(100.0, 100.0, 8).render(&mut rec);
    assert_eq!(rec.calls[2], Call::Circle(Point::new(100.0, 100.0), 3.0, TARGET_EYE_COLOR));
}

#[test]
fn flash_ring_fades_linearly() {
    assert_eq!(flash_alpha(FLASH_FRAMES), 255);
    assert_eq!(flash_alpha(FLASH_FRAMES / 2), 127);
    assert_eq!(flash_alpha(0), 0);

    let mut rec = Recorder::default();
    let mut t = target(100.0, 100.0, 20);
    t.hit_flash = 4;
    t.render(&mut rec);
    assert_eq!(rec.calls.last(), Some(&Call::Ring(Point::new(100.0, 100.0), 26.0, 127)));
}

// ── draw_frame ────────────────────────────────────────────────────────────────

#[test]
fn frame_order_while_running() {
    let mut state = init_state(&Settings::default());
    state.targets.push(target(100.0, 100.0, 20));
    let mut rec = Recorder::default();
    draw_frame(&mut rec, &state, Point::center());

    assert_eq!(rec.calls[0], Call::Fill(BG_COLOR));
    assert!(matches!(rec.calls[1], Call::Circle(..)));
    // crosshair: two lines and a small ring, then the HUD
    assert_eq!(rec.calls[4], Call::Line);
    assert_eq!(rec.calls[5], Call::Line);
    assert!(matches!(rec.calls[6], Call::Ring(_, r, 255) if r == 3.0));
    assert!(matches!(rec.calls[7], Call::Text(Align::Left, _)));
    assert_eq!(rec.calls.len(), 8);
}

#[test]
fn frame_shows_bursts_as_flash_only() {
    let mut state = init_state(&Settings::default());
    state.targets.push(target(100.0, 100.0, 20));
    let state = shoot(&state, Point::new(100.0, 100.0));
    let mut rec = Recorder::default();
    draw_frame(&mut rec, &state, Point::center());

    assert!(!rec.calls.iter().any(|c| matches!(c, Call::Circle(..))));
    assert_eq!(rec.calls[1], Call::Ring(Point::new(100.0, 100.0), 26.0, 255));
}

#[test]
fn frame_adds_overlay_when_over() {
    let state = tick(&init_state(&Settings::default()), Duration::from_secs(60));
    let mut rec = Recorder::default();
    draw_frame(&mut rec, &state, Point::center());

    let shade_at = rec.calls.iter().position(|c| *c == Call::Shade(SHADE_ALPHA)).unwrap();
    let centred: Vec<_> = rec.calls[shade_at..]
        .iter()
        .filter(|c| matches!(c, Call::Text(Align::Center, _)))
        .collect();
    assert_eq!(centred.len(), 3);
}

#[test]
fn hud_line_reports_stats() {
    let mut state = init_state(&Settings::default());
    state.score = 7;
    state.shots = 9;
    state.hits = 7;
    state.level = 1;
    state.elapsed = Duration::from_millis(15_500);
    assert_eq!(
        hud_line(&state),
        "Score: 7   Level: 1   Time: 45   Accuracy: 78%"
    );
}

#[test]
fn hud_line_zero_accuracy_without_shots() {
    let state = init_state(&Settings::default());
    assert!(hud_line(&state).ends_with("Accuracy: 0%"));
}

#[test]
fn game_over_stats_one_decimal() {
    let mut state = init_state(&Settings::default());
    state.score = 2;
    state.shots = 3;
    state.hits = 2;
    let [title, stats, hint] = game_over_lines(&state);
    assert_eq!(title, "GAME OVER");
    assert_eq!(stats, "Score: 2   Shots: 3   Hits: 2   Accuracy: 66.7%");
    assert!(hint.contains("R"));
}

// ── TerminalCanvas ────────────────────────────────────────────────────────────

#[test]
fn canvas_fill_and_circle() {
    let mut canvas = TerminalCanvas::new(80, 24);
    canvas.fill(BG_COLOR);
    canvas.circle(Point::new(400.0, 300.0), 40.0, TARGET_PALETTE[0]);
    assert_eq!(canvas.pixel_at(Point::new(400.0, 300.0)), TARGET_PALETTE[0]);
    assert_eq!(canvas.pixel_at(Point::new(430.0, 300.0)), TARGET_PALETTE[0]);
    assert_eq!(canvas.pixel_at(Point::new(500.0, 300.0)), BG_COLOR);
    assert_eq!(canvas.pixel_at(Point::new(5.0, 5.0)), BG_COLOR);
}

#[test]
fn canvas_tiny_circle_still_visible() {
    let mut canvas = TerminalCanvas::new(80, 24);
    canvas.fill(BG_COLOR);
    canvas.circle(Point::new(401.0, 301.0), 1.0, TARGET_EYE_COLOR);
    assert_eq!(canvas.pixel_at(Point::new(401.0, 301.0)), TARGET_EYE_COLOR);
}

#[test]
fn canvas_text_left_and_centered() {
    let mut canvas = TerminalCanvas::new(80, 24);
    canvas.fill(BG_COLOR);
    canvas.text(Point::new(10.0, 10.0), Align::Left, "Score", HUD_COLOR);
    assert!(canvas.row_text(0).starts_with(" Score "));

    canvas.text(Point::new(400.0, 300.0), Align::Center, "ABCD", HUD_COLOR);
    let row = canvas.row_text(12);
    assert_eq!(row.find("ABCD"), Some(38));
}

#[test]
fn canvas_text_clipped_at_edge() {
    let mut canvas = TerminalCanvas::new(10, 5);
    canvas.text(Point::new(750.0, 0.0), Align::Left, "overflow", HUD_COLOR);
    assert_eq!(canvas.row_text(0), "         o");
}

#[test]
fn canvas_painting_hides_text() {
    let mut canvas = TerminalCanvas::new(80, 24);
    canvas.text(Point::new(0.0, 0.0), Align::Left, "XYZ", HUD_COLOR);
    canvas.circle(Point::new(5.0, 5.0), 1.0, TARGET_PALETTE[0]);
    assert_eq!(&canvas.row_text(0)[..3], " YZ");
}

#[test]
fn canvas_shade_darkens() {
    let mut canvas = TerminalCanvas::new(20, 10);
    canvas.fill(Rgb::new(200, 200, 200));
    canvas.shade(Rgb::new(0, 0, 0), SHADE_ALPHA);
    let p = canvas.pixel_at(Point::new(100.0, 100.0));
    assert!(p.r < 200 && p.r > 50);
}

#[test]
fn canvas_resize_keeps_mapping_in_bounds() {
    let mut canvas = TerminalCanvas::new(80, 24);
    canvas.resize(40, 12);
    assert_eq!(canvas.viewport().cols, 40);
    assert_eq!(canvas.viewport().rows, 12);
    canvas.fill(BG_COLOR);
    assert_eq!(canvas.pixel_at(Point::new(WIDTH, HEIGHT)), BG_COLOR);
}

#[test]
fn canvas_present_writes_every_cell() {
    let mut canvas = TerminalCanvas::new(4, 2);
    canvas.fill(BG_COLOR);
    let mut out: Vec<u8> = Vec::new();
    canvas.present(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches('▀').count(), 8);
}

#[test]
fn full_frame_renders_on_canvas() {
    let mut state = init_state(&Settings::default());
    state.targets.push(target(200.0, 200.0, 28));
    let mut canvas = TerminalCanvas::new(80, 24);
    draw_frame(&mut canvas, &state, Point::new(600.0, 450.0));
    assert_eq!(canvas.pixel_at(Point::new(200.0, 215.0)), TARGET_PALETTE[3]);
    assert_eq!(canvas.pixel_at(Point::new(600.0, 450.0)), CROSSHAIR_COLOR);
    assert!(canvas.row_text(0).contains("Score: 0"));
}

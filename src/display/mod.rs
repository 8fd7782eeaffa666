//! Rendering layer: all terminal I/O lives here.
//!
//! `TerminalCanvas` rasterises the logical playfield into a grid of
//! half-block pixels (two per cell, top and bottom) plus a text layer, and
//! `present` turns that into queued crossterm commands.  No game logic is
//! performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::consts::{HEIGHT, WIDTH};
use crate::entities::{Point, Rgb};
use crate::render::{Align, Surface};

const HALF_BLOCK: char = '▀';

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping between terminal cells and logical playfield coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Logical point at the centre of a cell.
    pub fn cell_to_point(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f32 + 0.5) * self.cell_width(),
            (row as f32 + 0.5) * self.cell_height(),
        )
    }

    pub fn cell_width(&self) -> f32 {
        WIDTH / self.cols as f32
    }

    pub fn cell_height(&self) -> f32 {
        HEIGHT / self.rows as f32
    }

    fn pixel_cols(&self) -> usize {
        self.cols as usize
    }

    fn pixel_rows(&self) -> usize {
        self.rows as usize * 2
    }

    /// Logical size of one half-block pixel.
    fn pixel_size(&self) -> (f32, f32) {
        (self.cell_width(), self.cell_height() / 2.0)
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glyph {
    ch: char,
    color: Rgb,
}

/// Off-screen frame for one terminal.
pub struct TerminalCanvas {
    viewport: Viewport,
    pixels: Vec<Rgb>,
    glyphs: Vec<Option<Glyph>>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let viewport = Viewport::new(cols, rows);
        Self {
            viewport,
            pixels: vec![Rgb::new(0, 0, 0); viewport.pixel_cols() * viewport.pixel_rows()],
            glyphs: vec![None; viewport.cols as usize * viewport.rows as usize],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Match a new terminal size; the contents are discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Colour of the pixel under a logical point.
    pub fn pixel_at(&self, at: Point) -> Rgb {
        let (pw, ph) = self.viewport.pixel_size();
        let px = ((at.x / pw).floor().max(0.0) as usize).min(self.viewport.pixel_cols() - 1);
        let py = ((at.y / ph).floor().max(0.0) as usize).min(self.viewport.pixel_rows() - 1);
        self.pixels[self.pixel_index(px, py)]
    }

    /// Text layer of one row, with blanks where no glyph is set.
    pub fn row_text(&self, row: u16) -> String {
        let cols = self.viewport.cols as usize;
        let start = row.min(self.viewport.rows - 1) as usize * cols;
        self.glyphs[start..start + cols]
            .iter()
            .map(|g| g.map_or(' ', |g| g.ch))
            .collect()
    }

    /// Write the whole frame to the terminal.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.viewport.cols as usize;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..self.viewport.rows {
            out.queue(cursor::MoveTo(0, row))?;
            for col in 0..cols {
                let top = self.pixels[self.pixel_index(col, row as usize * 2)];
                let bottom = self.pixels[self.pixel_index(col, row as usize * 2 + 1)];

                let (ch, want_fg, want_bg) = match self.glyphs[row as usize * cols + col] {
                    Some(glyph) => (glyph.ch, glyph.color, top.over(bottom, 128)),
                    None => (HALF_BLOCK, top, bottom),
                };
                if fg != Some(want_fg) {
                    out.queue(style::SetForegroundColor(to_color(want_fg)))?;
                    fg = Some(want_fg);
                }
                if bg != Some(want_bg) {
                    out.queue(style::SetBackgroundColor(to_color(want_bg)))?;
                    bg = Some(want_bg);
                }
                out.queue(Print(ch))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    fn pixel_index(&self, px: usize, py: usize) -> usize {
        py * self.viewport.pixel_cols() + px
    }

    /// Opaque write; hides any text in the cell.
    fn paint(&mut self, px: usize, py: usize, color: Rgb) {
        let index = self.pixel_index(px, py);
        self.pixels[index] = color;
        self.glyphs[(py / 2) * self.viewport.cols as usize + px] = None;
    }

    fn blend(&mut self, px: usize, py: usize, color: Rgb, alpha: u8) {
        let index = self.pixel_index(px, py);
        self.pixels[index] = color.over(self.pixels[index], alpha);
    }

    /// Inclusive pixel ranges covering a logical rectangle, clipped to the canvas.
    fn pixel_span(&self, min: Point, max: Point) -> Option<(Span, Span)> {
        let (pw, ph) = self.viewport.pixel_size();
        let xs = span(min.x / pw, max.x / pw, self.viewport.pixel_cols())?;
        let ys = span(min.y / ph, max.y / ph, self.viewport.pixel_rows())?;
        Some((xs, ys))
    }

    /// Logical centre of a pixel.
    fn pixel_center(&self, px: usize, py: usize) -> Point {
        let (pw, ph) = self.viewport.pixel_size();
        Point::new((px as f32 + 0.5) * pw, (py as f32 + 0.5) * ph)
    }

    /// Pixels whose centres fall within `inner..=outer` of `center`.
    fn annulus(&self, center: Point, inner: f32, outer: f32) -> Vec<(usize, usize)> {
        let min = Point::new(center.x - outer, center.y - outer);
        let max = Point::new(center.x + outer, center.y + outer);
        let Some((xs, ys)) = self.pixel_span(min, max) else {
            return Vec::new();
        };

        let inner_sq = inner.max(0.0).powi(2);
        let outer_sq = outer * outer;
        let mut hits = Vec::new();
        for py in ys.0..=ys.1 {
            for px in xs.0..=xs.1 {
                let d = self.pixel_center(px, py).distance_sq(center);
                if d >= inner_sq && d <= outer_sq {
                    hits.push((px, py));
                }
            }
        }
        hits
    }
}

type Span = (usize, usize);

fn span(lo: f32, hi: f32, len: usize) -> Option<Span> {
    if hi < 0.0 || lo >= len as f32 {
        return None;
    }
    let lo = lo.floor().max(0.0) as usize;
    let hi = (hi.floor().max(0.0) as usize).min(len - 1);
    Some((lo, hi))
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Surface for TerminalCanvas {
    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    fn circle(&mut self, center: Point, radius: f32, color: Rgb) {
        for (px, py) in self.annulus(center, 0.0, radius) {
            self.paint(px, py, color);
        }
        // Small discs still show up as at least their centre pixel.
        if let Some((xs, ys)) = self.pixel_span(center, center) {
            self.paint(xs.0, ys.0, color);
        }
    }

    fn ring(&mut self, center: Point, radius: f32, width: f32, color: Rgb, alpha: u8) {
        // Widen by half a pixel each way so thin rings survive the coarse grid.
        let (pw, ph) = self.viewport.pixel_size();
        let slack = pw.max(ph) / 2.0;
        for (px, py) in self.annulus(center, radius - width - slack, radius + slack) {
            self.blend(px, py, color, alpha);
        }
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Rgb) {
        let (pw, ph) = self.viewport.pixel_size();
        let step = pw.min(ph) / 2.0;
        let length = from.distance_sq(to).sqrt();
        let samples = (length / step).ceil() as usize + 1;
        let half = width / 2.0;

        for i in 0..samples {
            let t = if samples > 1 { i as f32 / (samples - 1) as f32 } else { 0.0 };
            let at = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            let min = Point::new(at.x - half, at.y - half);
            let max = Point::new(at.x + half, at.y + half);
            if let Some((xs, ys)) = self.pixel_span(min, max) {
                for py in ys.0..=ys.1 {
                    for px in xs.0..=xs.1 {
                        self.paint(px, py, color);
                    }
                }
            }
        }
    }

    fn shade(&mut self, color: Rgb, alpha: u8) {
        for pixel in &mut self.pixels {
            *pixel = color.over(*pixel, alpha);
        }
        for glyph in self.glyphs.iter_mut().flatten() {
            glyph.color = color.over(glyph.color, alpha);
        }
    }

    fn text(&mut self, at: Point, align: Align, text: &str, color: Rgb) {
        let cols = self.viewport.cols as i32;
        let row = (at.y / self.viewport.cell_height()).floor() as i32;
        if row < 0 || row >= self.viewport.rows as i32 {
            return;
        }

        let anchor = (at.x / self.viewport.cell_width()).floor() as i32;
        let start = match align {
            Align::Left => anchor,
            Align::Center => anchor - text.chars().count() as i32 / 2,
        };

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if (0..cols).contains(&col) {
                self.glyphs[(row * cols + col) as usize] = Some(Glyph { ch, color });
            }
        }
    }
}

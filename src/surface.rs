//! Off-screen raster the game draws into.
//!
//! The terminal is treated as a grid of coloured cells.  World coordinates
//! are "pixels": one cell covers `CELL_WIDTH` × `CELL_HEIGHT` world units, so
//! circles come out round despite tall terminal glyphs.  Colours are kept as
//! floats so repeated fading decays smoothly instead of snapping to zero.

use crate::entities::{Enemy, GameState, Particle, Player, Projectile, Rgb};

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Anything that can paint itself onto a `Surface` without changing state.
pub trait Draw {
    fn draw(&self, surface: &mut Surface);
}

#[derive(Clone, Debug)]
pub struct Surface {
    cols: u16,
    rows: u16,
    cells: Vec<[f32; 3]>,
}

impl Surface {
    /// A black surface of `cols` × `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Surface {
        Surface {
            cols,
            rows,
            cells: vec![[0.0; 3]; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Width and height in world units.
    pub fn world_size(&self) -> (f64, f64) {
        (self.cols as f64 * CELL_WIDTH, self.rows as f64 * CELL_HEIGHT)
    }

    /// World position of the centre of a cell (where a click lands).
    pub fn cell_center(col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * CELL_WIDTH,
            (row as f64 + 0.5) * CELL_HEIGHT,
        )
    }

    /// Colour of one cell, rounded to 8-bit channels.
    pub fn pixel(&self, col: u16, row: u16) -> Rgb {
        let [r, g, b] = self.cells[row as usize * self.cols as usize + col as usize];
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Rgb { r: channel(r), g: channel(g), b: channel(b) }
    }

    /// Paint translucent black over everything, leaving motion trails.
    pub fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            for channel in cell.iter_mut() {
                *channel *= keep;
            }
        }
    }

    /// Blend a filled circle onto every cell whose centre it covers.  The
    /// cell holding the circle's own centre is always painted, so circles
    /// smaller than a cell stay visible.
    pub fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        let (cols, rows) = (self.cols as i64, self.rows as i64);

        let first_col = (((x - radius) / CELL_WIDTH).floor() as i64).max(0);
        let last_col = (((x + radius) / CELL_WIDTH).floor() as i64).min(cols - 1);
        let first_row = (((y - radius) / CELL_HEIGHT).floor() as i64).max(0);
        let last_row = (((y + radius) / CELL_HEIGHT).floor() as i64).min(rows - 1);
        let home = ((x / CELL_WIDTH).floor() as i64, (y / CELL_HEIGHT).floor() as i64);

        let paint = [color.r as f32, color.g as f32, color.b as f32];
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let (cx, cy) = Surface::cell_center(col as u16, row as u16);
                if (cx - x).hypot(cy - y) > radius && (col, row) != home {
                    continue;
                }
                let cell = &mut self.cells[(row * cols + col) as usize];
                for (channel, target) in cell.iter_mut().zip(paint) {
                    *channel = *channel * (1.0 - alpha) + target * alpha;
                }
            }
        }
    }
}

// ── Entity drawing ───────────────────────────────────────────────────────────

impl Draw for Player {
    fn draw(&self, surface: &mut Surface) {
        surface.fill_circle(self.x, self.y, self.radius, self.color, 1.0);
    }
}

impl Draw for Projectile {
    fn draw(&self, surface: &mut Surface) {
        surface.fill_circle(self.x, self.y, self.radius, self.color, 1.0);
    }
}

impl Draw for Enemy {
    fn draw(&self, surface: &mut Surface) {
        surface.fill_circle(self.x, self.y, self.radius, self.color, 1.0);
    }
}

impl Draw for Particle {
    fn draw(&self, surface: &mut Surface) {
        let alpha = self.alpha.clamp(0.0, 1.0) as f32;
        surface.fill_circle(self.x, self.y, self.radius, self.color, alpha);
    }
}

/// Fade the previous frame and draw every entity on top.
pub fn paint_frame(surface: &mut Surface, state: &GameState, fade_alpha: f32) {
    surface.fade(fade_alpha);
    state.player.draw(surface);
    for projectile in &state.projectiles {
        projectile.draw(surface);
    }
    for enemy in &state.enemies {
        enemy.draw(surface);
    }
    for particle in &state.particles {
        particle.draw(surface);
    }
}

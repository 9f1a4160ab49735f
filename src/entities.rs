//! Entity records and their one-frame integration.
//!
//! Drawing lives in `surface`; collision, spawning and pruning live in
//! `compute` and `spawner`.

use crate::config::Gameplay;

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Velocity multiplier applied to particles every frame.
pub const FRICTION: f64 = 0.99;
/// Opacity lost by a particle every frame (≈200 frames of life).
pub const ALPHA_DECAY: f64 = 0.005;
/// Frames a shrink animation takes (half a second at 60 FPS).
pub const SHRINK_FRAMES: u32 = 30;

// ── Colour ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Convert an HSL triple (hue in degrees, saturation and lightness in
    /// 0..=1) to RGB.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Rgb {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb { r: channel(r), g: channel(g), b: channel(b) }
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Per-frame displacement.  Not scaled by elapsed time, so speed is tied to
/// the frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    /// `magnitude` units along `angle` (radians).
    pub fn from_angle(angle: f64, magnitude: f64) -> Velocity {
        Velocity {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }
}

/// An eased radius animation owned by the enemy it shrinks.
///
/// Advanced once per frame; dropping the enemy abandons it.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTween {
    pub from: f64,
    pub to: f64,
    pub frames: u32,
    pub elapsed: u32,
}

impl RadiusTween {
    pub fn new(from: f64, to: f64, frames: u32) -> RadiusTween {
        RadiusTween { from, to, frames: frames.max(1), elapsed: 0 }
    }

    /// Step one frame and return the eased radius for it.
    pub fn advance(&mut self) -> f64 {
        self.elapsed = (self.elapsed + 1).min(self.frames);
        let t = self.elapsed as f64 / self.frames as f64;
        // quadratic ease-out
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.frames
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Sits in the middle of the screen and never moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Velocity,
}

impl Projectile {
    pub fn update(&mut self) {
        self.x += self.velocity.x;
        self.y += self.velocity.y;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    /// Unit vector toward where the player was at spawn time.
    pub velocity: Velocity,
    /// In-flight shrink animation, if the enemy was recently hit.
    pub shrink: Option<RadiusTween>,
}

impl Enemy {
    pub fn update(&mut self) {
        self.x += self.velocity.x;
        self.y += self.velocity.y;

        if let Some(tween) = self.shrink.as_mut() {
            self.radius = tween.advance().max(0.0);
            if tween.is_finished() {
                self.shrink = None;
            }
        }
    }

    /// Start animating toward `target`, replacing any animation in flight.
    pub fn shrink_to(&mut self, target: f64) {
        self.shrink = Some(RadiusTween::new(self.radius, target.max(0.0), SHRINK_FRAMES));
    }
}

/// A fading fragment of an exploded enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Velocity,
    /// Opacity, starts at 1.0.
    pub alpha: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, radius: f64, color: Rgb, velocity: Velocity) -> Particle {
        Particle { x, y, radius, color, velocity, alpha: 1.0 }
    }

    pub fn update(&mut self) {
        self.velocity.x *= FRICTION;
        self.velocity.y *= FRICTION;
        self.x += self.velocity.x;
        self.y += self.velocity.y;
        self.alpha -= ALPHA_DECAY;
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Only reachable when the player is not invulnerable.
    GameOver,
}

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub gameplay: Gameplay,
    pub status: GameStatus,
    pub frame: u64,
    /// World size in surface units, fixed at start-up.
    pub width: f64,
    pub height: f64,
}

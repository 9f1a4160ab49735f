//! Enemy spawning: a wall-clock interval timer and the pure spawn step.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::entities::{Enemy, GameState, Rgb, Velocity};

pub const MIN_ENEMY_RADIUS: f64 = 6.0;
pub const MAX_ENEMY_RADIUS: f64 = 30.0;

/// Counts wall-clock time between frames and reports due spawns.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    accumulated: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration) -> SpawnTimer {
        SpawnTimer {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many whole intervals have completed.
    /// The remainder carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }
}

/// Add one enemy just outside a random edge, heading for the player.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let radius = rng.gen_range(MIN_ENEMY_RADIUS..MAX_ENEMY_RADIUS);

    // Left/right pair or top/bottom pair, then one side of the pair.
    let (x, y) = if rng.gen_bool(0.5) {
        let x = if rng.gen_bool(0.5) { -radius } else { state.width + radius };
        (x, rng.gen::<f64>() * state.height)
    } else {
        let y = if rng.gen_bool(0.5) { -radius } else { state.height + radius };
        (rng.gen::<f64>() * state.width, y)
    };

    let angle = (state.player.y - y).atan2(state.player.x - x);
    let hue = rng.gen::<f64>() * 359.0;
    debug!(x, y, radius, hue, "spawning enemy");

    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x,
        y,
        radius,
        color: Rgb::from_hsl(hue, 0.5, 0.5),
        velocity: Velocity::from_angle(angle, 1.0),
        shrink: None,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

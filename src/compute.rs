//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::config::Gameplay;
use crate::entities::{
    Enemy, GameState, GameStatus, Particle, Player, Projectile, Rgb, Velocity,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const PLAYER_RADIUS: f64 = 10.0;
pub const PROJECTILE_RADIUS: f64 = 4.0;
pub const PROJECTILE_SPEED: f64 = 6.0;
/// Particle velocity components are uniform in ±PARTICLE_SPEED/2.
pub const PARTICLE_SPEED: f64 = 4.0;
pub const PARTICLE_MAX_RADIUS: f64 = 3.0;
/// Radius removed from an enemy by one hit.
pub const SHRINK_STEP: f64 = 10.0;
/// An enemy only survives a hit if its shrunk radius stays above this.
pub const MIN_SURVIVING_RADIUS: f64 = 5.0;
/// Extra slack in the collision test: circles "touch" within one unit.
pub const CONTACT_TOLERANCE: f64 = 1.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a surface of the given world size.
pub fn init_state(width: f64, height: f64, gameplay: Gameplay) -> GameState {
    GameState {
        player: Player {
            x: width / 2.0,
            y: height / 2.0,
            radius: PLAYER_RADIUS,
            color: Rgb::WHITE,
        },
        projectiles: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        gameplay,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// True once a circle's centre is more than `radius` past any edge.
pub fn is_off_canvas(x: f64, y: f64, radius: f64, width: f64, height: f64) -> bool {
    x < -radius || x > width + radius || y < -radius || y > height + radius
}

/// Circle contact test with a one-unit tolerance.
pub fn colliding(ax: f64, ay: f64, ar: f64, bx: f64, by: f64, br: f64) -> bool {
    (ax - bx).hypot(ay - by) - ar - br < CONTACT_TOLERANCE
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a projectile from the player toward `(x, y)` in world units.
///
/// Aiming at the player's own centre gives a projectile that never moves.
pub fn fire_projectile(state: &GameState, x: f64, y: f64) -> GameState {
    if state.projectiles.len() >= state.gameplay.max_projectiles {
        warn!(
            max = state.gameplay.max_projectiles,
            "projectile cap reached, click ignored"
        );
        return state.clone();
    }

    let dx = x - state.player.x;
    let dy = y - state.player.y;
    let velocity = if dx == 0.0 && dy == 0.0 {
        Velocity::default()
    } else {
        Velocity::from_angle(dy.atan2(dx), PROJECTILE_SPEED)
    };

    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        x: state.player.x,
        y: state.player.y,
        radius: PROJECTILE_RADIUS,
        color: Rgb::WHITE,
        velocity,
    });
    GameState {
        projectiles,
        ..state.clone()
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

/// Burst `floor(radius * 1.5)` particles out of `enemy`, limited so the
/// collection never exceeds `max_particles`.  Returns how many were added.
pub fn explode(
    particles: &mut Vec<Particle>,
    enemy: &Enemy,
    max_particles: usize,
    rng: &mut impl Rng,
) -> usize {
    let wanted = (enemy.radius * 1.5).floor() as usize;
    let count = wanted.min(max_particles.saturating_sub(particles.len()));
    if count < wanted {
        warn!(wanted, count, max_particles, "particle cap reached");
    }

    for _ in 0..count {
        let velocity = Velocity {
            x: (rng.gen::<f64>() - 0.5) * PARTICLE_SPEED,
            y: (rng.gen::<f64>() - 0.5) * PARTICLE_SPEED,
        };
        let radius = rng.gen::<f64>() * PARTICLE_MAX_RADIUS;
        particles.push(Particle::new(enemy.x, enemy.y, radius, enemy.color, velocity));
    }
    count
}

// ── Per-frame step ──────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Nothing is removed while a collection is being walked: removals are
/// recorded as flags and survivors are collected once every pass is done.
/// A `GameOver` state is returned unchanged.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let frame = state.frame + 1;
    let (width, height) = (state.width, state.height);
    let gameplay = state.gameplay;
    let player = &state.player;

    // ── 1. Projectiles: flag strays, then move everything ───────────────────
    let mut projectiles = state.projectiles.clone();
    let stray: Vec<bool> = projectiles
        .iter()
        .map(|p| is_off_canvas(p.x, p.y, p.radius, width, height))
        .collect();
    for projectile in projectiles.iter_mut() {
        projectile.update();
    }
    let mut consumed = vec![false; projectiles.len()];

    // ── 2. Enemies: strays, player contact, impacts, motion ─────────────────
    let mut enemies = state.enemies.clone();
    let mut enemy_gone = vec![false; enemies.len()];
    let mut particles = state.particles.clone();
    let mut status = GameStatus::Playing;

    for (ei, enemy) in enemies.iter_mut().enumerate() {
        if is_off_canvas(enemy.x, enemy.y, enemy.radius, width, height) {
            enemy_gone[ei] = true;
        }

        if colliding(player.x, player.y, player.radius, enemy.x, enemy.y, enemy.radius) {
            if gameplay.player_invulnerable {
                trace!(frame, x = enemy.x, y = enemy.y, "enemy touching player");
            } else if status == GameStatus::Playing {
                info!(frame, "player hit, game over");
                status = GameStatus::GameOver;
            }
        }

        for (pi, projectile) in projectiles.iter().enumerate() {
            // Strays flagged above can still land a hit this frame.
            if consumed[pi] {
                continue;
            }
            if !colliding(
                projectile.x,
                projectile.y,
                projectile.radius,
                enemy.x,
                enemy.y,
                enemy.radius,
            ) {
                continue;
            }

            if gameplay.particles {
                explode(&mut particles, enemy, gameplay.max_particles, rng);
            }
            consumed[pi] = true;

            if enemy.radius - SHRINK_STEP > MIN_SURVIVING_RADIUS {
                debug!(frame, radius = enemy.radius, "enemy hit, shrinking");
                enemy.shrink_to(enemy.radius - SHRINK_STEP);
            } else {
                debug!(frame, radius = enemy.radius, "enemy destroyed");
                enemy_gone[ei] = true;
                break;
            }
        }

        enemy.update();
    }

    // ── 3. Particles: drop the faded, move the rest ─────────────────────────
    let particles: Vec<Particle> = particles
        .into_iter()
        .filter(|p| !p.is_expired())
        .map(|mut p| {
            p.update();
            p
        })
        .collect();

    // ── 4. Survivors ─────────────────────────────────────────────────────────
    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .zip(stray.into_iter().zip(consumed))
        .filter(|(_, (stray, consumed))| !stray && !consumed)
        .map(|(p, _)| p)
        .collect();
    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .zip(enemy_gone)
        .filter(|(_, gone)| !gone)
        .map(|(e, _)| e)
        .collect();

    trace!(
        frame,
        projectiles = projectiles.len(),
        enemies = enemies.len(),
        particles = particles.len(),
        "frame done"
    );

    GameState {
        projectiles,
        enemies,
        particles,
        status,
        frame,
        ..state.clone()
    }
}

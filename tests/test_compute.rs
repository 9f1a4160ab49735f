use swarm_shooter::compute::*;
use swarm_shooter::config::Gameplay;
use swarm_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const W: f64 = 800.0;
const H: f64 = 600.0;

fn make_state() -> GameState {
    init_state(W, H, Gameplay::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f64, y: f64, radius: f64) -> Enemy {
    Enemy {
        x,
        y,
        radius,
        color: Rgb::from_hsl(200.0, 0.5, 0.5),
        velocity: Velocity { x: -1.0, y: 0.0 },
        shrink: None,
    }
}

fn resting_projectile(x: f64, y: f64) -> Projectile {
    Projectile {
        x,
        y,
        radius: PROJECTILE_RADIUS,
        color: Rgb::WHITE,
        velocity: Velocity::default(),
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_centres_player() {
    let s = make_state();
    assert_eq!((s.player.x, s.player.y), (400.0, 300.0));
    assert_eq!(s.player.radius, PLAYER_RADIUS);
    assert_eq!(s.player.color, Rgb::WHITE);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.projectiles.is_empty());
    assert!(s.enemies.is_empty());
    assert!(s.particles.is_empty());
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!((s.width, s.height), (W, H));
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn off_canvas_only_past_radius() {
    let r = 5.0;
    // exactly radius outside: still on
    assert!(!is_off_canvas(-5.0, 300.0, r, W, H));
    assert!(!is_off_canvas(805.0, 300.0, r, W, H));
    assert!(!is_off_canvas(400.0, -5.0, r, W, H));
    assert!(!is_off_canvas(400.0, 605.0, r, W, H));
    // a hair further: off
    assert!(is_off_canvas(-5.01, 300.0, r, W, H));
    assert!(is_off_canvas(805.01, 300.0, r, W, H));
    assert!(is_off_canvas(400.0, -5.01, r, W, H));
    assert!(is_off_canvas(400.0, 605.01, r, W, H));
}

#[test]
fn collision_boundary_cases() {
    // r1 + r2 + 1 apart: not touching
    assert!(!colliding(0.0, 0.0, 4.0, 15.0, 0.0, 10.0));
    // r1 + r2 apart: touching
    assert!(colliding(0.0, 0.0, 4.0, 14.0, 0.0, 10.0));
    // diagonal: 3-4-5 triangle scaled, distance 25 vs radii 12 + 12
    assert!(!colliding(0.0, 0.0, 12.0, 15.0, 20.0, 12.0));
    assert!(colliding(0.0, 0.0, 12.5, 15.0, 20.0, 12.0));
}

// ── fire_projectile ───────────────────────────────────────────────────────────

#[test]
fn fire_aims_at_click_with_fixed_speed() {
    let s = make_state();
    let s2 = fire_projectile(&s, 500.0, 300.0);
    assert_eq!(s2.projectiles.len(), 1);
    let p = &s2.projectiles[0];
    assert_eq!((p.x, p.y), (400.0, 300.0));
    assert_eq!(p.radius, PROJECTILE_RADIUS);
    assert!((p.velocity.x - PROJECTILE_SPEED).abs() < 1e-9);
    assert!(p.velocity.y.abs() < 1e-9);

    let s3 = fire_projectile(&s, 400.0 - 30.0, 300.0 + 40.0);
    let v = s3.projectiles[0].velocity;
    assert!((v.x.hypot(v.y) - PROJECTILE_SPEED).abs() < 1e-9);
    assert!((v.x - -3.6).abs() < 1e-9);
    assert!((v.y - 4.8).abs() < 1e-9);
}

#[test]
fn fire_at_player_centre_gives_zero_velocity() {
    let s = make_state();
    let s2 = fire_projectile(&s, 400.0, 300.0);
    assert_eq!(s2.projectiles[0].velocity, Velocity { x: 0.0, y: 0.0 });
}

#[test]
fn fire_does_not_mutate_original() {
    let s = make_state();
    let _s2 = fire_projectile(&s, 0.0, 0.0);
    assert!(s.projectiles.is_empty());
}

#[test]
fn fire_respects_projectile_cap() {
    let mut s = make_state();
    s.gameplay.max_projectiles = 2;
    let s = fire_projectile(&s, 0.0, 0.0);
    let s = fire_projectile(&s, 0.0, 0.0);
    let s = fire_projectile(&s, 0.0, 0.0);
    assert_eq!(s.projectiles.len(), 2);
}

// ── explode ───────────────────────────────────────────────────────────────────

#[test]
fn explode_bursts_from_enemy_centre() {
    let mut rng = seeded_rng();
    let e = enemy_at(120.0, 80.0, 25.0);
    let mut particles = Vec::new();
    let added = explode(&mut particles, &e, 2000, &mut rng);

    assert_eq!(added, 37);
    assert_eq!(particles.len(), 37);
    for p in &particles {
        assert_eq!((p.x, p.y), (120.0, 80.0));
        assert_eq!(p.color, e.color);
        assert_eq!(p.alpha, 1.0);
        assert!(p.radius >= 0.0 && p.radius < PARTICLE_MAX_RADIUS);
        assert!(p.velocity.x.abs() <= PARTICLE_SPEED / 2.0);
        assert!(p.velocity.y.abs() <= PARTICLE_SPEED / 2.0);
    }
}

#[test]
fn explode_stops_at_particle_cap() {
    let mut rng = seeded_rng();
    let e = enemy_at(0.0, 0.0, 20.0);
    let mut particles = Vec::new();
    assert_eq!(explode(&mut particles, &e, 10, &mut rng), 10);
    assert_eq!(explode(&mut particles, &e, 10, &mut rng), 0);
    assert_eq!(particles.len(), 10);
}

// ── tick: motion & pruning ────────────────────────────────────────────────────

#[test]
fn tick_moves_projectiles_linearly() {
    let mut rng = seeded_rng();
    let mut s = fire_projectile(&make_state(), 500.0, 300.0);
    for n in 1..=10 {
        s = tick(&s, &mut rng);
        let p = &s.projectiles[0];
        assert!((p.x - (400.0 + PROJECTILE_SPEED * n as f64)).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }
}

#[test]
fn tick_prunes_projectile_past_edge() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.projectiles.push(resting_projectile(W + PROJECTILE_RADIUS + 0.5, 100.0));
    s.projectiles.push(resting_projectile(W + PROJECTILE_RADIUS, 100.0));
    let s2 = tick(&s, &mut rng);
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.projectiles[0].x, W + PROJECTILE_RADIUS);
}

#[test]
fn tick_prunes_enemy_past_edge() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(-30.0, 100.0, 20.0)); // 10 units too far
    s.enemies.push(enemy_at(-20.0, 100.0, 20.0)); // exactly on the limit
    let s2 = tick(&s, &mut rng);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, -21.0);
}

#[test]
fn tick_increments_frame_and_leaves_input_alone() {
    let mut rng = seeded_rng();
    let s = fire_projectile(&make_state(), 0.0, 0.0);
    let s2 = tick(&s, &mut rng);
    assert_eq!(s2.frame, 1);
    assert_eq!(s.frame, 0);
    assert_eq!((s.projectiles[0].x, s.projectiles[0].y), (400.0, 300.0));
}

#[test]
fn tick_updates_particles_once_per_frame() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.particles.push(Particle::new(10.0, 10.0, 1.0, Rgb::WHITE, Velocity { x: 1.0, y: 0.0 }));
    // several enemies must not speed particles up
    for i in 0..3 {
        s.enemies.push(enemy_at(100.0 + 50.0 * i as f64, 500.0, 10.0));
    }
    let s2 = tick(&s, &mut rng);
    let p = &s2.particles[0];
    assert!((p.alpha - (1.0 - ALPHA_DECAY)).abs() < 1e-12);
    assert_eq!(p.x, 10.0 + FRICTION);
}

#[test]
fn tick_drops_faded_particles() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let mut faded = Particle::new(10.0, 10.0, 1.0, Rgb::WHITE, Velocity::default());
    faded.alpha = 0.0;
    let mut nearly = faded.clone();
    nearly.alpha = 0.004;
    s.particles.push(faded);
    s.particles.push(nearly);

    let s2 = tick(&s, &mut rng);
    assert_eq!(s2.particles.len(), 1, "alpha 0 is removed, 0.004 still drawn");
    assert!(s2.particles[0].alpha < 0.0);

    let s3 = tick(&s2, &mut rng);
    assert!(s3.particles.is_empty());
}

// ── tick: impacts ─────────────────────────────────────────────────────────────

#[test]
fn large_enemy_shrinks_and_survives() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 25.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));

    let s = tick(&s, &mut rng);
    assert!(s.projectiles.is_empty(), "projectile consumed");
    assert_eq!(s.enemies.len(), 1, "enemy survives");
    assert_eq!(s.particles.len(), 37);
    for p in &s.particles {
        // one friction step has been applied since the burst
        assert!((p.x - p.velocity.x - 600.0).abs() < 1e-9);
        assert!((p.y - p.velocity.y - 300.0).abs() < 1e-9);
        assert_eq!(p.color, s.enemies[0].color);
    }

    let mut s = s;
    for _ in 1..SHRINK_FRAMES {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.enemies[0].radius, 15.0);
    assert!(s.enemies[0].shrink.is_none());
}

#[test]
fn small_enemy_is_destroyed_with_projectile() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 12.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));

    let s = tick(&s, &mut rng);
    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.particles.len(), 18);
}

#[test]
fn exactly_fifteen_radius_is_destroyed() {
    // 15 - 10 = 5 is not > 5
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 15.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));
    let s = tick(&s, &mut rng);
    assert!(s.enemies.is_empty());
}

#[test]
fn no_particles_when_effects_disabled() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.gameplay.particles = false;
    s.enemies.push(enemy_at(600.0, 300.0, 25.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));
    let s = tick(&s, &mut rng);
    assert!(s.particles.is_empty());
    assert!(s.projectiles.is_empty());
    assert!(s.enemies[0].shrink.is_some());
}

#[test]
fn projectile_is_spent_on_first_enemy_it_hits() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 12.0));
    s.enemies.push(enemy_at(605.0, 300.0, 12.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));

    let s = tick(&s, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].x, 604.0);
}

#[test]
fn dead_enemy_leaves_other_projectiles_alone() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 12.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));
    s.projectiles.push(resting_projectile(602.0, 300.0));

    let s = tick(&s, &mut rng);
    assert!(s.enemies.is_empty());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles[0].x, 602.0);
}

#[test]
fn removal_mid_pass_skips_nobody() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, 10.0));
    s.enemies.push(enemy_at(600.0, 300.0, 10.0)); // will be destroyed
    s.enemies.push(enemy_at(200.0, 500.0, 10.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));

    let s = tick(&s, &mut rng);
    let xs: Vec<f64> = s.enemies.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![99.0, 199.0], "both neighbours moved exactly once");
}

#[test]
fn shrinking_enemy_can_leave_screen() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let mut e = enemy_at(-20.5, 100.0, 20.0);
    e.shrink_to(10.0);
    s.enemies.push(e);
    let s = tick(&s, &mut rng);
    assert!(s.enemies.is_empty());
}

// ── tick: player contact ──────────────────────────────────────────────────────

#[test]
fn invulnerable_player_ignores_contact() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(410.0, 300.0, 10.0));
    let s = tick(&s, &mut rng);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn vulnerable_player_contact_ends_game() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.gameplay.player_invulnerable = false;
    s.enemies.push(enemy_at(410.0, 300.0, 10.0));

    let over = tick(&s, &mut rng);
    assert_eq!(over.status, GameStatus::GameOver);

    // Nothing advances once the game is over.
    let after = tick(&over, &mut rng);
    assert_eq!(after.frame, over.frame);
    assert_eq!(after.enemies[0].x, over.enemies[0].x);
}

#[test]
fn same_seed_same_outcome() {
    let mut s = make_state();
    s.enemies.push(enemy_at(600.0, 300.0, 25.0));
    s.projectiles.push(resting_projectile(600.0, 300.0));

    let a = tick(&s, &mut seeded_rng());
    let b = tick(&s, &mut seeded_rng());
    assert_eq!(a.particles, b.particles);
}

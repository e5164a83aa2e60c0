use gun_runner::bullet;
use gun_runner::compute::config_for;
use gun_runner::enemy;
use gun_runner::entities::{
    Body, Bullet, Difficulty, Enemy, EnemyKind, GameConfig, Player,
};
use gun_runner::level::TileGrid;
use gun_runner::tuning::{
    BOSS_HP, ENEMY_JUMP_COOLDOWN, PLAYER_IFRAMES, SLASH_COOLDOWN,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 0.016;

fn flat_grid() -> TileGrid {
    gun_runner::level::generate(&config_for(Difficulty::Normal), &mut StdRng::seed_from_u64(1))
}

fn cfg() -> GameConfig {
    config_for(Difficulty::Normal)
}

/// Player standing on the flat ground (feet at y=480).
fn player_at(x: f32) -> Player {
    Player {
        body: Body {
            x,
            y: 438.0,
            w: 28.0,
            h: 42.0,
            vx: 0.0,
            vy: 0.0,
            on_ground: true,
            facing: 1.0,
        },
        hp: 3,
        invuln: 0.0,
        last_shot_at: f32::NEG_INFINITY,
        coyote: 0.0,
        jump_buffer_until: f32::NEG_INFINITY,
        last_jump_press: f32::NEG_INFINITY,
        jump_cut: false,
    }
}

/// Sword soldier standing on the flat ground (feet at y=480).
fn sword_at(x: f32) -> Enemy {
    Enemy {
        kind: EnemyKind::Sword,
        body: Body {
            x,
            y: 440.0,
            w: 26.0,
            h: 40.0,
            vx: 0.0,
            vy: 0.0,
            on_ground: true,
            facing: -1.0,
        },
        alive: true,
        slash_cd: 0.0,
        jump_cd: 0.0,
        hp: None,
    }
}

fn boss_at(x: f32) -> Enemy {
    Enemy {
        kind: EnemyKind::Boss,
        body: Body {
            x,
            y: 400.0,
            w: 64.0,
            h: 80.0,
            vx: 0.0,
            vy: 0.0,
            on_ground: true,
            facing: -1.0,
        },
        alive: true,
        slash_cd: 0.0,
        jump_cd: 0.0,
        hp: Some(BOSS_HP),
    }
}

fn bullet_at(x: f32, y: f32, vx: f32) -> Bullet {
    Bullet { x, y, w: 10.0, h: 3.0, vx, age: 0.0, dead: false }
}

// ── Bullet spawning ───────────────────────────────────────────────────────────

#[test]
fn spawn_right_puts_muzzle_at_front_edge() {
    let p = player_at(100.0);
    let b = bullet::spawn(&p.body, 1.0);
    assert_eq!(b.x, 100.0 + 28.0 - 6.0);
    assert_eq!(b.y, 438.0 + 18.0);
    assert_eq!(b.vx, 800.0);
    assert!(!b.dead);
}

#[test]
fn spawn_left_mirrors_muzzle_and_speed() {
    let p = player_at(100.0);
    let b = bullet::spawn(&p.body, -1.0);
    assert_eq!(b.x, 106.0);
    assert_eq!(b.vx, -800.0);
}

// ── Bullet flight & expiry ────────────────────────────────────────────────────

#[test]
fn bullet_age_and_position_advance() {
    let grid = flat_grid();
    let mut bullets = vec![bullet_at(500.0, 300.0, 800.0)];
    let mut enemies: Vec<Enemy> = Vec::new();
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!((bullets[0].age - DT).abs() < 1e-6);
    assert!((bullets[0].x - (500.0 + 800.0 * DT)).abs() < 1e-3);
    assert!(!bullets[0].dead);
}

#[test]
fn bullet_dies_inside_tile() {
    let grid = flat_grid();
    // y=500 is inside the ground rows
    let mut bullets = vec![bullet_at(500.0, 500.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut Vec::new(), DT);
    assert!(bullets[0].dead);
}

#[test]
fn bullet_dies_when_lifetime_expires() {
    let grid = flat_grid();
    let mut bullets = vec![bullet_at(500.0, 300.0, 800.0)];
    bullets[0].age = 1.39;
    // 1.39 + 0.02 crosses the 1.4 s lifetime
    bullet::advance(&grid, &mut bullets, &mut Vec::new(), 0.02);
    assert!(bullets[0].dead);
}

#[test]
fn bullet_dies_at_world_edge() {
    let grid = flat_grid();
    // The out-of-range boundary counts as solid, so the bullet stops there
    let mut bullets = vec![bullet_at(grid.world_w() - 5.0, 300.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut Vec::new(), 0.1);
    assert!(bullets[0].dead);
}

// ── Bullet vs enemy ───────────────────────────────────────────────────────────

#[test]
fn sword_soldier_dies_to_one_bullet_same_call() {
    let grid = flat_grid();
    let mut enemies = vec![sword_at(300.0)];
    let mut bullets = vec![bullet_at(290.0, 460.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!(!enemies[0].alive);
    assert!(bullets[0].dead);
}

#[test]
fn bullet_resolves_against_first_enemy_only() {
    let grid = flat_grid();
    // Two overlapping soldiers; roster order decides who takes the hit
    let mut enemies = vec![sword_at(300.0), sword_at(310.0)];
    let mut bullets = vec![bullet_at(295.0, 460.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!(!enemies[0].alive);
    assert!(enemies[1].alive);
    assert!(bullets[0].dead);
}

#[test]
fn boss_loses_fixed_hit_points_per_bullet() {
    let grid = flat_grid();
    let mut enemies = vec![boss_at(300.0)];
    let mut bullets = vec![bullet_at(290.0, 450.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!(enemies[0].alive);
    assert_eq!(enemies[0].hp, Some(BOSS_HP - 3));
    assert!(bullets[0].dead);
}

#[test]
fn boss_dies_when_hit_points_run_out() {
    let grid = flat_grid();
    let mut enemies = vec![boss_at(300.0)];
    enemies[0].hp = Some(3);
    let mut bullets = vec![bullet_at(290.0, 450.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!(!enemies[0].alive);
}

#[test]
fn bullets_pass_through_dead_enemies() {
    let grid = flat_grid();
    let mut enemies = vec![sword_at(300.0)];
    enemies[0].alive = false;
    let mut bullets = vec![bullet_at(290.0, 460.0, 800.0)];
    bullet::advance(&grid, &mut bullets, &mut enemies, DT);
    assert!(!bullets[0].dead);
}

// ── Chase AI ──────────────────────────────────────────────────────────────────

#[test]
fn sword_chases_player_inside_aggro_radius() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    let mut e = sword_at(400.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(e.body.vx, -90.0);
    assert_eq!(e.body.facing, -1.0);
}

#[test]
fn sword_faces_and_moves_right_when_player_is_right() {
    let grid = flat_grid();
    let mut player = player_at(700.0);
    let mut e = sword_at(400.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(e.body.vx, 90.0);
    assert_eq!(e.body.facing, 1.0);
}

#[test]
fn sword_idles_outside_aggro_radius() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    let mut e = sword_at(1000.0); // 700 px away, radius is 600
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(e.body.vx, 0.0);
}

#[test]
fn boss_is_stationary_by_default() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    let mut e = boss_at(400.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(e.body.vx, 0.0);
}

#[test]
fn boss_chases_when_configured() {
    let grid = flat_grid();
    let mut config = cfg();
    config.boss_chases = true;
    config.enemy_speed = 90.0;
    let mut player = player_at(300.0);
    let mut e = boss_at(400.0);
    enemy::update(&mut e, &grid, &mut player, &config, DT);
    assert_eq!(e.body.vx, -90.0);
}

// ── Melee slash ───────────────────────────────────────────────────────────────

#[test]
fn adjacent_slash_costs_one_hp_and_grants_iframes() {
    let grid = flat_grid();
    // Centres 29 px apart horizontally, 2 px vertically: in range
    let mut player = player_at(300.0);
    let mut e = sword_at(330.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.hp, 2);
    assert_eq!(player.invuln, PLAYER_IFRAMES);
    assert_eq!(e.slash_cd, SLASH_COOLDOWN);
}

#[test]
fn slash_knocks_the_player_away() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    let mut e = sword_at(330.0); // enemy on the right → push left
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.body.vx, -120.0);
    assert_eq!(player.body.vy, -220.0);
}

#[test]
fn slash_knockback_direction_flips_with_sides() {
    let grid = flat_grid();
    let mut player = player_at(330.0);
    let mut e = sword_at(302.0); // enemy on the left → push right
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.body.vx, 120.0);
}

#[test]
fn iframes_block_damage_but_not_the_swing() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    player.invuln = 0.5;
    let mut e = sword_at(330.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.hp, 3);
    // The cooldown restarts even though no damage went through
    assert_eq!(e.slash_cd, SLASH_COOLDOWN);
}

#[test]
fn slash_waits_for_cooldown() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    let mut e = sword_at(330.0);
    e.slash_cd = 0.5;
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.hp, 3);
    assert!((e.slash_cd - (0.5 - DT)).abs() < 1e-4);
}

#[test]
fn slash_needs_matching_height() {
    let grid = flat_grid();
    let mut player = player_at(300.0);
    player.body.y = 380.0; // a jump's height above the soldier
    player.body.on_ground = false;
    let mut e = sword_at(302.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert_eq!(player.hp, 3);
}

// ── Jump decisions ────────────────────────────────────────────────────────────

#[test]
fn sword_jumps_at_wall_ahead() {
    let mut grid = flat_grid();
    grid.set_solid(9, 5, true); // chest-height wall one probe ahead
    let mut player = player_at(7000.0); // far away: no chase, keeps facing
    let mut e = sword_at(206.0);
    e.body.facing = 1.0;
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert!(e.body.vy < 0.0);
    assert!((e.jump_cd - (ENEMY_JUMP_COOLDOWN - DT)).abs() < 1e-4);
}

#[test]
fn sword_jumps_at_gap_ahead() {
    let mut grid = flat_grid();
    grid.set_solid(10, 5, false);
    grid.set_solid(11, 5, false); // bottomless pit in column 5
    let mut player = player_at(7000.0);
    let mut e = sword_at(206.0);
    e.body.facing = 1.0;
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert!(e.body.vy < 0.0);
}

#[test]
fn sword_jumps_at_player_overhead() {
    let grid = flat_grid();
    let mut player = player_at(310.0);
    player.body.y = 300.0; // well above the soldier, 11 px off-centre
    player.body.on_ground = false;
    let mut e = sword_at(300.0);
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert!(e.body.vy < 0.0);
}

#[test]
fn jump_waits_for_cooldown() {
    let grid = flat_grid();
    let mut player = player_at(310.0);
    player.body.y = 300.0;
    player.body.on_ground = false;
    let mut e = sword_at(300.0);
    e.jump_cd = 1.0;
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    // Still standing on the ground, no launch
    assert_eq!(e.body.y, 440.0);
    assert_eq!(e.body.vy, 0.0);
}

#[test]
fn airborne_sword_does_not_jump_again() {
    let grid = flat_grid();
    let mut player = player_at(310.0);
    player.body.y = 300.0;
    player.body.on_ground = false;
    let mut e = sword_at(300.0);
    e.body.y = 430.0;
    e.body.on_ground = false;
    enemy::update(&mut e, &grid, &mut player, &cfg(), DT);
    assert!(e.body.vy > 0.0); // falling, not jumping
}

#[test]
fn jump_ai_can_be_disabled() {
    let grid = flat_grid();
    let mut config = cfg();
    config.enemy_jumps = false;
    let mut player = player_at(310.0);
    player.body.y = 300.0;
    player.body.on_ground = false;
    let mut e = sword_at(300.0);
    enemy::update(&mut e, &grid, &mut player, &config, DT);
    assert_eq!(e.body.y, 440.0);
    assert_eq!(e.body.vy, 0.0);
}

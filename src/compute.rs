/// Pure simulation functions.
///
/// `step` takes the current `GameState` by reference plus the frame's
/// input snapshot and elapsed time, and returns a brand-new state.  All
/// randomness flows through an `StdRng` seeded from the config, so the
/// same config always rolls the same world (useful for tests and for
/// restart determinism).

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bullet;
use crate::enemy;
use crate::entities::{
    Body, Difficulty, Enemy, EnemyKind, FallPolicy, GameConfig, GameState, GameStatus,
    InputSnapshot, LevelGen, Player, Roster,
};
use crate::level::{self, TileGrid};
use crate::physics::{self, move_and_collide};
use crate::player;
use crate::tuning::{
    BOSS_H, BOSS_HP, BOSS_SPAWN_X, BOSS_W, CAMERA_LEAD, CAMERA_LERP, DEFAULT_SEED, FALL_MARGIN,
    GOAL_OFFSET_COLS, GOAL_WIN_MARGIN, PLAYER_H, PLAYER_MAX_HP, PLAYER_START_X, PLAYER_W,
    SWORD_H, SWORD_LINE_START_X, SWORD_W, TILE,
};

// ── Difficulty table ──────────────────────────────────────────────────────────

/// Baseline configuration per difficulty: a 40-strong sword line, a
/// denser faster line, or a lone stationary boss.
pub fn config_for(difficulty: Difficulty) -> GameConfig {
    let base = GameConfig {
        difficulty,
        can_jump: true,
        allow_reverse: true,
        level_gen: LevelGen::Flat,
        roster: Roster::SwordLine,
        on_world_fall: FallPolicy::Lose,
        enemy_jumps: true,
        boss_chases: false,
        enemy_speed: 90.0,
        sword_count: 40,
        sword_spacing: 36.0,
        seed: DEFAULT_SEED,
    };
    match difficulty {
        Difficulty::Normal => base,
        Difficulty::Hard => GameConfig {
            enemy_speed: 120.0,
            sword_count: 60,
            sword_spacing: 34.0,
            ..base
        },
        Difficulty::Boss => GameConfig {
            roster: Roster::SingleBoss,
            enemy_speed: 0.0,
            ..base
        },
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

fn standing_body(grid: &TileGrid, x: f32, w: f32, h: f32, facing: f32) -> Body {
    Body {
        x,
        y: grid.ground_top_at(x) - h,
        w,
        h,
        vx: 0.0,
        vy: 0.0,
        on_ground: false,
        facing,
    }
}

fn spawn_player(grid: &TileGrid) -> Player {
    let mut body = standing_body(grid, PLAYER_START_X, PLAYER_W, PLAYER_H, 1.0);
    body.y -= 0.1; // settle onto the ground on the first frame
    Player {
        body,
        hp: PLAYER_MAX_HP,
        invuln: 0.0,
        last_shot_at: f32::NEG_INFINITY,
        coyote: 0.0,
        jump_buffer_until: f32::NEG_INFINITY,
        last_jump_press: f32::NEG_INFINITY,
        jump_cut: false,
    }
}

/// A line of sword soldiers standing on the ground ahead of the player.
/// Columns carved into pits get no soldier.
fn spawn_sword_line(grid: &TileGrid, count: usize, spacing: f32) -> Vec<Enemy> {
    (0..count)
        .filter_map(|i| {
            let x = SWORD_LINE_START_X + i as f32 * spacing;
            if grid.ground_top_at(x) >= grid.world_h() {
                return None;
            }
            Some(Enemy {
                kind: EnemyKind::Sword,
                body: standing_body(grid, x, SWORD_W, SWORD_H, -1.0),
                alive: true,
                slash_cd: 0.0,
                jump_cd: 0.0,
                hp: None,
            })
        })
        .collect()
}

fn spawn_boss(grid: &TileGrid) -> Vec<Enemy> {
    vec![Enemy {
        kind: EnemyKind::Boss,
        body: standing_body(grid, BOSS_SPAWN_X, BOSS_W, BOSS_H, -1.0),
        alive: true,
        slash_cd: 0.0,
        jump_cd: 0.0,
        hp: Some(BOSS_HP),
    }]
}

// ── Run lifecycle ─────────────────────────────────────────────────────────────

/// Build a fresh run.  The level RNG is seeded from the config.
pub fn init_state(config: GameConfig, view_w: f32) -> GameState {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let grid = level::generate(&config, &mut rng);
    let decorations = level::decorate(&mut rng, grid.world_w());
    let player = spawn_player(&grid);
    let enemies = match config.roster {
        Roster::SwordLine => spawn_sword_line(&grid, config.sword_count, config.sword_spacing),
        Roster::SingleBoss => spawn_boss(&grid),
    };
    GameState {
        config,
        grid,
        decorations,
        player,
        enemies,
        bullets: Vec::new(),
        status: GameStatus::Playing,
        time: 0.0,
        camera_x: 0.0,
        view_w,
    }
}

/// Restart the current run in place: same config, same seed, fresh
/// world.  The simulation clock keeps running across restarts.
pub fn restart(state: &GameState) -> GameState {
    GameState {
        time: state.time,
        ..init_state(state.config, state.view_w)
    }
}

/// World-x the player's centre must pass to win (non-boss rosters).
pub fn goal_x(grid: &TileGrid) -> f32 {
    (grid.cols() - GOAL_OFFSET_COLS) as f32 * TILE + TILE * 0.5
}

// ── Per-frame step ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Phase order is fixed: player control and movement, goal check,
/// shooting, bullets, enemies, timers, lifecycle checks.  Bullets
/// resolve before any enemy acts, so a bullet kill always wins over a
/// same-frame slash from the killed enemy.
pub fn step(state: &GameState, input: &InputSnapshot, dt: f32) -> GameState {
    let mut next = state.clone();
    next.time += dt;
    let now = next.time;

    // Terminal states only wait for a restart.
    if next.status != GameStatus::Playing {
        return next;
    }

    // ── 1. Player control & movement ──────────────────────────────────────────
    player::control(&mut next.player, input, &next.config, now, dt);
    next.player.body.on_ground = false;
    move_and_collide(&next.grid, &mut next.player.body, dt);

    // ── 2. Goal flag ──────────────────────────────────────────────────────────
    if next.config.roster == Roster::SwordLine
        && physics::center_x(&next.player.body) > goal_x(&next.grid) + GOAL_WIN_MARGIN
    {
        return finish(next, GameStatus::Won);
    }

    // ── 3. Shooting ───────────────────────────────────────────────────────────
    if player::wants_shot(&next.player, input, now) {
        next.player.last_shot_at = now;
        let facing = next.player.body.facing;
        next.bullets.push(bullet::spawn(&next.player.body, facing));
    }

    // ── 4. Bullets (resolved before enemies act) ──────────────────────────────
    bullet::advance(&next.grid, &mut next.bullets, &mut next.enemies, dt);
    next.bullets.retain(|b| !b.dead);

    // ── 5. Enemies ────────────────────────────────────────────────────────────
    for e in next.enemies.iter_mut() {
        if !e.alive {
            continue;
        }
        enemy::update(e, &next.grid, &mut next.player, &next.config, dt);
    }
    next.enemies.retain(|e| e.alive);

    // ── 6. Timers & post-knockback clamp ──────────────────────────────────────
    if next.player.invuln > 0.0 {
        next.player.invuln -= dt;
    }
    next.player.body.vx = player::clamp_vx(next.player.body.vx, &next.config);

    // ── 7. Boss roster win ────────────────────────────────────────────────────
    if next.config.roster == Roster::SingleBoss && next.enemies.is_empty() {
        return finish(next, GameStatus::Won);
    }

    // ── 8. Camera follow ──────────────────────────────────────────────────────
    let lead = player::move_dir(input, &next.config) * CAMERA_LEAD;
    let target = physics::center_x(&next.player.body) - next.view_w * 0.5 + lead;
    next.camera_x += (target - next.camera_x) * CAMERA_LERP;
    next.camera_x = next
        .camera_x
        .clamp(0.0, (next.grid.world_w() - next.view_w).max(0.0));

    // ── 9. Falling out of the world ───────────────────────────────────────────
    if next.player.body.y > next.grid.world_h() + FALL_MARGIN {
        match next.config.on_world_fall {
            FallPolicy::Lose => return finish(next, GameStatus::Lost),
            FallPolicy::Respawn => next.player = spawn_player(&next.grid),
        }
    }

    // ── 10. Death ─────────────────────────────────────────────────────────────
    if next.player.hp <= 0 {
        return finish(next, GameStatus::Lost);
    }

    next
}

/// Enter a terminal state: freeze every velocity so the last frame holds.
fn finish(mut state: GameState, status: GameStatus) -> GameState {
    state.status = status;
    state.player.body.vx = 0.0;
    state.player.body.vy = 0.0;
    for e in state.enemies.iter_mut() {
        e.body.vx = 0.0;
        e.body.vy = 0.0;
    }
    state
}

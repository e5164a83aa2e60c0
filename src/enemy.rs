/// Enemy AI and melee combat.
///
/// Per enemy and per frame, in this order: targeting, jump decision,
/// gravity, integration, cooldowns, slash.  Enemies ignore each other;
/// only the player and the tiles exist for them.

use crate::entities::{Enemy, EnemyKind, GameConfig, Player};
use crate::level::TileGrid;
use crate::physics::{self, center_x, center_y};
use crate::tuning::{
    AGGRO_RADIUS, ENEMY_JUMP_COOLDOWN, ENEMY_JUMP_LOOKAHEAD, ENEMY_JUMP_VEL, GRAVITY, KNOCKBACK_X,
    KNOCKBACK_Y, OVERHEAD_RANGE, PLAYER_IFRAMES, SLASH_BAND, SLASH_COOLDOWN, SLASH_RANGE,
    TERMINAL_FALL, TILE,
};

pub fn update(
    enemy: &mut Enemy,
    grid: &TileGrid,
    player: &mut Player,
    config: &GameConfig,
    dt: f32,
) {
    chase(enemy, player, config);

    if config.enemy_jumps && enemy.kind == EnemyKind::Sword {
        maybe_jump(enemy, grid, player);
    }

    // Gravity and movement follow the same rules as the player.
    enemy.body.vy += GRAVITY * dt;
    enemy.body.vy = enemy.body.vy.min(TERMINAL_FALL);
    enemy.body.on_ground = false;
    physics::move_and_collide(grid, &mut enemy.body, dt);

    if enemy.slash_cd > 0.0 {
        enemy.slash_cd -= dt;
    }
    if enemy.jump_cd > 0.0 {
        enemy.jump_cd -= dt;
    }

    if enemy.kind == EnemyKind::Sword {
        slash(enemy, player);
    }
}

/// Walk toward the player while inside the aggro radius, else idle.
fn chase(enemy: &mut Enemy, player: &Player, config: &GameConfig) {
    if enemy.kind == EnemyKind::Boss && !config.boss_chases {
        enemy.body.vx = 0.0;
        return;
    }
    let dx = center_x(&player.body) - center_x(&enemy.body);
    if dx.abs() < AGGRO_RADIUS {
        let dir = if dx > 0.0 { 1.0 } else { -1.0 };
        enemy.body.vx = dir * config.enemy_speed;
        enemy.body.facing = dir;
    } else {
        enemy.body.vx = 0.0;
    }
}

/// Hop when something blocks the path: a wall at chest height ahead, a
/// gap at the feet ahead, or the player standing overhead.
fn maybe_jump(enemy: &mut Enemy, grid: &TileGrid, player: &Player) {
    if !enemy.body.on_ground || enemy.jump_cd > 0.0 {
        return;
    }
    let b = &enemy.body;
    let ahead_x = if b.facing >= 0.0 {
        b.x + b.w + ENEMY_JUMP_LOOKAHEAD
    } else {
        b.x - ENEMY_JUMP_LOOKAHEAD
    };
    let chest_y = b.y + b.h * 0.5;
    let foot_y = b.y + b.h + 4.0;

    let wall_ahead = grid.is_solid(row_of(chest_y), col_of(ahead_x));
    let gap_ahead = !grid.is_solid(row_of(foot_y), col_of(ahead_x));
    // "Overhead" means the player's centre is past our head, not merely a
    // taller body standing alongside.
    let player_above = center_y(&player.body) < b.y
        && (center_x(&player.body) - center_x(b)).abs() < OVERHEAD_RANGE;

    if wall_ahead || gap_ahead || player_above {
        enemy.body.vy = -ENEMY_JUMP_VEL;
        enemy.jump_cd = ENEMY_JUMP_COOLDOWN;
    }
}

/// Cooldown-gated melee hit with knockback and i-frames.
///
/// The cooldown restarts on every swing, landed or not; damage only goes
/// through when the player's invulnerability has run out.
fn slash(enemy: &mut Enemy, player: &mut Player) {
    let same_height = (center_y(&enemy.body) - center_y(&player.body)).abs() < SLASH_BAND;
    let close = (center_x(&enemy.body) - center_x(&player.body)).abs() < SLASH_RANGE;
    if !(same_height && close && enemy.slash_cd <= 0.0) {
        return;
    }
    enemy.slash_cd = SLASH_COOLDOWN;

    if player.invuln > 0.0 {
        return; // swing lands on i-frames
    }
    player.hp -= 1;
    player.invuln = PLAYER_IFRAMES;

    // Push away from the enemy; a dead-centre overlap defaults to the right.
    let diff = player.body.x - enemy.body.x;
    let k = if diff < 0.0 { -1.0 } else { 1.0 };
    player.body.vx += k * KNOCKBACK_X;
    player.body.vy = player.body.vy.min(0.0) - KNOCKBACK_Y;
}

fn col_of(x: f32) -> i32 {
    (x / TILE).floor() as i32
}

fn row_of(y: f32) -> i32 {
    (y / TILE).floor() as i32
}

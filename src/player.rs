/// Player controller — turns an input snapshot into velocity changes.
/// The actual movement happens afterwards in `physics::move_and_collide`.

use crate::entities::{GameConfig, InputSnapshot, Player};
use crate::tuning::{
    ACCEL_AIR, ACCEL_GROUND, COYOTE_TIME, FRICTION_AIR, FRICTION_GROUND, GRAVITY, JUMP_BUFFER,
    JUMP_CUT_FACTOR, JUMP_VEL, MOVE_MAX, SHOOT_COOLDOWN, TERMINAL_FALL,
};

/// Horizontal intent for this frame: -1.0, 0.0 or +1.0.  Conflicting
/// directions cancel; reverse input is dropped in forward-only mode.
pub fn move_dir(input: &InputSnapshot, config: &GameConfig) -> f32 {
    let right = input.right || input.auto_run;
    let left = input.left && config.allow_reverse;
    (right as i32 - left as i32) as f32
}

/// Clamp horizontal speed to the configured envelope.
pub fn clamp_vx(vx: f32, config: &GameConfig) -> f32 {
    if config.allow_reverse {
        vx.clamp(-MOVE_MAX, MOVE_MAX)
    } else {
        vx.clamp(0.0, MOVE_MAX)
    }
}

pub fn control(player: &mut Player, input: &InputSnapshot, config: &GameConfig, now: f32, dt: f32) {
    let dir = move_dir(input, config);
    let accel = if player.body.on_ground { ACCEL_GROUND } else { ACCEL_AIR };
    let friction = if player.body.on_ground { FRICTION_GROUND } else { FRICTION_AIR };

    if dir != 0.0 {
        player.body.vx += dir * accel * dt;
        player.body.facing = dir;
    } else {
        // Slow down without overshooting past zero.
        let sign = player.body.vx.signum();
        let mag = (player.body.vx.abs() - friction * dt).max(0.0);
        player.body.vx = mag * sign;
    }

    player.body.vx = clamp_vx(player.body.vx, config);

    // Coyote time: refreshed on the ground, counts down in the air.
    if player.body.on_ground {
        player.coyote = COYOTE_TIME;
    } else {
        player.coyote = (player.coyote - dt).max(0.0);
    }

    // Latch a fresh jump press into the buffer.
    if input.jump_pressed_at > player.last_jump_press {
        player.last_jump_press = input.jump_pressed_at;
        player.jump_buffer_until = input.jump_pressed_at + JUMP_BUFFER;
    }

    let buffered = now <= player.jump_buffer_until;
    if config.can_jump && buffered && (player.body.on_ground || player.coyote > 0.0) {
        player.body.vy = -JUMP_VEL;
        player.body.on_ground = false;
        player.coyote = 0.0;
        player.jump_buffer_until = f32::NEG_INFINITY; // consume the press
        player.jump_cut = false;
    }

    // Variable jump height: releasing while rising cuts once per jump.
    if !input.jump_held && player.body.vy < 0.0 && !player.jump_cut {
        player.body.vy *= JUMP_CUT_FACTOR;
        player.jump_cut = true;
    }

    // Gravity, capped at terminal fall speed.
    player.body.vy += GRAVITY * dt;
    player.body.vy = player.body.vy.min(TERMINAL_FALL);
}

/// Shot gating lives with the controller, not the projectile module.
pub fn wants_shot(player: &Player, input: &InputSnapshot, now: f32) -> bool {
    (input.shoot || input.auto_shoot) && now - player.last_shot_at >= SHOOT_COOLDOWN
}

/// Projectile subsystem: spawning, advancing, enemy hits.
///
/// Bullets fly level at a fixed speed and never interact with each
/// other, so processing order within the frame is irrelevant.  The shot
/// cooldown is the caller's job (`player::wants_shot`).

use crate::entities::{Body, Bullet, Enemy};
use crate::level::TileGrid;
use crate::physics::aabb;
use crate::tuning::{
    BOSS_BULLET_DAMAGE, BULLET_H, BULLET_LIFETIME, BULLET_SPEED, BULLET_W, MUZZLE_DROP,
    MUZZLE_INSET,
};

/// New bullet at the shooter's muzzle, travelling in `facing`.
pub fn spawn(origin: &Body, facing: f32) -> Bullet {
    let dir = if facing >= 0.0 { 1.0 } else { -1.0 };
    let x = if dir > 0.0 {
        origin.x + origin.w - MUZZLE_INSET
    } else {
        origin.x + MUZZLE_INSET
    };
    Bullet {
        x,
        y: origin.y + MUZZLE_DROP,
        w: BULLET_W,
        h: BULLET_H,
        vx: dir * BULLET_SPEED,
        age: 0.0,
        dead: false,
    }
}

/// Advance every bullet one frame and resolve hits, in this order per
/// bullet: tile collision, lifetime and world-bounds expiry, then the
/// first living enemy whose box it overlaps (at most one per frame, in
/// roster order).  Callers prune dead bullets afterwards.
pub fn advance(grid: &TileGrid, bullets: &mut [Bullet], enemies: &mut [Enemy], dt: f32) {
    for b in bullets.iter_mut() {
        b.age += dt;
        b.x += b.vx * dt;

        if grid.rect_hits_solid(b.x, b.y, b.w, b.h) {
            b.dead = true;
            continue;
        }
        if b.age > BULLET_LIFETIME || b.x < 0.0 || b.x > grid.world_w() {
            b.dead = true;
            continue;
        }

        for e in enemies.iter_mut() {
            if !e.alive {
                continue;
            }
            if aabb(b.x, b.y, b.w, b.h, e.body.x, e.body.y, e.body.w, e.body.h) {
                hit(e);
                b.dead = true;
                break;
            }
        }
    }
}

/// Apply one bullet's worth of damage.  Enemies without hit points die
/// outright; the rest bleed a fixed amount per hit.
fn hit(enemy: &mut Enemy) {
    match enemy.hp.as_mut() {
        None => enemy.alive = false,
        Some(hp) => {
            *hp -= BOSS_BULLET_DAMAGE;
            if *hp <= 0 {
                enemy.alive = false;
            }
        }
    }
}

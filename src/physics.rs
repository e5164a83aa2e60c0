/// Axis-separated kinematic integration against the tile grid.
///
/// Horizontal displacement is resolved fully before vertical, and each
/// axis snaps to the FIRST colliding tile scanned in increasing row or
/// column order.  Fast diagonal motion can clip a tile corner under this
/// scheme; keeping the exact order keeps that behavior reproducible.

use crate::entities::Body;
use crate::level::TileGrid;
use crate::tuning::TILE;

pub fn center_x(body: &Body) -> f32 {
    body.x + body.w * 0.5
}

pub fn center_y(body: &Body) -> f32 {
    body.y + body.h * 0.5
}

/// Half-open axis-aligned rectangle overlap.
pub fn aabb(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

/// Move `body` by its velocity over `dt`, resolving tile collisions one
/// axis at a time.  Callers reset `on_ground` beforehand; only a
/// downward hit re-asserts it.
pub fn move_and_collide(grid: &TileGrid, body: &mut Body, dt: f32) {
    // Horizontal
    body.x += body.vx * dt;
    if body.vx > 0.0 {
        let col = ((body.x + body.w) / TILE).floor() as i32;
        let top = (body.y / TILE).floor() as i32;
        let bottom = ((body.y + body.h - 1.0) / TILE).floor() as i32;
        for row in top..=bottom {
            if grid.is_solid(row, col) {
                body.x = col as f32 * TILE - body.w;
                body.vx = 0.0;
                break;
            }
        }
    } else if body.vx < 0.0 {
        let col = (body.x / TILE).floor() as i32;
        let top = (body.y / TILE).floor() as i32;
        let bottom = ((body.y + body.h - 1.0) / TILE).floor() as i32;
        for row in top..=bottom {
            if grid.is_solid(row, col) {
                body.x = (col + 1) as f32 * TILE;
                body.vx = 0.0;
                break;
            }
        }
    }

    // Vertical
    body.y += body.vy * dt;
    if body.vy > 0.0 {
        let row = ((body.y + body.h) / TILE).floor() as i32;
        let left = (body.x / TILE).floor() as i32;
        let right = ((body.x + body.w - 1.0) / TILE).floor() as i32;
        // Below the bottom edge there is nothing to land on: bodies drop
        // out of the world and the lifecycle decides what that means.
        if row < grid.rows() as i32 {
            for col in left..=right {
                if grid.is_solid(row, col) {
                    body.y = row as f32 * TILE - body.h;
                    body.vy = 0.0;
                    body.on_ground = true;
                    break;
                }
            }
        }
    } else if body.vy < 0.0 {
        let row = (body.y / TILE).floor() as i32;
        let left = (body.x / TILE).floor() as i32;
        let right = ((body.x + body.w - 1.0) / TILE).floor() as i32;
        for col in left..=right {
            if grid.is_solid(row, col) {
                body.y = (row + 1) as f32 * TILE;
                body.vy = 0.0;
                break;
            }
        }
    }

    // Keep the horizontal extent inside the world.
    body.x = body.x.clamp(0.0, grid.world_w() - body.w);
}

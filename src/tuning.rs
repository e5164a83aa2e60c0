/// Every gameplay tuning constant in one place.
///
/// Units: distances in world pixels, times in seconds, speeds in px/s,
/// accelerations in px/s².

// ── World geometry ────────────────────────────────────────────────────────────

pub const TILE: f32 = 48.0;
pub const LEVEL_ROWS: usize = 12;
pub const LEVEL_COLS: usize = 180;

// ── Player movement ───────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 2400.0;
/// Fall speed cap; also keeps one frame of falling well under a tile.
pub const TERMINAL_FALL: f32 = 1800.0;
pub const MOVE_MAX: f32 = 200.0;
pub const ACCEL_GROUND: f32 = 2000.0;
pub const ACCEL_AIR: f32 = 1200.0;
pub const FRICTION_GROUND: f32 = 2100.0;
pub const FRICTION_AIR: f32 = 200.0;
pub const JUMP_VEL: f32 = 900.0;
/// Fraction of upward speed kept when the jump key is released early.
pub const JUMP_CUT_FACTOR: f32 = 0.6;
pub const COYOTE_TIME: f32 = 0.08;
pub const JUMP_BUFFER: f32 = 0.10;

// ── Player shape & survivability ──────────────────────────────────────────────

pub const PLAYER_W: f32 = 28.0;
pub const PLAYER_H: f32 = 42.0;
pub const PLAYER_START_X: f32 = TILE * 2.0;
pub const PLAYER_MAX_HP: i32 = 3;
pub const PLAYER_IFRAMES: f32 = 0.7;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 800.0;
pub const BULLET_W: f32 = 10.0;
pub const BULLET_H: f32 = 3.0;
pub const BULLET_LIFETIME: f32 = 1.4;
pub const SHOOT_COOLDOWN: f32 = 0.25;
/// Muzzle sits this far in from the shooter's front edge...
pub const MUZZLE_INSET: f32 = 6.0;
/// ...and this far below the top of the body.
pub const MUZZLE_DROP: f32 = 18.0;
/// Hit points a boss loses per bullet.
pub const BOSS_BULLET_DAMAGE: i32 = 3;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const SWORD_W: f32 = 26.0;
pub const SWORD_H: f32 = 40.0;
pub const BOSS_W: f32 = 64.0;
pub const BOSS_H: f32 = 80.0;
pub const BOSS_HP: i32 = 100;
/// Horizontal distance at which an enemy starts chasing.
pub const AGGRO_RADIUS: f32 = 600.0;
pub const SLASH_RANGE: f32 = 34.0;
/// Vertical band around the player's centre inside which a slash can land.
pub const SLASH_BAND: f32 = 24.0;
pub const SLASH_COOLDOWN: f32 = 0.9;
pub const KNOCKBACK_X: f32 = 120.0;
pub const KNOCKBACK_Y: f32 = 220.0;
pub const ENEMY_JUMP_VEL: f32 = 700.0;
pub const ENEMY_JUMP_COOLDOWN: f32 = 1.2;
/// How far past the front edge the wall and gap probes look.
pub const ENEMY_JUMP_LOOKAHEAD: f32 = 10.0;
/// Horizontal range of the "player stands overhead" jump trigger.
pub const OVERHEAD_RANGE: f32 = 80.0;

// ── Spawning & goal ───────────────────────────────────────────────────────────

pub const SWORD_LINE_START_X: f32 = TILE * 18.0;
pub const BOSS_SPAWN_X: f32 = TILE * 26.0;
/// The goal flag stands this many columns in from the right edge.
pub const GOAL_OFFSET_COLS: usize = 6;
pub const GOAL_WIN_MARGIN: f32 = 6.0;

// ── Lifecycle & camera ────────────────────────────────────────────────────────

/// Falling this far below the world bottom triggers the fall policy.
pub const FALL_MARGIN: f32 = 200.0;
pub const CAMERA_LERP: f32 = 0.12;
/// Forward camera lead while the player is moving.
pub const CAMERA_LEAD: f32 = 80.0;
pub const DEFAULT_SEED: u64 = 1337;
/// Upper bound on a simulation step; guards against tunneling after a stall.
pub const DT_MAX: f32 = 1.0 / 30.0;

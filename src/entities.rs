/// All game entity types — pure data, no logic.

use crate::level::{Decorations, TileGrid};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Normal,
    Hard,
    Boss,
}

/// How the tile layout is produced on (re)start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelGen {
    /// Two solid rows of ground across the whole world.
    Flat,
    /// Flat base with seeded gaps carved out and floating platforms added.
    ProceduralGaps,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Roster {
    /// A long line of sword soldiers between the start and the goal flag.
    SwordLine,
    /// One heavy boss; the run is won by depleting its hit points.
    SingleBoss,
}

/// What happens when the player drops below the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallPolicy {
    Lose,
    /// Silently put the player back at the start, health restored.
    Respawn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub can_jump: bool,
    /// Off = forward-only runner; horizontal speed never goes negative.
    pub allow_reverse: bool,
    pub level_gen: LevelGen,
    pub roster: Roster,
    pub on_world_fall: FallPolicy,
    /// Sword soldiers hop over walls, gaps and an overhead player.
    pub enemy_jumps: bool,
    /// Bosses stand still by default; flip this to let them chase too.
    pub boss_chases: bool,
    pub enemy_speed: f32,
    pub sword_count: usize,
    pub sword_spacing: f32,
    /// Level RNG seed, re-applied on every restart.
    pub seed: u64,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Per-frame input snapshot, captured by the front end before `step`.
/// Timestamps are in simulation seconds (`GameState::time`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    /// When the jump key last went down; `NEG_INFINITY` = never.
    pub jump_pressed_at: f32,
    pub shoot: bool,
    pub auto_shoot: bool,
    pub auto_run: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            left: false,
            right: false,
            jump_held: false,
            jump_pressed_at: f32::NEG_INFINITY,
            shoot: false,
            auto_shoot: false,
            auto_run: false,
        }
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Axis-aligned kinematic body shared by the player and enemies.
/// `x`, `y` is the top-left corner; `facing` is +1.0 (right) or -1.0 (left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub facing: f32,
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub hp: i32,
    /// Seconds of melee immunity remaining.
    pub invuln: f32,
    pub last_shot_at: f32,
    /// Grace window after leaving the ground during which a jump still works.
    pub coyote: f32,
    /// An early jump press stays valid until this deadline.
    pub jump_buffer_until: f32,
    /// Timestamp of the press already latched into the buffer.
    pub last_jump_press: f32,
    /// Set once a rising jump has been cut short; cleared on the next jump.
    pub jump_cut: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Sword,
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub alive: bool,
    /// Seconds until the next slash is allowed.
    pub slash_cd: f32,
    pub jump_cd: f32,
    /// Only bosses carry hit points; anything without them dies to one bullet.
    pub hp: Option<i32>,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Horizontal velocity; the sign is the travel direction.  No gravity.
    pub vx: f32,
    pub age: f32,
    pub dead: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// The entire game state.  Cloneable so the pure step function can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: TileGrid,
    pub decorations: Decorations,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub status: GameStatus,
    /// Simulation clock, seconds since the program started this run loop.
    pub time: f32,
    pub camera_x: f32,
    /// Viewport width in world pixels, used for camera clamping.
    pub view_w: f32,
}

/// Tile grid and deterministic level generation.
///
/// The grid only answers solidity queries and is immutable for the life
/// of a run.  Generation takes an injected RNG so a restart with the
/// same seed reproduces the same layout (see `compute::restart`).

use rand::Rng;

use crate::entities::{GameConfig, LevelGen};
use crate::tuning::{GOAL_OFFSET_COLS, LEVEL_COLS, LEVEL_ROWS, TILE};

// ── Tile grid ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    solid: Vec<bool>, // row-major
}

impl TileGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        TileGrid { rows, cols, solid: vec![false; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn world_w(&self) -> f32 {
        self.cols as f32 * TILE
    }

    pub fn world_h(&self) -> f32 {
        self.rows as f32 * TILE
    }

    /// Solidity query.  Anything out of range counts as solid, so the
    /// world boundary behaves like a wall.
    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return true;
        }
        self.solid[row as usize * self.cols + col as usize]
    }

    /// Out-of-range writes are ignored.
    pub fn set_solid(&mut self, row: i32, col: i32, value: bool) {
        if row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols {
            self.solid[row as usize * self.cols + col as usize] = value;
        }
    }

    /// Does any solid tile intersect the rectangle?  The right and
    /// bottom edges are exclusive at whole-pixel boundaries.
    pub fn rect_hits_solid(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let left = (x / TILE).floor() as i32;
        let right = ((x + w - 1.0) / TILE).floor() as i32;
        let top = (y / TILE).floor() as i32;
        let bottom = ((y + h - 1.0) / TILE).floor() as i32;
        for row in top..=bottom {
            for col in left..=right {
                if self.is_solid(row, col) {
                    return true;
                }
            }
        }
        false
    }

    /// Y of the top of the first solid tile in the column containing
    /// world-x, scanning rows top to bottom.  A bottomless column yields
    /// the world height.
    pub fn ground_top_at(&self, x: f32) -> f32 {
        let col = ((x / TILE).floor() as i32).clamp(0, self.cols as i32 - 1);
        for row in 0..self.rows as i32 {
            if self.is_solid(row, col) {
                return row as f32 * TILE;
            }
        }
        self.world_h()
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

pub fn generate(config: &GameConfig, rng: &mut impl Rng) -> TileGrid {
    let mut grid = TileGrid::new(LEVEL_ROWS, LEVEL_COLS);

    // Base: two rows of ground everywhere.
    for col in 0..LEVEL_COLS as i32 {
        grid.set_solid(LEVEL_ROWS as i32 - 1, col, true);
        grid.set_solid(LEVEL_ROWS as i32 - 2, col, true);
    }

    if config.level_gen == LevelGen::ProceduralGaps {
        carve_gaps_and_platforms(&mut grid, rng);
    }

    grid
}

/// Carve jumpable gaps into the base ground and sprinkle floating
/// platforms after some of them.  The starting zone and the goal zone
/// stay untouched so a run can always begin and end on solid ground.
fn carve_gaps_and_platforms(grid: &mut TileGrid, rng: &mut impl Rng) {
    let bottom = LEVEL_ROWS as i32 - 1;
    let last = (LEVEL_COLS - GOAL_OFFSET_COLS - 4) as i32;

    let mut col = 10i32;
    loop {
        col += rng.gen_range(8..20);
        let gap = rng.gen_range(2..=4);
        if col + gap >= last {
            break;
        }
        for c in col..col + gap {
            grid.set_solid(bottom, c, false);
            grid.set_solid(bottom - 1, c, false);
        }
        if rng.gen_bool(0.5) {
            let len = rng.gen_range(3..=6);
            let row = bottom - rng.gen_range(3..=4);
            let start = col + gap + rng.gen_range(1..4);
            for c in start..start + len {
                grid.set_solid(row, c, true);
            }
        }
        col += gap;
    }
}

// ── Decorations ───────────────────────────────────────────────────────────────

/// Parallax scenery.  Placement is part of the deterministic level roll;
/// drawing it is the display's business.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hill {
    pub x: f32,
    pub w: f32,
    pub h: f32,
    pub shade: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decorations {
    pub clouds: Vec<Cloud>,
    pub hills: Vec<Hill>,
}

pub fn decorate(rng: &mut impl Rng, world_w: f32) -> Decorations {
    let clouds = (0..32)
        .map(|_| Cloud {
            x: rng.gen_range(0.0..world_w),
            y: 20.0 + rng.gen_range(0.0..180.0),
            scale: 0.8 + rng.gen_range(0.0..1.8),
        })
        .collect();
    let hills = (0..18)
        .map(|_| Hill {
            x: rng.gen_range(0.0..world_w),
            w: 120.0 + rng.gen_range(0.0..220.0),
            h: 60.0 + rng.gen_range(0.0..120.0),
            shade: 0.25 + rng.gen_range(0.0..0.25),
        })
        .collect();
    Decorations { clouds, hills }
}

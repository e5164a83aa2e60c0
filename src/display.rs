/// Rendering layer — all terminal drawing lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only projects
/// world pixels onto terminal cells and emits crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use gun_runner::entities::{Body, Difficulty, EnemyKind, GameState, GameStatus};
use gun_runner::tuning::{BOSS_HP, LEVEL_ROWS, TILE};
use gun_runner::{compute, physics};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_HP: Color = Color::Red;
const C_HUD_INFO: Color = Color::Yellow;
const C_DIRT: Color = Color::DarkYellow;
const C_GRASS: Color = Color::Green;
const C_CLOUD: Color = Color::White;
const C_HILL: Color = Color::DarkGreen;
const C_PLAYER: Color = Color::White;
const C_GUN: Color = Color::Grey;
const C_SWORD_ENEMY: Color = Color::Blue;
const C_BOSS: Color = Color::DarkRed;
const C_BULLET: Color = Color::Yellow;
const C_GOAL_POLE: Color = Color::White;
const C_GOAL_FLAG: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── World-to-terminal projection ──────────────────────────────────────────────

/// Row 0 is the HUD, the last row is the controls hint; everything in
/// between shows the world at a uniform scale chosen so the full level
/// height fits.
struct View {
    cam: f32,
    cell_w: f32,
    cell_h: f32,
    cols: i32,
    rows: i32,
}

impl View {
    fn col(&self, x: f32) -> i32 {
        ((x - self.cam) / self.cell_w).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.cell_h).floor() as i32 + 1
    }
}

fn cell_size(term_h: u16) -> (f32, f32) {
    let play_rows = term_h.saturating_sub(2).max(6) as f32;
    let cell_h = (LEVEL_ROWS as f32 * TILE) / play_rows;
    // Terminal cells are roughly twice as tall as they are wide.
    (cell_h * 0.5, cell_h)
}

/// World pixels spanned by the terminal at the current cell scale.  The
/// simulation needs this for camera clamping.
pub fn view_width(term_w: u16, term_h: u16) -> f32 {
    let (cell_w, _) = cell_size(term_h);
    term_w as f32 * cell_w
}

fn put<W: Write>(
    out: &mut W,
    view: &View,
    col: i32,
    row: i32,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    if col < 0 || col >= view.cols || row < 1 || row >= view.rows - 1 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn fill_body<W: Write>(out: &mut W, view: &View, body: &Body, color: Color) -> std::io::Result<()> {
    let c0 = view.col(body.x);
    let c1 = view.col(body.x + body.w - 1.0);
    let r0 = view.row(body.y);
    let r1 = view.row(body.y + body.h - 1.0);
    for row in r0..=r1 {
        for col in c0..=c1 {
            put(out, view, col, row, '█', color)?;
        }
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let (cell_w, cell_h) = cell_size(term_h);
    let view = View {
        cam: state.camera_x,
        cell_w,
        cell_h,
        cols: term_w as i32,
        rows: term_h as i32,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_scenery(out, &view, state)?;
    draw_tiles(out, &view, state)?;
    draw_goal(out, &view, state)?;

    for bullet in &state.bullets {
        put(out, &view, view.col(bullet.x), view.row(bullet.y), '─', C_BULLET)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, &view, enemy)?;
    }
    draw_player(out, &view, state)?;

    draw_hud(out, state, term_w)?;
    draw_controls_hint(out, term_h)?;

    if state.status != GameStatus::Playing {
        draw_end_overlay(out, state, term_w, term_h)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background scenery ────────────────────────────────────────────────────────

fn draw_scenery<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    let world_w = state.grid.world_w();
    let world_h = state.grid.world_h();

    // Hills scroll slower than the world (parallax 0.65), clouds slower
    // still (0.4); both wrap around the world width.
    for hill in &state.decorations.hills {
        let base_col = (hill.x - view.cam * 0.65).rem_euclid(world_w) / view.cell_w;
        let width = (hill.w / view.cell_w) as i32;
        let row = view.row(world_h - 2.0 * TILE - hill.h * 0.5);
        for i in 0..width {
            put(out, view, base_col as i32 + i, row, '▄', C_HILL)?;
        }
    }
    for cloud in &state.decorations.clouds {
        let col = (cloud.x - view.cam * 0.4).rem_euclid(world_w) / view.cell_w;
        let row = view.row(cloud.y);
        put(out, view, col as i32, row, '~', C_CLOUD)?;
        put(out, view, col as i32 + 1, row, '~', C_CLOUD)?;
    }
    Ok(())
}

// ── Tiles & goal ──────────────────────────────────────────────────────────────

fn draw_tiles<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    for row in 1..view.rows - 1 {
        let y = (row - 1) as f32 * view.cell_h + view.cell_h * 0.5;
        let tile_row = (y / TILE).floor() as i32;
        for col in 0..view.cols {
            let x = view.cam + col as f32 * view.cell_w + view.cell_w * 0.5;
            if x < 0.0 || x >= state.grid.world_w() {
                continue;
            }
            let tile_col = (x / TILE).floor() as i32;
            if !state.grid.is_solid(tile_row, tile_col) {
                continue;
            }
            // Grass cap on top-exposed tiles, dirt below.
            let color = if !state.grid.is_solid(tile_row - 1, tile_col) {
                C_GRASS
            } else {
                C_DIRT
            };
            put(out, view, col, row, '█', color)?;
        }
    }
    Ok(())
}

fn draw_goal<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    let gx = compute::goal_x(&state.grid);
    let col = view.col(gx);
    let ground_row = view.row(state.grid.ground_top_at(gx));
    let top_row = view.row(state.grid.ground_top_at(gx) - 5.0 * TILE);
    for row in top_row..ground_row {
        put(out, view, col, row, '│', C_GOAL_POLE)?;
    }
    put(out, view, col + 1, top_row, '►', C_GOAL_FLAG)?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    // Blink while invulnerable.
    if state.player.invuln > 0.0 && (state.time * 20.0) as i32 % 2 == 0 {
        return Ok(());
    }
    let body = &state.player.body;
    fill_body(out, view, body, C_PLAYER)?;

    // Pistol at muzzle height, pointing the way we face.
    let gun_x = if body.facing >= 0.0 { body.x + body.w + 2.0 } else { body.x - 2.0 };
    let gun = if body.facing >= 0.0 { '╼' } else { '╾' };
    put(out, view, view.col(gun_x), view.row(body.y + 18.0), gun, C_GUN)?;
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    view: &View,
    enemy: &gun_runner::entities::Enemy,
) -> std::io::Result<()> {
    match enemy.kind {
        EnemyKind::Sword => {
            fill_body(out, view, &enemy.body, C_SWORD_ENEMY)?;
            // Sword arm on the facing side.
            let sx = if enemy.body.facing >= 0.0 {
                enemy.body.x + enemy.body.w + 4.0
            } else {
                enemy.body.x - 4.0
            };
            put(out, view, view.col(sx), view.row(enemy.body.y + 14.0), '─', C_GUN)?;
        }
        EnemyKind::Boss => {
            fill_body(out, view, &enemy.body, C_BOSS)?;
            draw_boss_hp_bar(out, view, enemy)?;
        }
    }
    Ok(())
}

fn draw_boss_hp_bar<W: Write>(
    out: &mut W,
    view: &View,
    enemy: &gun_runner::entities::Enemy,
) -> std::io::Result<()> {
    let hp = enemy.hp.unwrap_or(BOSS_HP).max(0);
    let bar_row = view.row(enemy.body.y - 12.0);
    let c0 = view.col(enemy.body.x);
    let c1 = view.col(enemy.body.x + enemy.body.w - 1.0);
    let total = (c1 - c0 + 1).max(1);
    let filled = (total as f32 * hp as f32 / BOSS_HP as f32).round() as i32;
    for i in 0..total {
        let (glyph, color) = if i < filled { ('█', Color::Red) } else { ('░', Color::DarkGrey) };
        put(out, view, c0 + i, bar_row, glyph, color)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, term_w: u16) -> std::io::Result<()> {
    // Health — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    let hearts = "♥".repeat(state.player.hp.max(0) as usize);
    out.queue(Print(format!("HP: {:<3}", hearts)))?;

    // Mode — centre
    let (mode_str, mode_color) = match state.config.difficulty {
        Difficulty::Normal => ("[ NORMAL ]", Color::Green),
        Difficulty::Hard => ("[ HARD ]", Color::Red),
        Difficulty::Boss => ("[ BOSS ]", Color::Magenta),
    };
    let mx = (term_w / 2).saturating_sub(mode_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(mode_color))?;
    out.queue(Print(mode_str))?;

    // Opposition — right
    let boss_hp = state
        .enemies
        .iter()
        .find(|e| e.kind == EnemyKind::Boss)
        .and_then(|e| e.hp);
    let info = match boss_hp {
        Some(hp) => format!("Boss: {}/{}", hp.max(0), BOSS_HP),
        None => format!("Enemies: {}", state.enemies.len()),
    };
    let progress = 100.0 * physics::center_x(&state.player.body) / state.grid.world_w();
    let text = format!("{}  Dist: {:>3.0}%", info, progress);
    let rx = term_w.saturating_sub(text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_INFO))?;
    out.queue(Print(text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term_h: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ / W : Jump   SPACE / J : Shoot   F : Auto-fire   G : Auto-run   R : Restart   M : Menu   Q : Quit",
    ))?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_end_overlay<W: Write>(
    out: &mut W,
    state: &GameState,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let (title, color) = match state.status {
        GameStatus::Won => ("║   MISSION COMPLETE   ║", Color::Green),
        _ => ("║    MISSION FAILED    ║", Color::Red),
    };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════════╗", color),
        (title, color),
        ("╚══════════════════════╝", color),
        ("R - Play Again   M - Menu   Q - Quit", Color::White),
    ];

    let cx = term_w / 2;
    let start_row = (term_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, line_color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*line_color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

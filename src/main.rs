mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};

use gun_runner::compute;
use gun_runner::entities::{Difficulty, FallPolicy, GameState, InputSnapshot, LevelGen};
use gun_runner::tuning::DT_MAX;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Held-key bookkeeping ──────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const JUMP_KEYS: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const SHOOT_KEYS: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Char('j'), KeyCode::Char('J')];

fn is_jump_key(code: &KeyCode) -> bool {
    JUMP_KEYS.contains(code)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    gaps: &mut bool,
    respawn: &mut bool,
) -> std::io::Result<MenuResult> {
    loop {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let cy = height / 2;

        let title = "»  GUN  RUNNER  «";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            cy.saturating_sub(7),
        ))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(title))?;

        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(5)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("Select mission:"))?;

        let options: &[(&str, &str, Color, &str)] = &[
            ("1", "Normal", Color::Green, "A line of sword soldiers"),
            ("2", "Hard  ", Color::Red, "Denser, faster soldiers"),
            ("3", "Boss  ", Color::Magenta, "One armored boss, 100 HP"),
        ];
        for (i, (key, label, color, desc)) in options.iter().enumerate() {
            let row = cy.saturating_sub(3) + i as u16;
            out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("[{}] ", key)))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(format!("{:<8}", label)))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!(" — {}", desc)))?;
        }

        // Toggles
        let toggles: &[(&str, String)] = &[
            (
                "P",
                format!("Terrain: {}", if *gaps { "gaps & platforms" } else { "flat" }),
            ),
            (
                "V",
                format!("On fall: {}", if *respawn { "respawn" } else { "defeat" }),
            ),
        ];
        for (i, (key, text)) in toggles.iter().enumerate() {
            let row = cy + 1 + i as u16;
            out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("[{}] ", key)))?;
            out.queue(style::SetForegroundColor(Color::Cyan))?;
            out.queue(Print(text))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("Reach the flag — or fell the boss.  Q : Quit"))?;

        out.queue(style::ResetColor)?;
        out.flush()?;

        // Block until the user makes a choice
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Normal)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Boss)),
                KeyCode::Char('p') | KeyCode::Char('P') => *gaps = !*gaps,
                KeyCode::Char('v') | KeyCode::Char('V') => *respawn = !*respawn,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we keep
/// a `key_frame` map that records the frame number of the last press or
/// repeat event for every key.  Each frame we check which keys are still
/// "fresh" (within `HOLD_WINDOW` frames) and build the input snapshot
/// from all of them at once, so move + jump + shoot can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut input = InputSnapshot::default();
    let mut auto_shoot = false;
    let mut auto_run = false;
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    if is_jump_key(&code) {
                        input.jump_pressed_at = state.time;
                    }
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            return Ok(false);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            *state = compute::restart(state);
                            input.jump_pressed_at = f32::NEG_INFINITY;
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            auto_shoot = !auto_shoot;
                        }
                        KeyCode::Char('g') | KeyCode::Char('G') => {
                            auto_run = !auto_run;
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"; a repeating
                // jump key also refreshes the jump buffer, like a key-down
                // auto-repeat would in a browser.
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                    if is_jump_key(&code) {
                        input.jump_pressed_at = state.time;
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Build this frame's snapshot from the held keys ────────────────────
        input.left = any_held(&key_frame, LEFT_KEYS, frame);
        input.right = any_held(&key_frame, RIGHT_KEYS, frame);
        input.jump_held = any_held(&key_frame, JUMP_KEYS, frame);
        input.shoot = any_held(&key_frame, SHOOT_KEYS, frame);
        input.auto_shoot = auto_shoot;
        input.auto_run = auto_run;

        // ── Advance the simulation ────────────────────────────────────────────
        let (tw, th) = terminal::size()?;
        state.view_w = display::view_width(tw, th);

        let dt = last_tick.elapsed().as_secs_f32().min(DT_MAX);
        last_tick = Instant::now();
        *state = compute::step(state, &input, dt);

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // to the hold-window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut gaps = false;
    let mut respawn = false;

    loop {
        match show_menu(out, rx, &mut gaps, &mut respawn)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                let mut config = compute::config_for(difficulty);
                if gaps {
                    config.level_gen = LevelGen::ProceduralGaps;
                }
                if respawn {
                    config.on_world_fall = FallPolicy::Respawn;
                }

                let (tw, th) = terminal::size()?;
                let mut state = compute::init_state(config, display::view_width(tw, th));
                let quit = game_loop(out, &mut state, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}

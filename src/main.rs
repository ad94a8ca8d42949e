mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use display::TerminalSurface;
use star_shooter::engine::{Audio, Key, Sound};
use star_shooter::{GameConfig, GameScreen, ScreenState};

/// Longest frame step fed to the simulation, so a stalled terminal does not
/// teleport everything.
const MAX_DELTA: f32 = 0.1;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "star_shooter")]
#[command(about = "Vertical space shooter in the terminal")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Terminals have no mixer; sounds are only traced.
struct TerminalAudio;

impl Audio for TerminalAudio {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(?sound, "play");
    }

    fn play_music(&mut self) {
        tracing::debug!("music started");
    }

    fn stop_music(&mut self) {
        tracing::debug!("music stopped");
    }

    fn dispose(&mut self) {
        tracing::debug!("audio released");
    }
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Char('a') | KeyCode::Char('A') => Key::A,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::D,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => Key::W,
        _ => Key::Other,
    }
}

fn button_id(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: crossterm key events are turned into key-down/key-up pairs.
/// `held` records the frame number of the last press/repeat event for every
/// key that is down.
///
/// * **Keyboard-enhancement capable** terminals send `Release` events, which
///   become key-ups directly.
/// * **Classic terminals** only repeat `Press`; a key that has been silent
///   for `HOLD_WINDOW` frames is released on the game's behalf.
fn game_loop<W: Write>(
    out: &mut W,
    screen: &mut GameScreen,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut held: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    let key = map_key(code);
                    match kind {
                        KeyEventKind::Press => {
                            match code {
                                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                    return Ok(());
                                }
                                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                    return Ok(());
                                }
                                KeyCode::Char('r') | KeyCode::Char('R')
                                    if screen.state() == ScreenState::GameOver =>
                                {
                                    screen.start_new_game();
                                }
                                _ => {}
                            }
                            if key != Key::Other && held.insert(key, frame).is_none() {
                                screen.key_down(key);
                            }
                        }
                        // Repeat: refresh timestamp so key stays "held"
                        KeyEventKind::Repeat => {
                            if let Some(last_seen) = held.get_mut(&key) {
                                *last_seen = frame;
                            }
                        }
                        KeyEventKind::Release => {
                            if held.remove(&key).is_some() {
                                screen.key_up(key);
                            }
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(button) => {
                        screen.touch_down(surface.to_world(column, row), 0, button_id(button));
                    }
                    MouseEventKind::Up(button) => {
                        screen.touch_up(surface.to_world(column, row), 0, button_id(button));
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    surface.resize(width, height);
                    screen.resize(surface.world_bounds());
                }
                _ => {}
            }
        }

        if !keyboard_enhanced {
            let expired: Vec<Key> = held
                .iter()
                .filter(|&(_, &seen)| frame.saturating_sub(seen) > HOLD_WINDOW)
                .map(|(&key, _)| key)
                .collect();
            for key in expired {
                held.remove(&key);
                screen.key_up(key);
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f32().min(MAX_DELTA);
        last = now;

        surface.clear();
        screen.render(delta, surface);
        display::render(out, surface, screen)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let config = GameConfig {
        seed: args.seed.unwrap_or_else(rand::random),
        ..GameConfig::default()
    };
    let screen = GameScreen::new(config, Box::new(TerminalAudio))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let frame_time = Duration::from_secs(1) / args.fps.max(1);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
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

    let result = run(&mut out, screen, &rx, frame_time, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    mut screen: GameScreen,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut surface = TerminalSurface::new(width, height);
    screen.resize(surface.world_bounds());
    screen.show();

    let result = game_loop(out, &mut screen, &mut surface, rx, frame_time, keyboard_enhanced);
    screen.dispose();
    result
}

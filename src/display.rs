//! Rendering layer: all terminal I/O lives here.
//!
//! `TerminalSurface` is the render surface handed to the game screen.  Draw
//! calls land in a cell buffer in world coordinates; `render` then flushes
//! the buffer plus the HUD to the terminal in one go.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use star_shooter::engine::{Region, Surface};
use star_shooter::math::{world_bounds, Rect};
use star_shooter::{GameScreen, ScreenState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_HIT: Color = Color::Red;
const C_ENEMY_SMALL: Color = Color::Green;
const C_ENEMY_MEDIUM: Color = Color::Red;
const C_ENEMY_BIG: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_STAR: Color = Color::DarkGrey;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Rows taken by the HUD above the field and the hint line below it.
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

const EXPLOSION_GLYPHS: [&str; 4] = ["✸", "✶", "*", "·"];

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface {
    width: u16,
    height: u16,
    world: Rect,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(width: u16, height: u16) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            world: Rect::default(),
            cells: Vec::new(),
        };
        surface.resize(width, height);
        surface
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width as usize * self.field_rows() as usize];
        self.world = world_bounds(width as f32 * CELL_ASPECT, self.field_rows() as f32);
    }

    /// World bounds matching the current field size.
    pub fn world_bounds(&self) -> Rect {
        self.world
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// World position of the centre of a terminal cell.
    pub fn to_world(&self, column: u16, row: u16) -> Vec2 {
        let cols = self.width.max(1) as f32;
        let rows = self.field_rows().max(1) as f32;
        let fx = (column as f32 + 0.5) / cols;
        let fy = (row.saturating_sub(HUD_ROWS) as f32 + 0.5) / rows;
        Vec2::new(
            self.world.left() + fx * self.world.width(),
            self.world.top() - fy * self.world.height(),
        )
    }

    fn field_rows(&self) -> u16 {
        self.height.saturating_sub(HUD_ROWS + HINT_ROWS)
    }

    /// Field cell under a world position, unclamped.
    fn to_cell(&self, p: Vec2) -> (i32, i32) {
        let fx = (p.x - self.world.left()) / self.world.width().max(f32::EPSILON);
        let fy = (self.world.top() - p.y) / self.world.height().max(f32::EPSILON);
        (
            (fx * self.width as f32).floor() as i32,
            (fy * self.field_rows() as f32).floor() as i32,
        )
    }

    /// Write `text` centred on column `col`.  Cells outside the field are
    /// dropped.
    fn put_centred(&mut self, col: i32, row: i32, text: &str, color: Color) {
        let len = text.chars().count() as i32;
        let start = col - len / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, color);
        }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.field_rows() as i32 {
            return;
        }
        let idx = row as usize * self.width as usize + col as usize;
        self.cells[idx] = Cell { ch, color };
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, region: Region, frame: usize, bounds: &Rect) {
        let (col, row) = self.to_cell(bounds.pos);
        let hit = frame == 1;
        match region {
            Region::Background => {}
            Region::Star => {
                let ch = if bounds.height() > 0.01 { '+' } else { '.' };
                self.put(col, row, ch, C_STAR);
            }
            Region::MainShip => {
                // Enhanced sprite (2 rows, 3 cols):
                //   ▲       ← tip
                //  /█\      ← fuselage + wings
                let color = if hit { C_HIT } else { C_PLAYER };
                self.put_centred(col, row - 1, "▲", color);
                self.put_centred(col, row, "/█\\", color);
            }
            Region::EnemySmall => {
                let color = if hit { C_PLAYER } else { C_ENEMY_SMALL };
                self.put_centred(col, row - 1, "«▼»", color);
                self.put_centred(col, row, "╚═╝", color);
            }
            Region::EnemyMedium => {
                let color = if hit { C_PLAYER } else { C_ENEMY_MEDIUM };
                self.put_centred(col, row - 1, "(◎)", color);
                self.put_centred(col, row, "╰─╯", color);
            }
            Region::EnemyBig => {
                let color = if hit { C_PLAYER } else { C_ENEMY_BIG };
                self.put_centred(col, row - 1, "<[▼]>", color);
                self.put_centred(col, row, "╚═══╝", color);
            }
            Region::BulletMainShip => self.put(col, row, '║', C_BULLET_PLAYER),
            Region::BulletEnemy => self.put(col, row, '↓', C_BULLET_ENEMY),
            Region::Explosion => {
                let step = frame * EXPLOSION_GLYPHS.len() / region.frames().max(1);
                let glyph = EXPLOSION_GLYPHS[step.min(EXPLOSION_GLYPHS.len() - 1)];
                self.put_centred(col, row, glyph, C_EXPLOSION);
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Flush one complete frame: HUD, field, hint line and any overlay.
pub fn render<W: Write>(
    out: &mut W,
    surface: &TerminalSurface,
    screen: &GameScreen,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, surface, screen)?;
    draw_field(out, surface)?;
    draw_controls_hint(out, surface)?;

    if screen.state() == ScreenState::GameOver {
        draw_game_over(out, surface, screen)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, surface.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, surface: &TerminalSurface) -> std::io::Result<()> {
    let width = surface.width as usize;
    if width == 0 {
        return Ok(());
    }
    for (row, cells) in surface.cells.chunks(width).enumerate() {
        out.queue(cursor::MoveTo(0, HUD_ROWS + row as u16))?;
        // Batch runs of equal colour into one Print.
        let mut run = String::new();
        let mut run_color = Color::Reset;
        for cell in cells {
            if cell.color != run_color && !run.is_empty() {
                out.queue(style::SetForegroundColor(run_color))?;
                out.queue(Print(&run))?;
                run.clear();
            }
            run_color = cell.color;
            run.push(cell.ch);
        }
        if !run.is_empty() {
            out.queue(style::SetForegroundColor(run_color))?;
            out.queue(Print(&run))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    surface: &TerminalSurface,
    screen: &GameScreen,
) -> std::io::Result<()> {
    // Frags: left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Frags:{:>5}", screen.frags())))?;

    // Level: centre
    let level_str = format!("[ LEVEL {} ]", screen.level());
    let lx = (surface.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(&level_str))?;

    // HP: right
    let hp_str = format!("HP:{:>4}", screen.main_ship().hp());
    let rx = surface
        .width
        .saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hp_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, surface: &TerminalSurface) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, surface.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D / mouse : Move   ↑ / W : Fire   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    surface: &TerminalSurface,
    screen: &GameScreen,
) -> std::io::Result<()> {
    let frags_line = format!("Frags: {:>6}", screen.frags());

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = surface.width / 2;
    let total_rows = lines.len() + 2; // box + frags + hint
    let start_row = (surface.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let frags_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(frags_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, frags_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&frags_line))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, frags_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}

//! Crossterm painter
//!
//! Layout (rows): 0 HUD, 1 top border, play area, border, controls hint.
//! Arena coordinates are scaled into the play area; every shape is drawn as
//! the set of cells whose centers fall inside its circle.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
    terminal,
};
use glam::Vec2;

use super::{Color, Frame, HUD_COLOR, Shape, ShapeKind};
use crate::sim::{Arena, circles_overlap};

const C_BORDER: style::Color = style::Color::DarkBlue;
const C_HINT: style::Color = style::Color::DarkGrey;
const C_TITLE: style::Color = style::Color::Cyan;
const C_SELECTED: style::Color = style::Color::Yellow;
const C_ITEM: style::Color = style::Color::White;

const GAME_HINT: &str = "Arrows / WASD : Move   SPACE : Fire   P : Pause   Q : Menu";
const MENU_HINT: &str = "Up/Down : Select   Enter/Space : Choose   Q : Quit";

/// Characters used for sprites and the border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub player: char,
    pub hostile: char,
    pub boss: char,
    pub projectile: char,
    pub horizontal: char,
    pub vertical: char,
    pub corners: [char; 4],
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        player: '▲',
        hostile: '◆',
        boss: '█',
        projectile: '│',
        horizontal: '─',
        vertical: '│',
        corners: ['┌', '┐', '└', '┘'],
    };

    pub const ASCII: Glyphs = Glyphs {
        player: 'A',
        hostile: 'o',
        boss: '#',
        projectile: '|',
        horizontal: '-',
        vertical: '|',
        corners: ['+', '+', '+', '+'],
    };

    pub fn pick(ascii: bool) -> Self {
        if ascii { Self::ASCII } else { Self::UNICODE }
    }

    fn for_kind(&self, kind: ShapeKind) -> char {
        match kind {
            ShapeKind::Player => self.player,
            ShapeKind::Hostile => self.hostile,
            ShapeKind::Boss => self.boss,
            ShapeKind::Projectile => self.projectile,
        }
    }
}

/// Terminal size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Current terminal size
    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows))
    }

    /// Columns available inside the border
    pub fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    /// Rows available between the top and bottom border
    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// Cell holding an arena point (None when the point is outside the arena)
    pub fn to_cell(&self, arena: &Arena, p: Vec2) -> Option<(u16, u16)> {
        if !arena.contains(p) {
            return None;
        }
        let col = scale(p.x, arena.width, self.play_cols());
        let row = scale(p.y, arena.height, self.play_rows());
        Some((1 + col, 2 + row))
    }

    /// Arena point at the center of a play-area cell
    pub fn cell_center(&self, arena: &Arena, col: u16, row: u16) -> Vec2 {
        let cell_w = arena.width / self.play_cols() as f32;
        let cell_h = arena.height / self.play_rows() as f32;
        Vec2::new(
            (col.saturating_sub(1) as f32 + 0.5) * cell_w,
            (row.saturating_sub(2) as f32 + 0.5) * cell_h,
        )
    }

    /// Cells covered by a disc; at least the center cell when it is visible
    pub fn disc_cells(&self, arena: &Arena, pos: Vec2, radius: f32) -> Vec<(u16, u16)> {
        let Some(center) = self.to_cell(arena, pos) else {
            return Vec::new();
        };
        let low = arena.clamp(pos - Vec2::splat(radius));
        let high = arena.clamp(pos + Vec2::splat(radius));
        let (Some((c0, r0)), Some((c1, r1))) =
            (self.to_cell(arena, low), self.to_cell(arena, high))
        else {
            return vec![center];
        };

        let mut cells = Vec::new();
        for row in r0..=r1 {
            for col in c0..=c1 {
                if circles_overlap(self.cell_center(arena, col, row), 0.0, pos, radius) {
                    cells.push((col, row));
                }
            }
        }
        if cells.is_empty() {
            cells.push(center);
        }
        cells
    }
}

/// Map `value` in `[0, extent]` onto `0..cells`
fn scale(value: f32, extent: f32, cells: u16) -> u16 {
    let cell = (value / extent * cells as f32).floor();
    (cell.max(0.0) as u16).min(cells.saturating_sub(1))
}

fn term_color(c: Color) -> style::Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    style::Color::Rgb {
        r: channel(c[0]),
        g: channel(c[1]),
        b: channel(c[2]),
    }
}

/// Render one complete frame
pub fn draw_frame<W: Write>(
    out: &mut W,
    frame: &Frame,
    viewport: Viewport,
    glyphs: Glyphs,
    paused: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, viewport, glyphs)?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(term_color(HUD_COLOR)))?;
    out.queue(Print(&frame.hud))?;

    for shape in &frame.shapes {
        draw_shape(out, frame, shape, viewport, glyphs)?;
    }

    if paused {
        draw_centered(out, viewport, viewport.rows / 2, "PAUSED", C_SELECTED)?;
    }

    out.queue(cursor::MoveTo(1, viewport.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(GAME_HINT))?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()
}

fn draw_border<W: Write>(out: &mut W, viewport: Viewport, glyphs: Glyphs) -> std::io::Result<()> {
    let inner: String = std::iter::repeat_n(glyphs.horizontal, viewport.play_cols() as usize).collect();
    let [tl, tr, bl, br] = glyphs.corners;
    let bottom = viewport.rows.saturating_sub(2);
    let right = viewport.cols.saturating_sub(1);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("{tl}{inner}{tr}")))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("{bl}{inner}{br}")))?;

    for row in 2..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(glyphs.vertical))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print(glyphs.vertical))?;
    }
    Ok(())
}

fn draw_shape<W: Write>(
    out: &mut W,
    frame: &Frame,
    shape: &Shape,
    viewport: Viewport,
    glyphs: Glyphs,
) -> std::io::Result<()> {
    let glyph = glyphs.for_kind(shape.kind);
    out.queue(style::SetForegroundColor(term_color(shape.color)))?;
    for (col, row) in viewport.disc_cells(&frame.arena, shape.pos, shape.radius) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    viewport: Viewport,
    row: u16,
    text: &str,
    color: style::Color,
) -> std::io::Result<()> {
    let col = (viewport.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Everything the menu screen shows
#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    pub items: &'a [String],
    pub selected: usize,
    pub preset: &'a str,
    /// One line per selectable mode
    pub bests: Vec<String>,
    /// Summary of the run that just ended
    pub last_run: Option<&'a str>,
}

/// Render the title menu
pub fn draw_menu<W: Write>(out: &mut W, view: &MenuView, viewport: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cy = viewport.rows / 2;
    let mut row = cy.saturating_sub(7);
    draw_centered(out, viewport, row, "*  STELLAR  BLITZ  *", C_TITLE)?;
    row += 1;
    draw_centered(out, viewport, row, &format!("[ {} ]", view.preset), C_HINT)?;

    if let Some(summary) = view.last_run {
        row += 2;
        draw_centered(out, viewport, row, summary, C_SELECTED)?;
    }

    row += 2;
    for (i, item) in view.items.iter().enumerate() {
        let (label, color) = if i == view.selected {
            (format!("> {item} <"), C_SELECTED)
        } else {
            (item.clone(), C_ITEM)
        };
        draw_centered(out, viewport, row, &label, color)?;
        row += 1;
    }

    row += 1;
    for line in &view.bests {
        draw_centered(out, viewport, row, line, C_HINT)?;
        row += 1;
    }

    out.queue(cursor::MoveTo(1, viewport.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(MENU_HINT))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

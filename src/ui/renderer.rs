/// Presentation layer: world → frame composition, and the terminal screen.
///
/// How it works:
///   1. `compose()` stamps a fresh `Frame` from the world: border first,
///      then wall spans, then alive golds, then the player (never hidden)
///   2. The caller hands the frame to a `FrameSink` while still holding
///      the world lock, so the screen always shows the latest mutation
///   3. `Screen` clears and redraws the whole frame on every call
///
/// `compose()` is pure; only `Screen` touches the terminal.

use std::fmt;
use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::Pos;
use crate::domain::tile::Glyph;
use crate::sim::world::{GameStatus, WorldState};
use super::FrameSink;

// ── Frame: a rectangular block of glyphs ──

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
}

impl Frame {
    pub fn blank(width: usize, height: usize) -> Self {
        Frame { width, height, cells: vec![Glyph::Empty; width * height] }
    }

    pub fn height(&self) -> usize { self.height }

    fn set(&mut self, pos: Pos, glyph: Glyph) {
        if pos.row < self.height && pos.col < self.width {
            self.cells[pos.row * self.width + pos.col] = glyph;
        }
    }

    pub fn get(&self, pos: Pos) -> Glyph {
        if pos.row < self.height && pos.col < self.width {
            self.cells[pos.row * self.width + pos.col]
        } else {
            Glyph::Empty
        }
    }

    pub fn row(&self, row: usize) -> &[Glyph] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|r| self.row(r).iter().map(|g| g.as_char()).collect())
            .collect()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            f.write_str(line)?;
        }
        Ok(())
    }
}

// ── Compose ──

pub fn compose(world: &WorldState) -> Frame {
    let grid = world.grid;
    let mut frame = Frame::blank(grid.cols, grid.rows);
    let (last_row, last_col) = (grid.rows - 1, grid.cols - 1);

    for col in 1..last_col {
        frame.set(Pos::new(0, col), Glyph::HLine);
        frame.set(Pos::new(last_row, col), Glyph::HLine);
    }
    for row in 1..last_row {
        frame.set(Pos::new(row, 0), Glyph::VLine);
        frame.set(Pos::new(row, last_col), Glyph::VLine);
    }
    for corner in [(0, 0), (0, last_col), (last_row, 0), (last_row, last_col)] {
        frame.set(Pos::new(corner.0, corner.1), Glyph::Corner);
    }

    for wall in &world.walls {
        for col in wall.columns(grid, world.wall_len) {
            let pos = Pos::new(wall.row, col);
            if grid.is_interior(pos) {
                frame.set(pos, Glyph::Wall);
            }
        }
    }

    for gold in world.golds.iter().filter(|g| g.alive) {
        if grid.is_interior(gold.pos()) {
            frame.set(gold.pos(), Glyph::Gold);
        }
    }

    frame.set(world.player.pos, Glyph::Player);
    frame
}

/// Farewell line printed once the terminal is restored.
pub fn end_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Lost => "You loss the game!!",
        GameStatus::Won => "You win the game!!",
        GameStatus::Quit | GameStatus::Playing => "You exit the game.",
    }
}

// ── Screen ──

pub struct Screen {
    writer: BufWriter<io::Stdout>,
    color: bool,
    hint: String,
}

impl Screen {
    pub fn new(color: bool, hint: String) -> Self {
        Screen {
            writer: BufWriter::with_capacity(4096, io::stdout()),
            color,
            hint,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

fn glyph_color(glyph: Glyph) -> Color {
    match glyph {
        Glyph::Wall => Color::Red,
        Glyph::Gold => Color::Yellow,
        Glyph::Player => Color::Green,
        g if g.is_border() => Color::DarkGrey,
        _ => Color::White,
    }
}

impl FrameSink for Screen {
    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.writer, MoveTo(0, 0), Clear(ClearType::All))?;

        let mut last_fg = None;
        for row in 0..frame.height() {
            // Raw mode: no implicit carriage return, position every row.
            queue!(self.writer, MoveTo(0, row as u16))?;
            for &glyph in frame.row(row) {
                if self.color {
                    let fg = glyph_color(glyph);
                    if last_fg != Some(fg) {
                        queue!(self.writer, SetForegroundColor(fg))?;
                        last_fg = Some(fg);
                    }
                }
                queue!(self.writer, Print(glyph.as_char()))?;
            }
        }

        queue!(
            self.writer,
            ResetColor,
            MoveTo(0, frame.height() as u16 + 1),
            Print(&self.hint)
        )?;
        self.writer.flush()
    }
}

//! Text rendering of grids and the surfaces frames are shown on.
//!
//! The domain layer never touches the terminal. A frame is plain text,
//! one line per grid row; a [`DisplaySurface`] decides how to clear and
//! show it.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use crate::domain::{Cell, Grid};
use crate::error::LifeResult;

/// U+2588 FULL BLOCK
pub const ALIVE_GLYPH: char = '\u{2588}';
pub const DEAD_GLYPH: char = ' ';

/// Characters used for alive and dead cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: ALIVE_GLYPH,
            dead: DEAD_GLYPH,
        }
    }
}

impl Glyphs {
    pub const fn glyph(self, cell: Cell) -> char {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

/// Render the grid as `height` lines of `width` glyphs, joined with `\n`.
pub fn render_frame(grid: &Grid, glyphs: Glyphs) -> String {
    grid.rows()
        .map(|row| row.iter().map(|&cell| glyphs.glyph(cell)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Somewhere frames can be shown
pub trait DisplaySurface {
    /// Wipe whatever the previous frame left behind
    fn clear(&mut self) -> LifeResult<()>;

    /// Show one frame
    fn render(&mut self, frame: &str) -> LifeResult<()>;
}

/// Surface backed by a terminal (or anything `Write`), cleared with ANSI
/// sequences through crossterm.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn clear(&mut self) -> LifeResult<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn render(&mut self, frame: &str) -> LifeResult<()> {
        for line in frame.lines() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every frame in memory instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<String>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self) -> LifeResult<()> {
        self.clears += 1;
        Ok(())
    }

    fn render(&mut self, frame: &str) -> LifeResult<()> {
        self.frames.push(frame.to_owned());
        Ok(())
    }
}

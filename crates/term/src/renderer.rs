//! TerminalRenderer: presents game snapshots on the real terminal.
//!
//! Each [`TerminalRenderer::present`] composes the snapshot through a [`GameView`]
//! into a back buffer, compares it with what the terminal currently shows, and
//! sends only the changed spans. After a resize or [`TerminalRenderer::invalidate`]
//! the whole screen is repainted.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::queue;

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Owns stdout and the two frame buffers while the game runs.
pub struct TerminalRenderer {
    out: io::Stdout,
    view: GameView,
    /// What the terminal shows, valid only while `in_sync`
    front: FrameBuffer,
    back: FrameBuffer,
    in_sync: bool,
    bytes: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new(view: GameView) -> Self {
        Self {
            out: io::stdout(),
            view,
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            in_sync: false,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        queue!(self.bytes, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.in_sync = false;
        self.send()
    }

    pub fn exit(&mut self) -> Result<()> {
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            EnableLineWrap,
            Show,
            LeaveAlternateScreen
        )?;
        self.send()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next frame
    pub fn invalidate(&mut self) {
        self.in_sync = false;
    }

    /// Draw `snap` into `viewport` and update the terminal
    pub fn present(&mut self, snap: &GameSnapshot, viewport: Viewport) -> Result<()> {
        self.view.render_into(snap, viewport, &mut self.back);

        let same_size =
            self.front.width() == self.back.width() && self.front.height() == self.back.height();
        let mut painter = Painter::new(&mut self.bytes);
        if self.in_sync && same_size {
            painter.diff(&self.front, &self.back)?;
        } else {
            painter.full(&self.back)?;
        }
        painter.finish()?;
        self.send()?;

        std::mem::swap(&mut self.front, &mut self.back);
        self.in_sync = true;
        Ok(())
    }

    fn send(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        self.bytes.clear();
        Ok(())
    }
}

/// Turns frame buffer cells into crossterm commands, emitting a style change
/// only when the next glyph differs from the last one written
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn full(&mut self, fb: &FrameBuffer) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for (y, row) in fb.rows().enumerate() {
            queue!(self.out, MoveTo(0, y as u16))?;
            self.cells(row)?;
        }
        Ok(())
    }

    /// Both buffers must have the same size
    fn diff(&mut self, shown: &FrameBuffer, next: &FrameBuffer) -> io::Result<()> {
        for (y, (old, new)) in shown.rows().zip(next.rows()).enumerate() {
            for (x, len) in changed_spans(old, new) {
                queue!(self.out, MoveTo(x as u16, y as u16))?;
                self.cells(&new[x..x + len])?;
            }
        }
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> io::Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                self.set_style(cell.style)?;
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> io::Result<()> {
        // SGR reset clears colors too, so it goes first.
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(color(style.fg)),
            SetBackgroundColor(color(style.bg))
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(start, len)` column spans where two equally long rows differ
fn changed_spans<'r>(old: &'r [Cell], new: &'r [Cell]) -> impl Iterator<Item = (usize, usize)> + 'r {
    let mut x = 0;
    std::iter::from_fn(move || {
        let start = x + old[x..].iter().zip(&new[x..]).position(|(a, b)| a != b)?;
        let len = old[start..]
            .iter()
            .zip(&new[start..])
            .take_while(|(a, b)| a != b)
            .count();
        x = start + len;
        Some((start, len))
    })
}

//! Differential renderer.
//!
//! Writes only dirty cells, skips cursor moves that the previous glyph
//! already made, and re-emits style escapes only when the style changes.
//! The whole frame goes out through one buffered writer.

use super::cell_buffer::{CellBuffer, Modifiers, Style};
use crate::color::ColorMode;
use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{queue, QueueableCommand};
use std::io::{self, BufWriter, Write};

/// Differential renderer that minimizes terminal I/O.
#[derive(Debug)]
pub struct DiffRenderer {
    color_mode: ColorMode,
    /// Last known cursor position (`u16::MAX` = unknown).
    cursor_x: u16,
    cursor_y: u16,
    last_style: Option<Style>,
    cells_written: usize,
    cursor_moves: usize,
    style_changes: usize,
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::with_color_mode(ColorMode::detect())
    }
}

impl DiffRenderer {
    #[must_use]
    pub const fn with_color_mode(color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            last_style: None,
            cells_written: 0,
            cursor_moves: 0,
            style_changes: 0,
        }
    }

    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Forget cursor and style state (after resize or clear).
    pub fn reset(&mut self) {
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
        self.last_style = None;
    }

    /// Cells written by the last flush.
    #[must_use]
    pub const fn cells_written(&self) -> usize {
        self.cells_written
    }

    #[must_use]
    pub const fn cursor_moves(&self) -> usize {
        self.cursor_moves
    }

    #[must_use]
    pub const fn style_changes(&self) -> usize {
        self.style_changes
    }

    /// Flush dirty cells to `writer` and clear the dirty set.
    ///
    /// Returns the number of cells written.
    pub fn flush<W: Write>(&mut self, buffer: &mut CellBuffer, writer: &mut W) -> io::Result<usize> {
        self.cells_written = 0;
        self.cursor_moves = 0;
        self.style_changes = 0;

        if buffer.dirty_count() == 0 {
            return Ok(0);
        }

        let mut out = BufWriter::with_capacity(8192, writer);
        let width = buffer.width();

        for idx in buffer.iter_dirty() {
            let cell = &buffer.cells()[idx];
            if cell.is_continuation() {
                continue;
            }
            let (x, y) = buffer.coords(idx);

            if self.cursor_x != x || self.cursor_y != y {
                queue!(out, MoveTo(x, y))?;
                self.cursor_x = x;
                self.cursor_y = y;
                self.cursor_moves += 1;
            }

            if self.last_style != Some(cell.style) {
                self.apply_style(&mut out, cell.style)?;
                self.last_style = Some(cell.style);
                self.style_changes += 1;
            }

            queue!(out, Print(&cell.symbol))?;

            self.cursor_x = self.cursor_x.saturating_add(u16::from(cell.width()));
            if self.cursor_x >= width {
                self.cursor_x = u16::MAX;
            }
            self.cells_written += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.last_style = None;
        out.flush()?;
        drop(out);

        buffer.clear_dirty();
        tracing::trace!(
            cells = self.cells_written,
            moves = self.cursor_moves,
            styles = self.style_changes,
            "frame flushed"
        );
        Ok(self.cells_written)
    }

    fn apply_style<W: Write>(&self, writer: &mut W, style: Style) -> io::Result<()> {
        // Attribute reset must come before the colours or it wipes them.
        writer.queue(SetAttribute(Attribute::Reset))?;
        writer.queue(SetForegroundColor(self.color_mode.to_crossterm(Some(style.fg))))?;
        writer.queue(SetBackgroundColor(self.color_mode.to_crossterm(style.bg)))?;

        let m = style.modifiers;
        if m.contains(Modifiers::BOLD) {
            writer.queue(SetAttribute(Attribute::Bold))?;
        }
        if m.contains(Modifiers::DIM) {
            writer.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

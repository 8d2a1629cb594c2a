//! Cell buffer with dirty tracking.
//!
//! Symbols are stored as `CompactString`, which keeps typical graphemes
//! inline and off the heap.

use bitvec::prelude::*;
use compact_str::CompactString;
use folio_core::Color;
use unicode_width::UnicodeWidthChar;

/// Text modifiers for terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Foreground, background and modifiers applied to written text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    /// `None` leaves the terminal background showing through.
    pub bg: Option<Color>,
    pub modifiers: Modifiers,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::WHITE,
            bg: None,
            modifiers: Modifiers::NONE,
        }
    }
}

impl Style {
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bg: None,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.modifiers = self.modifiers.with(Modifiers::BOLD);
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.modifiers = self.modifiers.with(Modifiers::DIM);
        self
    }

    #[must_use]
    pub const fn on(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }
}

/// A single terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: CompactString,
    pub style: Style,
    /// 1 for normal, 2 for wide chars, 0 for the continuation half.
    width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: CompactString::const_new(" "),
            style: Style::default(),
            width: 1,
        }
    }
}

impl Cell {
    fn set(&mut self, ch: char, style: Style) {
        self.symbol.clear();
        self.symbol.push(ch);
        self.style = style;
        self.width = ch.width().unwrap_or(1).clamp(1, 2) as u8;
    }

    fn make_continuation(&mut self, style: Style) {
        self.symbol.clear();
        self.style = style;
        self.width = 0;
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Grid of cells with one dirty bit per cell.
#[derive(Debug)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    dirty: BitVec,
}

impl CellBuffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
            dirty: bitvec![0; size],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Linear index to (x, y).
    #[must_use]
    pub fn coords(&self, idx: usize) -> (u16, u16) {
        let w = usize::from(self.width);
        ((idx % w) as u16, (idx / w) as u16)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[self.index(x, y)])
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Put one character, returning the columns it took (0 if clipped).
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) -> u16 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let wide = ch.width().unwrap_or(1) > 1;
        if wide && x + 1 >= self.width {
            // Half a wide glyph would corrupt the row.
            return 0;
        }
        let idx = self.index(x, y);
        if self.cells[idx].symbol.chars().eq(std::iter::once(ch)) && self.cells[idx].style == style
        {
            return if wide { 2 } else { 1 };
        }
        self.cells[idx].set(ch, style);
        self.dirty.set(idx, true);
        if wide {
            self.cells[idx + 1].make_continuation(style);
            self.dirty.set(idx + 1, true);
            2
        } else {
            1
        }
    }

    /// Write a string, clipped at `max_x` (exclusive). Returns the columns used.
    pub fn write_clipped(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let limit = max_x.min(self.width);
        let mut cx = x;
        for ch in text.chars() {
            if cx >= limit {
                break;
            }
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if cx + w > limit {
                break;
            }
            cx += self.put_char(cx, y, ch, style).max(w);
        }
        cx - x
    }

    /// Write a string up to the right edge.
    pub fn write_str(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        self.write_clipped(x, y, text, style, self.width)
    }

    /// Fill a rectangle with `ch`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, ch: char, style: Style) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                self.put_char(cx, cy, ch, style);
            }
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.fill(false);
    }

    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.count_ones()
    }

    pub fn iter_dirty(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty.iter_ones()
    }

    /// Resize, dropping all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        let size = usize::from(width) * usize::from(height);
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(size, Cell::default());
        self.dirty = bitvec![1; size];
    }

    /// Reset every cell to a blank space.
    pub fn clear(&mut self) {
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if *cell != Cell::default() {
                cell.reset();
                self.dirty.set(idx, true);
            }
        }
    }

    /// Copy `frame` into this buffer, dirtying only cells that differ.
    ///
    /// A size mismatch resizes first, which dirties everything.
    pub fn sync_from(&mut self, frame: &Self) {
        if self.width != frame.width || self.height != frame.height {
            self.resize(frame.width, frame.height);
        }
        for (idx, (cell, next)) in self.cells.iter_mut().zip(&frame.cells).enumerate() {
            if cell != next {
                cell.clone_from(next);
                self.dirty.set(idx, true);
            }
        }
    }

    /// One row as plain text, wide-char continuations skipped.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.symbol.as_str())
            .collect()
    }

    /// Whole buffer as plain text, one line per row.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_modifiers() {
        let m = Modifiers::BOLD | Modifiers::DIM;
        assert!(m.contains(Modifiers::BOLD));
        assert!(m.contains(Modifiers::DIM));
        assert!(!Modifiers::BOLD.contains(Modifiers::DIM));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn test_style_builders() {
        let s = Style::fg(Color::GREEN).bold().on(Color::PANEL_BG);
        assert_eq!(s.fg, Color::GREEN);
        assert_eq!(s.bg, Some(Color::PANEL_BG));
        assert!(s.modifiers.contains(Modifiers::BOLD));
    }

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = CellBuffer::new(10, 3);
        assert_eq!(buf.len(), 30);
        assert_eq!(buf.dirty_count(), 0);
        assert_eq!(buf.row_text(0), " ".repeat(10));
    }

    #[test]
    fn test_write_marks_dirty() {
        let mut buf = CellBuffer::new(10, 2);
        let used = buf.write_str(2, 1, "cpu", Style::default());
        assert_eq!(used, 3);
        assert_eq!(buf.dirty_count(), 3);
        assert_eq!(buf.row_text(1), "  cpu     ");
    }

    #[test]
    fn test_unchanged_write_stays_clean() {
        let mut buf = CellBuffer::new(10, 1);
        buf.write_str(0, 0, "abc", Style::default());
        buf.clear_dirty();
        buf.write_str(0, 0, "abc", Style::default());
        assert_eq!(buf.dirty_count(), 0);
        buf.write_str(0, 0, "abd", Style::default());
        assert_eq!(buf.dirty_count(), 1);
    }

    #[test]
    fn test_write_clips_at_edge() {
        let mut buf = CellBuffer::new(5, 1);
        let used = buf.write_str(3, 0, "hello", Style::default());
        assert_eq!(used, 2);
        assert_eq!(buf.row_text(0), "   he");
    }

    #[test]
    fn test_write_clipped_max_x() {
        let mut buf = CellBuffer::new(10, 1);
        let used = buf.write_clipped(0, 0, "abcdef", Style::default(), 4);
        assert_eq!(used, 4);
        assert_eq!(buf.to_plain_text(), "abcd");
    }

    #[test]
    fn test_wide_char_takes_two_columns() {
        let mut buf = CellBuffer::new(6, 1);
        let used = buf.write_str(0, 0, "日x", Style::default());
        assert_eq!(used, 3);
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.row_text(0), "日x   ");
    }

    #[test]
    fn test_wide_char_not_split_at_edge() {
        let mut buf = CellBuffer::new(3, 1);
        let used = buf.write_str(2, 0, "日", Style::default());
        assert_eq!(used, 0);
        assert_eq!(buf.row_text(0), "   ");
    }

    #[test]
    fn test_resize_marks_everything_dirty() {
        let mut buf = CellBuffer::new(4, 4);
        buf.resize(8, 2);
        assert_eq!((buf.width(), buf.height()), (8, 2));
        assert_eq!(buf.dirty_count(), 16);
    }

    #[test]
    fn test_clear_only_dirties_painted_cells() {
        let mut buf = CellBuffer::new(4, 1);
        buf.write_str(0, 0, "ab", Style::default());
        buf.clear_dirty();
        buf.clear();
        assert_eq!(buf.dirty_count(), 2);
        assert_eq!(buf.row_text(0), "    ");
    }

    #[test]
    fn test_fill_clamps_to_bounds() {
        let mut buf = CellBuffer::new(4, 2);
        buf.fill(2, 1, 10, 10, '#', Style::default());
        assert_eq!(buf.to_plain_text(), "\n  ##");
    }

    #[test]
    fn test_sync_from_dirties_only_changes() {
        let mut front = CellBuffer::new(6, 1);
        let mut frame = CellBuffer::new(6, 1);
        frame.write_str(0, 0, "tick 1", Style::default());
        front.sync_from(&frame);
        assert_eq!(front.dirty_count(), 6);
        front.clear_dirty();

        frame.clear();
        frame.write_str(0, 0, "tick 2", Style::default());
        front.sync_from(&frame);
        assert_eq!(front.dirty_count(), 1);
        assert_eq!(front.row_text(0), "tick 2");
    }

    #[test]
    fn test_sync_from_resizes() {
        let mut front = CellBuffer::new(2, 2);
        let frame = CellBuffer::new(5, 1);
        front.sync_from(&frame);
        assert_eq!((front.width(), front.height()), (5, 1));
        assert_eq!(front.dirty_count(), 5);
    }

    #[test]
    fn test_coords_roundtrip() {
        let buf = CellBuffer::new(7, 3);
        assert_eq!(buf.coords(0), (0, 0));
        assert_eq!(buf.coords(8), (1, 1));
        assert_eq!(buf.coords(20), (6, 2));
    }

    proptest! {
        #[test]
        fn prop_write_never_exceeds_width(x in 0u16..20, text in "\\PC{0,40}") {
            let mut buf = CellBuffer::new(12, 1);
            let used = buf.write_str(x, 0, &text, Style::default());
            prop_assert!(x.saturating_add(used) <= 12 || used == 0);
            prop_assert_eq!(buf.len(), 12);
        }
    }
}

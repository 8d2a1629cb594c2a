//! Widgets painted straight into a [`CellBuffer`].

mod border;
mod meter;
mod metric_panel;

pub use border::Border;
pub use meter::Meter;
pub use metric_panel::MetricPanel;

use crate::direct::CellBuffer;

/// Cell-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by `margin` cells on every side.
    #[must_use]
    pub const fn inset(&self, margin: u16) -> Self {
        let twice = margin.saturating_mul(2);
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(twice),
            height: self.height.saturating_sub(twice),
        }
    }

    /// Split off the top `rows`, returning `(top, rest)`.
    #[must_use]
    pub fn split_top(&self, rows: u16) -> (Self, Self) {
        let rows = rows.min(self.height);
        (
            Self::new(self.x, self.y, self.width, rows),
            Self::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split into `cols` equal columns; the last takes the remainder.
    #[must_use]
    pub fn columns(&self, cols: u16) -> Vec<Self> {
        if cols == 0 {
            return Vec::new();
        }
        let w = self.width / cols;
        (0..cols)
            .map(|i| {
                let x = self.x + i * w;
                let width = if i + 1 == cols { self.right() - x } else { w };
                Self::new(x, self.y, width, self.height)
            })
            .collect()
    }
}

/// Something that can paint itself into a rectangle of a buffer.
pub trait Paint {
    fn paint(&self, buffer: &mut CellBuffer, area: Rect);
}

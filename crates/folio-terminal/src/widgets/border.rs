//! Box-drawing frame with an optional title.

use super::{Paint, Rect};
use crate::direct::{CellBuffer, Style};
use folio_core::Color;

/// Rounded frame glyphs: corners clockwise from top left, then the two lines.
const TOP_LEFT: char = '╭';
const TOP_RIGHT: char = '╮';
const BOTTOM_RIGHT: char = '╯';
const BOTTOM_LEFT: char = '╰';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// A titled frame.
#[derive(Debug, Clone)]
pub struct Border {
    title: Option<String>,
    color: Color,
    title_style: Style,
}

impl Default for Border {
    fn default() -> Self {
        Self::new()
    }
}

impl Border {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            color: Color::DIM,
            title_style: Style::fg(Color::WHITE),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn with_title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }
}

impl Paint for Border {
    fn paint(&self, buffer: &mut CellBuffer, area: Rect) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let line = Style::fg(self.color);
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        buffer.put_char(area.x, area.y, TOP_LEFT, line);
        buffer.put_char(right, area.y, TOP_RIGHT, line);
        buffer.put_char(area.x, bottom, BOTTOM_LEFT, line);
        buffer.put_char(right, bottom, BOTTOM_RIGHT, line);
        for x in area.x + 1..right {
            buffer.put_char(x, area.y, HORIZONTAL, line);
            buffer.put_char(x, bottom, HORIZONTAL, line);
        }
        for y in area.y + 1..bottom {
            buffer.put_char(area.x, y, VERTICAL, line);
            buffer.put_char(right, y, VERTICAL, line);
        }

        // Left-aligned title, clipped inside the corners.
        if let Some(title) = &self.title {
            if area.width > 4 {
                buffer.write_clipped(area.x + 1, area.y, " ", line, right);
                let used = buffer.write_clipped(area.x + 2, area.y, title, self.title_style, right - 1);
                buffer.write_clipped(area.x + 2 + used, area.y, " ", line, right);
            }
        }
    }
}

//! Horizontal progress meter.

use super::{Paint, Rect};
use crate::direct::{CellBuffer, Style};
use folio_core::{clamp_fill, Color};

const FULL: char = '█';
const EMPTY: char = '░';
/// Partial blocks in eighths, index 1..=7.
const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Meter showing a fill percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy)]
pub struct Meter {
    fill: f64,
    color: Color,
    track: Color,
}

impl Meter {
    /// Out-of-range input is clamped.
    #[must_use]
    pub fn new(fill: f64) -> Self {
        Self {
            fill: clamp_fill(fill),
            color: Color::GREEN,
            track: Color::rgb(0x2a, 0x2a, 0x3a),
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn fill(&self) -> f64 {
        self.fill
    }

    /// Filled width in eighths of a cell.
    #[must_use]
    pub fn filled_eighths(&self, width: u16) -> u32 {
        (self.fill / 100.0 * f64::from(width) * 8.0).round() as u32
    }
}

impl Paint for Meter {
    fn paint(&self, buffer: &mut CellBuffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        let eighths = self.filled_eighths(area.width);
        let full = (eighths / 8) as u16;
        let partial = (eighths % 8) as usize;
        let bar = Style::fg(self.color);
        let track = Style::fg(self.track);

        for i in 0..area.width {
            let x = area.x + i;
            if i < full {
                buffer.put_char(x, area.y, FULL, bar);
            } else if i == full && partial > 0 {
                buffer.put_char(x, area.y, EIGHTHS[partial], bar);
            } else {
                buffer.put_char(x, area.y, EMPTY, track);
            }
        }
    }
}

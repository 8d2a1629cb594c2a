//! 24-bit colour used by both display surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Muted label grey.
    pub const DIM: Self = Self::rgb(0x88, 0x88, 0x99);
    /// Accent of the system resources card.
    pub const CYAN: Self = Self::rgb(0x00, 0xd4, 0xff);
    pub const GREEN: Self = Self::rgb(0x00, 0xff, 0x88);
    pub const PINK: Self = Self::rgb(0xff, 0x79, 0xc6);
    pub const AMBER: Self = Self::rgb(0xff, 0xaa, 0x00);
    pub const RED: Self = Self::rgb(0xff, 0x44, 0x44);
    /// Dashboard background.
    pub const PANEL_BG: Self = Self::rgb(0x0f, 0x0f, 0x1a);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

//! Color mode detection and conversion for terminals.

use crossterm::style::Color as CrosstermColor;
use folio_core::Color;
use folio_yaml::ColorChoice;

/// Terminal color capability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit true color (COLORTERM=truecolor or 24bit).
    #[default]
    TrueColor,
    /// 256 color palette.
    Color256,
    /// 16 ANSI colors.
    Color16,
    /// Monochrome (no color).
    Mono,
}

impl ColorMode {
    /// Detect from `COLORTERM` and `TERM`.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with_env(std::env::var("COLORTERM").ok(), std::env::var("TERM").ok())
    }

    /// [`ColorMode::detect`] with the environment passed in.
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn detect_with_env(colorterm: Option<String>, term: Option<String>) -> Self {
        if matches!(colorterm.as_deref(), Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        let Some(term) = term.as_deref() else {
            return Self::Mono;
        };
        if term == "dumb" {
            Self::Mono
        } else if term.contains("256color") {
            Self::Color256
        } else {
            Self::Color16
        }
    }

    /// Resolve a configured preference; `Auto` detects.
    #[must_use]
    pub fn from_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::detect(),
            ColorChoice::TrueColor => Self::TrueColor,
            ColorChoice::Color256 => Self::Color256,
            ColorChoice::Color16 => Self::Color16,
            ColorChoice::Mono => Self::Mono,
        }
    }

    /// Crossterm color for `color` in this mode.
    ///
    /// `None` maps to `Reset` so unpainted cells keep the terminal background.
    #[must_use]
    pub fn to_crossterm(&self, color: Option<Color>) -> CrosstermColor {
        match (self, color) {
            (Self::Mono, _) | (_, None) => CrosstermColor::Reset,
            (Self::TrueColor, Some(Color { r, g, b })) => CrosstermColor::Rgb { r, g, b },
            (Self::Color256, Some(c)) => CrosstermColor::AnsiValue(Self::rgb_to_256(c.r, c.g, c.b)),
            (Self::Color16, Some(c)) => Self::rgb_to_16(c.r, c.g, c.b),
        }
    }

    /// Index into the xterm 256-color palette.
    fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
        if r == g && g == b {
            return match r {
                0..=3 => 16,
                247..=255 => 231,
                v => 232 + ((v + 2).saturating_sub(8) / 10).min(23),
            };
        }
        16 + 36 * nearest_level(r) + 6 * nearest_level(g) + nearest_level(b)
    }

    /// Closest of the 16 ANSI colors by squared RGB distance.
    fn rgb_to_16(r: u8, g: u8, b: u8) -> CrosstermColor {
        let distance = |(pr, pg, pb): (u8, u8, u8)| {
            let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
            d(r, pr) + d(g, pg) + d(b, pb)
        };
        ANSI_16
            .iter()
            .min_by_key(|(rgb, _)| distance(*rgb))
            .map_or(CrosstermColor::Reset, |(_, color)| *color)
    }
}

/// Channel levels of the 6x6x6 cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_level(v: u8) -> u8 {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| v.abs_diff(**level))
        .map_or(0, |(i, _)| i as u8)
}

/// Typical xterm rendering of the 16 ANSI colors.
const ANSI_16: [((u8, u8, u8), CrosstermColor); 16] = [
    ((0, 0, 0), CrosstermColor::Black),
    ((128, 0, 0), CrosstermColor::DarkRed),
    ((0, 128, 0), CrosstermColor::DarkGreen),
    ((128, 128, 0), CrosstermColor::DarkYellow),
    ((0, 0, 128), CrosstermColor::DarkBlue),
    ((128, 0, 128), CrosstermColor::DarkMagenta),
    ((0, 128, 128), CrosstermColor::DarkCyan),
    ((192, 192, 192), CrosstermColor::Grey),
    ((128, 128, 128), CrosstermColor::DarkGrey),
    ((255, 0, 0), CrosstermColor::Red),
    ((0, 255, 0), CrosstermColor::Green),
    ((255, 255, 0), CrosstermColor::Yellow),
    ((0, 0, 255), CrosstermColor::Blue),
    ((255, 0, 255), CrosstermColor::Magenta),
    ((0, 255, 255), CrosstermColor::Cyan),
    ((255, 255, 255), CrosstermColor::White),
];

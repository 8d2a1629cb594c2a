//! Status labels derived from threshold tests.
//!
//! A label only selects display styling; it carries no other behaviour.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative classification of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Error,
    Info,
}

impl Status {
    /// Lowercase label, also used as the CSS class on the page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Good => Color::GREEN,
            Self::Warning => Color::AMBER,
            Self::Error => Color::RED,
            Self::Info => Color::CYAN,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field's value maps to a [`Status`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusRule {
    /// `value < limit` is good, anything else a warning.
    Below(f64),
    /// `value > limit` is good, anything else a warning.
    Above(f64),
    /// Label does not depend on the value.
    Fixed(Status),
}

impl StatusRule {
    #[must_use]
    pub fn classify(self, value: f64) -> Status {
        match self {
            Self::Below(limit) if value < limit => Status::Good,
            Self::Above(limit) if value > limit => Status::Good,
            Self::Below(_) | Self::Above(_) => Status::Warning,
            Self::Fixed(status) => status,
        }
    }
}

/// Clamp a progress-bar fill into `[0, 100]`. NaN renders as empty.
#[must_use]
pub fn clamp_fill(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

//! Error types for folio-terminal.

use folio_core::TickerError;
use folio_yaml::ParseError;
use thiserror::Error;

/// Errors that can occur in the terminal dashboard.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Background ticker could not be started.
    #[error("ticker: {0}")]
    Ticker(#[from] TickerError),

    /// Config or site manifest failed to load.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Terminal too small to draw anything useful.
    #[error("terminal too small: {width}x{height} (need at least {min_width}x{min_height})")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    /// Terminal not available.
    #[error("Terminal not available")]
    TerminalNotAvailable,
}

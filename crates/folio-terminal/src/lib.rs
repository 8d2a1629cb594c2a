//! Terminal dashboard for folio.
//!
//! Draws the live metric cards, the typed-in headline and the stat
//! counters with `crossterm`. Frames are painted into a [`direct::CellBuffer`]
//! and only changed cells are written out.
//!
//! # Example
//!
//! ```no_run
//! use folio_core::{SyntheticCollector, DEFAULT_INTERVAL};
//! use folio_terminal::{DashboardApp, DashboardView, TuiConfig};
//! use folio_yaml::{AnimationConfig, SiteManifest};
//!
//! let view = DashboardView::new(SiteManifest::bundled(), &AnimationConfig::default());
//! let mut app = DashboardApp::new(view, TuiConfig::default());
//! app.run(SyntheticCollector::from_seed(None), DEFAULT_INTERVAL)?;
//! # Ok::<(), folio_terminal::TuiError>(())
//! ```

#![allow(clippy::cast_lossless)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::needless_pass_by_value)]

mod app;
mod color;
pub mod direct;
mod error;
pub mod ui;
pub mod widgets;

pub use app::{
    render_once, CrosstermTerminal, DashboardApp, HeadlessTerminal, ScriptedInput, Terminal,
    TuiConfig,
};
pub use color::ColorMode;
pub use error::TuiError;
pub use ui::DashboardView;

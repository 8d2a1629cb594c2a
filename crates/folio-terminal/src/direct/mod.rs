//! Direct crossterm backend.
//!
//! ```text
//! ui::draw → CellBuffer → DiffRenderer → crossterm
//! ```
//!
//! Frames are painted into a [`CellBuffer`]; the [`DiffRenderer`] then
//! writes only the cells that changed since the previous frame.

mod cell_buffer;
mod diff_renderer;

pub use cell_buffer::{Cell, CellBuffer, Modifiers, Style};
pub use diff_renderer::DiffRenderer;

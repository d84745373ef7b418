#![forbid(unsafe_code)]

//! Immediate-mode widgets for the ampdeck panel.
//!
//! Widgets are plain method calls on a per-frame [`Ui`] context. Nothing is
//! retained between frames: a [`Ui::button`] call hit-tests the current
//! touch snapshot, draws itself, and returns whether it is touched.

pub mod palette;
pub mod ui;

pub use palette::{PALETTE_LEN, Palette, Style};
pub use ui::Ui;

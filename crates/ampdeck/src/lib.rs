#![forbid(unsafe_code)]

//! ampdeck: a kiosk touchscreen panel for a two-amplifier MIDI rig.
//!
//! This facade re-exports the workspace crates and adds the pieces that
//! make a runnable panel: the [`view::AmpPanel`] screen layout, the
//! in-memory [`controller::MemoryController`] and the `ampdeck` command
//! line in [`cli`].
//!
//! ```text
//! evdev devices -> reader threads -> FanIn -> Program -> Canvas
//!                                               |
//!                                         TouchRegistry, Controller
//! ```

pub mod cli;
pub mod controller;
pub mod error;
pub mod view;

/// Types needed to build a custom panel.
pub mod prelude {
    pub use ampdeck_backend::{Canvas, Controller, DisplayList, Presenter};
    pub use ampdeck_core::{Align, ControlState, Point, Rgba, Sides, TouchRegistry, Window};
    pub use ampdeck_runtime::{FanIn, InputSource, LoopState, Panel, PanelConfig, Program};
    pub use ampdeck_widgets::{Palette, Style, Ui};
}

pub use ampdeck_backend as backend;
pub use ampdeck_core as core;
pub use ampdeck_evdev as evdev;
pub use ampdeck_runtime as runtime;
pub use ampdeck_widgets as widgets;

pub use cli::{Cli, run, run_from_env};
pub use controller::MemoryController;
pub use error::{AppError, Result};
pub use view::AmpPanel;

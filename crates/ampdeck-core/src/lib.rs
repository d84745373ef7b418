#![forbid(unsafe_code)]

//! Core: layout geometry, raw input events, and input state machines.
//!
//! # Role in ampdeck
//! `ampdeck-core` holds everything the panel reasons about without touching
//! a device or a display: the [`Window`](geometry::Window) layout algebra,
//! the raw event model, footswitch scancode mapping, and the multi-touch
//! [`TouchRegistry`](touch::TouchRegistry).
//!
//! # How it fits in the system
//! Reader threads in `ampdeck-runtime` forward raw [`InputEvent`](event::InputEvent)
//! batches; the render thread folds them into the touch registry or decodes
//! them into footswitch actions. Widgets in `ampdeck-widgets` hit-test
//! windows against the registry every frame.

pub mod color;
pub mod control;
pub mod event;
pub mod footswitch;
pub mod geometry;
pub mod touch;

pub use color::Rgba;
pub use control::{AmpMode, AmpState, ControlState, FxFlags, ProgramPreset};
pub use event::{AbsAxis, AbsReport, InputBatch, InputEvent, KeyReport, KeyState};
pub use footswitch::{FootswitchAction, FootswitchEvent, FootswitchState, Keymap};
pub use geometry::{Align, Point, Sides, Window};
pub use touch::{MAX_SLOTS, TouchError, TouchPoint, TouchRegistry};

#![forbid(unsafe_code)]

//! Runtime for the ampdeck panel.
//!
//! # Role in ampdeck
//! This crate wires the collaborators from `ampdeck-backend` into a running
//! panel: one reader thread per input device ([`source`]), a select-style
//! merge of their batches ([`fan_in`]), and the [`Program`] that alternates
//! frame rendering with input dispatch until the reset switch is pressed.
//!
//! # Threads
//! The render thread owns all state. Reader threads only forward raw
//! batches; the touch registry is mutated on the render thread between
//! frames, so it needs no lock.

pub mod config;
pub mod error;
pub mod fan_in;
pub mod program;
pub mod source;

pub use config::PanelConfig;
pub use error::{Error, Result};
pub use fan_in::{FanIn, SourceBatch};
pub use program::{LoopState, Panel, Program};
pub use source::{InputSource, SourceKind};

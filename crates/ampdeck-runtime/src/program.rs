#![forbid(unsafe_code)]

//! Frame driver and input dispatch.
//!
//! [`Program`] owns the display, the controller, the panel view and the
//! touch registry. Each iteration renders one frame, presents it, then
//! blocks on the [`FanIn`] for the next batch:
//!
//! ```text
//! Running: render -> present -> wait for batch -> dispatch -> Running
//!                                                     \-> Terminated (reset pressed)
//! ```
//!
//! Dispatch runs on the render thread between frames, so a draw pass never
//! sees a partially applied touch batch.

use std::time::Instant;

use ampdeck_backend::{Canvas, Controller, Presenter};
use ampdeck_core::{ControlState, FootswitchAction, FootswitchState, Keymap, TouchRegistry};
use ampdeck_widgets::{Palette, Style, Ui};
use tracing::{debug, debug_span, info, trace};

use crate::config::PanelConfig;
use crate::error::{Error, Result};
use crate::fan_in::{FanIn, SourceBatch};
use crate::source::SourceKind;

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Terminated,
}

/// The screen layout drawn every frame.
pub trait Panel {
    fn view<C: Canvas>(&mut self, ui: &mut Ui<'_, C>, state: &ControlState);
}

/// Render loop over a display `D`, controller `K` and panel `P`.
pub struct Program<D, K, P> {
    display: D,
    controller: K,
    panel: P,
    fan_in: FanIn,
    touches: TouchRegistry,
    footswitch: FootswitchState,
    keymap: Keymap,
    palette: Palette,
    style: Style,
    size: (f32, f32),
    state: LoopState,
    frames: u64,
    frame_limit: Option<u64>,
}

impl<D, K, P> Program<D, K, P>
where
    D: Canvas + Presenter,
    K: Controller,
    P: Panel,
{
    pub fn new(display: D, controller: K, panel: P, fan_in: FanIn, config: &PanelConfig) -> Self {
        Self {
            display,
            controller,
            panel,
            fan_in,
            touches: TouchRegistry::new(),
            footswitch: FootswitchState::new(),
            keymap: config.keymap,
            palette: config.palette(),
            style: config.style(),
            size: config.display.size(),
            state: LoopState::Running,
            frames: 0,
            frame_limit: None,
        }
    }

    /// Stop after `n` frames even without a reset press.
    #[must_use]
    pub fn with_frame_limit(mut self, n: u64) -> Self {
        self.frame_limit = Some(n);
        self
    }

    /// Run until the reset switch is pressed or the frame limit is reached.
    pub fn run(&mut self) -> Result<()> {
        info!(width = self.size.0, height = self.size.1, "panel loop started");
        while self.state == LoopState::Running {
            if self.step()? == LoopState::Terminated {
                break;
            }
        }
        info!(frames = self.frames, "panel loop terminated");
        Ok(())
    }

    /// One iteration: render, wait for input, dispatch it.
    ///
    /// Once terminated this returns immediately without drawing.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }
        self.render_frame()?;
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            debug!(frames = self.frames, "frame limit reached");
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }
        let batch = self.fan_in.recv()?;
        self.dispatch(batch);
        Ok(self.state)
    }

    /// Draw and present one frame from the current touch snapshot.
    pub fn render_frame(&mut self) -> Result<()> {
        let _span = debug_span!("frame", n = self.frames).entered();
        let start = Instant::now();

        let (width, height) = self.size;
        self.display.begin_frame(width, height);
        {
            let mut ui = Ui::new(&mut self.display, &self.palette, &self.touches)
                .with_style(self.style);
            self.panel.view(&mut ui, self.controller.state());
        }
        self.display.end_frame();
        self.display
            .present()
            .map_err(|err| Error::Present(err.to_string()))?;

        self.frames += 1;
        trace!(elapsed_us = start.elapsed().as_micros() as u64, "frame rendered");
        Ok(())
    }

    /// Apply one input batch.
    ///
    /// Touch batches update the registry as a whole. Footswitch batches are
    /// decoded in order; a reset press terminates the loop and the rest of
    /// the batch is dropped.
    pub fn dispatch(&mut self, batch: SourceBatch) {
        match batch.source {
            SourceKind::Touch => {
                self.touches.apply_batch(&batch.events);
            }
            SourceKind::Footswitch => {
                for event in self.keymap.decode_batch(&batch.events) {
                    self.footswitch.apply(event);
                    match event.action {
                        FootswitchAction::None => {}
                        FootswitchAction::Reset => {
                            if event.pressed {
                                info!("reset pressed");
                                self.state = LoopState::Terminated;
                                return;
                            }
                        }
                        FootswitchAction::Previous | FootswitchAction::Next => {
                            debug!(action = ?event.action, pressed = event.pressed, "footswitch");
                            self.controller.handle_footswitch(event);
                        }
                    }
                }
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn touches(&self) -> &TouchRegistry {
        &self.touches
    }

    pub fn footswitch(&self) -> &FootswitchState {
        &self.footswitch
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn controller(&self) -> &K {
        &self.controller
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

#![forbid(unsafe_code)]

//! Select-style wait over the two input sources.
//!
//! [`FanIn::recv`] blocks until either source has a batch and returns the
//! first one ready. Neither source has priority: when both are ready the
//! choice is made by `crossbeam_channel::select!` and is not deterministic.
//! Batches from a single source arrive in the order the device produced them.

use ampdeck_core::InputBatch;
use crossbeam_channel::{Receiver, never, select};
use tracing::warn;

use crate::error::{Error, Result};
use crate::source::{InputSource, SourceKind};

/// One batch and the source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub source: SourceKind,
    pub events: InputBatch,
}

#[derive(Debug)]
struct Slot {
    rx: Receiver<InputBatch>,
    open: bool,
}

impl Slot {
    fn new(source: InputSource) -> Self {
        Self {
            rx: source.into_receiver(),
            open: true,
        }
    }

    fn close(&mut self) {
        // A disconnected receiver is always ready; swap it out so select
        // does not spin on it.
        self.rx = never();
        self.open = false;
    }
}

/// Merges the touch and footswitch sources into one stream.
#[derive(Debug)]
pub struct FanIn {
    touch: Slot,
    footswitch: Slot,
}

impl FanIn {
    pub fn new(touch: InputSource, footswitch: InputSource) -> Self {
        Self {
            touch: Slot::new(touch),
            footswitch: Slot::new(footswitch),
        }
    }

    /// Whether `kind` can still deliver batches.
    pub fn is_open(&self, kind: SourceKind) -> bool {
        self.slot(kind).open
    }

    /// Block until a batch is available.
    ///
    /// A source whose reader has stopped is dropped from the wait. Returns
    /// [`Error::InputsClosed`] once both have stopped.
    pub fn recv(&mut self) -> Result<SourceBatch> {
        loop {
            if !self.touch.open && !self.footswitch.open {
                return Err(Error::InputsClosed);
            }
            let (source, msg) = select! {
                recv(self.touch.rx) -> msg => (SourceKind::Touch, msg),
                recv(self.footswitch.rx) -> msg => (SourceKind::Footswitch, msg),
            };
            match msg {
                Ok(events) => return Ok(SourceBatch { source, events }),
                Err(_) => {
                    warn!(%source, "input source closed; no further events from it");
                    self.slot_mut(source).close();
                }
            }
        }
    }

    fn slot(&self, kind: SourceKind) -> &Slot {
        match kind {
            SourceKind::Touch => &self.touch,
            SourceKind::Footswitch => &self.footswitch,
        }
    }

    fn slot_mut(&mut self, kind: SourceKind) -> &mut Slot {
        match kind {
            SourceKind::Touch => &mut self.touch,
            SourceKind::Footswitch => &mut self.footswitch,
        }
    }
}

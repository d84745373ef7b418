#![forbid(unsafe_code)]

//! Per-device reader threads.
//!
//! Each physical device gets one thread that blocks in
//! [`InputDevice::read_batch`] and forwards whole batches through a
//! single-slot channel. The reader waits for the render thread to take a
//! batch before reading the next one, so batches from one device stay in
//! device order.
//!
//! A read error ends the thread and drops the sender: the render thread
//! sees a disconnected channel and stops listening to that source. A device
//! that could not be opened gets a channel that never delivers and never
//! disconnects.
//!
//! Reader threads are detached. They end on their own after a read error
//! or once the receiver is gone and their next batch cannot be sent.

use std::fmt;
use std::path::Path;
use std::thread;

use ampdeck_backend::{DeviceEnumerator, DeviceInfo, InputDevice};
use ampdeck_core::InputBatch;
use crossbeam_channel::{Receiver, bounded, never};
use tracing::{debug, info, warn};

use crate::config::InputConfig;
use crate::error::Result;

/// Which physical device a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Touch,
    Footswitch,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Touch => "touch",
            Self::Footswitch => "footswitch",
        })
    }
}

/// Receiving end of one input device.
#[derive(Debug)]
pub struct InputSource {
    kind: SourceKind,
    rx: Receiver<InputBatch>,
    available: bool,
}

impl InputSource {
    /// Move `device` onto a new reader thread.
    pub fn spawn<D: InputDevice>(kind: SourceKind, mut device: D) -> Result<Self> {
        let (tx, rx) = bounded::<InputBatch>(1);
        let name = device.name().to_owned();
        thread::Builder::new()
            .name(format!("ampdeck-{kind}-reader"))
            .spawn(move || {
                debug!(source = %kind, device = %name, "reader thread started");
                loop {
                    match device.read_batch() {
                        Ok(batch) => {
                            if tx.send(batch).is_err() {
                                debug!(source = %kind, "receiver gone; reader exiting");
                                break;
                            }
                        }
                        Err(err) => {
                            warn!(
                                source = %kind,
                                device = %name,
                                %err,
                                "device read failed; source closed"
                            );
                            break;
                        }
                    }
                }
            })?;
        Ok(Self {
            kind,
            rx,
            available: true,
        })
    }

    /// A source with no device behind it. It never delivers and never closes.
    pub fn unavailable(kind: SourceKind) -> Self {
        Self {
            kind,
            rx: never(),
            available: false,
        }
    }

    /// Wrap an existing channel, e.g. a scripted source.
    pub fn from_receiver(kind: SourceKind, rx: Receiver<InputBatch>) -> Self {
        Self {
            kind,
            rx,
            available: true,
        }
    }

    /// Locate and open the device for `kind` as described by `config`.
    ///
    /// An explicit path wins over discovery. The footswitch is found by name
    /// substring and the touch panel as the first absolute-axis device. Any
    /// failure yields [`InputSource::unavailable`].
    pub fn discover<E: DeviceEnumerator>(
        enumerator: &E,
        kind: SourceKind,
        config: &InputConfig,
    ) -> Self {
        let explicit = match kind {
            SourceKind::Touch => config.touch_path.as_deref(),
            SourceKind::Footswitch => config.footswitch_path.as_deref(),
        };
        let found = match explicit {
            Some(path) => Ok(Some(explicit_info(path))),
            None => match kind {
                SourceKind::Touch => enumerator.find_abs_device(),
                SourceKind::Footswitch => enumerator.find_by_name(&config.footswitch_name),
            },
        };
        let info = match found {
            Ok(Some(info)) => info,
            Ok(None) => {
                warn!(source = %kind, "no matching input device; source disabled");
                return Self::unavailable(kind);
            }
            Err(err) => {
                warn!(source = %kind, %err, "device enumeration failed; source disabled");
                return Self::unavailable(kind);
            }
        };
        let device = match enumerator.open(&info) {
            Ok(device) => device,
            Err(err) => {
                warn!(
                    source = %kind,
                    device = %info,
                    %err,
                    "cannot open input device; source disabled"
                );
                return Self::unavailable(kind);
            }
        };
        match Self::spawn(kind, device) {
            Ok(source) => {
                info!(source = %kind, device = %info, "input source ready");
                source
            }
            Err(err) => {
                warn!(source = %kind, %err, "cannot start reader thread; source disabled");
                Self::unavailable(kind)
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Whether a device (or scripted channel) backs this source.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn into_receiver(self) -> Receiver<InputBatch> {
        self.rx
    }
}

fn explicit_info(path: &Path) -> DeviceInfo {
    DeviceInfo {
        path: path.to_path_buf(),
        name: path.display().to_string(),
        caps: Default::default(),
    }
}

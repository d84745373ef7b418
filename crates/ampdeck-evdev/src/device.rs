#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ampdeck_backend::InputDevice;
use ampdeck_core::InputBatch;
use tracing::trace;

use crate::codec::{BATCH_RECORDS, RECORD_SIZE, decode_records};
use crate::error::{EvdevError, Result};

/// An opened `/dev/input/eventN` node.
///
/// Reads block until the kernel has at least one event queued.
#[derive(Debug)]
pub struct EvdevDevice {
    file: File,
    name: String,
    buf: Vec<u8>,
}

impl EvdevDevice {
    pub fn open(path: &Path, name: impl Into<String>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            file,
            name: name.into(),
            buf: vec![0; BATCH_RECORDS * RECORD_SIZE],
        })
    }
}

impl InputDevice for EvdevDevice {
    type Error = EvdevError;

    fn name(&self) -> &str {
        &self.name
    }

    fn read_batch(&mut self) -> Result<InputBatch> {
        let n = self.file.read(&mut self.buf)?;
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        let batch = decode_records(&self.buf[..n])?;
        trace!(device = %self.name, events = batch.len(), "evdev batch");
        Ok(batch)
    }
}

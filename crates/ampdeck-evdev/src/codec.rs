#![forbid(unsafe_code)]

//! Decoding of kernel `struct input_event` records.
//!
//! Layout is native-endian: a `struct timeval` (two C longs), then
//! `u16 type`, `u16 code`, `i32 value`. The timestamp is skipped.

use ampdeck_core::{InputBatch, InputEvent};

use crate::error::{EvdevError, Result};

/// Size of `struct timeval` on this target.
const TIMEVAL_SIZE: usize = 2 * std::mem::size_of::<std::ffi::c_long>();

/// Size of one `struct input_event`: 16 bytes on 32-bit targets, 24 on 64-bit.
pub const RECORD_SIZE: usize = TIMEVAL_SIZE + 8;

/// Records requested per read.
pub const BATCH_RECORDS: usize = 64;

/// Decode a buffer holding whole records.
pub fn decode_records(buf: &[u8]) -> Result<InputBatch> {
    if buf.len() % RECORD_SIZE != 0 {
        return Err(EvdevError::Truncated {
            len: buf.len(),
            record: RECORD_SIZE,
        });
    }
    Ok(buf.chunks_exact(RECORD_SIZE).map(decode_record).collect())
}

fn decode_record(rec: &[u8]) -> InputEvent {
    let body = &rec[TIMEVAL_SIZE..];
    let kind = u16::from_ne_bytes([body[0], body[1]]);
    let code = u16::from_ne_bytes([body[2], body[3]]);
    let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);
    InputEvent::new(kind, code, value)
}

/// Encode events as kernel records with a zero timestamp.
pub fn encode_records(events: &[InputEvent]) -> Vec<u8> {
    let mut out = Vec::with_capacity(events.len() * RECORD_SIZE);
    for ev in events {
        out.extend_from_slice(&[0u8; TIMEVAL_SIZE]);
        out.extend_from_slice(&ev.kind.to_ne_bytes());
        out.extend_from_slice(&ev.code.to_ne_bytes());
        out.extend_from_slice(&ev.value.to_ne_bytes());
    }
    out
}

#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvdevError>;

#[derive(Debug, Error)]
pub enum EvdevError {
    #[error("evdev io error: {0}")]
    Io(#[from] io::Error),

    /// A read returned a byte count that is not a whole number of records.
    #[error("short read of {len} bytes (record size {record})")]
    Truncated { len: usize, record: usize },

    #[error("input class directory {} not found", .0.display())]
    NotFound(PathBuf),
}

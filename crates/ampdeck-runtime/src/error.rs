#![forbid(unsafe_code)]

//! Runtime error type.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("cannot read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The display collaborator failed to present a frame.
    #[error("display present failed: {0}")]
    Present(String),

    /// Every input source has closed its channel.
    #[error("all input sources closed")]
    InputsClosed,
}

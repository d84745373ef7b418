use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Runtime(#[from] ampdeck_runtime::Error),

    #[error("device discovery failed: {0}")]
    Evdev(#[from] ampdeck_evdev::EvdevError),

    #[error("cannot install log subscriber: {0}")]
    Logging(String),
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        use ampdeck_runtime::Error as Runtime;
        match self {
            Self::Runtime(
                Runtime::Config(_) | Runtime::Invalid(_) | Runtime::ReadConfig { .. },
            ) => 2,
            Self::Runtime(Runtime::InputsClosed) => 3,
            _ => 1,
        }
    }
}

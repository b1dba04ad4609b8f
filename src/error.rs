use alloc::string::String;
use enough::StopReason;

use crate::pixel::PixelFormat;

/// Errors from image list operations and engine runs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanarError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },

    #[error("image list cannot hold more images")]
    ListFull,

    #[error("unknown pixel format value {0}")]
    UnknownFormat(u32),

    #[error("cannot copy a {spectrum}-channel image to {format:?}")]
    UnsupportedPairing { spectrum: u32, format: PixelFormat },

    #[error("unsupported channel count: {0}")]
    UnsupportedChannelCount(u32),

    #[error("index {index} out of range for {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{command}: {message}")]
    Engine { command: String, message: String },

    #[error("resource path initialization failed: {0}")]
    ResourcePathInit(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<StopReason> for PlanarError {
    fn from(r: StopReason) -> Self {
        PlanarError::Cancelled(r)
    }
}

/// Failure reported by an external engine.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineFault {
    /// The engine rejected or failed a command.
    #[error("{command}: {message}")]
    Command { command: String, message: String },

    #[error("engine ran out of memory")]
    OutOfMemory,

    /// The engine observed the abort flag.
    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("{0}")]
    Other(String),
}

impl From<StopReason> for EngineFault {
    fn from(r: StopReason) -> Self {
        EngineFault::Cancelled(r)
    }
}

impl From<EngineFault> for PlanarError {
    fn from(fault: EngineFault) -> Self {
        match fault {
            EngineFault::Command { command, message } => PlanarError::Engine { command, message },
            EngineFault::OutOfMemory => PlanarError::OutOfMemory { bytes: 0 },
            EngineFault::Cancelled(r) => PlanarError::Cancelled(r),
            EngineFault::Other(msg) => PlanarError::Unknown(msg),
        }
    }
}

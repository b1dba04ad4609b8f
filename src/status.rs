//! Caller-visible status codes.

use crate::error::PlanarError;

/// Result of a boundary call. The discriminants are part of the host ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    Ok = 0,
    InvalidParameter,
    OutOfMemory,
    UnknownImageFormat,
    EngineError,
    ResourcePathInitFailed,
    UnsupportedChannelCount,
    IndexOutOfRange,
    UnknownError,
}

impl Status {
    /// Collapse a core result into its status code.
    pub fn of<T>(result: &Result<T, PlanarError>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.into(),
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<&PlanarError> for Status {
    fn from(e: &PlanarError) -> Self {
        match e {
            PlanarError::InvalidParameter(_)
            | PlanarError::BufferTooSmall { .. }
            | PlanarError::UnsupportedPairing { .. } => Status::InvalidParameter,
            PlanarError::DimensionsTooLarge { .. }
            | PlanarError::LimitExceeded(_)
            | PlanarError::OutOfMemory { .. }
            | PlanarError::ListFull => Status::OutOfMemory,
            PlanarError::UnknownFormat(_) => Status::UnknownImageFormat,
            PlanarError::UnsupportedChannelCount(_) => Status::UnsupportedChannelCount,
            PlanarError::IndexOutOfRange { .. } => Status::IndexOutOfRange,
            PlanarError::Engine { .. } | PlanarError::Cancelled(_) => Status::EngineError,
            PlanarError::ResourcePathInit(_) => Status::ResourcePathInitFailed,
            PlanarError::Unknown(_) => Status::UnknownError,
        }
    }
}

impl PlanarError {
    /// The status code this error is reported as.
    pub fn status(&self) -> Status {
        self.into()
    }
}

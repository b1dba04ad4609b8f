//! Fixed-capacity error record filled in by a failed engine run.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use crate::error::PlanarError;

/// A NUL-terminated byte string stored in `N` bytes.
///
/// Writes keep at most `N - 1` bytes of the input and always leave a
/// terminating NUL; longer input is cut silently, possibly in the middle
/// of a UTF-8 sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct BoundedStr<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> Default for BoundedStr<N> {
    fn default() -> Self {
        Self { buf: [0; N] }
    }
}

impl<const N: usize> BoundedStr<N> {
    /// Longest content that fits before the terminator.
    pub const MAX_LEN: usize = N - 1;

    /// Replace the content with (a prefix of) `text`. Returns the number of
    /// bytes kept.
    pub fn write(&mut self, text: &[u8]) -> usize {
        let len = text.len().min(Self::MAX_LEN);
        self.buf[..len].copy_from_slice(&text[..len]);
        self.buf[len..].fill(0);
        len
    }

    /// Content bytes up to the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(N);
        &self.buf[..end]
    }

    /// The raw buffer, including the terminator and trailing zeros.
    pub fn as_raw(&self) -> &[u8; N] {
        &self.buf
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.buf[0] == 0
    }
}

impl<const N: usize> fmt::Debug for BoundedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// Capacity of each [`ErrorInfo`] field, terminator included.
pub const ERROR_FIELD_LEN: usize = 256;

/// Command name and message of the engine failure that ended a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    pub command: BoundedStr<ERROR_FIELD_LEN>,
    pub message: BoundedStr<ERROR_FIELD_LEN>,
}

impl ErrorInfo {
    /// Record the command and message of an engine failure.
    ///
    /// Other errors carry no engine context; the message field receives
    /// their description and the command field is cleared.
    pub fn record(&mut self, error: &PlanarError) {
        match error {
            PlanarError::Engine { command, message } => {
                self.command.write(command.as_bytes());
                self.message.write(message.as_bytes());
            }
            other => {
                self.command.write(b"");
                self.message.write(alloc::format!("{other}").as_bytes());
            }
        }
    }
}

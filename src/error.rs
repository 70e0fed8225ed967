//! Error types for buffer operations with conversion support

use std::fmt;

/// Errors that can occur during buffer operations.
///
/// Overflow on the write families is never an error: it is governed by the
/// buffer's [`OverflowMode`](crate::OverflowMode) and reported through the
/// returned byte count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Position exceeds buffer capacity
    PositionOutOfBounds,
    /// Buffer size exceeds maximum allowed
    SizeTooBig,
    /// A `Display` implementation failed while rendering formatted content
    Format,
    /// Invalid data format
    InvalidData(String),
    /// Diagnostic list already holds its maximum number of messages
    TooManyMessages,
    /// Diagnostic list would exceed its byte budget
    TooManyBytes,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfBounds => write!(f, "Position out of bounds"),
            Self::SizeTooBig => write!(f, "Buffer size too big"),
            Self::Format => write!(f, "Formatting failed"),
            Self::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Self::TooManyMessages => write!(f, "Diagnostic list full (too many messages)"),
            Self::TooManyBytes => write!(f, "Diagnostic list full (too many bytes)"),
        }
    }
}

impl std::error::Error for BufferError {}

impl From<fmt::Error> for BufferError {
    fn from(_: fmt::Error) -> Self {
        BufferError::Format
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::TooManyMessages | BufferError::TooManyBytes => {
                std::io::Error::new(ErrorKind::WriteZero, err)
            }
            BufferError::PositionOutOfBounds | BufferError::InvalidData(_) => {
                std::io::Error::new(ErrorKind::InvalidInput, err)
            }
            _ => std::io::Error::other(err),
        }
    }
}

/// Convert BufferError to anyhow::Error
#[cfg(feature = "anyhow")]
impl From<BufferError> for anyhow::Error {
    fn from(err: BufferError) -> Self {
        anyhow::anyhow!("{}", err)
    }
}

/// Result type alias for buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

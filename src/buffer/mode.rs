//! Overflow policies for the append family

use crate::error::BufferError;
use std::fmt;
use std::str::FromStr;

/// What an append-family write does once it reaches the end of the buffer.
///
/// The mode only affects writes that go through the cursor (append, and
/// the replace/insert/prepend families built on top of it). Fill and clear
/// operations ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowMode {
    /// Keep the prefix that fits and drop the rest.
    #[default]
    Truncate,
    /// Drop the whole write unless it fits completely.
    Skip,
    /// Restart at index 0 and keep overwriting.
    Ring,
}

impl OverflowMode {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Skip => "skip",
            Self::Ring => "ring",
        }
    }
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowMode {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "skip" => Ok(Self::Skip),
            "ring" => Ok(Self::Ring),
            other => Err(BufferError::InvalidData(format!(
                "unknown overflow mode '{}'",
                other
            ))),
        }
    }
}

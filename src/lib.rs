//! # Bounded Byte Buffer Library
//!
//! A fixed-capacity, mutable byte buffer with positional writes (append,
//! insert, replace, prepend), buffer composition, and a caller-selected
//! policy for writes that would run past the end.
//!
//! Features:
//! - Three overflow modes: truncate, skip the whole write, or wrap as a ring
//! - Borrowed, owned-storage and fully owned buffers with explicit release
//! - Secure zeroing of owned storage using `zeroize` (compiler-resistant)
//! - Lock-free scratch pool for the tail copy behind insert and prepend
//! - `format!`-style writes through `fmt::Arguments`
//! - Bounded diagnostic message list built on the buffer
//!
//! # Examples
//!
//! ```
//! use boundbuf::prelude::*;
//!
//! let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 20);
//! buf.append_bytes(b"0123456789ABCDEFGHIJKLMNOP");
//! assert_eq!(buf.as_slice(), b"KLMNOP6789ABCDEFGHIJ");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod diagnostics;
pub mod error;
mod macros;
pub mod scratch;

// Re-export main types
pub use buffer::{BUF_MAX_SIZE, ByteBuffer, OverflowMode, Ownership, join_buffer};
pub use diagnostics::{DiagnosticConfig, DiagnosticLog};
pub use error::{BufferError, Result, ResultExt};
pub use scratch::{Scratch, ScratchConfig, ScratchPool, ScratchStats};

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::{BUF_MAX_SIZE, ByteBuffer, OverflowMode, Ownership, join_buffer};
    pub use crate::diagnostics::{DiagnosticConfig, DiagnosticLog};
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::scratch::{ScratchConfig, ScratchPool, ScratchStats};
}

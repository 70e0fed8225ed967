//! Fixed-capacity byte buffer with configurable overflow handling

pub mod core;
pub mod mode;
pub(crate) mod compose;
pub(crate) mod ops;

pub use compose::join_buffer;
pub use core::{BUF_MAX_SIZE, ByteBuffer, Ownership};
pub use mode::OverflowMode;

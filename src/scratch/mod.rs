//! Reusable scratch regions for shift-based writes.
//!
//! Insert and prepend park the tail of the buffer in a scratch region while
//! the new content is written. Regions come from a [`ScratchPool`] so the
//! steady state performs no allocation.

pub(crate) mod config;
pub(crate) mod pool;
pub(crate) mod stats;

pub use config::ScratchConfig;
pub use pool::{Scratch, ScratchPool, global};
pub use stats::ScratchStats;

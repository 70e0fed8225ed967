//! Configuration for scratch pools

/// Configuration for scratch pool behavior.
#[derive(Debug, Clone)]
pub struct ScratchConfig {
    /// Initial capacity of each scratch region (bytes)
    pub buffer_size: usize,
    /// Maximum number of idle regions kept in the global queue
    pub max_pool_size: usize,
    /// Number of regions to pre-allocate at startup
    pub min_pool_size: usize,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            max_pool_size: 64,
            min_pool_size: 0,
        }
    }
}

impl ScratchConfig {
    /// Regions that grew past this capacity never go back to the global
    /// queue. Each thread keeps at most one of them for reuse.
    #[inline]
    pub(crate) fn retain_limit(&self) -> usize {
        self.buffer_size.saturating_mul(4)
    }
}

//! Statistics tracking for scratch pools.

/// Snapshot of scratch pool counters.
#[derive(Debug, Clone)]
pub struct ScratchStats {
    /// Number of regions currently idle in the global queue
    pub available: usize,
    /// Total number of fresh regions allocated
    pub allocated: usize,
    /// Total number of acquire() calls
    pub acquired: usize,
    /// Total number of regions handed back
    pub returned: usize,
    /// Number of acquisitions served by the thread-local cache
    pub cache_hits: usize,
}

impl ScratchStats {
    /// Returns the number of regions currently checked out.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::prelude::*;
    ///
    /// let pool = ScratchPool::new(ScratchConfig::default());
    /// let _scratch = pool.acquire();
    ///
    /// assert_eq!(pool.stats().in_use(), 1);
    /// ```
    pub fn in_use(&self) -> usize {
        self.acquired.saturating_sub(self.returned)
    }

    /// Returns the thread-local cache hit rate as a percentage.
    pub fn cache_hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / self.acquired as f64) * 100.0
    }

    /// Returns how often a region was reused rather than allocated, as a percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::prelude::*;
    ///
    /// let pool = ScratchPool::new(ScratchConfig::default());
    /// for _ in 0..10 {
    ///     let _scratch = pool.acquire();
    /// }
    ///
    /// let stats = pool.stats();
    /// assert!(stats.pool_hit_rate() >= 0.0);
    /// assert!(stats.pool_hit_rate() <= 100.0);
    /// ```
    pub fn pool_hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        let hits = self.acquired.saturating_sub(self.allocated);
        (hits as f64 / self.acquired as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_on_empty_stats() {
        let stats = ScratchStats {
            available: 0,
            allocated: 0,
            acquired: 0,
            returned: 0,
            cache_hits: 0,
        };
        assert_eq!(stats.cache_hit_rate(), 0.0);
        assert_eq!(stats.pool_hit_rate(), 0.0);
        assert_eq!(stats.in_use(), 0);
    }

    #[test]
    fn test_rates() {
        let stats = ScratchStats {
            available: 1,
            allocated: 1,
            acquired: 4,
            returned: 3,
            cache_hits: 2,
        };
        assert_eq!(stats.in_use(), 1);
        assert_eq!(stats.cache_hit_rate(), 50.0);
        assert_eq!(stats.pool_hit_rate(), 75.0);
    }
}

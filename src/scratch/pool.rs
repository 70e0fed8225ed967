//! Lock-free scratch pool with thread-local caching.
//!
//! # Architecture
//!
//! Acquisition follows a three-tier cascade:
//!
//! 1. **Thread-local cache** (zero contention)
//! 2. **Global lock-free queue** (atomic ops only)
//! 3. **Fresh allocation** (fallback)
//!
//! # Memory Safety
//!
//! A scratch region holds a copy of buffer content while a shift is in
//! progress. Every region is zeroized, spare capacity included, before it
//! goes back to either tier, so the next user never observes it.
//!
//! The thread-local stash is shared by all pools used on a thread. Regions
//! are interchangeable, so a region may come back to a different pool than
//! the one that allocated it.
//!
//! A region that grew past [`ScratchConfig`]'s retain limit (a shift on a
//! large buffer) stays out of the global queue. Each thread stashes at most
//! one such region, so repeated shifts on the same large buffer reuse it.

use super::config::ScratchConfig;
use super::stats::ScratchStats;
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Lock-free queue with approximate size tracking
// ---------------------------------------------------------------------------

/// Wrapper around `crossbeam::SegQueue` that tracks an approximate length.
///
/// The counter and the queue are **not** updated atomically, so `len()` may
/// be briefly stale.  This is acceptable for pool-sizing heuristics.
struct LockFreeQueue<T> {
    items: crossbeam::queue::SegQueue<T>,
    size: AtomicUsize,
}

impl<T> LockFreeQueue<T> {
    fn new() -> Self {
        Self {
            items: crossbeam::queue::SegQueue::new(),
            size: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn push(&self, item: T) {
        self.items.push(item);
        self.size.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn pop(&self) -> Option<T> {
        self.items.pop().inspect(|_| {
            self.size.fetch_sub(1, Ordering::Relaxed);
        })
    }

    /// Approximate queue length; may be briefly stale.
    #[inline]
    fn len(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

struct ScratchStatsInner {
    allocated: AtomicUsize,
    acquired: AtomicUsize,
    returned: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl ScratchStatsInner {
    fn new() -> Self {
        Self {
            allocated: AtomicUsize::new(0),
            acquired: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Thread-local cache
// ---------------------------------------------------------------------------

/// Maximum number of regions per thread-local cache.
const THREAD_CACHE_CAPACITY: usize = 4;

thread_local! {
    /// Per-thread region stash, freed on thread exit.
    static THREAD_CACHE: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

static GLOBAL_POOL: LazyLock<ScratchPool> =
    LazyLock::new(|| ScratchPool::new(ScratchConfig::default()));

/// Returns the process-wide pool used by insert and prepend.
#[inline]
pub fn global() -> &'static ScratchPool {
    &GLOBAL_POOL
}

// ---------------------------------------------------------------------------
// ScratchPool
// ---------------------------------------------------------------------------

/// Pool of reusable scratch regions.
///
/// # Example
///
/// ```rust
/// use boundbuf::prelude::*;
///
/// let pool = ScratchPool::new(ScratchConfig {
///     buffer_size: 256,
///     max_pool_size: 8,
///     min_pool_size: 2,
/// });
/// {
///     let mut scratch = pool.acquire();
///     scratch.extend_from_slice(b"tail bytes");
///     assert_eq!(&scratch[..], b"tail bytes");
/// } // wiped and returned
///
/// assert_eq!(pool.stats().returned, 1);
/// ```
pub struct ScratchPool {
    global_pool: LockFreeQueue<Vec<u8>>,
    config: ScratchConfig,
    stats: ScratchStatsInner,
}

impl ScratchPool {
    /// Creates a new pool and pre-warms it with `config.min_pool_size` regions.
    pub fn new(config: ScratchConfig) -> Self {
        let queue = LockFreeQueue::new();
        for _ in 0..config.min_pool_size.min(config.max_pool_size) {
            queue.push(Vec::with_capacity(config.buffer_size));
        }
        Self {
            global_pool: queue,
            config,
            stats: ScratchStatsInner::new(),
        }
    }

    /// Acquires an empty region using the three-tier cascade.
    ///
    /// The returned [`Scratch`] is wiped and handed back when it goes out of
    /// scope.
    #[inline]
    pub fn acquire(&self) -> Scratch<'_> {
        self.stats.acquired.fetch_add(1, Ordering::Relaxed);

        // Tier 1: thread-local cache (no synchronisation).
        let cached = THREAD_CACHE
            .try_with(|cache| cache.borrow_mut().pop())
            .ok()
            .flatten();
        if let Some(region) = cached {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Scratch { region, pool: self };
        }

        // Tier 2: global lock-free queue.
        if let Some(region) = self.global_pool.pop() {
            return Scratch { region, pool: self };
        }

        // Tier 3: fresh allocation.
        self.stats.allocated.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            target: "boundbuf::scratch",
            capacity = self.config.buffer_size,
            "allocating scratch region"
        );
        Scratch {
            region: Vec::with_capacity(self.config.buffer_size),
            pool: self,
        }
    }

    /// Number of regions currently idle in the global queue.
    ///
    /// Does **not** include regions held in thread-local caches.
    #[inline]
    pub fn available(&self) -> usize {
        self.global_pool.len()
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    /// Returns a snapshot of pool statistics.
    ///
    /// All counters use `Relaxed` ordering; values are eventually consistent.
    pub fn stats(&self) -> ScratchStats {
        ScratchStats {
            available: self.global_pool.len(),
            allocated: self.stats.allocated.load(Ordering::Relaxed),
            acquired: self.stats.acquired.load(Ordering::Relaxed),
            returned: self.stats.returned.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
        }
    }

    /// Drains the global queue to zero.
    ///
    /// Thread-local caches are untouched.
    pub fn clear(&self) {
        while self.global_pool.pop().is_some() {}
    }

    /// Pre-allocates regions until the global queue holds about
    /// `target_size` (capped at `max_pool_size`).
    pub fn warm(&self, target_size: usize) {
        let target = target_size.min(self.config.max_pool_size);
        let current = self.global_pool.len();
        for _ in current..target {
            self.global_pool.push(Vec::with_capacity(self.config.buffer_size));
        }
    }

    /// Moves the calling thread's cached regions to the global queue (where
    /// space permits) or frees them. Oversized regions are always freed.
    pub fn clear_thread_cache(&self) {
        let limit = self.config.retain_limit();
        let _ = THREAD_CACHE.try_with(|cache| {
            let mut cache = cache.borrow_mut();
            while let Some(region) = cache.pop() {
                if region.capacity() <= limit
                    && self.global_pool.len() < self.config.max_pool_size
                {
                    self.global_pool.push(region);
                }
            }
        });
    }

    fn recycle(&self, mut region: Vec<u8>) {
        // Wipes the spare capacity too and leaves the length at 0.
        region.zeroize();
        self.stats.returned.fetch_add(1, Ordering::Relaxed);

        let limit = self.config.retain_limit();
        let oversized = region.capacity() > limit;

        let mut region = Some(region);
        let _ = THREAD_CACHE.try_with(|cache| {
            let mut cache = cache.borrow_mut();
            if cache.len() >= THREAD_CACHE_CAPACITY {
                return;
            }
            // One oversized region per thread
            if oversized && cache.iter().any(|cached| cached.capacity() > limit) {
                return;
            }
            if let Some(region) = region.take() {
                cache.push(region);
            }
        });

        if oversized {
            if let Some(region) = region {
                tracing::trace!(
                    target: "boundbuf::scratch",
                    capacity = region.capacity(),
                    "freeing oversized scratch region"
                );
            }
            return;
        }

        // Best-effort size cap: the counter and the queue are not updated together.
        if let Some(region) = region {
            if self.global_pool.len() < self.config.max_pool_size {
                self.global_pool.push(region);
            }
        }
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new(ScratchConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Scratch
// ---------------------------------------------------------------------------

/// A region borrowed from a [`ScratchPool`]. Always starts empty.
pub struct Scratch<'p> {
    region: Vec<u8>,
    pool: &'p ScratchPool,
}

impl Deref for Scratch<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.region
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.region
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        self.pool.recycle(std::mem::take(&mut self.region));
    }
}

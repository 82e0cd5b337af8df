//! Atomic pool statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for pool usage.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of acquires served by an existing free slot.
    pub reuses: u64,
    /// Number of acquires that had to create a slot (container grew).
    pub growths: u64,
    /// Number of releases for tickets the pool does not hold.
    pub stray_releases: u64,
}

impl PoolStats {
    /// Combine two snapshots, summing each counter.
    #[must_use]
    pub fn merged(self, other: &PoolStats) -> Self {
        Self {
            reuses: self.reuses + other.reuses,
            growths: self.growths + other.growths,
            stray_releases: self.stray_releases + other.stray_releases,
        }
    }
}

/// Atomic pool statistics for lock-free updates.
pub struct AtomicPoolStats {
    reuses: AtomicU64,
    growths: AtomicU64,
    stray_releases: AtomicU64,
}

impl AtomicPoolStats {
    /// Create new zeroed stats.
    pub fn new() -> Self {
        Self {
            reuses: AtomicU64::new(0),
            growths: AtomicU64::new(0),
            stray_releases: AtomicU64::new(0),
        }
    }

    /// Take a snapshot of current stats.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            reuses: self.reuses.load(Ordering::Relaxed),
            growths: self.growths.load(Ordering::Relaxed),
            stray_releases: self.stray_releases.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.reuses.store(0, Ordering::Relaxed);
        self.growths.store(0, Ordering::Relaxed);
        self.stray_releases.store(0, Ordering::Relaxed);
    }

    /// Increment the reuse counter.
    pub fn record_reuse(&self) {
        self.reuses.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the growth counter.
    pub fn record_growth(&self) {
        self.growths.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the stray-release counter.
    pub fn record_stray_release(&self) {
        self.stray_releases.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AtomicPoolStats {
    fn default() -> Self {
        Self::new()
    }
}

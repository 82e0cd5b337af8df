//! Coarse-lock registry for hosts with more than one thread.
//!
//! Acquire and release are the only mutating operations and both are short,
//! so a single mutex around the whole registry is enough. Single-threaded
//! hosts should use `PoolRegistry` directly and skip the lock.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use repool_core::error::PoolError;
use repool_core::registry::PoolRegistry;
use repool_core::stats::PoolStats;
use repool_core::ticket::PoolTicket;

/// Cloneable handle to a mutex-guarded [`PoolRegistry`].
pub struct SharedRegistry<K, T> {
    inner: Arc<Mutex<PoolRegistry<K, T>>>,
}

impl<K, T> Clone for SharedRegistry<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> SharedRegistry<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    /// Wrap a registry for shared use.
    pub fn new(registry: PoolRegistry<K, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Eagerly create the pool for `key`. See `PoolRegistry::warm`.
    pub fn warm(&self, key: K, size: usize) -> Result<(), PoolError> {
        self.inner.lock().warm(key, size)
    }

    /// Acquire an item of the given kind. See `PoolRegistry::acquire`.
    pub fn acquire(&self, key: K) -> PoolTicket {
        self.inner.lock().acquire(key)
    }

    /// Return an item to its pool. See `PoolRegistry::release`.
    pub fn release(&self, ticket: PoolTicket) -> bool {
        self.inner.lock().release(ticket)
    }

    /// Run a closure against the item behind a live ticket.
    ///
    /// The lock is held for the duration of the closure; keep it short.
    pub fn with_item<R>(&self, ticket: PoolTicket, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut registry = self.inner.lock();
        registry.get_mut(ticket).map(f)
    }

    /// Total number of items currently handed out.
    pub fn in_use(&self) -> usize {
        self.inner.lock().in_use()
    }

    /// Number of pools created so far.
    pub fn pool_count(&self) -> usize {
        self.inner.lock().pool_count()
    }

    /// Usage statistics summed over every pool.
    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}

impl<K, T> fmt::Debug for SharedRegistry<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRegistry").finish_non_exhaustive()
    }
}

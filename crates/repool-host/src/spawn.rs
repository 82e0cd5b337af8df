//! Spawn/despawn adapters over the raw acquire/release contract.
//!
//! Pooled items usually carry host state that must be toggled when they go in
//! and out of service (visibility, physics registration, timers). The
//! [`Reusable`] hooks centralize that toggling so call sites don't repeat it.

use std::fmt;
use std::hash::Hash;

use repool_core::registry::PoolRegistry;
use repool_core::ticket::PoolTicket;

use crate::recycler::Recycler;

/// Host hooks run when a pooled item enters or leaves service.
pub trait Reusable {
    /// Bring the item into service (freshly produced or recycled).
    fn activate(&mut self);

    /// Take the item out of service; it stays pooled for the next spawn.
    fn deactivate(&mut self);
}

/// Acquire and activate an item of the given kind.
pub fn spawn<K, T>(registry: &mut PoolRegistry<K, T>, key: K) -> PoolTicket
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Reusable + 'static,
{
    spawn_with(registry, key, |_| {})
}

/// Acquire, activate, and run an init closure on the item before handing the
/// ticket back. The closure sees the item already activated.
pub fn spawn_with<K, T>(
    registry: &mut PoolRegistry<K, T>,
    key: K,
    init: impl FnOnce(&mut T),
) -> PoolTicket
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Reusable + 'static,
{
    let ticket = registry.acquire(key);
    if let Some(item) = registry.get_mut(ticket) {
        item.activate();
        init(item);
    }
    ticket
}

/// Deactivate and release immediately.
pub fn despawn<K, T>(registry: &mut PoolRegistry<K, T>, ticket: PoolTicket) -> bool
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Reusable + 'static,
{
    if let Some(item) = registry.get_mut(ticket) {
        item.deactivate();
    }
    registry.release(ticket)
}

/// Deactivate now, release at the host's next drain.
pub fn despawn_deferred<K, T>(
    registry: &mut PoolRegistry<K, T>,
    recycler: &Recycler,
    ticket: PoolTicket,
) where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Reusable + 'static,
{
    if let Some(item) = registry.get_mut(ticket) {
        item.deactivate();
    }
    recycler.recycle(ticket);
}

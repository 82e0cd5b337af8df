//! Key-to-container multiplexing.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::container::PoolContainer;
use crate::error::PoolError;
use crate::stats::PoolStats;
use crate::ticket::PoolTicket;

/// Number of slots a lazily created container starts with.
pub const DEFAULT_POOL_SIZE: usize = 1;

/// Routes acquire/release calls to one [`PoolContainer`] per key.
///
/// Containers are created lazily on the first `acquire` for an unseen key, or
/// eagerly via [`warm`](Self::warm). Once created, a container lives as long
/// as the registry. Releases are routed by ticket alone; callers never need
/// to remember which key an item came from.
///
/// The registry is an explicit value: construct it where the application
/// composes its state and pass it to whoever needs it.
pub struct PoolRegistry<K, T> {
    spawner: Arc<dyn Fn(&K) -> T + Send + Sync>,
    containers: HashMap<K, PoolContainer<T>>,
    routes: HashMap<PoolTicket, K>,
    next_tag: u32,
}

impl<K, T> PoolRegistry<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: 'static,
{
    /// Create a registry around a master factory.
    ///
    /// The spawner is invoked with the key whenever a container of that key
    /// needs a new item, at warm-up or on growth.
    pub fn new(spawner: impl Fn(&K) -> T + Send + Sync + 'static) -> Self {
        Self {
            spawner: Arc::new(spawner),
            containers: HashMap::new(),
            routes: HashMap::new(),
            next_tag: 0,
        }
    }

    /// Eagerly create the pool for `key` with `size` slots.
    ///
    /// Fails with [`PoolError::PoolExists`] if the pool is already there,
    /// whether it came from an earlier `warm` or from a lazy `acquire`.
    /// Double-warming points at a configuration bug, so it surfaces instead
    /// of being swallowed.
    pub fn warm(&mut self, key: K, size: usize) -> Result<(), PoolError> {
        if self.containers.contains_key(&key) {
            return Err(PoolError::PoolExists(format!("{key:?}")));
        }
        let container = self.build_container(&key, size);
        self.containers.insert(key, container);
        Ok(())
    }

    /// Acquire an item of the given kind.
    ///
    /// An unseen key gets a [`DEFAULT_POOL_SIZE`] container on the spot; this
    /// is the normal path and never errors. The returned ticket is recorded
    /// in the reverse route so [`release`](Self::release) can find its way
    /// back without the key.
    pub fn acquire(&mut self, key: K) -> PoolTicket {
        let ticket = match self.containers.get_mut(&key) {
            Some(container) => container.acquire(),
            None => {
                tracing::debug!(key = ?key, size = DEFAULT_POOL_SIZE, "lazily creating pool");
                let mut container = self.build_container(&key, DEFAULT_POOL_SIZE);
                let ticket = container.acquire();
                self.containers.insert(key.clone(), container);
                ticket
            }
        };
        self.routes.insert(ticket, key);
        ticket
    }

    /// Return an item to whichever pool produced it.
    ///
    /// A ticket no pool holds is absorbed with a diagnostic, same as the
    /// container-level policy.
    pub fn release(&mut self, ticket: PoolTicket) -> bool {
        match self.routes.remove(&ticket) {
            Some(key) => self
                .containers
                .get_mut(&key)
                .is_some_and(|container| container.release(ticket)),
            None => {
                tracing::debug!(%ticket, "no pool holds this ticket");
                false
            }
        }
    }

    /// Borrow the item behind a live ticket.
    pub fn get(&self, ticket: PoolTicket) -> Option<&T> {
        let key = self.routes.get(&ticket)?;
        self.containers.get(key)?.get(ticket)
    }

    /// Mutably borrow the item behind a live ticket.
    pub fn get_mut(&mut self, ticket: PoolTicket) -> Option<&mut T> {
        let key = self.routes.get(&ticket)?;
        self.containers.get_mut(key)?.get_mut(ticket)
    }

    /// Inspect the pool of one key, if it exists yet.
    pub fn container(&self, key: &K) -> Option<&PoolContainer<T>> {
        self.containers.get(key)
    }

    /// Number of pools created so far.
    pub fn pool_count(&self) -> usize {
        self.containers.len()
    }

    /// Total number of items currently handed out, across all pools.
    pub fn in_use(&self) -> usize {
        self.routes.len()
    }

    /// Usage statistics summed over every pool.
    pub fn stats(&self) -> PoolStats {
        self.containers
            .values()
            .fold(PoolStats::default(), |acc, c| acc.merged(&c.stats()))
    }

    fn build_container(&mut self, key: &K, size: usize) -> PoolContainer<T> {
        let tag = self.next_tag;
        self.next_tag += 1;
        let spawner = Arc::clone(&self.spawner);
        let key = key.clone();
        PoolContainer::tagged(tag, move || spawner(&key), size)
    }
}

impl<K, T> fmt::Debug for PoolRegistry<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.containers.len())
            .field("in_use", &self.routes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Registry whose items record the key they were spawned for.
    fn keyed_registry() -> PoolRegistry<&'static str, String> {
        PoolRegistry::new(|key: &&str| format!("item-{key}"))
    }

    #[test]
    fn acquire_before_warm_lazily_creates_default_pool() {
        let mut registry = keyed_registry();
        let ticket = registry.acquire("spark");
        assert_eq!(registry.pool_count(), 1);
        assert_eq!(registry.container(&"spark").map(PoolContainer::len), Some(1));
        assert_eq!(registry.get(ticket).map(String::as_str), Some("item-spark"));
    }

    #[test]
    fn warm_sizes_the_pool_up_front() {
        let mut registry = keyed_registry();
        registry.warm("spark", 8).unwrap();
        assert_eq!(registry.container(&"spark").map(PoolContainer::len), Some(8));
        assert_eq!(registry.in_use(), 0);
    }

    #[test]
    fn double_warm_fails() {
        let mut registry = keyed_registry();
        registry.warm("spark", 2).unwrap();
        let err = registry.warm("spark", 2).unwrap_err();
        assert!(matches!(err, PoolError::PoolExists(_)));
    }

    #[test]
    fn warm_after_lazy_creation_fails() {
        let mut registry = keyed_registry();
        let _ = registry.acquire("spark");
        assert!(registry.warm("spark", 4).is_err());
    }

    #[test]
    fn release_routes_without_the_key() {
        let mut registry = keyed_registry();
        let a = registry.acquire("spark");
        let b = registry.acquire("smoke");
        assert_eq!(registry.in_use(), 2);

        assert!(registry.release(a));
        assert!(registry.release(b));
        assert_eq!(registry.in_use(), 0);
        assert_eq!(registry.pool_count(), 2);
    }

    #[test]
    fn released_ticket_is_absorbed_on_second_release() {
        let mut registry = keyed_registry();
        let a = registry.acquire("spark");
        assert!(registry.release(a));
        assert!(!registry.release(a));
    }

    #[test]
    fn tickets_from_different_pools_never_collide() {
        let mut registry = keyed_registry();
        let a = registry.acquire("spark");
        let b = registry.acquire("smoke");
        assert_ne!(a, b);
        assert_ne!(a.pool_tag(), b.pool_tag());
    }

    #[test]
    fn get_mut_reaches_the_routed_item() {
        let mut registry = keyed_registry();
        let a = registry.acquire("spark");
        if let Some(item) = registry.get_mut(a) {
            item.push_str("!!");
        }
        assert_eq!(registry.get(a).map(String::as_str), Some("item-spark!!"));
    }

    #[test]
    fn warmed_pool_grows_past_its_initial_size() {
        let mut registry = keyed_registry();
        registry.warm("enemy", 3).unwrap();

        let tickets: Vec<_> = (0..3).map(|_| registry.acquire("enemy")).collect();
        let mut slots: Vec<_> = tickets.iter().map(|t| t.slot_index()).collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), 3, "three acquires hand out three distinct slots");
        assert_eq!(registry.container(&"enemy").map(PoolContainer::len), Some(3));

        let fourth = registry.acquire("enemy");
        assert_eq!(registry.container(&"enemy").map(PoolContainer::len), Some(4));
        assert!(!slots.contains(&fourth.slot_index()));

        // Releasing the second item makes its slot the next free one.
        assert!(registry.release(tickets[1]));
        let again = registry.acquire("enemy");
        assert_eq!(again.slot_index(), tickets[1].slot_index());
    }

    #[test]
    fn stats_aggregate_across_pools() {
        let mut registry = keyed_registry();
        registry.warm("spark", 1).unwrap();
        let a = registry.acquire("spark");
        let _b = registry.acquire("spark"); // forces growth
        let _c = registry.acquire("smoke"); // lazy pool, reuses its warm slot
        registry.release(a);
        registry.release(a); // stray

        let stats = registry.stats();
        assert_eq!(stats.reuses, 2);
        assert_eq!(stats.growths, 1);
        assert_eq!(stats.stray_releases, 0); // stray caught at the route level
    }
}

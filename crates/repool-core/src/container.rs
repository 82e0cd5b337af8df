//! Growable set of reusable items of one kind.

use std::collections::HashMap;

use crate::slot::PoolSlot;
use crate::stats::{AtomicPoolStats, PoolStats};
use crate::ticket::PoolTicket;

/// Pool for items of one kind, with round-robin slot reuse.
///
/// The container owns every item it ever produces. `acquire` hands out a
/// [`PoolTicket`]; the item is reached through [`get`](Self::get) /
/// [`get_mut`](Self::get_mut) and returned with [`release`](Self::release).
/// When every slot is taken the container grows by exactly one slot via the
/// retained factory. Slots are never dropped while the container lives.
pub struct PoolContainer<T> {
    tag: u32,
    slots: Vec<PoolSlot<T>>,
    lookup: HashMap<PoolTicket, usize>,
    factory: Box<dyn FnMut() -> T + Send>,
    last_index: usize,
    next_stamp: u64,
    stats: AtomicPoolStats,
}

impl<T> PoolContainer<T> {
    /// Create a container and eagerly warm `initial_size` slots.
    ///
    /// The factory must produce a fresh, independent item on every call; it
    /// is retained and invoked again whenever the container grows.
    pub fn new(factory: impl FnMut() -> T + Send + 'static, initial_size: usize) -> Self {
        Self::tagged(0, factory, initial_size)
    }

    /// Like [`new`](Self::new), but tickets carry the given container tag.
    ///
    /// Tags keep tickets from distinct containers disjoint. The registry
    /// assigns a unique tag per key; standalone containers default to 0.
    pub fn tagged(
        tag: u32,
        factory: impl FnMut() -> T + Send + 'static,
        initial_size: usize,
    ) -> Self {
        let mut container = Self {
            tag,
            slots: Vec::with_capacity(initial_size),
            lookup: HashMap::with_capacity(initial_size),
            factory: Box::new(factory),
            last_index: 0,
            next_stamp: 0,
            stats: AtomicPoolStats::new(),
        };
        for _ in 0..initial_size {
            container.create_slot();
        }
        container
    }

    /// Acquire a free slot's item, growing the container if none is free.
    ///
    /// Scans at most `len` slots starting just past the persistent cursor, so
    /// reuse cycles through the whole container instead of hammering slot 0.
    /// The returned ticket is live and registered before this returns.
    pub fn acquire(&mut self) -> PoolTicket {
        let index = match self.find_free() {
            Some(index) => {
                self.stats.record_reuse();
                index
            }
            None => {
                self.stats.record_growth();
                self.create_slot()
            }
        };

        self.slots[index].consume();
        let ticket = self.mint(index);
        self.lookup.insert(ticket, index);
        ticket
    }

    /// Return an item to the container.
    ///
    /// A ticket this container does not hold (stale, foreign, or already
    /// released) is absorbed: a diagnostic is emitted and `false` comes back.
    /// Caller bugs on this path must not crash the host.
    pub fn release(&mut self, ticket: PoolTicket) -> bool {
        match self.lookup.remove(&ticket) {
            Some(index) => {
                self.slots[index].release();
                true
            }
            None => {
                self.stats.record_stray_release();
                tracing::debug!(%ticket, "this pool does not hold the ticket provided");
                false
            }
        }
    }

    /// Borrow the item behind a live ticket.
    pub fn get(&self, ticket: PoolTicket) -> Option<&T> {
        self.lookup
            .get(&ticket)
            .map(|&index| self.slots[index].item())
    }

    /// Mutably borrow the item behind a live ticket.
    pub fn get_mut(&mut self, ticket: PoolTicket) -> Option<&mut T> {
        match self.lookup.get(&ticket) {
            Some(&index) => Some(self.slots[index].item_mut()),
            None => None,
        }
    }

    /// Number of slots, warmed or grown. Never decreases.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the container has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of items currently handed out.
    pub fn in_use(&self) -> usize {
        self.lookup.len()
    }

    /// Tag carried by this container's tickets.
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Get a snapshot of usage statistics.
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Reset usage statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Advance the cursor through the slots, wrapping, until a free one is
    /// found. At most one full lap; `None` when everything is in use.
    fn find_free(&mut self) -> Option<usize> {
        let len = self.slots.len();
        for _ in 0..len {
            self.last_index = (self.last_index + 1) % len;
            if !self.slots[self.last_index].is_used() {
                return Some(self.last_index);
            }
        }
        None
    }

    /// Append one factory-produced slot. Growth never moves the cursor.
    fn create_slot(&mut self) -> usize {
        let item = (self.factory)();
        self.slots.push(PoolSlot::new(item));
        self.slots.len() - 1
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mint(&mut self, index: usize) -> PoolTicket {
        self.next_stamp += 1;
        PoolTicket::new(self.tag, index as u32, self.next_stamp)
    }
}

impl<T> std::fmt::Debug for PoolContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolContainer")
            .field("tag", &self.tag)
            .field("slots", &self.slots.len())
            .field("in_use", &self.lookup.len())
            .finish_non_exhaustive()
    }
}

//! Deferred releases, drained once per host tick.
//!
//! Producer code drops tickets into a [`Recycler`] at any point in the frame;
//! the host calls [`RecycleQueue::drain`] at a single place in its tick and
//! applies them all. The core's `release` stays synchronous and immediate,
//! queuing is purely a batching decision made here.

use std::fmt;
use std::hash::Hash;

use crossbeam_channel::{unbounded, Receiver, Sender};

use repool_core::registry::PoolRegistry;
use repool_core::ticket::PoolTicket;

/// Create a connected recycler/queue pair.
pub fn recycle_queue() -> (Recycler, RecycleQueue) {
    let (tx, rx) = unbounded();
    (Recycler { tx }, RecycleQueue { rx })
}

/// Sending half: hand clones of this to whoever despawns items.
#[derive(Clone)]
pub struct Recycler {
    tx: Sender<PoolTicket>,
}

impl Recycler {
    /// Queue a ticket for release at the next drain.
    ///
    /// The channel is unbounded, so this never blocks. A send can only fail
    /// once the draining side is gone; the ticket is dropped with a warning
    /// in that case.
    pub fn recycle(&self, ticket: PoolTicket) {
        if self.tx.send(ticket).is_err() {
            tracing::warn!(%ticket, "recycle queue is gone, dropping release");
        }
    }
}

impl fmt::Debug for Recycler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recycler")
            .field("pending", &self.tx.len())
            .finish()
    }
}

/// Draining half, owned by the host loop.
pub struct RecycleQueue {
    rx: Receiver<PoolTicket>,
}

impl RecycleQueue {
    /// Apply every queued release to the registry. Returns how many were
    /// applied. Call once per tick.
    pub fn drain<K, T>(&self, registry: &mut PoolRegistry<K, T>) -> usize
    where
        K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
        T: 'static,
    {
        let mut drained = 0;
        for ticket in self.rx.try_iter() {
            registry.release(ticket);
            drained += 1;
        }
        drained
    }

    /// Number of releases waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl fmt::Debug for RecycleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecycleQueue")
            .field("pending", &self.rx.len())
            .finish()
    }
}

//! Opaque handles for acquired items.

use std::fmt;

/// Handle to one acquired item.
///
/// Returned by `acquire` and consumed by `release`. A ticket identifies the
/// container it came from (tag), the slot it points at, and the acquisition
/// it belongs to (stamp), so a stale ticket can never alias a later
/// acquisition of the same slot.
///
/// Tickets are plain values: copy them freely, hash them, store them in
/// component data. They carry no lifetime and borrow nothing from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolTicket {
    pool: u32,
    slot: u32,
    stamp: u64,
}

impl PoolTicket {
    pub(crate) fn new(pool: u32, slot: u32, stamp: u64) -> Self {
        Self { pool, slot, stamp }
    }

    /// Tag of the container that minted this ticket.
    pub fn pool_tag(&self) -> u32 {
        self.pool
    }

    /// Index of the slot this ticket points at.
    pub fn slot_index(&self) -> usize {
        self.slot as usize
    }
}

impl fmt::Display for PoolTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.pool, self.slot, self.stamp)
    }
}

//! Property-based tests for the pool container and registry.
//!
//! These drive the public acquire/release surface with generated call
//! sequences and check the structural invariants after every step.

use proptest::prelude::*;

use repool_core::container::PoolContainer;
use repool_core::registry::PoolRegistry;
use repool_core::ticket::PoolTicket;

/// Container whose factory numbers its items 0, 1, 2, ...
fn counting(initial_size: usize) -> PoolContainer<u32> {
    let mut next = 0;
    PoolContainer::new(
        move || {
            let item = next;
            next += 1;
            item
        },
        initial_size,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// In-use count never exceeds slot count, and slot count never shrinks,
    /// no matter how acquires and releases interleave.
    #[test]
    fn usage_never_exceeds_capacity(initial in 0usize..8, ops in prop::collection::vec(any::<u8>(), 0..200)) {
        let mut container = counting(initial);
        let mut live: Vec<PoolTicket> = Vec::new();
        let mut last_len = container.len();

        for op in ops {
            if live.is_empty() || op % 2 == 0 {
                live.push(container.acquire());
            } else {
                let victim = live.remove(usize::from(op / 2) % live.len());
                prop_assert!(container.release(victim));
            }

            prop_assert!(container.in_use() <= container.len());
            prop_assert!(container.len() >= last_len, "slot count must never shrink");
            prop_assert_eq!(container.in_use(), live.len());
            last_len = container.len();
        }
    }

    /// A fresh size-N container serves N acquires without growing; the
    /// (N+1)-th acquire grows it by exactly one slot.
    #[test]
    fn growth_happens_exactly_on_exhaustion(n in 1usize..32) {
        let mut container = counting(n);

        let tickets: Vec<_> = (0..n).map(|_| container.acquire()).collect();
        prop_assert_eq!(container.len(), n);

        let mut slots: Vec<_> = tickets.iter().map(PoolTicket::slot_index).collect();
        slots.sort_unstable();
        slots.dedup();
        prop_assert_eq!(slots.len(), n, "every acquire got its own slot");

        let overflow = container.acquire();
        prop_assert_eq!(container.len(), n + 1);
        prop_assert_eq!(container.stats().growths, 1);
        prop_assert!(container.get(overflow).is_some());
    }

    /// Round-robin: acquire K, release all K, acquire K again. With K < N and
    /// no growth, the second batch of slots is the first batch rotated by K.
    #[test]
    fn reuse_rotates_through_the_slots(n in 2usize..16, k_seed in 1usize..16) {
        let k = 1 + k_seed % (n - 1).max(1);
        prop_assume!(k < n);

        let mut container = counting(n);
        let first: Vec<_> = (0..k).map(|_| container.acquire()).collect();
        for ticket in &first {
            prop_assert!(container.release(*ticket));
        }
        let second: Vec<_> = (0..k).map(|_| container.acquire()).collect();

        prop_assert_eq!(container.len(), n, "no growth below capacity");
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!((a.slot_index() + k) % n, b.slot_index());
        }
    }

    /// A release the container never dispensed changes nothing.
    #[test]
    fn stray_release_is_a_noop(n in 1usize..8, acquires in 0usize..8) {
        let mut container = counting(n);
        let live: Vec<_> = (0..acquires).map(|_| container.acquire()).collect();
        let len_before = container.len();
        let in_use_before = container.in_use();

        let mut foreign_source = PoolContainer::tagged(7, || 0u32, 1);
        let foreign = foreign_source.acquire();
        prop_assert!(!container.release(foreign));

        prop_assert_eq!(container.len(), len_before);
        prop_assert_eq!(container.in_use(), in_use_before);
        for ticket in &live {
            prop_assert!(container.get(*ticket).is_some(), "live tickets stay live");
        }
    }

    /// Registry bookkeeping stays consistent across keys: the route table
    /// matches the per-container in-use totals at every step.
    #[test]
    fn registry_routes_stay_consistent(ops in prop::collection::vec((0u8..4, any::<u8>()), 0..120)) {
        let keys = ["spark", "smoke", "ember", "ash"];
        let mut registry: PoolRegistry<&str, u64> = PoolRegistry::new(|_| 0);
        let mut live: Vec<PoolTicket> = Vec::new();

        for (key_index, op) in ops {
            let key = keys[usize::from(key_index)];
            if live.is_empty() || op % 2 == 0 {
                live.push(registry.acquire(key));
            } else {
                let victim = live.remove(usize::from(op / 2) % live.len());
                prop_assert!(registry.release(victim));
            }

            prop_assert_eq!(registry.in_use(), live.len());
            let pooled: usize = keys
                .iter()
                .filter_map(|k| registry.container(k))
                .map(PoolContainer::in_use)
                .sum();
            prop_assert_eq!(pooled, live.len());
        }
    }
}

/// The concrete end-to-end scenario: warm three enemies, run the pool past
/// its capacity, and watch a released slot come back around.
#[test]
fn enemy_pool_scenario() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let spawned = AtomicU32::new(0);
    let mut registry: PoolRegistry<&str, u32> =
        PoolRegistry::new(move |_key| spawned.fetch_add(1, Ordering::Relaxed) + 1);

    registry.warm("enemy", 3).unwrap();

    let first: Vec<_> = (0..3).map(|_| registry.acquire("enemy")).collect();
    let mut slots: Vec<_> = first.iter().map(PoolTicket::slot_index).collect();
    slots.sort_unstable();
    slots.dedup();
    assert_eq!(slots.len(), 3, "three acquires yield three distinct items");

    let fourth = registry.acquire("enemy");
    assert_eq!(
        registry.container(&"enemy").map(PoolContainer::len),
        Some(4),
        "fourth acquire grows the pool to four slots"
    );
    assert!(!slots.contains(&fourth.slot_index()));

    let second_item = *registry.get(first[1]).unwrap();
    assert!(registry.release(first[1]));
    let reacquired = registry.acquire("enemy");
    assert_eq!(reacquired.slot_index(), first[1].slot_index());
    assert_eq!(registry.get(reacquired), Some(&second_item), "slot reuse hands the same item back");
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use repool_core::container::PoolContainer;
use repool_core::ticket::PoolTicket;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks the warm size, the rest is the op script.
    let initial = usize::from(data[0] % 16);
    let mut container: PoolContainer<u64> = PoolContainer::new(|| 0, initial);
    let mut live: Vec<PoolTicket> = Vec::new();
    let mut last_len = container.len();

    for &op in &data[1..] {
        match op % 3 {
            0 => {
                let ticket = container.acquire();
                assert!(container.get(ticket).is_some(), "fresh ticket must be live");
                live.push(ticket);
            }
            1 if !live.is_empty() => {
                let victim = live.remove(usize::from(op / 3) % live.len());
                assert!(container.release(victim), "live ticket must release");
                assert!(container.get(victim).is_none(), "released ticket is stale");
            }
            _ => {
                // A double release must be absorbed, never crash.
                if let Some(&stale) = live.first() {
                    container.release(stale);
                    container.release(stale);
                    live.retain(|t| *t != stale);
                }
            }
        }

        assert!(container.in_use() <= container.len());
        assert!(container.len() >= last_len, "slot count must never shrink");
        assert_eq!(container.in_use(), live.len());
        last_len = container.len();
    }
});

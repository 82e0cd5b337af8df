//! Application entry point: the soak run.
//!
//! Drives a registry of pooled particle kinds the way a game loop would:
//! spawn bursts every tick, expiry through the deferred recycle queue, and a
//! stats report at the end.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use repool_core::container::PoolContainer;
use repool_core::registry::PoolRegistry;
use repool_core::ticket::PoolTicket;
use repool_host::recycler::recycle_queue;
use repool_host::spawn::{despawn_deferred, spawn_with, Reusable};
use repool_persist::profile::SaveProfile;
use repool_persist::store::SaveStore;

use crate::config::AppConfig;
use crate::version;

/// One pooled particle in the soak run.
#[derive(Debug, Default)]
struct Particle {
    active: bool,
    energy: u32,
}

impl Reusable for Particle {
    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.energy = 0;
    }
}

/// What a finished run reports, and what `--report` persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Ticks simulated.
    pub ticks: u32,
    /// Pooled kinds.
    pub kinds: usize,
    /// Total spawns over the whole run.
    pub spawned: u64,
    /// Slots across all pools at the end of the run.
    pub slots: usize,
    /// Acquires served by an existing free slot.
    pub reuses: u64,
    /// Acquires that had to grow a pool.
    pub growths: u64,
    /// Releases of tickets no pool held.
    pub stray_releases: u64,
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "repool", &mut std::io::stdout());
        return Ok(());
    }

    tracing::info!(version = version::version(), "starting soak run");

    let report = soak(config)?;
    present(config, &report);

    if let Some(name) = &config.report {
        let store = match &config.save_dir {
            Some(dir) => SaveStore::new(dir),
            None => SaveStore::default_location(),
        };
        store.save(&SaveProfile::new(name.clone(), report))?;
    }

    Ok(())
}

fn soak(config: &AppConfig) -> Result<RunReport> {
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let kinds: Vec<String> = (0..config.kinds).map(|i| format!("kind-{i}")).collect();

    let mut registry: PoolRegistry<String, Particle> =
        PoolRegistry::new(|_key: &String| Particle::default());
    for kind in &kinds {
        registry.warm(kind.clone(), config.warm)?;
    }

    let (recycler, queue) = recycle_queue();
    let mut live: Vec<(PoolTicket, u32)> = Vec::new();
    let mut spawned: u64 = 0;
    let ttl = config.ttl.max(1);

    for tick in 0..config.ticks {
        // Expired items go through the deferred queue, the way a host hands
        // them off mid-frame, then the drain applies them in one place.
        let mut index = 0;
        while index < live.len() {
            if live[index].1 <= tick {
                let (ticket, _) = live.swap_remove(index);
                despawn_deferred(&mut registry, &recycler, ticket);
            } else {
                index += 1;
            }
        }
        queue.drain(&mut registry);

        if !kinds.is_empty() {
            for _ in 0..config.spawn_per_tick {
                let kind = kinds[rng.usize(..kinds.len())].clone();
                let energy = rng.u32(..100);
                let ticket = spawn_with(&mut registry, kind, |p| p.energy = energy);
                live.push((ticket, tick + 1 + rng.u32(..ttl)));
                spawned += 1;
            }
        }

        if config.verbose {
            tracing::info!(
                tick,
                in_use = registry.in_use(),
                pending = queue.pending(),
                "tick complete"
            );
        }
    }

    // Wind down: everything still live goes back through the queue once.
    for (ticket, _) in live.drain(..) {
        despawn_deferred(&mut registry, &recycler, ticket);
    }
    queue.drain(&mut registry);

    let stats = registry.stats();
    let slots = kinds
        .iter()
        .filter_map(|kind| registry.container(kind))
        .map(PoolContainer::len)
        .sum();

    Ok(RunReport {
        ticks: config.ticks,
        kinds: kinds.len(),
        spawned,
        slots,
        reuses: stats.reuses,
        growths: stats.growths,
        stray_releases: stats.stray_releases,
    })
}

fn present(config: &AppConfig, report: &RunReport) {
    if config.quiet {
        println!(
            "{} ticks, {} spawned, {} slots, {} reuses, {} growths",
            report.ticks, report.spawned, report.slots, report.reuses, report.growths
        );
        return;
    }

    println!(
        "repool soak: {} ticks over {} kinds",
        report.ticks, report.kinds
    );
    println!("  spawned         {}", report.spawned);
    println!("  slots           {}", report.slots);
    println!("  reuses          {}", report.reuses);
    println!("  growths         {}", report.growths);
    println!("  stray releases  {}", report.stray_releases);
}

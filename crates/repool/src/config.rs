//! Application configuration from CLI flags and environment.

use clap::Parser;

/// repool — keyed object pools with round-robin reuse.
///
/// Runs a soak pass over a registry of pooled particle kinds: spawn bursts
/// every tick, recycle through a deferred queue, print the pool statistics.
#[derive(Parser, Debug)]
#[command(name = "repool", version, about)]
pub struct AppConfig {
    /// Number of item kinds to pool.
    #[arg(long, default_value = "3")]
    pub kinds: usize,

    /// Slots to pre-warm for each kind.
    #[arg(long, default_value = "4")]
    pub warm: usize,

    /// Host ticks to simulate.
    #[arg(short, long, default_value = "100", env = "REPOOL_TICKS")]
    pub ticks: u32,

    /// Spawns attempted per tick.
    #[arg(long, default_value = "8")]
    pub spawn_per_tick: usize,

    /// Ticks an item stays live before it is despawned.
    #[arg(long, default_value = "3")]
    pub ttl: u32,

    /// Seed for the spawn pattern.
    #[arg(short, long, default_value = "7")]
    pub seed: u64,

    /// Save the run report as a profile under this name.
    #[arg(long)]
    pub report: Option<String>,

    /// Directory for saved reports (defaults to the standard location).
    #[arg(long)]
    pub save_dir: Option<std::path::PathBuf>,

    /// Quiet mode (only the final summary line).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose per-tick output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

//! RangeCache harness - replays a skewed workload with and without the cache

mod replay;

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use rangestore::{Workload, WorkloadConfig};
use tracing::{info, warn};

use crate::replay::{replay_cached, replay_uncached, save_workload};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backing array length
    #[arg(short = 'n', long, default_value_t = 100_000)]
    len: usize,

    /// Number of operations to generate
    #[arg(short, long, default_value_t = 50_000)]
    queries: usize,

    /// Cache capacity (number of intervals)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Number of hot intervals
    #[arg(long, default_value_t = 30)]
    hot_pool: usize,

    /// Probability that a read hits the hot pool
    #[arg(long, default_value_t = 0.95)]
    p_hot: f64,

    /// Probability that an operation is a write
    #[arg(long, default_value_t = 0.03)]
    p_update: f64,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Workload configuration file (JSON); overrides the generator flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the generated workload to this file (JSON)
    #[arg(long)]
    save_workload: Option<PathBuf>,
}

impl Args {
    fn workload_config(&self) -> Result<WorkloadConfig> {
        if let Some(path) = &self.config {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()));
        }

        Ok(WorkloadConfig {
            array_len: self.len,
            queries: self.queries,
            hot_pool: self.hot_pool,
            p_hot: self.p_hot,
            p_update: self.p_update,
            seed: self.seed,
            ..WorkloadConfig::default()
        })
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = args.workload_config()?;

    info!("Starting rangebench v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Array length: {}, queries: {}, seed: {}",
        config.array_len, config.queries, config.seed
    );
    info!("Cache capacity: {}", args.capacity);

    let workload = Workload::generate(&config)?;
    info!(
        "Generated {} range and {} update operations",
        workload.range_count(),
        workload.update_count()
    );

    if let Some(path) = &args.save_workload {
        save_workload(path, &workload)?;
        info!("Workload written to {}", path.display());
    }

    let baseline = replay_uncached(&workload)?;
    info!("Without cache: {:.2?}", baseline.elapsed);

    let cached = replay_cached(&workload, args.capacity)?;
    info!("LRU cache:     {:.2?}", cached.elapsed);

    if baseline.sums != cached.sums {
        let first = baseline
            .sums
            .iter()
            .zip(&cached.sums)
            .position(|(a, b)| a != b);
        bail!("cached results diverge from direct recomputation at read {:?}", first);
    }
    if baseline.final_array != cached.final_array {
        bail!("cached replay left a different array");
    }

    let speedup = baseline.elapsed.as_secs_f64() / cached.elapsed.as_secs_f64().max(f64::EPSILON);
    info!("Results identical across {} reads (speedup x{:.1})", cached.sums.len(), speedup);
    info!("Cache stats: {}", cached.stats);

    if cached.stats.hit_ratio() < 0.5 && config.p_hot > 0.5 {
        warn!("Hit ratio below 50% on a hot workload; capacity may be too small");
    }

    Ok(())
}

//! Timed workload replays

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use anyhow::Context;
use rangecache::{CacheStats, RangeSumCache};
use rangestore::{oracle, Result, Workload};
use tracing::debug;

/// Outcome of one replay
pub struct Replay {
    pub sums: Vec<i128>,
    pub final_array: Vec<i64>,
    pub elapsed: Duration,
    pub stats: CacheStats,
}

/// Replay by direct recomputation
pub fn replay_uncached(workload: &Workload) -> Result<Replay> {
    let mut array = workload.initial.clone();

    let start = Instant::now();
    let sums = oracle::run(&mut array, &workload.ops)?;
    let elapsed = start.elapsed();

    Ok(Replay {
        sums,
        final_array: array,
        elapsed,
        stats: CacheStats::new(),
    })
}

/// Replay through a fresh cache of `capacity` intervals
pub fn replay_cached(workload: &Workload, capacity: usize) -> Result<Replay> {
    let mut array = workload.initial.clone();
    let mut cache = RangeSumCache::with_capacity(capacity)?;

    let start = Instant::now();
    let sums = cache.run(&mut array, &workload.ops)?;
    let elapsed = start.elapsed();
    debug!("{} intervals live after replay", cache.len());

    Ok(Replay {
        sums,
        final_array: array,
        elapsed,
        stats: cache.stats().clone(),
    })
}

/// Write `workload` to `path` as JSON, flushing before returning
pub fn save_workload(path: &Path, workload: &Workload) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, workload)
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

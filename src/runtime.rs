//! Worker thread configuration for the counting phase.

use std::fmt;

use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;

/// Environment variables consulted for a thread count, in priority order.
const ENV_HINTS: [&str; 3] = ["QUEENS_THREADS", "RAYON_NUM_THREADS", "OMP_NUM_THREADS"];

/// Where a worker count came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadSource {
    Requested,
    Env(&'static str),
    AvailableParallelism,
}

impl fmt::Display for ThreadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => f.write_str("--threads"),
            Self::Env(key) => f.write_str(key),
            Self::AvailableParallelism => f.write_str("available parallelism"),
        }
    }
}

/// Resolved worker count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadConfig {
    pub count: usize,
    pub source: ThreadSource,
}

/// Picks the worker count: explicit request, then environment hints, then
/// the available parallelism. Zero or unparsable values are skipped.
pub fn detect_thread_config(requested: Option<usize>) -> ThreadConfig {
    resolve(requested, |key| std::env::var(key).ok())
}

fn resolve(requested: Option<usize>, lookup: impl Fn(&str) -> Option<String>) -> ThreadConfig {
    if let Some(count) = requested.filter(|&count| count > 0) {
        return ThreadConfig {
            count,
            source: ThreadSource::Requested,
        };
    }

    let hinted = ENV_HINTS.iter().find_map(|&key| {
        let count = lookup(key)?.trim().parse::<usize>().ok()?;
        (count > 0).then_some(ThreadConfig {
            count,
            source: ThreadSource::Env(key),
        })
    });

    hinted.unwrap_or_else(|| ThreadConfig {
        count: std::thread::available_parallelism().map_or(1, |n| n.get()),
        source: ThreadSource::AvailableParallelism,
    })
}

/// Builds the global rayon pool. Must be called at most once per process.
pub fn configure_thread_pool(requested: Option<usize>) -> Result<ThreadConfig> {
    let config = detect_thread_config(requested);
    ThreadPoolBuilder::new()
        .num_threads(config.count)
        .thread_name(|i| format!("queens-worker-{i}"))
        .build_global()
        .with_context(|| format!("failed to start {} worker threads", config.count))?;
    Ok(config)
}

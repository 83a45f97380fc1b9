// src/scheduler/worker_pool.rs

use std::fmt;

use log::{info, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::utils::SimulationError;

/// Jobs per worker thread when splitting a slice into chunks.
pub const OVERSUBSCRIPTION: usize = 4;

/// Chunk length for `n` items spread over `threads` workers.
///
/// ```
/// use rs_barnes_hut::scheduler::chunk_size;
///
/// assert_eq!(chunk_size(100_000, 8, 64), 3125);
/// assert_eq!(chunk_size(1000, 8, 64), 64);
/// assert_eq!(chunk_size(0, 8, 64), 64);
/// ```
pub fn chunk_size(n: usize, threads: usize, min_chunk_size: usize) -> usize {
    let jobs = threads.max(1) * OVERSUBSCRIPTION;
    (n / jobs).max(min_chunk_size).max(1)
}

/// A fixed-size pool of worker threads owned by one engine.
///
/// The threads are joined when the pool is dropped.
pub struct WorkerPool {
    pool: ThreadPool,
    min_chunk_size: usize,
}

impl WorkerPool {
    /// Builds a pool with `threads` workers; `0` picks rayon's default (one per core).
    pub fn new(threads: usize, min_chunk_size: usize) -> Result<Self, SimulationError> {
        if min_chunk_size == 0 {
            return Err(SimulationError::CalculationError(
                "min_chunk_size must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("bh-worker-{}", i))
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;

        info!(
            "Worker pool started with {} threads (min chunk {})",
            pool.current_num_threads(),
            min_chunk_size
        );

        Ok(Self { pool, min_chunk_size })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    /// Chunk length this pool uses for `n` items.
    pub fn chunk_size(&self, n: usize) -> usize {
        chunk_size(n, self.threads(), self.min_chunk_size)
    }

    /// Runs `f` on every element of `items`, one job per contiguous chunk.
    ///
    /// Each job only sees its own chunk. Returns once every job has finished.
    pub fn for_each_chunk<T, F>(&self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync,
    {
        if items.is_empty() {
            return;
        }

        let size = self.chunk_size(items.len());
        trace!(
            "Dispatching {} items in chunks of {} ({} jobs)",
            items.len(),
            size,
            items.len().div_ceil(size)
        );

        self.pool.install(|| {
            items
                .par_chunks_mut(size)
                .for_each(|chunk| chunk.iter_mut().for_each(&f));
        });
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads())
            .field("min_chunk_size", &self.min_chunk_size)
            .finish()
    }
}

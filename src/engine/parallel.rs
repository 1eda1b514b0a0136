//! Builds the two independently-sized thread pools the scan core runs on: directory
//! fan-out and hashing. Both are ordinary OS-thread pools — there is no async runtime here,
//! since every suspension point in the core (semaphore acquisition, bounded-channel send)
//! is natively blocking.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::types::Config;

/// Hashing threads are bound in practice by the descriptor semaphore regardless of pool
/// size, so the pool itself only needs enough threads to keep that semaphore saturated.
pub fn build_hashing_pool(config: &Config) -> Result<ThreadPool, ThreadPoolBuildError> {
    let threads = config.descriptor_limit.min(rayon::current_num_threads() * 4).max(1);
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("dupescan-hash-{i}"))
        .build()
}

/// Sized directly from `Config::directory_parallelism`; directory enumeration is bound by
/// per-directory seek latency and VFS locking, not CPU, so this pool is deliberately
/// independent of the hashing pool above.
pub fn build_directory_pool(config: &Config) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(config.directory_parallelism.max(1))
        .thread_name(|i| format!("dupescan-walk-{i}"))
        .build()
}

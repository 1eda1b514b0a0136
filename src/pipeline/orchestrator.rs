//! `Scanner`: the public orchestration glue. Spawns the walker and hashing stages, drains
//! their output into a fresh `Index`, and returns it once the scan completes or is
//! cancelled.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;

use crate::cancel::CancellationToken;
use crate::engine::buffer_pool::BufferPool;
use crate::engine::parallel::{build_directory_pool, build_hashing_pool};
use crate::engine::semaphore::CountingSemaphore;
use crate::engine::tools::HardlinkTracker;
use crate::index::Index;
use crate::pipeline::context::{HashContext, SkipCounters, WalkContext};
use crate::pipeline::error_handler::log_skip_breakdown;
use crate::pipeline::walk::{hashing_worker_loop, walk_root};
use crate::types::Config;

pub struct Scanner {
    config: Config,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        Scanner { config }
    }

    /// Run one scan to completion (or until `cancel` fires) and return its `Index`, closed.
    /// Blocks the calling thread; callers that need to observe progress concurrently should
    /// call this from its own thread.
    pub fn scan(&self, cancel: CancellationToken) -> Index {
        let (candidates_tx, candidates_rx) = bounded(self.config.channel_capacity);
        let (descriptors_tx, descriptors_rx) = bounded(self.config.channel_capacity);
        let skips = Arc::new(SkipCounters::new());

        let walk_ctx = Arc::new(WalkContext {
            config: self.config.clone(),
            directory_permits: CountingSemaphore::new(self.config.directory_parallelism),
            hardlinks: HardlinkTracker::new(),
            cancel: cancel.clone(),
            skips: Arc::clone(&skips),
            candidates: candidates_tx,
        });

        let hash_ctx = Arc::new(HashContext {
            algorithm: self.config.hash_algorithm,
            descriptor_permits: CountingSemaphore::new(self.config.descriptor_limit),
            buffers: BufferPool::new(),
            cancel: cancel.clone(),
            skips: Arc::clone(&skips),
            descriptors: descriptors_tx,
        });

        let walk_handle = {
            let config = self.config.clone();
            let walk_ctx = Arc::clone(&walk_ctx);
            thread::spawn(move || {
                let pool = build_directory_pool(&config).expect("build directory thread pool");
                pool.scope(|scope| {
                    for root in &config.roots {
                        walk_root(root.clone(), &walk_ctx, scope);
                    }
                });
                // Dropping the last Arc clone here closes `candidates` once every
                // directory-fan-out task above has also dropped its clone.
            })
        };

        let hash_handle = {
            let config = self.config.clone();
            let hash_ctx = Arc::clone(&hash_ctx);
            let candidates_rx = candidates_rx.clone();
            thread::spawn(move || {
                let pool = build_hashing_pool(&config).expect("build hashing thread pool");
                pool.scope(|scope| {
                    for _ in 0..pool.current_num_threads() {
                        let candidates_rx = candidates_rx.clone();
                        let hash_ctx = Arc::clone(&hash_ctx);
                        scope.spawn(move |_| hashing_worker_loop(candidates_rx, &hash_ctx));
                    }
                });
                // Same as above: the last Arc clone dropping here closes `descriptors`.
            })
        };

        drop(walk_ctx);
        drop(hash_ctx);
        drop(candidates_rx);

        let mut index = Index::new(self.config.hash_algorithm, self.config.min_duplicates);
        while let Ok(descriptor) = descriptors_rx.recv() {
            index.add(descriptor);
        }
        index.close();

        walk_handle.join().expect("walker thread panicked");
        hash_handle.join().expect("hashing thread panicked");

        let (permission, filtered, error) = skips.snapshot();
        index.set_skip_counts(permission, filtered, error);
        log_skip_breakdown(&index.summary());

        index
    }
}

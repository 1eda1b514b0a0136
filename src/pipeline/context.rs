//! Shared, read-only state threaded through the walker and hashing stages of one scan.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::cancel::CancellationToken;
use crate::engine::buffer_pool::BufferPool;
use crate::engine::semaphore::CountingSemaphore;
use crate::engine::tools::HardlinkTracker;
use crate::types::{Config, FileDescriptor, HashAlgorithm};

/// One path that survived filtering, queued for the hashing stage.
pub struct Candidate {
    pub path: PathBuf,
    pub size: u64,
}

/// Per-category counters for files the scan dropped without hashing. Incremented
/// concurrently from walker and hashing threads; folded into the `Index`'s `ScanSummary`
/// once the scan completes.
#[derive(Default)]
pub struct SkipCounters {
    permission: AtomicUsize,
    filtered: AtomicUsize,
    error: AtomicUsize,
}

impl SkipCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(&self) {
        self.permission.fetch_add(1, Ordering::Relaxed);
    }

    pub fn filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn error(&self) {
        self.error.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (usize, usize, usize) {
        (
            self.permission.load(Ordering::Relaxed),
            self.filtered.load(Ordering::Relaxed),
            self.error.load(Ordering::Relaxed),
        )
    }
}

/// Everything the directory-walk stage needs, shared by `Arc` across every fan-out task.
pub struct WalkContext {
    pub config: Config,
    pub directory_permits: CountingSemaphore,
    pub hardlinks: HardlinkTracker,
    pub cancel: CancellationToken,
    pub skips: Arc<SkipCounters>,
    pub candidates: Sender<Candidate>,
}

/// Everything a hashing worker thread needs.
pub struct HashContext {
    pub algorithm: HashAlgorithm,
    pub descriptor_permits: CountingSemaphore,
    pub buffers: BufferPool,
    pub cancel: CancellationToken,
    pub skips: Arc<SkipCounters>,
    pub descriptors: Sender<FileDescriptor>,
}

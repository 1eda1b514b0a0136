//! The content-addressed duplicate index: single writer during a scan, shared read-only
//! after [`Index::close`].

use std::collections::HashMap;

use crate::types::{Digest, DuplicateGroup, FileDescriptor, HashAlgorithm, ScanSummary};

/// Maps digest → group of paths sharing that digest. One consumer writes via [`Index::add`]
/// while the scan runs; after [`Index::close`] the index is read-only and safe to share
/// behind an `Arc` across many readers.
pub struct Index {
    algorithm: HashAlgorithm,
    min_duplicates: u32,
    groups: HashMap<Digest, DuplicateGroup>,
    total_files: usize,
    closed: bool,
    skipped_permission: usize,
    skipped_filtered: usize,
    skipped_error: usize,
}

impl Index {
    pub fn new(algorithm: HashAlgorithm, min_duplicates: u32) -> Self {
        Self {
            algorithm,
            min_duplicates,
            groups: HashMap::new(),
            total_files: 0,
            closed: false,
            skipped_permission: 0,
            skipped_filtered: 0,
            skipped_error: 0,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Append `descriptor`'s path to its digest's group and bump the file counter.
    ///
    /// # Panics
    /// Panics if the index has already been [`close`](Index::close)d — `add` after close is
    /// a caller bug, not a recoverable condition.
    pub fn add(&mut self, descriptor: FileDescriptor) {
        assert!(!self.closed, "Index::add called after close()");
        let group = self.groups.entry(descriptor.digest).or_default();
        group.member_size = descriptor.size;
        group.paths.push(descriptor.path);
        self.total_files += 1;
    }

    /// Record final skip counts gathered from the walker/hasher threads. Called once by the
    /// orchestrator after every producer has finished, since skip events are tallied on
    /// per-thread atomics during the scan rather than serialized through the single-writer
    /// `add` path.
    pub fn set_skip_counts(&mut self, permission: usize, filtered: usize, error: usize) {
        self.skipped_permission = permission;
        self.skipped_filtered = filtered;
        self.skipped_error = error;
    }

    /// Freeze the index. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn file_count(&self) -> usize {
        self.total_files
    }

    /// Groups meeting the configured `min_duplicates` threshold. Groups below it are kept
    /// in the index (future queries, different thresholds) but hidden here.
    pub fn groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups
            .values()
            .filter(move |g| g.is_duplicate(self.min_duplicates))
    }

    pub fn group_for(&self, digest: &Digest) -> Option<&DuplicateGroup> {
        self.groups.get(digest)
    }

    pub fn summary(&self) -> ScanSummary {
        let total_groups = self.groups().count();
        let reclaimable_bytes = self.groups().map(|g| g.reclaimable_bytes()).sum();
        ScanSummary {
            total_files: self.total_files,
            total_groups,
            reclaimable_bytes,
            skipped_permission: self.skipped_permission,
            skipped_filtered: self.skipped_filtered,
            skipped_error: self.skipped_error,
        }
    }
}

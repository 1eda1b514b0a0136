//! Deletes all-but-*k* members of each duplicate group. Parallel across groups (disjoint
//! paths by invariant), sequential within a group, never atomic.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::error::PruneError;
use crate::index::Index;
use crate::types::{DuplicateGroup, PruneReport};

/// `keep_count` must be ≥ 1. For every group at or above the index's duplicate threshold
/// with more than `keep_count` members, deletes every path after the first `keep_count` in
/// insertion order. An individual deletion failure is recorded and pruning continues; the
/// operation is never atomic.
pub fn prune(index: &Index, keep_count: u32) -> Result<PruneReport, PruneError> {
    if keep_count == 0 {
        return Err(PruneError::InvalidKeepCount);
    }

    let groups: Vec<&DuplicateGroup> = index.groups().collect();
    let (removed, errors): (Vec<Vec<PathBuf>>, Vec<Vec<(PathBuf, PruneError)>>) = groups
        .par_iter()
        .map(|group| prune_group(group, keep_count as usize))
        .unzip();

    Ok(PruneReport {
        removed: removed.into_iter().flatten().collect(),
        errors: errors.into_iter().flatten().collect(),
    })
}

fn prune_group(group: &DuplicateGroup, keep_count: usize) -> (Vec<PathBuf>, Vec<(PathBuf, PruneError)>) {
    let mut removed = Vec::new();
    let mut errors = Vec::new();

    for path in group.paths.iter().skip(keep_count) {
        if !path.exists() {
            errors.push((path.clone(), PruneError::Vanished(path.clone())));
            continue;
        }
        match std::fs::remove_file(path) {
            Ok(()) => removed.push(path.clone()),
            Err(source) => errors.push((
                path.clone(),
                PruneError::Delete {
                    path: path.clone(),
                    source,
                },
            )),
        }
    }

    (removed, errors)
}

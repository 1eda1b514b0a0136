//! Recursive, fan-out directory traversal and the hashing worker loop it feeds.

use std::fs::DirEntry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::engine::tools::{inode_key, is_hidden_name, passes_size_bounds};
use crate::pipeline::context::{Candidate, HashContext, WalkContext};

/// Traverse `root` and every subdirectory, sending one [`Candidate`] per surviving regular
/// file on `ctx.candidates`. Each subdirectory is fanned out as an independent task on
/// `scope`, so the whole tree is explored with `scope`'s pool providing the worker threads
/// and `ctx.directory_permits` providing the precise concurrency cap on `read_dir` calls.
pub fn walk_root(root: PathBuf, ctx: &Arc<WalkContext>, scope: &rayon::Scope<'_>) {
    let ctx = Arc::clone(ctx);
    scope.spawn(move |scope| walk_dir(root, &ctx, scope));
}

fn walk_dir(dir: PathBuf, ctx: &Arc<WalkContext>, scope: &rayon::Scope<'_>) {
    if ctx.cancel.is_cancelled() {
        return;
    }

    let entries = {
        let Some(_permit) = ctx.directory_permits.acquire(&ctx.cancel) else {
            return;
        };
        match std::fs::read_dir(&dir) {
            Ok(read_dir) => read_dir.collect::<Vec<_>>(),
            Err(_) => {
                ctx.skips.permission();
                log::warn!("cannot read directory {}", dir.display());
                return;
            }
        }
    };

    for entry in entries {
        if ctx.cancel.is_cancelled() {
            return;
        }
        match entry {
            Ok(entry) => visit_entry(entry, ctx, scope),
            Err(_) => ctx.skips.permission(),
        }
    }
}

fn visit_entry(entry: DirEntry, ctx: &Arc<WalkContext>, scope: &rayon::Scope<'_>) {
    let path = entry.path();

    if ctx.config.skip_hidden && file_name_is_hidden(&path) {
        ctx.skips.filtered();
        return;
    }

    let link_metadata = match entry.metadata() {
        Ok(m) => m,
        Err(_) => {
            ctx.skips.permission();
            return;
        }
    };

    let is_symlink = link_metadata.is_symlink();
    if is_symlink && ctx.config.skip_symlinks {
        ctx.skips.filtered();
        return;
    }

    // A tested-but-not-followed symlink still needs its target's type and size; a file
    // opened later for hashing is opened with no-follow regardless (§4.1).
    let metadata = if is_symlink {
        match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(_) => {
                ctx.skips.permission();
                return;
            }
        }
    } else {
        link_metadata
    };

    if metadata.is_dir() {
        // Never descend through a symlinked directory, even with skip_symlinks disabled:
        // roots are canonicalized once at Config construction and traversal must not step
        // outside them through an alias.
        if is_symlink {
            ctx.skips.filtered();
            return;
        }
        let ctx = Arc::clone(ctx);
        scope.spawn(move |scope| walk_dir(path, &ctx, scope));
        return;
    }

    if !metadata.is_file() {
        ctx.skips.filtered();
        return;
    }

    let size = metadata.len();
    if size == 0 && ctx.config.skip_empty {
        ctx.skips.filtered();
        return;
    }
    if !passes_size_bounds(size, ctx.config.min_file_size, ctx.config.max_file_size) {
        ctx.skips.filtered();
        return;
    }

    if ctx.config.ignore_hardlinks && !ctx.hardlinks.first_sighting(inode_key(&metadata)) {
        ctx.skips.filtered();
        return;
    }

    if ctx.candidates.send(Candidate { path, size }).is_err() {
        // Receiver gone: the scan is shutting down.
    }
}

fn file_name_is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_hidden_name)
}

/// One hashing worker: pull candidates off `candidates` and turn survivors into
/// [`crate::FileDescriptor`]s on `ctx.descriptors`. Runs until the channel closes (the
/// walker has finished and dropped every `Sender` clone) or cancellation stops new opens.
pub fn hashing_worker_loop(candidates: Receiver<Candidate>, ctx: &HashContext) {
    while let Ok(Candidate { path, size }) = candidates.recv() {
        if ctx.cancel.is_cancelled() {
            break;
        }
        match crate::engine::hashing::build(
            &path,
            size,
            ctx.algorithm,
            &ctx.descriptor_permits,
            &ctx.buffers,
            &ctx.cancel,
        ) {
            Ok(Some(descriptor)) => {
                if ctx.descriptors.send(descriptor).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                log::warn!("failed to hash {}: {}", path.display(), err);
                ctx.skips.error();
            }
        }
    }
}

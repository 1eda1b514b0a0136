//! Error types for the scan core.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single file failed to become a [`crate::FileDescriptor`].
#[derive(Debug, Error)]
pub enum HashError {
    #[error("path is empty")]
    EmptyPath,
    #[error("failed to canonicalize {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read failed for {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected before any traversal happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one root is required")]
    NoRoots,
    #[error("min_duplicates must be >= 2, got {0}")]
    MinDuplicatesTooLow(u32),
    #[error("min_file_size ({min}) must be < max_file_size ({max})")]
    SizeBoundsInverted { min: u64, max: u64 },
    #[error("roots overlap: {child} is nested under {parent}")]
    OverlappingRoots { parent: PathBuf, child: PathBuf },
    #[error("root does not exist or is not a directory: {0}")]
    InvalidRoot(PathBuf),
}

/// Per-path failure while deleting duplicates.
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("keep_count must be >= 1")]
    InvalidKeepCount,
    #[error("{path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}: no longer present at deletion time")]
    Vanished(PathBuf),
}

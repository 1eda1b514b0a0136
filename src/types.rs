//! Public data types for the scan core: digests, descriptors, groups, and configuration.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::utils::config::{Defaults, Limits};
use crate::utils::fd_limit;

/// Supported content-hash families. The algorithm is tracked by the [`crate::Index`] that
/// produced a scan, never encoded in the digest bytes themselves — two indexes built with
/// different algorithms must never be compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

/// Fixed 32-byte content fingerprint. Compared and hashed as raw bytes; hex rendering is a
/// presentation concern layered on top via [`Digest::to_hex`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    pub fn to_hex(self) -> String {
        let mut s = String::with_capacity(64);
        for byte in self.0 {
            s.push_str(&format!("{byte:02x}"));
        }
        s
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }
}

/// Immutable result of hashing one file. Built by the hashing stage, consumed by the
/// [`crate::Index`], never mutated afterward.
#[derive(Clone, Debug)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub size: u64,
    pub digest: Digest,
}

/// A digest plus the insertion-ordered paths that share it. Insertion order is the order
/// producers delivered the path on the channel, and becomes the default "keeper" ordering
/// for [`crate::prune`].
#[derive(Clone, Debug, Default)]
pub struct DuplicateGroup {
    pub paths: Vec<PathBuf>,
    pub member_size: u64,
}

impl DuplicateGroup {
    pub fn is_duplicate(&self, min_duplicates: u32) -> bool {
        self.paths.len() >= min_duplicates as usize
    }

    pub fn reclaimable_bytes(&self) -> u64 {
        self.paths.len().saturating_sub(1) as u64 * self.member_size
    }
}

/// Read-only snapshot produced once a scan's [`crate::Index`] is closed.
#[derive(Clone, Debug, Default)]
pub struct ScanSummary {
    pub total_files: usize,
    pub total_groups: usize,
    pub reclaimable_bytes: u64,
    pub skipped_permission: usize,
    pub skipped_filtered: usize,
    pub skipped_error: usize,
}

/// Small, `Default`-able set of overrides meant for library embedding. Every field left
/// `None` falls back to the platform-tuned default applied by [`Config::new`]. This is the
/// lib-facing half of the config split; the CLI builds the same [`Config`] from parsed
/// arguments through the same entry point.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    pub skip_empty: Option<bool>,
    pub skip_symlinks: Option<bool>,
    pub skip_hidden: Option<bool>,
    pub min_file_size: Option<u64>,
    pub max_file_size: Option<u64>,
    pub min_duplicates: Option<u32>,
    pub hash_algorithm: Option<HashAlgorithm>,
    pub descriptor_limit: Option<usize>,
    pub directory_parallelism: Option<usize>,
    pub channel_capacity: Option<usize>,
    pub ignore_hardlinks: Option<bool>,
}

/// Fully-resolved, immutable configuration consumed by the scan core. Construct via
/// [`Config::new`], which validates roots and numeric bounds up front so a scan never has
/// to fail loudly partway through.
#[derive(Clone, Debug)]
pub struct Config {
    pub roots: Vec<PathBuf>,
    pub skip_empty: bool,
    pub skip_symlinks: bool,
    pub skip_hidden: bool,
    pub min_file_size: u64,
    pub max_file_size: u64,
    pub min_duplicates: u32,
    pub hash_algorithm: HashAlgorithm,
    pub descriptor_limit: usize,
    pub directory_parallelism: usize,
    pub channel_capacity: usize,
    pub ignore_hardlinks: bool,
}

impl Config {
    /// Resolve `options` against platform-tuned defaults and validate `roots`. Rejects
    /// empty root lists, nested (overlapping) roots, inverted size bounds, and
    /// `min_duplicates < 2` before any traversal begins.
    pub fn new(roots: Vec<PathBuf>, options: ScanOptions) -> Result<Config, ConfigError> {
        if roots.is_empty() {
            return Err(ConfigError::NoRoots);
        }

        let canonical_roots = canonicalize_roots(&roots)?;
        reject_overlaps(&canonical_roots)?;

        let min_duplicates = options.min_duplicates.unwrap_or(Defaults::MIN_DUPLICATES);
        if min_duplicates < 2 {
            return Err(ConfigError::MinDuplicatesTooLow(min_duplicates));
        }

        let min_file_size = options.min_file_size.unwrap_or(Defaults::MIN_FILE_SIZE);
        let max_file_size = options.max_file_size.unwrap_or(Defaults::MAX_FILE_SIZE);
        if min_file_size >= max_file_size {
            return Err(ConfigError::SizeBoundsInverted {
                min: min_file_size,
                max: max_file_size,
            });
        }

        Ok(Config {
            roots: canonical_roots,
            skip_empty: options.skip_empty.unwrap_or(true),
            skip_symlinks: options.skip_symlinks.unwrap_or(true),
            skip_hidden: options.skip_hidden.unwrap_or(true),
            min_file_size,
            max_file_size,
            min_duplicates,
            hash_algorithm: options.hash_algorithm.unwrap_or_default(),
            descriptor_limit: options
                .descriptor_limit
                .unwrap_or_else(fd_limit::default_descriptor_limit)
                .clamp(Limits::DESCRIPTOR_FLOOR, Limits::DESCRIPTOR_CEILING),
            directory_parallelism: options
                .directory_parallelism
                .unwrap_or_else(Defaults::directory_parallelism)
                .min(Limits::DIRECTORY_PARALLELISM_CEILING),
            channel_capacity: options
                .channel_capacity
                .unwrap_or(Defaults::CHANNEL_CAPACITY),
            ignore_hardlinks: options.ignore_hardlinks.unwrap_or(false),
        })
    }
}

fn canonicalize_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>, ConfigError> {
    roots
        .iter()
        .map(|root| {
            root.canonicalize()
                .map_err(|_| ConfigError::InvalidRoot(root.clone()))
        })
        .collect()
}

fn reject_overlaps(roots: &[PathBuf]) -> Result<(), ConfigError> {
    for (i, a) in roots.iter().enumerate() {
        for (j, b) in roots.iter().enumerate() {
            if i != j && b.starts_with(a) {
                return Err(ConfigError::OverlappingRoots {
                    parent: a.clone(),
                    child: b.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Outcome of [`crate::prune`]: successfully removed paths and per-path failures.
#[derive(Debug, Default)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, crate::error::PruneError)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_hex_round_trips_length() {
        let d = Digest([0xab; 32]);
        assert_eq!(d.to_hex().len(), 64);
        assert!(d.to_hex().starts_with("abab"));
    }

    #[test]
    fn duplicate_group_threshold() {
        let g = DuplicateGroup {
            paths: vec![PathBuf::from("a"), PathBuf::from("b")],
            member_size: 10,
        };
        assert!(g.is_duplicate(2));
        assert!(!g.is_duplicate(3));
        assert_eq!(g.reclaimable_bytes(), 10);
    }

    #[test]
    fn config_rejects_empty_roots() {
        let err = Config::new(vec![], ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoRoots));
    }

    #[test]
    fn config_rejects_low_min_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ScanOptions {
            min_duplicates: Some(1),
            ..Default::default()
        };
        let err = Config::new(vec![dir.path().to_path_buf()], opts).unwrap_err();
        assert!(matches!(err, ConfigError::MinDuplicatesTooLow(1)));
    }

    #[test]
    fn config_rejects_overlapping_roots() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let err =
            Config::new(vec![dir.path().to_path_buf(), sub], ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::OverlappingRoots { .. }));
    }

    #[test]
    fn config_rejects_inverted_size_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ScanOptions {
            min_file_size: Some(100),
            max_file_size: Some(50),
            ..Default::default()
        };
        let err = Config::new(vec![dir.path().to_path_buf()], opts).unwrap_err();
        assert!(matches!(err, ConfigError::SizeBoundsInverted { .. }));
    }

    #[test]
    fn config_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::new(vec![dir.path().to_path_buf()], ScanOptions::default()).unwrap();
        assert_eq!(cfg.min_duplicates, 2);
        assert!(cfg.skip_hidden);
        assert!(cfg.skip_symlinks);
        assert!(cfg.skip_empty);
        assert_eq!(cfg.hash_algorithm, HashAlgorithm::Sha256);
    }
}

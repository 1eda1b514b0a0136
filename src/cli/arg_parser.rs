//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dupescan", version, about = "Find and optionally delete duplicate files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level logging.
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan one or more directories and report duplicate groups.
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Scan, then delete all but `--keep` paths from every duplicate group.
    Prune {
        #[command(flatten)]
        scan: ScanArgs,

        /// Number of copies to keep per duplicate group (insertion order).
        #[arg(long, default_value_t = 1)]
        keep: u32,
    },
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Directories to scan.
    #[arg(required = true)]
    pub roots: Vec<PathBuf>,

    /// Include zero-byte files.
    #[arg(long)]
    pub include_empty: bool,

    /// Follow symbolic links instead of skipping them.
    #[arg(long)]
    pub include_symlinks: bool,

    /// Include dotfiles and dot-directories.
    #[arg(long)]
    pub include_hidden: bool,

    /// Lower size bound in bytes (inclusive).
    #[arg(long)]
    pub min_file_size: Option<u64>,

    /// Upper size bound in bytes (exclusive).
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Minimum group size to report (must be ≥ 2).
    #[arg(long)]
    pub min_duplicates: Option<u32>,

    /// Hash function used to fingerprint file contents.
    #[arg(long, value_enum, default_value_t = HashAlgorithmArg::Sha256)]
    pub hash_algorithm: HashAlgorithmArg,

    /// Maximum number of files held open for hashing at once.
    #[arg(long)]
    pub descriptor_limit: Option<usize>,

    /// Maximum number of concurrent directory reads.
    #[arg(long)]
    pub directory_parallelism: Option<usize>,

    /// Collapse hard-link aliases of the same file to one path before hashing.
    #[arg(long)]
    pub ignore_hardlinks: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum HashAlgorithmArg {
    Sha256,
    Blake3,
}

impl From<HashAlgorithmArg> for crate::types::HashAlgorithm {
    fn from(value: HashAlgorithmArg) -> Self {
        match value {
            HashAlgorithmArg::Sha256 => crate::types::HashAlgorithm::Sha256,
            HashAlgorithmArg::Blake3 => crate::types::HashAlgorithm::Blake3,
        }
    }
}

impl ScanArgs {
    pub fn to_options(&self) -> crate::types::ScanOptions {
        crate::types::ScanOptions {
            skip_empty: Some(!self.include_empty),
            skip_symlinks: Some(!self.include_symlinks),
            skip_hidden: Some(!self.include_hidden),
            min_file_size: self.min_file_size,
            max_file_size: self.max_file_size,
            min_duplicates: self.min_duplicates,
            hash_algorithm: Some(self.hash_algorithm.into()),
            descriptor_limit: self.descriptor_limit,
            directory_parallelism: self.directory_parallelism,
            channel_capacity: None,
            ignore_hardlinks: Some(self.ignore_hardlinks),
        }
    }
}

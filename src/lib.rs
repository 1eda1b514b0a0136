//! Parallel duplicate file finder: a descriptor-bounded scan core with a content-addressed
//! index and a keeper-aware pruner.
//!
//! The public surface is small: build a [`Config`], hand it to a [`Scanner`], get back a
//! closed [`Index`] you can enumerate or feed to [`prune`].

pub mod cancel;
pub mod cli;
pub mod engine;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod pruner;
pub mod types;
pub mod utils;

pub use cancel::CancellationToken;
pub use error::{ConfigError, HashError, PruneError};
pub use index::Index;
pub use pipeline::Scanner;
pub use pruner::prune;
pub use types::{
    Config, Digest, DuplicateGroup, FileDescriptor, HashAlgorithm, PruneReport, ScanOptions,
    ScanSummary,
};

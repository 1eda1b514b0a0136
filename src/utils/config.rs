//! Tuning constants and defaults. One place to look when a number needs to change.

/// Defaults applied when a [`crate::ScanOptions`] field is left unset.
pub struct Defaults;

impl Defaults {
    pub const MIN_DUPLICATES: u32 = 2;
    pub const MIN_FILE_SIZE: u64 = 0;
    pub const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024;
    pub const CHANNEL_CAPACITY: usize = 4096;

    /// Directory fan-out is CPU-bound on directory-entry parsing, not disk bandwidth, so it
    /// scales with `rayon`'s worker count the same way the hashing stage does.
    pub fn directory_parallelism() -> usize {
        (rayon::current_num_threads() * 4).max(4)
    }
}

/// Hard floors and ceilings a resolved [`crate::Config`] is clamped to, regardless of what
/// a caller or the descriptor-limit probe suggests.
pub struct Limits;

impl Limits {
    pub const DESCRIPTOR_FLOOR: usize = 4;
    pub const DESCRIPTOR_CEILING: usize = 4096;
    pub const DIRECTORY_PARALLELISM_CEILING: usize = 128;
}

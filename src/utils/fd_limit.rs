//! File descriptor limit detection, used to pick a safe default for [`crate::Config::descriptor_limit`].

use crate::utils::config::Limits;

/// Fraction of the process FD limit to spend on hashing; leaves headroom for the walker's
/// own open directory handles and whatever else the embedding process is doing.
const FD_LIMIT_FRACTION: f64 = 0.5;

#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Platform-tuned default for [`crate::Config::descriptor_limit`]. Falls back to
/// [`Limits::DESCRIPTOR_CEILING`]'s midpoint when the platform exposes no rlimit.
pub fn default_descriptor_limit() -> usize {
    match max_open_fds() {
        Some(limit) => ((limit as f64 * FD_LIMIT_FRACTION) as usize).max(Limits::DESCRIPTOR_FLOOR),
        None => 256,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor_limit_is_at_least_the_floor() {
        assert!(default_descriptor_limit() >= Limits::DESCRIPTOR_FLOOR);
    }
}

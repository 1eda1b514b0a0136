//! Logs a breakdown of skipped files once a scan finishes draining.

use log::warn;

use crate::types::ScanSummary;

/// Print a one-line-per-category warning when any files were skipped. Called once by the
/// orchestrator after the Index is closed; recoverable per-file failures are never
/// propagated as errors (§7), only tallied here.
pub fn log_skip_breakdown(summary: &ScanSummary) {
    let total = summary.skipped_permission + summary.skipped_filtered + summary.skipped_error;
    if total == 0 {
        return;
    }
    warn!("skipped {total} paths during scan:");
    if summary.skipped_permission > 0 {
        warn!("  - permission denied: {}", summary.skipped_permission);
    }
    if summary.skipped_filtered > 0 {
        warn!("  - filtered out: {}", summary.skipped_filtered);
    }
    if summary.skipped_error > 0 {
        warn!("  - read/hash error: {}", summary.skipped_error);
    }
}

//! Thin glue between parsed arguments and the scan core: build a `Config`, run the
//! `Scanner`, print a plain-text summary, map the outcome to an exit code.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::cancel::CancellationToken;
use crate::cli::arg_parser::ScanArgs;
use crate::error::PruneError;
use crate::index::Index;
use crate::pipeline::Scanner;
use crate::pruner::prune;
use crate::types::Config;

/// Install a `Ctrl-C` handler that flips `cancel`. The scan core never touches signal
/// handling itself (§5); this is the only place in the crate that does.
fn install_ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || cancel.cancel()).context("install Ctrl-C handler")
}

fn run_scan(args: &ScanArgs) -> Result<(Index, CancellationToken)> {
    let config = Config::new(args.roots.clone(), args.to_options())?;
    let cancel = CancellationToken::new();
    install_ctrlc_handler(cancel.clone())?;

    let scanner = Scanner::new(config);
    let index = scanner.scan(cancel.clone());
    Ok((index, cancel))
}

fn print_summary(index: &Index) {
    let summary = index.summary();
    info!(
        "{}: {} files, {} duplicate groups, {} reclaimable",
        "scan complete".cyan(),
        summary.total_files,
        summary.total_groups,
        human_bytes(summary.reclaimable_bytes),
    );
    for group in index.groups() {
        println!("{}", human_bytes(group.member_size).yellow());
        for path in &group.paths {
            println!("  {}", path.display());
        }
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Runs a scan and prints its summary. Returns the process exit code: 0 success, 1 invalid
/// configuration, 130 cancelled by signal.
pub fn handle_scan(args: &ScanArgs) -> Result<i32> {
    let (index, cancel) = run_scan(args)?;
    print_summary(&index);
    Ok(if cancel.is_cancelled() { 130 } else { 0 })
}

/// Runs a scan, then deletes all but `keep` paths per duplicate group. Returns 0 success,
/// 1 invalid configuration, 2 if any deletion failed, 130 cancelled by signal.
pub fn handle_prune(args: &ScanArgs, keep: u32) -> Result<i32> {
    let (index, cancel) = run_scan(args)?;
    print_summary(&index);

    let report = match prune(&index, keep) {
        Ok(report) => report,
        Err(PruneError::InvalidKeepCount) => {
            log::error!("--keep must be >= 1");
            return Ok(1);
        }
        Err(other) => return Err(other.into()),
    };

    info!(
        "pruned {} files, {} errors",
        report.removed.len(),
        report.errors.len()
    );
    for (path, err) in &report.errors {
        log::warn!("{}: {err}", path.display());
    }

    if cancel.is_cancelled() {
        Ok(130)
    } else if !report.errors.is_empty() {
        Ok(2)
    } else {
        Ok(0)
    }
}

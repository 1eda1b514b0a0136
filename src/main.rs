//! dupescan CLI: scan directories for duplicate files and optionally prune them.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use dupescan::cli::{Cli, Commands, handle_prune, handle_scan};
use dupescan::utils::setup_logging;

fn main() -> ExitCode {
    let start_time = Instant::now();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Scan { scan } => handle_scan(scan),
        Commands::Prune { scan, keep } => handle_prune(scan, *keep),
    };

    log::debug!("total time: {:?}", start_time.elapsed());

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

//! End-to-end scenarios driven purely through the public API: build a `Config`, run a
//! `Scanner`, inspect or prune the resulting `Index`.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use dupescan::{CancellationToken, Config, ScanOptions, Scanner};

fn write_file(path: &Path, contents: &[u8]) {
    std::fs::File::create(path)
        .unwrap()
        .write_all(contents)
        .unwrap();
}

/// S4: pruning with `keep = 1` leaves exactly one survivor per duplicate group and removes
/// the rest.
#[test]
fn prune_keeping_one_survivor_per_group() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.bin", "b.bin", "c.bin"] {
        write_file(&dir.path().join(name), &[0x42; 64]);
    }
    write_file(&dir.path().join("unique.bin"), &[0x99; 64]);

    let config = Config::new(vec![dir.path().to_path_buf()], ScanOptions::default()).unwrap();
    let index = Scanner::new(config).scan(CancellationToken::new());

    assert_eq!(index.file_count(), 4);
    let groups: Vec<_> = index.groups().collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths.len(), 3);

    let report = dupescan::prune(&index, 1).unwrap();
    assert!(report.errors.is_empty());
    assert_eq!(report.removed.len(), 2);

    let survivors: Vec<_> = ["a.bin", "b.bin", "c.bin"]
        .iter()
        .filter(|name| dir.path().join(name).exists())
        .collect();
    assert_eq!(survivors.len(), 1);
    assert!(dir.path().join("unique.bin").exists());
}

/// S5: cancelling mid-scan returns promptly instead of running the traversal to completion,
/// and the returned index is still usable (closed, consistent counters).
#[test]
fn cancellation_mid_scan_returns_promptly() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..10_000 {
        write_file(&dir.path().join(format!("f{i}.bin")), &[(i % 256) as u8]);
    }

    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = Config::new(vec![dir.path().to_path_buf()], ScanOptions::default()).unwrap();
    let start = Instant::now();
    let index = Scanner::new(config).scan(cancel);
    let elapsed = start.elapsed();

    assert!(index.is_closed());
    assert!(
        index.file_count() <= 10_000,
        "cancelled scan must not report more files than exist"
    );
    assert!(
        elapsed < Duration::from_secs(20),
        "a scan cancelled before it starts must not run the full traversal"
    );
}

/// S6: a descriptor limit far below the file count still completes and accounts for every
/// file, bounded entirely by `descriptor_limit` rather than starving or deadlocking.
#[test]
fn descriptor_pressure_still_completes() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..1_000 {
        write_file(&dir.path().join(format!("f{i}.bin")), &[(i % 256) as u8]);
    }

    let opts = ScanOptions {
        descriptor_limit: Some(4),
        ..Default::default()
    };
    let config = Config::new(vec![dir.path().to_path_buf()], opts).unwrap();
    assert_eq!(config.descriptor_limit, 4);

    let index = Scanner::new(config).scan(CancellationToken::new());
    assert_eq!(index.file_count(), 1_000);
    // Every byte value 0..=255 repeats roughly four times across 1000 files, so duplicate
    // groups are expected; the point of this scenario is completion under pressure, not the
    // exact group shape.
    assert!(index.summary().total_files == 1_000);
}

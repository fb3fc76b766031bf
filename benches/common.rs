// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use sizeband::model::{RankedScan, ScanResult, SizedEntry};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Generate a ranked scan with N files spread over nested folders
pub fn generate_scan(num_files: usize) -> RankedScan {
    let dirs = ["src", "lib", "test", "pkg", "mod"];
    let mut scan = ScanResult::default();

    for i in 0..num_files {
        let depth = (i % 5) + 1;
        let folder: PathBuf = std::iter::once("/bench".to_string())
            .chain((0..depth).map(|d| format!("{}_{}", dirs[d], i / 1000)))
            .collect();
        let bytes = ((i * 7919) % 100_000) as u64;
        scan.files.push(SizedEntry::new(folder.join(format!("file_{}.rs", i)), bytes));
        scan.total_size += bytes;
    }

    // One folder entry per distinct parent, sizes derived from position
    let mut folders: Vec<PathBuf> = scan
        .files
        .iter()
        .filter_map(|e| e.path.parent().map(PathBuf::from))
        .collect();
    folders.sort();
    folders.dedup();
    for (i, folder) in folders.into_iter().enumerate() {
        let full = (i as u64 + 1) * 4096;
        scan.dirs_full.push(SizedEntry::new(folder.clone(), full));
        scan.dirs_pure.push(SizedEntry::new(folder, full / 2));
    }

    scan.rank()
}

/// Create a temporary folder tree with N small files
pub fn create_bench_tree(num_files: usize) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();

    for i in 0..num_files {
        let path = root.join(format!("dir_{}/sub_{}/file_{}.bin", i % 20, i % 7, i));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, vec![0u8; i % 512]).unwrap();
    }

    (dir, root)
}

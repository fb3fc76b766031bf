// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary folder to scan, with `files` as (relative path, size)
pub fn create_tree(files: &[(&str, usize)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    for (path, size) in files {
        write_file(&root, path, *size);
    }
    (dir, root)
}

/// Write a file of `size` bytes, creating parent folders as needed
pub fn write_file(root: &Path, rel: &str, size: usize) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, vec![b'x'; size]).unwrap();
}

/// Line `number` (1-based) of `text`
pub fn line(text: &str, number: usize) -> &str {
    text.lines().nth(number - 1).unwrap()
}

/// Quoted paths of the data rows between `start` and `end` lines (exclusive)
pub fn quoted_paths(text: &str, start: usize, end: usize) -> Vec<String> {
    text.lines()
        .skip(start)
        .take(end.saturating_sub(start + 1))
        .filter_map(|l| {
            let open = l.find('\'')?;
            let close = l.rfind('\'')?;
            (close > open).then(|| l[open + 1..close].to_string())
        })
        .collect()
}

use std::path::PathBuf;

/// A file or folder together with one of its byte sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedEntry {
    pub path: PathBuf,
    pub bytes: u64,
}

impl SizedEntry {
    pub fn new(path: impl Into<PathBuf>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Output of a directory walk, in discovery (post-order) order
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<SizedEntry>,
    /// Folder sizes including everything below them
    pub dirs_full: Vec<SizedEntry>,
    /// Folder sizes counting only the files directly inside them
    pub dirs_pure: Vec<SizedEntry>,
    /// Inclusive size of the scanned root
    pub total_size: u64,
    /// Number of recoverable traversal errors hit during the walk
    pub errors: usize,
}

impl ScanResult {
    /// Sort all three collections by size, largest first.
    ///
    /// The sort is stable, so equal sizes keep their discovery order.
    pub fn rank(mut self) -> RankedScan {
        for entries in [&mut self.files, &mut self.dirs_full, &mut self.dirs_pure] {
            entries.sort_by(|a, b| b.bytes.cmp(&a.bytes));
        }
        RankedScan {
            files: self.files,
            dirs_full: self.dirs_full,
            dirs_pure: self.dirs_pure,
            total_size: self.total_size,
        }
    }
}

/// A [`ScanResult`] whose collections are sorted by size descending
#[derive(Debug, Clone)]
pub struct RankedScan {
    files: Vec<SizedEntry>,
    dirs_full: Vec<SizedEntry>,
    dirs_pure: Vec<SizedEntry>,
    total_size: u64,
}

impl RankedScan {
    pub fn files(&self) -> &[SizedEntry] {
        &self.files
    }

    pub fn dirs_full(&self) -> &[SizedEntry] {
        &self.dirs_full
    }

    pub fn dirs_pure(&self) -> &[SizedEntry] {
        &self.dirs_pure
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}
